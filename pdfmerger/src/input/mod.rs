//! Input resolution for pdfmerger.
//!
//! Turns the configured [`InputSource`] into an ordered [`InputSpec`]:
//! - Explicit file lists keep the caller's order
//! - Directories contribute every `*.pdf` file, sorted by file name
//! - Every entry gets a label (file name without extension) that becomes
//!   its bookmark title and stamp text
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::config::InputSource;
//! use pdfmerger::input;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = input::resolve(&InputSource::Directory(PathBuf::from("docs"))).await?;
//! for entry in spec.iter() {
//!     println!("{} -> {}", entry.path.display(), entry.label);
//! }
//! # Ok(())
//! # }
//! ```

use glob::{MatchOptions, Pattern};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::InputSource;
use crate::error::{PdfMergerError, Result};

/// One input file and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputEntry {
    /// Path to the PDF.
    pub path: PathBuf,
    /// Bookmark title and stamp text.
    pub label: String,
}

impl InputEntry {
    /// Create an entry, deriving the label from the path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = label_for(&path);
        Self { path, label }
    }
}

/// Ordered list of inputs. Merge order and bookmark order follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputSpec {
    entries: Vec<InputEntry>,
}

impl InputSpec {
    /// Number of inputs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no inputs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in merge order.
    pub fn iter(&self) -> std::slice::Iter<'_, InputEntry> {
        self.entries.iter()
    }

    /// Borrow the entries.
    pub fn entries(&self) -> &[InputEntry] {
        &self.entries
    }
}

impl From<Vec<InputEntry>> for InputSpec {
    fn from(entries: Vec<InputEntry>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for InputSpec {
    type Item = InputEntry;
    type IntoIter = std::vec::IntoIter<InputEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a InputSpec {
    type Item = &'a InputEntry;
    type IntoIter = std::slice::Iter<'a, InputEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Resolve an input source into an ordered spec.
///
/// # Errors
///
/// See [`resolve_files`] and [`resolve_directory`].
pub async fn resolve(source: &InputSource) -> Result<InputSpec> {
    resolve_for_output(source, None).await
}

/// Resolve an input source for a run that will write `output`.
///
/// A directory listing never includes `output` itself, so writing the
/// merged file into the input folder does not feed it into the next run.
///
/// # Errors
///
/// See [`resolve_files`] and [`resolve_directory`].
pub async fn resolve_for_output(source: &InputSource, output: Option<&Path>) -> Result<InputSpec> {
    match source {
        InputSource::Files(paths) => resolve_files(paths).await,
        InputSource::Directory(dir) => resolve_directory(dir, output).await,
    }
}

/// Validate an explicit list of files, keeping their order.
///
/// # Errors
///
/// Returns `NoFilesToMerge` for an empty list, and `InvalidInput` naming the
/// first path that does not exist, is not a regular file, or does not have
/// a `.pdf` extension.
pub async fn resolve_files(paths: &[PathBuf]) -> Result<InputSpec> {
    if paths.is_empty() {
        return Err(PdfMergerError::NoFilesToMerge);
    }

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        check_file(path).await?;
        entries.push(InputEntry::new(path.clone()));
    }

    log::debug!("resolved {} explicit input(s)", entries.len());
    Ok(InputSpec::from(entries))
}

/// List every PDF in `dir`, sorted by file name.
///
/// The extension match is case-insensitive and only regular files are
/// considered; subdirectories are not searched. A file that resolves to
/// the same location as `exclude` is skipped.
///
/// # Errors
///
/// Returns `InvalidInput` if `dir` is not an existing directory, and
/// `NoFilesToMerge` if it holds no PDF files.
pub async fn resolve_directory(dir: &Path, exclude: Option<&Path>) -> Result<InputSpec> {
    let metadata = tokio::fs::metadata(dir)
        .await
        .map_err(|_| PdfMergerError::invalid_input(dir, "input directory does not exist"))?;
    if !metadata.is_dir() {
        return Err(PdfMergerError::invalid_input(dir, "not a directory"));
    }

    let dir_str = dir
        .to_str()
        .ok_or_else(|| PdfMergerError::invalid_input(dir, "directory path is not valid UTF-8"))?;
    let pattern = format!("{}/*.pdf", Pattern::escape(dir_str));
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let matches =
        glob::glob_with(&pattern, options).map_err(|err| PdfMergerError::other(err.to_string()))?;

    let excluded = match exclude {
        Some(path) => canonical_location(path).await,
        None => None,
    };

    let mut paths = Vec::new();
    for entry in matches {
        let path = entry.map_err(|err| PdfMergerError::other(err.to_string()))?;
        let is_file = tokio::fs::metadata(&path)
            .await
            .is_ok_and(|metadata| metadata.is_file());
        if !is_file {
            continue;
        }
        if excluded.is_some() && canonical_location(&path).await == excluded {
            log::debug!("skipping output file {}", path.display());
            continue;
        }
        paths.push(path);
    }

    if paths.is_empty() {
        return Err(PdfMergerError::NoFilesToMerge);
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!("found {} PDF(s) in {}", paths.len(), dir.display());

    Ok(InputSpec::from(
        paths.into_iter().map(InputEntry::new).collect::<Vec<_>>(),
    ))
}

/// Derive the display label for a file: its name without the last extension.
pub fn label_for(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// True when the path ends in `.pdf`, ignoring case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Absolute, symlink-free location of `path`.
///
/// For a file that does not exist yet, the parent folder is canonicalized
/// and the file name appended.
async fn canonical_location(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = tokio::fs::canonicalize(path).await {
        return Some(resolved);
    }

    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    tokio::fs::canonicalize(parent)
        .await
        .ok()
        .map(|parent| parent.join(name))
}

async fn check_file(path: &Path) -> Result<()> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|_| PdfMergerError::invalid_input(path, "file does not exist"))?;

    if !metadata.is_file() {
        return Err(PdfMergerError::invalid_input(path, "not a regular file"));
    }

    if !has_pdf_extension(path) {
        return Err(PdfMergerError::invalid_input(
            path,
            "incorrect file format, expected a .pdf file",
        ));
    }

    Ok(())
}
