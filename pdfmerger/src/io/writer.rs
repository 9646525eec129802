//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Output name normalization (`.pdf` appended when missing)
//! - Atomic writes (write to a sibling temp file, then rename)
//! - Optional stream compression
//! - Overwrite protection
//! - Write statistics
//!
//! A failed write never leaves a partial output file behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::io::writer::{PdfWriter, output_path};
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let path = output_path(Some(Path::new("out")), "merged");
//! let writer = PdfWriter::new();
//! writer.save(doc, &path).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::OverwriteMode;
use crate::error::{PdfMergerError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compress streams before writing.
    pub compress: bool,

    /// Drop unreachable objects and renumber the rest.
    pub optimize: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: false,
            optimize: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Append `.pdf` to `name` unless it already ends with it (any case).
pub fn ensure_pdf_extension(name: &str) -> String {
    if name.to_lowercase().ends_with(".pdf") {
        name.to_string()
    } else {
        format!("{name}.pdf")
    }
}

/// Build the output path from an optional folder and a file name.
///
/// Without a folder the name is taken relative to the current directory.
pub fn output_path(outfolder: Option<&Path>, outname: &str) -> PathBuf {
    let name = ensure_pdf_extension(outname);
    match outfolder {
        Some(folder) => folder.join(name),
        None => PathBuf::from(name),
    }
}

/// PDF writer with configurable behavior.
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self {
            options: WriteOptions::default(),
        }
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer that compresses streams.
    pub fn compressed() -> Self {
        Self {
            options: WriteOptions {
                compress: true,
                ..Default::default()
            },
        }
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// Returns `WriteError` naming the attempted path if the file cannot be
    /// created, written or renamed into place.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// The document is moved onto a blocking thread for serialization.
    ///
    /// # Arguments
    ///
    /// * `doc` - PDF document to save
    /// * `path` - Output file path
    ///
    /// # Errors
    ///
    /// Returns `WriteError` naming `path` on any I/O or serialization failure.
    /// The temporary file is removed when the write does not complete.
    pub async fn save_with_stats(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();
        let mut doc = doc;

        task::spawn_blocking(move || {
            let start = Instant::now();

            if options.compress {
                doc.compress();
            }

            if options.optimize {
                doc.prune_objects();
                doc.renumber_objects();
            }

            let write_path = if options.atomic {
                temp_path_for(&path_buf)
            } else {
                path_buf.clone()
            };

            let result = write_document(&mut doc, &write_path, options.buffer_size)
                .and_then(|()| {
                    if options.atomic {
                        std::fs::rename(&write_path, &path_buf)
                    } else {
                        Ok(())
                    }
                });

            if let Err(e) = result {
                let _ = std::fs::remove_file(&write_path);
                return Err(PdfMergerError::write(path_buf, e));
            }

            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);
            log::debug!("wrote {} bytes to {}", file_size, path_buf.display());

            Ok(WriteStatistics {
                write_time: start.elapsed(),
                file_size,
                output_path: path_buf,
                compressed: options.compress,
            })
        })
        .await
        .map_err(|e| PdfMergerError::other(format!("Write task failed: {e}")))?
    }

    /// Check the output path against the overwrite mode and its folder.
    ///
    /// # Errors
    ///
    /// Returns `OutputDirMissing` if the parent folder does not exist and
    /// `OutputExists` if the file exists under `NoClobber`.
    pub async fn check_output(&self, path: &Path, mode: OverwriteMode) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            let is_dir = tokio::fs::metadata(parent)
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false);
            if !is_dir {
                return Err(PdfMergerError::OutputDirMissing {
                    path: parent.to_path_buf(),
                });
            }
        }

        if mode == OverwriteMode::NoClobber && tokio::fs::metadata(path).await.is_ok() {
            return Err(PdfMergerError::output_exists(path.to_path_buf()));
        }

        Ok(())
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Sibling temp file next to the final output.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_document(doc: &mut Document, path: &Path, buffer_size: usize) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);
    doc.save_to(&mut writer).map_err(std::io::Error::other)?;
    writer.flush()
}
