//! Core PDF merging implementation.
//!
//! Inputs are processed strictly in order: each file is loaded, optionally
//! stamped with its label, and appended to the [`MergedDocument`]. The first
//! failure aborts the whole merge; nothing is written by this module.

use lopdf::Document;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{Config, StampOptions};
use crate::error::Result;
use crate::input::{self, InputEntry, InputSpec};
use crate::io::PdfReader;
use crate::merge::bookmarks::Bookmark;
use crate::merge::compositor::PageCompositor;
use crate::merge::document::MergedDocument;
use crate::stamp::Stamper;
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone, Serialize)]
pub struct MergeStatistics {
    /// Number of PDFs successfully merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total time taken for merge.
    pub merge_time: Duration,

    /// Time taken to load all PDFs.
    pub load_time: Duration,

    /// Total size of input files.
    pub input_size: u64,

    /// Number of bookmarks added.
    pub bookmarks_added: usize,

    /// Whether pages were stamped with their file labels.
    pub stamped: bool,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// What one input contributed to the merged document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Source path.
    pub path: PathBuf,
    /// Bookmark title and stamp text.
    pub label: String,
    /// Pages contributed.
    pub pages: usize,
    /// Zero-based index of the first contributed page.
    pub first_page: usize,
    /// Source file size in bytes.
    pub file_size: u64,
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document, outline included.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Per-input breakdown, in merge order.
    pub files: Vec<FileSummary>,

    /// Top-level outline entries.
    pub bookmarks: Vec<Bookmark>,
}

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    /// Reader for loading PDFs.
    reader: PdfReader,

    /// Places stamp overlays under source pages.
    compositor: PageCompositor,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            compositor: PageCompositor::new(),
        }
    }

    /// Resolve the configured inputs and merge them.
    ///
    /// This is the main entry point for merging operations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Inputs cannot be resolved (`InvalidInput`, `NoFilesToMerge`)
    /// - An input cannot be loaded
    /// - Stamping or assembly fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmerger::merge::Merger;
    /// # use pdfmerger::config::Config;
    /// # async fn example(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    /// let merger = Merger::new();
    /// let result = merger.merge(&config).await?;
    /// println!("Merged {} files into {} pages",
    ///          result.statistics.files_merged,
    ///          result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, config: &Config) -> Result<MergeResult> {
        let spec = input::resolve_for_output(&config.input, Some(&config.output)).await?;
        self.merge_spec(&spec, config.stamp.as_ref(), |_, _| {}).await
    }

    /// Merge an already resolved input list.
    ///
    /// `on_file` is called with the zero-based position and entry before
    /// each input is processed.
    ///
    /// # Errors
    ///
    /// Returns the first load, stamp or assembly error; later inputs are not
    /// touched.
    pub async fn merge_spec<F>(
        &self,
        spec: &InputSpec,
        stamp: Option<&StampOptions>,
        mut on_file: F,
    ) -> Result<MergeResult>
    where
        F: FnMut(usize, &InputEntry),
    {
        let merge_start = Instant::now();
        let stamper = stamp.copied().map(Stamper::new);

        let mut merged = MergedDocument::new();
        let mut files = Vec::with_capacity(spec.len());
        let mut load_time = Duration::ZERO;

        for (index, entry) in spec.iter().enumerate() {
            on_file(index, entry);

            let loaded = self.reader.load(&entry.path).await?;
            load_time += loaded.load_time;

            let document = match &stamper {
                Some(stamper) => {
                    log::info!("adding text to pages from {}", entry.path.display());
                    let overlay = stamper.render(&entry.label)?;
                    self.compositor.apply_stamp(&loaded.document, &overlay)?
                }
                None => loaded.document,
            };

            let first_page = merged.append(document, &entry.label)?;
            log::info!(
                "merged {} ({} page(s)) at page {}",
                entry.path.display(),
                loaded.page_count,
                first_page + 1
            );

            files.push(FileSummary {
                path: entry.path.clone(),
                label: entry.label.clone(),
                pages: loaded.page_count,
                first_page,
                file_size: loaded.file_size,
            });
        }

        let bookmarks = merged.bookmarks().to_vec();
        let total_pages = merged.page_count();
        let document = merged.into_document()?;

        let statistics = MergeStatistics {
            files_merged: files.len(),
            total_pages,
            merge_time: merge_start.elapsed(),
            load_time,
            input_size: files.iter().map(|f| f.file_size).sum(),
            bookmarks_added: bookmarks.len(),
            stamped: stamper.is_some(),
        };

        Ok(MergeResult {
            document,
            statistics,
            files,
            bookmarks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputSource;
    use crate::error::PdfMergerError;
    use lopdf::{Object, Stream, dictionary};
    use tempfile::TempDir;

    fn create_test_pdf(dir: &TempDir, name: &str, pages: usize) -> PathBuf {
        let mut doc = Document::with_version("1.4");
        let catalog_id = doc.new_object_id();
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for i in 0..pages {
            let content = format!("BT /F1 12 Tf 72 720 Td ({name} {i}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }
        doc.objects.insert(
            pages_id,
            dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => pages as i64 }.into(),
        );
        doc.objects.insert(
            catalog_id,
            dictionary! { "Type" => "Catalog", "Pages" => pages_id }.into(),
        );
        doc.trailer.set("Root", catalog_id);

        let path = dir.path().join(name);
        doc.save(&path).unwrap();
        path
    }

    fn files_config(inputs: Vec<PathBuf>, dir: &TempDir) -> Config {
        Config::new(InputSource::Files(inputs), dir.path().join("out.pdf"))
    }

    #[tokio::test]
    async fn test_merge_two_pdfs() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_test_pdf(&temp_dir, "a.pdf", 2);
        let b = create_test_pdf(&temp_dir, "b.pdf", 1);

        let result = Merger::new()
            .merge(&files_config(vec![a, b], &temp_dir))
            .await
            .unwrap();

        assert_eq!(result.statistics.files_merged, 2);
        assert_eq!(result.statistics.total_pages, 3);
        assert_eq!(result.statistics.bookmarks_added, 2);
        assert!(!result.statistics.stamped);
        assert_eq!(result.document.get_pages().len(), 3);
        assert_eq!(
            result.bookmarks,
            vec![Bookmark::new("a", 0), Bookmark::new("b", 2)]
        );
        assert_eq!(result.files[1].first_page, 2);
        assert_eq!(result.files[1].pages, 1);
    }

    #[tokio::test]
    async fn test_merge_with_stamp() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_test_pdf(&temp_dir, "a.pdf", 2);

        let config = files_config(vec![a], &temp_dir).with_stamp(StampOptions::default());
        let result = Merger::new().merge(&config).await.unwrap();

        assert!(result.statistics.stamped);
        assert_eq!(result.statistics.total_pages, 2);
    }

    #[tokio::test]
    async fn test_merge_reports_progress_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_test_pdf(&temp_dir, "a.pdf", 1);
        let b = create_test_pdf(&temp_dir, "b.pdf", 1);
        let spec = input::resolve_files(&[b, a]).await.unwrap();

        let mut seen = Vec::new();
        Merger::new()
            .merge_spec(&spec, None, |index, entry| {
                seen.push((index, entry.label.clone()))
            })
            .await
            .unwrap();

        assert_eq!(seen, vec![(0, "b".to_string()), (1, "a".to_string())]);
    }

    #[tokio::test]
    async fn test_merge_stops_at_first_bad_file() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_test_pdf(&temp_dir, "a.pdf", 1);
        let bad = temp_dir.path().join("bad.pdf");
        std::fs::write(&bad, b"not a pdf").unwrap();
        let spec = input::resolve_files(&[a, bad.clone()]).await.unwrap();

        let err = Merger::new()
            .merge_spec(&spec, None, |_, _| {})
            .await
            .unwrap_err();
        assert_eq!(err.path(), Some(bad.as_path()));
    }

    #[tokio::test]
    async fn test_merge_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let config = files_config(vec![temp_dir.path().join("missing.pdf")], &temp_dir);

        let result = Merger::new().merge(&config).await;
        assert!(matches!(result, Err(PdfMergerError::InvalidInput { .. })));
    }

    #[test]
    fn test_merge_statistics() {
        let stats = MergeStatistics {
            files_merged: 3,
            total_pages: 15,
            merge_time: Duration::from_secs(2),
            load_time: Duration::from_secs(1),
            input_size: 1024 * 1024,
            bookmarks_added: 3,
            stamped: true,
        };

        assert_eq!(stats.format_input_size(), "1.00 MB");
    }
}
