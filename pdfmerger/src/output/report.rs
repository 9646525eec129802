//! Machine-readable run report.
//!
//! Printed to stdout with `--json` in place of the human summary.

use serde::Serialize;
use std::path::PathBuf;

use crate::config::{Config, StampOptions};
use crate::error::{PdfMergerError, Result};
use crate::io::WriteStatistics;
use crate::merge::{Bookmark, FileSummary, MergeStatistics};

/// Summary of one merge run.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Where the merged PDF was (or would have been) written.
    pub output: PathBuf,
    /// True when nothing was written.
    pub dry_run: bool,
    /// Inputs in merge order.
    pub files: Vec<FileSummary>,
    /// Pages in the merged document.
    pub total_pages: usize,
    /// Top-level outline entries.
    pub bookmarks: Vec<Bookmark>,
    /// Stamp layout, when stamping was enabled.
    pub stamp: Option<StampOptions>,
    /// Size of the written file in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<u64>,
    /// Whether streams were compressed on write.
    pub compressed: bool,
    /// Wall time of the merge step in milliseconds.
    pub merge_time_ms: u64,
}

impl MergeReport {
    /// Build a report from a finished merge and, unless this was a dry run,
    /// the write that followed it.
    pub fn new(
        config: &Config,
        statistics: &MergeStatistics,
        files: &[FileSummary],
        bookmarks: &[Bookmark],
        written: Option<&WriteStatistics>,
    ) -> Self {
        Self {
            output: written
                .map(|stats| stats.output_path.clone())
                .unwrap_or_else(|| config.output.clone()),
            dry_run: written.is_none(),
            files: files.to_vec(),
            total_pages: statistics.total_pages,
            bookmarks: bookmarks.to_vec(),
            stamp: config.stamp,
            output_size: written.map(|stats| stats.file_size),
            compressed: written.is_some_and(|stats| stats.compressed),
            merge_time_ms: u64::try_from(statistics.merge_time.as_millis())
                .unwrap_or(u64::MAX),
        }
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `Other` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PdfMergerError::other(format!("Failed to serialize report: {e}")))
    }
}
