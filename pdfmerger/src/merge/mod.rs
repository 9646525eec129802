//! PDF merging operations.
//!
//! This module provides the core merging functionality with:
//! - Document concatenation in input order
//! - One top-level bookmark per input
//! - Optional label stamps layered under each page
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::config::{Config, InputSource};
//! use pdfmerger::merge::Merger;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new(
//!     InputSource::Files(vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]),
//!     "merged.pdf",
//! );
//!
//! let merger = Merger::new();
//! let result = merger.merge(&config).await?;
//! println!("Merged {} pages", result.statistics.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod bookmarks;
pub mod compositor;
pub mod document;
pub mod merger;
pub mod pages;

pub use bookmarks::{Bookmark, BookmarkManager};
pub use compositor::PageCompositor;
pub use document::MergedDocument;
pub use merger::{FileSummary, MergeResult, MergeStatistics, Merger};
pub use pages::PageExtractor;

use crate::config::Config;
use crate::error::Result;
use lopdf::Document;

/// Merge the configured inputs.
///
/// Convenience function that creates a merger and performs the merge.
///
/// # Errors
///
/// Returns an error if any merge step fails.
///
/// # Examples
///
/// ```no_run
/// use pdfmerger::merge::merge_pdfs;
/// use pdfmerger::config::Config;
///
/// # async fn example(config: Config) -> Result<(), Box<dyn std::error::Error>> {
/// let (document, stats) = merge_pdfs(&config).await?;
/// println!("Created {} page document", stats.total_pages);
/// # Ok(())
/// # }
/// ```
pub async fn merge_pdfs(config: &Config) -> Result<(Document, MergeStatistics)> {
    let merger = Merger::new();
    let result = merger.merge(config).await?;
    Ok((result.document, result.statistics))
}
