//! PDF reading and loading operations.
//!
//! Files are read with `tokio::fs` and parsed in memory with lopdf. A loaded
//! document is guaranteed to have at least one page; empty, encrypted and
//! unparsable files are rejected with an error naming the path.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("a.pdf")).await?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfMergerError, Result};
use crate::utils::format_file_size;

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to read and parse the file.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF reader.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the PDF file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File cannot be read (`InvalidInput`)
    /// - File is empty or has no pages (`CorruptedPdf`)
    /// - PDF is encrypted (`EncryptedPdf`)
    /// - File is not a valid PDF (`FailedToLoadPdf`)
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            PdfMergerError::invalid_input(path_buf.clone(), format!("cannot read file: {e}"))
        })?;

        if bytes.is_empty() {
            return Err(PdfMergerError::corrupted_pdf(path_buf, "File is empty"));
        }

        let file_size = bytes.len() as u64;

        let document = Document::load_mem(&bytes).map_err(|e| {
            let err_msg = e.to_string();
            let lower = err_msg.to_lowercase();
            if lower.contains("encrypt") || lower.contains("password") {
                PdfMergerError::encrypted_pdf(path_buf.clone())
            } else {
                PdfMergerError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        if document.trailer.has(b"Encrypt") {
            return Err(PdfMergerError::encrypted_pdf(path_buf));
        }

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(PdfMergerError::corrupted_pdf(path_buf, "PDF has no pages"));
        }

        let load_time = start.elapsed();
        log::debug!(
            "loaded {} ({} pages, {} bytes) in {:?}",
            path.display(),
            page_count,
            file_size,
            load_time
        );

        Ok(LoadedPdf {
            document,
            path: path_buf,
            page_count,
            load_time,
            file_size,
        })
    }
}
