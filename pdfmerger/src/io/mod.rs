//! I/O operations for pdfmerger.
//!
//! This module handles all file I/O operations including:
//! - Loading PDF documents from disk
//! - Writing the merged PDF atomically
//! - Output path normalization
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::io::{PdfReader, PdfWriter};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(&PathBuf::from("input.pdf")).await?;
//!
//! let writer = PdfWriter::new();
//! writer.save(loaded.document, &PathBuf::from("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics, ensure_pdf_extension, output_path};

use crate::error::Result;
use lopdf::Document;
use std::path::Path;

/// Load a PDF document from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid PDF, or has
/// no pages.
pub async fn load_pdf(path: &Path) -> Result<Document> {
    let reader = PdfReader::new();
    let loaded = reader.load(path).await?;
    Ok(loaded.document)
}

/// Save a PDF document to a file with default write options.
///
/// # Errors
///
/// Returns `WriteError` if the file cannot be written.
pub async fn save_pdf(doc: Document, path: &Path) -> Result<()> {
    PdfWriter::new().save(doc, path).await
}
