//! Error types for pdfmerger.
//!
//! Every failure in the merge pipeline is terminal for the run: nothing is
//! retried and no output file is written unless every input was processed.
//! Each variant carries the path or label it concerns so the diagnostic
//! printed by the CLI names the offending file.
//!
//! # Error Categories
//!
//! - **Input Errors**: missing files, wrong extension, empty directories
//! - **PDF Errors**: unreadable, corrupted, encrypted or empty documents
//! - **Pipeline Errors**: stamp rendering and document assembly failures
//! - **Output Errors**: missing output folder, no-clobber, write failures

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pdfmerger operations.
pub type Result<T> = std::result::Result<T, PdfMergerError>;

/// Main error type for pdfmerger operations.
#[derive(Debug, Error)]
pub enum PdfMergerError {
    /// An input path does not exist, is not a file, or is not a PDF.
    #[error("Invalid input: {}\n  Reason: {reason}", path.display())]
    InvalidInput {
        /// Offending input path.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },

    /// No input files were found or given.
    #[error("No PDF files to merge")]
    NoFilesToMerge,

    /// lopdf could not parse the file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// The file parsed but cannot be merged (empty file, no pages).
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// What is wrong with it.
        details: String,
    },

    /// The file is encrypted.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// The filename stamp could not be rendered.
    #[error("Failed to render stamp for '{label}': {reason}")]
    RenderError {
        /// Text that was being rendered.
        label: String,
        /// Underlying failure.
        reason: String,
    },

    /// Document assembly or page compositing failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Writing the outline failed.
    #[error("Failed to create bookmarks: {reason}")]
    BookmarkFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// The output folder does not exist.
    #[error("Output folder does not exist: {}", path.display())]
    OutputDirMissing {
        /// The folder that was requested.
        path: PathBuf,
    },

    /// Output file already exists and overwriting is disabled.
    #[error(
        "Output file already exists: {}\n  \
         Remove --no-clobber or choose a different output name",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Serializing or writing the merged document failed.
    #[error("Failed to write output file: {}\n  Reason: {source}", path.display())]
    WriteError {
        /// The path that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfMergerError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}

impl From<anyhow::Error> for PdfMergerError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfMergerError {
    /// Create an InvalidInput error.
    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create a RenderError.
    pub fn render(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RenderError {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a WriteError.
    pub fn write(path: PathBuf, source: io::Error) -> Self {
        Self::WriteError { path, source }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// The file or folder this error is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidInput { path, .. }
            | Self::FailedToLoadPdf { path, .. }
            | Self::CorruptedPdf { path, .. }
            | Self::EncryptedPdf { path }
            | Self::OutputDirMissing { path }
            | Self::OutputExists { path }
            | Self::WriteError { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput { .. } => 2,
            Self::NoFilesToMerge => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::OutputDirMissing { .. } => 5,
            Self::WriteError { .. } => 5,
            Self::Io { .. } => 5,
            Self::RenderError { .. } => 6,
            Self::MergeFailed { .. } => 6,
            Self::BookmarkFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Other { .. } => 1,
        }
    }
}
