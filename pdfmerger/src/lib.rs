//! pdfmerger - Merge PDF files into one bookmarked document.
//!
//! This library concatenates PDF files in a fixed order and adds one
//! top-level bookmark per input at the first page that input contributed.
//! Optionally every page is stamped with its source file's name. It
//! supports:
//!
//! - Explicit file lists or whole directories as input
//! - Bookmarks titled after each input file
//! - Footer or centered label stamps on a configurable paper size
//! - Atomic output writes
//!
//! # Examples
//!
//! ## Basic Merge
//!
//! ```no_run
//! use pdfmerger::config::{Config, InputSource};
//! use pdfmerger::io::PdfWriter;
//! use pdfmerger::merge;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new(
//!     InputSource::Files(vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]),
//!     "merged.pdf",
//! );
//!
//! let (document, stats) = merge::merge_pdfs(&config).await?;
//! println!("Created {} page document", stats.total_pages);
//! PdfWriter::new().save(document, &config.output).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Stamping
//!
//! ```no_run
//! use pdfmerger::config::{Config, InputSource, StampOptions, StampPosition};
//! use pdfmerger::merge::Merger;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let stamp = StampOptions {
//!     position: StampPosition::Center,
//!     ..Default::default()
//! };
//! let config = Config::new(InputSource::Directory(PathBuf::from("scans")), "scans.pdf")
//!     .with_stamp(stamp);
//!
//! let result = Merger::new().merge(&config).await?;
//! for bookmark in &result.bookmarks {
//!     println!("{} -> page {}", bookmark.title, bookmark.page_index + 1);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod input;
pub mod io;
pub mod merge;
pub mod output;
pub mod stamp;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfMergerError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
