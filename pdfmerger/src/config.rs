//! Configuration module for pdfmerger.
//!
//! This module holds the normalized settings that drive a merge run:
//! - Where the inputs come from (explicit files or a directory)
//! - Whether and how pages are stamped with their file name
//! - Page size and orientation tables for the stamp
//! - Output location and overwrite behavior

use anyhow::{Result, bail};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::PdfMergerError;

/// Default output file name.
pub const DEFAULT_OUTPUT_NAME: &str = "pdfmerger_out.pdf";

/// Default stamp font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 15.0;

/// Distance of the footer baseline from the bottom edge, in points.
pub const FOOTER_BASELINE: f32 = 20.0;

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide.
    #[default]
    Portrait,
    /// Wider than tall.
    Landscape,
}

impl FromStr for Orientation {
    type Err = PdfMergerError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            _ => Err(PdfMergerError::invalid_config(format!(
                "Invalid orientation: {s}. Must be one of: portrait, landscape"
            ))),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => f.write_str("portrait"),
            Self::Landscape => f.write_str("landscape"),
        }
    }
}

/// Standard paper sizes, in PostScript points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// 297 x 420 mm.
    A3,
    /// 210 x 297 mm.
    #[default]
    A4,
    /// 148 x 210 mm.
    A5,
    /// 8.5 x 11 in.
    Letter,
    /// 8.5 x 14 in.
    Legal,
}

impl PageSize {
    /// Portrait width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            Self::A3 => (841.8898, 1190.5512),
            Self::A4 => (595.2756, 841.8898),
            Self::A5 => (419.5276, 595.2756),
            Self::Letter => (612.0, 792.0),
            Self::Legal => (612.0, 1008.0),
        }
    }

    /// Geometry for this size in the given orientation.
    ///
    /// Landscape swaps width and height.
    pub fn geometry(self, orientation: Orientation) -> PageGeometry {
        let (width, height) = self.dimensions();
        match orientation {
            Orientation::Portrait => PageGeometry { width, height },
            Orientation::Landscape => PageGeometry {
                width: height,
                height: width,
            },
        }
    }
}

impl FromStr for PageSize {
    type Err = PdfMergerError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "a3" => Ok(Self::A3),
            "a4" => Ok(Self::A4),
            "a5" => Ok(Self::A5),
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            _ => Err(PdfMergerError::invalid_config(format!(
                "Invalid page size: {s}. Must be one of: a3, a4, a5, letter, legal"
            ))),
        }
    }
}

/// Width and height of a page in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

/// Where the stamp text is drawn on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StampPosition {
    /// Horizontally centered, just above the bottom edge.
    #[default]
    Footer,
    /// Centered on the page, like a watermark.
    Center,
}

impl FromStr for StampPosition {
    type Err = PdfMergerError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "footer" => Ok(Self::Footer),
            "center" | "centre" => Ok(Self::Center),
            _ => Err(PdfMergerError::invalid_config(format!(
                "Invalid stamp position: {s}. Must be one of: footer, center"
            ))),
        }
    }
}

/// Settings for stamping each page with its source file's label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StampOptions {
    /// Paper size the overlay is laid out on.
    pub page_size: PageSize,
    /// Orientation of the overlay.
    pub orientation: Orientation,
    /// Placement of the text.
    pub position: StampPosition,
    /// Helvetica size in points.
    pub font_size: f32,
}

impl StampOptions {
    /// Overlay geometry after applying orientation.
    pub fn geometry(&self) -> PageGeometry {
        self.page_size.geometry(self.orientation)
    }
}

impl Default for StampOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            orientation: Orientation::default(),
            position: StampPosition::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Where input files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Explicit files, merged in the given order.
    Files(Vec<PathBuf>),
    /// Every PDF in a directory, merged in file name order.
    Directory(PathBuf),
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Replace an existing output file (default).
    #[default]
    Overwrite,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for a merge run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input files or directory.
    pub input: InputSource,

    /// Final output path, already carrying the `.pdf` extension.
    pub output: PathBuf,

    /// Stamp settings; `None` disables stamping.
    pub stamp: Option<StampOptions>,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compress streams when writing.
    pub compress: bool,

    /// Run the whole pipeline but skip writing.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print the run report as JSON.
    pub json: bool,
}

impl Config {
    /// Create a configuration with default settings.
    ///
    /// Stamping is off, existing output is overwritten and streams are
    /// written as they were read.
    pub fn new(input: InputSource, output: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output: output.into(),
            stamp: None,
            overwrite_mode: OverwriteMode::default(),
            compress: false,
            dry_run: false,
            verbose: false,
            quiet: false,
            json: false,
        }
    }

    /// Enable stamping with the given options.
    pub fn with_stamp(mut self, stamp: StampOptions) -> Self {
        self.stamp = Some(stamp);
        self
    }

    /// Validate the configuration.
    ///
    /// Checks for logical inconsistencies only; the filesystem is consulted
    /// later by the input resolver and the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit file list is empty
    /// - Verbose and quiet modes are both enabled
    /// - The stamp font size is not a positive number
    /// - The output path is also one of the inputs
    pub fn validate(&self) -> Result<()> {
        if let InputSource::Files(files) = &self.input
            && files.is_empty()
        {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(stamp) = &self.stamp
            && !(stamp.font_size.is_finite() && stamp.font_size > 0.0)
        {
            bail!("Font size must be a positive number, got {}", stamp.font_size);
        }

        if self.output.as_os_str().is_empty() {
            bail!("Output file name cannot be empty");
        }

        if let InputSource::Files(files) = &self.input {
            for input in files {
                if input == &self.output {
                    bail!(
                        "Output file cannot be the same as an input file: {}",
                        self.output.display()
                    );
                }
            }
        }

        Ok(())
    }

    /// Whether stamping is enabled.
    pub fn stamping(&self) -> bool {
        self.stamp.is_some()
    }

    /// Check if progress output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet && !self.json
    }
}
