//! CLI argument parsing for pdfmerger.
//!
//! This module defines the command-line interface structure using `clap`.
//! It is also compiled into the build script to render the man page, so it
//! depends only on `clap` and the `pdfmerger` library.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::str::FromStr;

use pdfmerger::config::{
    Config, DEFAULT_FONT_SIZE, DEFAULT_OUTPUT_NAME, InputSource, Orientation, OverwriteMode,
    PageSize, StampOptions, StampPosition,
};
use pdfmerger::error::{PdfMergerError, Result};
use pdfmerger::io::output_path;

/// Merge PDF files into one document with a bookmark per file.
///
/// Inputs are concatenated in the order given (or sorted by name when a
/// directory is used). Each input becomes a bookmark pointing at its first
/// page, and pages can optionally be stamped with their file name.
#[derive(Parser, Debug)]
#[command(name = "pdfmerger")]
#[command(version)]
#[command(
    about = "Merge PDF files into one document with a bookmark per file",
    long_about = None
)]
#[command(author)]
#[command(arg_required_else_help = true)]
#[command(group(ArgGroup::new("source").required(true).args(["infile", "indir"])))]
pub struct Cli {
    /// Input PDF file, repeat for multiple files
    ///
    /// Files are merged in the order given.
    ///
    /// Example:
    ///   pdfmerger -f intro.pdf -f body.pdf -f appendix.pdf
    #[arg(short = 'f', long, value_name = "FILE")]
    pub infile: Vec<PathBuf>,

    /// Merge every PDF in a directory
    ///
    /// Files ending in .pdf (any case) are merged in file name order.
    /// Subdirectories are not searched.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub indir: Option<PathBuf>,

    /// Stamp every page with the name of the file it came from
    #[arg(short = 'a', long)]
    pub add_filenames: bool,

    /// Orientation of the stamp layout
    #[arg(long, value_name = "ORIENTATION", default_value = "portrait")]
    #[arg(value_parser = ["portrait", "landscape"])]
    pub orientation: String,

    /// Paper size of the stamp layout
    #[arg(long, value_name = "SIZE", default_value = "a4")]
    #[arg(value_parser = ["a3", "a4", "a5", "letter", "legal"])]
    pub page_size: String,

    /// Where the file name is drawn
    ///
    /// - footer: centered just above the bottom edge (default)
    /// - center: centered on the page in grey, like a watermark
    #[arg(long, value_name = "POSITION", default_value = "footer")]
    #[arg(value_parser = ["footer", "center"])]
    pub position: String,

    /// Stamp font size in points
    #[arg(long, value_name = "PT", default_value_t = DEFAULT_FONT_SIZE)]
    pub font_size: f32,

    /// Destination folder (must already exist)
    ///
    /// Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub outfolder: Option<PathBuf>,

    /// Output file name
    ///
    /// ".pdf" is appended when missing.
    #[arg(
        short = 'o',
        long,
        visible_alias = "outname",
        value_name = "NAME",
        default_value = DEFAULT_OUTPUT_NAME
    )]
    pub outfile: String,

    /// Dry run - run the whole merge but do not write the output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Never overwrite an existing output file
    #[arg(long)]
    pub no_clobber: bool,

    /// Compress streams in the output
    ///
    /// Off by default so page content is written exactly as it was read.
    #[arg(long)]
    pub compress: bool,

    /// Print a JSON report to stdout instead of the human summary
    #[arg(long)]
    pub json: bool,

    /// Verbose output - show per-file details and timings
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if an option value cannot be parsed or the
    /// resulting configuration is inconsistent.
    pub fn to_config(&self) -> Result<Config> {
        let input = match &self.indir {
            Some(dir) => InputSource::Directory(dir.clone()),
            None => InputSource::Files(self.infile.clone()),
        };

        let output = output_path(self.outfolder.as_deref(), &self.outfile);
        let mut config = Config::new(input, output);

        if self.add_filenames {
            config = config.with_stamp(StampOptions {
                page_size: PageSize::from_str(&self.page_size)?,
                orientation: Orientation::from_str(&self.orientation)?,
                position: StampPosition::from_str(&self.position)?,
                font_size: self.font_size,
            });
        }

        config.overwrite_mode = if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Overwrite
        };
        config.compress = self.compress;
        config.dry_run = self.dry_run;
        config.verbose = self.verbose;
        config.quiet = self.quiet;
        config.json = self.json;

        config.validate().map_err(|e| {
            PdfMergerError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Performs early checks that need no file I/O.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any check fails.
    pub fn validate(&self) -> Result<()> {
        if self.infile.is_empty() && self.indir.is_none() {
            return Err(PdfMergerError::invalid_config(
                "Specify input files with --infile or a folder with --indir",
            ));
        }

        if !self.infile.is_empty() && self.indir.is_some() {
            return Err(PdfMergerError::invalid_config(
                "--infile and --indir cannot be used together",
            ));
        }

        if self.outfile.trim().is_empty() {
            return Err(PdfMergerError::invalid_config("Output name cannot be empty"));
        }

        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(PdfMergerError::invalid_config(format!(
                "Font size must be a positive number, got {}",
                self.font_size
            )));
        }

        Ok(())
    }
}
