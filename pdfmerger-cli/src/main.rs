//! pdfmerger - Merge PDF files into one bookmarked document.
//!
//! Concatenates the given files (or every PDF in a folder) and adds a
//! bookmark per input, optionally stamping pages with their file name.

mod cli;
mod logger;

use clap::Parser;
use std::process;

use crate::cli::Cli;
use crate::logger::StderrLogger;
use pdfmerger::config::Config;
use pdfmerger::error::PdfMergerError;
use pdfmerger::input;
use pdfmerger::io::PdfWriter;
use pdfmerger::merge::{MergeResult, Merger};
use pdfmerger::output::{MergeReport, OutputFormatter, display_merge_summary};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = StderrLogger::level_for(cli.verbose, cli.quiet);
    if let Err(err) = StderrLogger::new(level).init() {
        eprintln!("Warning: logging disabled: {err}");
    }

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfMergerError> {
    cli.validate()?;
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfmerger::NAME, pdfmerger::VERSION));
        formatter.blank_line();
    }

    let writer = if config.compress {
        PdfWriter::compressed()
    } else {
        PdfWriter::new()
    };

    // Fail before any input is parsed if the result could not be written.
    if !config.dry_run {
        writer
            .check_output(&config.output, config.overwrite_mode)
            .await?;
        if tokio::fs::try_exists(&config.output).await.unwrap_or(false) {
            formatter.warning(&format!(
                "Overwriting existing file '{}'",
                config.output.display()
            ));
        }
    }

    let spec = input::resolve_for_output(&config.input, Some(&config.output)).await?;
    formatter.info("Merging files, this might take a while..");

    let result = merge_with_progress(&config, &spec, &formatter).await?;
    let MergeResult {
        document,
        statistics,
        files,
        bookmarks,
    } = result;

    let written = if config.dry_run {
        None
    } else {
        formatter.info(&format!("Writing outfile to: '{}'", config.output.display()));
        Some(writer.save_with_stats(document, &config.output).await?)
    };

    if config.json {
        let report = MergeReport::new(&config, &statistics, &files, &bookmarks, written.as_ref());
        println!("{}", report.to_json()?);
    } else {
        display_merge_summary(&formatter, &statistics, &files, written.as_ref());
    }

    Ok(())
}

async fn merge_with_progress(
    config: &Config,
    spec: &input::InputSpec,
    formatter: &OutputFormatter,
) -> Result<MergeResult, PdfMergerError> {
    let total = spec.len();
    let action = if config.stamping() {
        "Adding text to pages from"
    } else {
        "Adding"
    };

    Merger::new()
        .merge_spec(spec, config.stamp.as_ref(), |index, entry| {
            formatter.progress(
                index + 1,
                total,
                &format!("{action} {}", entry.path.display()),
            );
        })
        .await
}
