//! Output formatting and display for pdfmerger.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Per-file progress lines
//! - Summary and JSON reports
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::output::OutputFormatter;
//! use pdfmerger::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;
pub mod report;

pub use formatter::{MessageLevel, OutputFormatter};
pub use report::MergeReport;

use crate::config::Config;
use crate::io::WriteStatistics;
use crate::merge::{FileSummary, MergeStatistics};

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Display merge statistics (verbose mode only).
pub fn display_merge_statistics(formatter: &OutputFormatter, stats: &MergeStatistics) {
    formatter.section("Statistics:");
    formatter.detail("Files merged", &stats.files_merged.to_string());
    formatter.detail("Total pages", &stats.total_pages.to_string());
    formatter.detail("Bookmarks", &stats.bookmarks_added.to_string());
    formatter.detail("Stamped", if stats.stamped { "yes" } else { "no" });
    formatter.detail("Input size", &stats.format_input_size());
    formatter.detail(
        "Load time",
        &format!("{:.2}s", stats.load_time.as_secs_f64()),
    );
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", stats.merge_time.as_secs_f64()),
    );
}

/// Display the per-file breakdown and the final outcome.
///
/// `written` is `None` for a dry run.
pub fn display_merge_summary(
    formatter: &OutputFormatter,
    statistics: &MergeStatistics,
    files: &[FileSummary],
    written: Option<&WriteStatistics>,
) {
    formatter.section("Bookmarks:");
    for (index, file) in files.iter().enumerate() {
        formatter.list_item(
            index + 1,
            &format!(
                "{} -> page {} ({} page(s))",
                file.label,
                file.first_page + 1,
                file.pages
            ),
        );
    }
    formatter.blank_line();

    match written {
        Some(stats) => formatter.success(&format!(
            "Merged {} file(s) into {} ({} pages, {})",
            statistics.files_merged,
            stats.output_path.display(),
            statistics.total_pages,
            stats.format_file_size()
        )),
        None => formatter.success(&format!(
            "Dry run: {} file(s) would produce {} pages",
            statistics.files_merged, statistics.total_pages
        )),
    }

    if formatter.is_verbose() {
        display_merge_statistics(formatter, statistics);
        if let Some(stats) = written {
            formatter.detail(
                "Write time",
                &format!("{:.2}s", stats.write_time.as_secs_f64()),
            );
        }
    }
}
