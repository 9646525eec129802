//! Integration tests for error handling and edge cases.

use std::path::PathBuf;
use tempfile::TempDir;

use pdfmerger::config::{Config, InputSource, OverwriteMode};
use pdfmerger::error::PdfMergerError;
use pdfmerger::io::PdfWriter;
use pdfmerger::merge::Merger;

use crate::common::{files_config, two_file_fixture, write_pdf};

#[tokio::test]
async fn test_missing_file_is_reported_by_path() {
    let (dir, a, _) = two_file_fixture();
    let missing = dir.path().join("missing.pdf");
    let config = files_config(dir.path(), &[a, missing.clone()]);

    let err = Merger::new().merge(&config).await.unwrap_err();

    assert!(matches!(err, PdfMergerError::InvalidInput { .. }));
    assert_eq!(err.path(), Some(missing.as_path()));
    assert!(!config.output.exists());
}

#[tokio::test]
async fn test_non_pdf_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("notes.txt");
    std::fs::write(&text, "hello").unwrap();
    let config = files_config(dir.path(), &[text]);

    let err = Merger::new().merge(&config).await.unwrap_err();
    assert!(matches!(err, PdfMergerError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_garbage_pdf_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1);
    let broken = dir.path().join("broken.pdf");
    std::fs::write(&broken, b"this is not a pdf").unwrap();
    let config = files_config(dir.path(), &[a, broken]);

    let err = Merger::new().merge(&config).await.unwrap_err();

    assert!(matches!(
        err,
        PdfMergerError::FailedToLoadPdf { .. } | PdfMergerError::CorruptedPdf { .. }
    ));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_empty_file_list() {
    let dir = TempDir::new().unwrap();
    let config = files_config(dir.path(), &[]);

    assert!(config.validate().is_err());
    let err = Merger::new().merge(&config).await.unwrap_err();
    assert!(matches!(err, PdfMergerError::NoFilesToMerge));
}

#[tokio::test]
async fn test_directory_without_pdfs() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("readme.md"), "# nothing here").unwrap();
    let config = Config::new(
        InputSource::Directory(dir.path().to_path_buf()),
        dir.path().join("out.pdf"),
    );

    let err = Merger::new().merge(&config).await.unwrap_err();
    assert!(matches!(err, PdfMergerError::NoFilesToMerge));
}

#[tokio::test]
async fn test_missing_directory() {
    let config = Config::new(
        InputSource::Directory(PathBuf::from("/nonexistent/pdfmerger/input")),
        "out.pdf",
    );

    let err = Merger::new().merge(&config).await.unwrap_err();
    assert!(matches!(err, PdfMergerError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_output_folder_must_exist() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("missing").join("out.pdf");

    let err = PdfWriter::new()
        .check_output(&output, OverwriteMode::Overwrite)
        .await
        .unwrap_err();
    assert!(matches!(err, PdfMergerError::OutputDirMissing { .. }));
}

#[tokio::test]
async fn test_no_clobber_refuses_existing_output() {
    let (dir, _, _) = two_file_fixture();
    let existing = dir.path().join("a.pdf");

    let writer = PdfWriter::new();
    assert!(
        writer
            .check_output(&existing, OverwriteMode::Overwrite)
            .await
            .is_ok()
    );
    let err = writer
        .check_output(&existing, OverwriteMode::NoClobber)
        .await
        .unwrap_err();
    assert!(matches!(err, PdfMergerError::OutputExists { .. }));
}

#[test]
fn test_output_same_as_input_rejected() {
    let a = PathBuf::from("a.pdf");
    let config = Config::new(InputSource::Files(vec![a.clone()]), a);
    assert!(config.validate().is_err());
}
