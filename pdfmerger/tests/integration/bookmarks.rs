//! Integration tests for the per-file outline.

use lopdf::{Document, Object};
use tempfile::TempDir;

use pdfmerger::io::PdfWriter;
use pdfmerger::merge::{Bookmark, BookmarkManager, Merger};

use crate::common::{files_config, two_file_fixture, write_pdf};

#[tokio::test]
async fn test_one_bookmark_per_file_at_first_page() {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[a, b]);

    let result = Merger::new().merge(&config).await.unwrap();

    assert_eq!(
        result.bookmarks,
        vec![Bookmark::new("a", 0), Bookmark::new("b", 2)]
    );
    assert_eq!(result.statistics.bookmarks_added, 2);

    let read_back = BookmarkManager::new().read_outline(&result.document).unwrap();
    assert_eq!(read_back, result.bookmarks);
}

#[tokio::test]
async fn test_outline_survives_save_and_load() {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[a, b]);

    let result = Merger::new().merge(&config).await.unwrap();
    PdfWriter::new()
        .save(result.document, &config.output)
        .await
        .unwrap();

    let reloaded = Document::load(&config.output).unwrap();
    let manager = BookmarkManager::new();
    assert!(manager.has_bookmarks(&reloaded));
    assert_eq!(
        manager.read_outline(&reloaded).unwrap(),
        vec![Bookmark::new("a", 0), Bookmark::new("b", 2)]
    );

    let catalog = reloaded.catalog().unwrap();
    assert_eq!(
        catalog.get(b"PageMode").and_then(Object::as_name).unwrap(),
        b"UseOutlines"
    );
}

#[tokio::test]
async fn test_label_drops_only_last_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "report.v2.pdf", 1);
    let config = files_config(dir.path(), &[path]);

    let result = Merger::new().merge(&config).await.unwrap();

    assert_eq!(result.bookmarks, vec![Bookmark::new("report.v2", 0)]);
}

#[tokio::test]
async fn test_source_outlines_are_not_carried() {
    let (dir, a, b) = two_file_fixture();

    // Merge once to get a file that already has an outline.
    let first = files_config(dir.path(), &[a.clone(), b]);
    let result = Merger::new().merge(&first).await.unwrap();
    let nested = dir.path().join("nested.pdf");
    PdfWriter::new().save(result.document, &nested).await.unwrap();

    let mut second = files_config(dir.path(), &[nested, a]);
    second.output = dir.path().join("again.pdf");
    let result = Merger::new().merge(&second).await.unwrap();

    let outline = BookmarkManager::new().read_outline(&result.document).unwrap();
    assert_eq!(
        outline,
        vec![Bookmark::new("nested", 0), Bookmark::new("a", 3)]
    );
}
