//! Integration tests for plain concatenation.

use lopdf::Document;
use tempfile::TempDir;

use pdfmerger::config::{Config, InputSource};
use pdfmerger::io::PdfWriter;
use pdfmerger::merge::{Merger, merge_pdfs};

use crate::common::{
    build_pdf, contains, files_config, page_bytes, page_marker, two_file_fixture, write_pdf,
};

#[tokio::test]
async fn test_merge_two_files_in_order() {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[a, b]);

    let (document, stats) = merge_pdfs(&config).await.unwrap();

    assert_eq!(stats.files_merged, 2);
    assert_eq!(stats.total_pages, 3);
    assert!(!stats.stamped);

    let pages: Vec<_> = document.get_pages().into_values().collect();
    assert_eq!(pages.len(), 3);
    assert!(contains(&page_bytes(&document, pages[0]), &page_marker("a", 0)));
    assert!(contains(&page_bytes(&document, pages[1]), &page_marker("a", 1)));
    assert!(contains(&page_bytes(&document, pages[2]), &page_marker("b", 0)));
}

#[tokio::test]
async fn test_reversed_order_is_respected() {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[b, a]);

    let result = Merger::new().merge(&config).await.unwrap();

    let first_pages: Vec<_> = result.files.iter().map(|f| f.first_page).collect();
    assert_eq!(first_pages, vec![0, 1]);
    let pages: Vec<_> = result.document.get_pages().into_values().collect();
    assert!(contains(&page_bytes(&result.document, pages[0]), &page_marker("b", 0)));
}

#[tokio::test]
async fn test_unstamped_content_is_untouched() {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[a, b]);

    let (document, _) = merge_pdfs(&config).await.unwrap();

    let source = build_pdf("a", 2);
    let source_pages: Vec<_> = source.get_pages().into_values().collect();
    let merged_pages: Vec<_> = document.get_pages().into_values().collect();
    for (src, merged) in source_pages.iter().zip(&merged_pages) {
        assert_eq!(page_bytes(&source, *src), page_bytes(&document, *merged));
    }
}

#[tokio::test]
async fn test_same_file_twice() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 2);
    let config = files_config(dir.path(), &[a.clone(), a]);

    let result = Merger::new().merge(&config).await.unwrap();

    assert_eq!(result.statistics.total_pages, 4);
    let titles: Vec<_> = result.bookmarks.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "a"]);
    assert_eq!(result.bookmarks[1].page_index, 2);
}

#[tokio::test]
async fn test_directory_merge_sorted_and_filtered() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    std::fs::create_dir(&input).unwrap();
    write_pdf(&input, "y.pdf", 1);
    write_pdf(&input, "x.pdf", 2);
    write_pdf(&input, "w.PDF", 1);
    std::fs::write(input.join("notes.txt"), "not a pdf").unwrap();
    std::fs::create_dir(input.join("nested")).unwrap();
    write_pdf(&input.join("nested"), "z.pdf", 1);

    let mut config = Config::new(InputSource::Directory(input), dir.path().join("out.pdf"));
    config.quiet = true;

    let result = Merger::new().merge(&config).await.unwrap();

    let labels: Vec<_> = result.files.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["w", "x", "y"]);
    assert_eq!(result.statistics.total_pages, 4);
}

#[tokio::test]
async fn test_merge_is_repeatable() {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[a, b]);

    let first = Merger::new().merge(&config).await.unwrap();
    let second = Merger::new().merge(&config).await.unwrap();

    assert_eq!(first.statistics.total_pages, second.statistics.total_pages);
    assert_eq!(first.bookmarks, second.bookmarks);
}

#[tokio::test]
async fn test_written_output_reloads() {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[a, b]);

    let (document, _) = merge_pdfs(&config).await.unwrap();
    let stats = PdfWriter::new()
        .save_with_stats(document, &config.output)
        .await
        .unwrap();

    assert!(stats.file_size > 0);
    assert!(!dir.path().join("out.pdf.tmp").exists());

    let reloaded = Document::load(&config.output).unwrap();
    assert_eq!(reloaded.get_pages().len(), 3);
}

#[tokio::test]
async fn test_compressed_output_reloads() {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[a, b]);

    let (document, _) = merge_pdfs(&config).await.unwrap();
    let stats = PdfWriter::compressed()
        .save_with_stats(document, &config.output)
        .await
        .unwrap();

    assert!(stats.compressed);
    let reloaded = Document::load(&config.output).unwrap();
    assert_eq!(reloaded.get_pages().len(), 3);
}

#[tokio::test]
async fn test_directory_merge_into_itself_is_repeatable() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "x.pdf", 1);
    write_pdf(dir.path(), "y.pdf", 2);

    let mut config = Config::new(
        InputSource::Directory(dir.path().to_path_buf()),
        dir.path().join("pdfmerger_out.pdf"),
    );
    config.quiet = true;

    let mut runs = Vec::new();
    for _ in 0..2 {
        let result = Merger::new().merge(&config).await.unwrap();
        runs.push((result.statistics.total_pages, result.bookmarks.clone()));
        PdfWriter::new()
            .save(result.document, &config.output)
            .await
            .unwrap();
    }

    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1].0, 3);
    let titles: Vec<_> = runs[1].1.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["x", "y"]);
}
