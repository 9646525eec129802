//! Fixture builders shared by the integration tests.
//!
//! Fixtures are generated into a temp directory so the suite needs no
//! checked-in PDFs.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pdfmerger::config::{Config, InputSource};

/// Content stream text for page `n` of a fixture named `name`.
pub fn page_marker(name: &str, n: usize) -> String {
    format!("{name} page {n}")
}

/// Build an in-memory PDF with `pages` A4 pages, each showing its marker.
pub fn build_pdf(name: &str, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut kids = Vec::with_capacity(pages);
    for n in 0..pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(page_marker(name, n))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a fixture PDF to `dir/file_name` and return its path.
pub fn write_pdf(dir: &Path, file_name: &str, pages: usize) -> PathBuf {
    let name = Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let path = dir.join(file_name);
    build_pdf(&name, pages).save(&path).unwrap();
    path
}

/// Temp directory holding `a.pdf` (2 pages) and `b.pdf` (1 page).
pub fn two_file_fixture() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 2);
    let b = write_pdf(dir.path(), "b.pdf", 1);
    (dir, a, b)
}

/// Config merging the given files into `dir/out.pdf`.
pub fn files_config(dir: &Path, files: &[PathBuf]) -> Config {
    let mut config = Config::new(InputSource::Files(files.to_vec()), dir.join("out.pdf"));
    config.quiet = true;
    config
}

/// Raw bytes of every content stream on a page, joined.
pub fn page_bytes(doc: &Document, page_id: ObjectId) -> Vec<u8> {
    doc.get_page_contents(page_id)
        .into_iter()
        .filter_map(|id| doc.get_object(id).ok())
        .filter_map(|object| object.as_stream().ok())
        .flat_map(|stream| stream.content.clone())
        .collect()
}

/// Byte-substring search.
pub fn contains(haystack: &[u8], needle: &str) -> bool {
    let needle = needle.as_bytes();
    haystack.windows(needle.len()).any(|window| window == needle)
}
