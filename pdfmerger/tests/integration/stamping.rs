//! Integration tests for filename stamps.

use lopdf::{Document, Object, ObjectId};
use rstest::rstest;

use pdfmerger::config::{StampOptions, StampPosition};
use pdfmerger::io::PdfWriter;
use pdfmerger::merge::{Bookmark, Merger};

use crate::common::{contains, files_config, page_bytes, two_file_fixture};

/// Content of the named form XObject on a page.
fn xobject_content(doc: &Document, page_id: ObjectId, name: &str) -> Vec<u8> {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = match page.get(b"Resources").unwrap() {
        Object::Reference(id) => doc.get_dictionary(*id).unwrap(),
        Object::Dictionary(dict) => dict,
        other => panic!("unexpected resources: {other:?}"),
    };
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let form_id = xobjects
        .get(name.as_bytes())
        .and_then(Object::as_reference)
        .unwrap();
    let stream = doc.get_object(form_id).unwrap().as_stream().unwrap();
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

#[rstest]
#[case(StampPosition::Footer)]
#[case(StampPosition::Center)]
#[tokio::test]
async fn test_every_page_carries_its_label(#[case] position: StampPosition) {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[a, b]).with_stamp(StampOptions {
        position,
        ..StampOptions::default()
    });

    let result = Merger::new().merge(&config).await.unwrap();

    assert!(result.statistics.stamped);
    assert_eq!(result.statistics.total_pages, 3);
    assert_eq!(
        result.bookmarks,
        vec![Bookmark::new("a", 0), Bookmark::new("b", 2)]
    );

    let pages: Vec<_> = result.document.get_pages().into_values().collect();
    let expected = ["(a) Tj", "(a) Tj", "(b) Tj"];
    for (page_id, needle) in pages.iter().zip(expected) {
        let stamp = xobject_content(&result.document, *page_id, "Stamp0");
        assert!(contains(&stamp, needle), "missing {needle} on page {page_id:?}");
    }
}

#[tokio::test]
async fn test_stamp_is_drawn_under_the_page() {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[a, b]).with_stamp(StampOptions::default());

    let result = Merger::new().merge(&config).await.unwrap();

    let first = *result.document.get_pages().values().next().unwrap();
    let content = page_bytes(&result.document, first);
    let text = String::from_utf8_lossy(&content);
    let stamp_at = text.find("/Stamp0 Do").unwrap();
    let page_at = text.find("/Page0 Do").unwrap();
    assert!(stamp_at < page_at);

    let original = xobject_content(&result.document, first, "Page0");
    assert!(contains(&original, "a page 0"));
}

#[tokio::test]
async fn test_stamped_pages_keep_their_media_box() {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[a, b]).with_stamp(StampOptions::default());

    let result = Merger::new().merge(&config).await.unwrap();

    for page_id in result.document.get_pages().into_values() {
        let page = result.document.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let values: Vec<f32> = media_box
            .iter()
            .map(|v| v.as_float().unwrap())
            .collect();
        assert_eq!(values, vec![0.0, 0.0, 595.0, 842.0]);
    }
}

#[tokio::test]
async fn test_stamped_output_reloads() {
    let (dir, a, b) = two_file_fixture();
    let config = files_config(dir.path(), &[a, b]).with_stamp(StampOptions::default());

    let result = Merger::new().merge(&config).await.unwrap();
    PdfWriter::compressed()
        .save(result.document, &config.output)
        .await
        .unwrap();

    let reloaded = Document::load(&config.output).unwrap();
    let pages: Vec<_> = reloaded.get_pages().into_values().collect();
    assert_eq!(pages.len(), 3);
    let stamp = xobject_content(&reloaded, pages[2], "Stamp0");
    assert!(contains(&stamp, "(b) Tj"));
}
