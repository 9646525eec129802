//! Bookmark (outline) management for PDFs.
//!
//! The merged document gets a flat outline: one top-level entry per input,
//! in input order, each jumping to the first page that input contributed.

use std::collections::{HashMap, HashSet};

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::Serialize;

use crate::error::{PdfMergerError, Result};
use crate::utils::{decode_text_string, text_string};

/// A top-level outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    /// Text shown in the viewer's outline pane.
    pub title: String,
    /// Zero-based index of the target page in the merged document.
    pub page_index: usize,
}

impl Bookmark {
    /// Create a bookmark.
    pub fn new(title: impl Into<String>, page_index: usize) -> Self {
        Self {
            title: title.into(),
            page_index,
        }
    }
}

/// Manager for PDF bookmarks (outlines).
#[derive(Debug, Clone, Copy, Default)]
pub struct BookmarkManager;

impl BookmarkManager {
    /// Create a new bookmark manager.
    pub fn new() -> Self {
        Self
    }

    /// Replace the document outline with `bookmarks`.
    ///
    /// Also sets the catalog's `PageMode` to `UseOutlines` so viewers open
    /// with the outline pane visible. An empty slice leaves the document
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkFailed` if a bookmark points past the last page or
    /// the catalog cannot be found.
    pub fn write_outline(&self, doc: &mut Document, bookmarks: &[Bookmark]) -> Result<()> {
        if bookmarks.is_empty() {
            return Ok(());
        }

        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let mut items = Vec::with_capacity(bookmarks.len());
        for bookmark in bookmarks {
            let page_id = pages.get(bookmark.page_index).ok_or_else(|| {
                PdfMergerError::BookmarkFailed {
                    reason: format!(
                        "'{}' points at page {} but the document has {} page(s)",
                        bookmark.title,
                        bookmark.page_index + 1,
                        pages.len()
                    ),
                }
            })?;
            items.push((bookmark.title.as_str(), *page_id));
        }

        self.create_outline_structure(doc, &items)
    }

    /// Create the PDF outline structure.
    fn create_outline_structure(&self, doc: &mut Document, items: &[(&str, ObjectId)]) -> Result<()> {
        let outline_id = doc.new_object_id();

        let item_ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();
        for (i, (title, page_id)) in items.iter().enumerate() {
            // [page /XYZ null null null] keeps the viewer's position and zoom
            let dest = vec![
                Object::Reference(*page_id),
                Object::Name(b"XYZ".to_vec()),
                Object::Null,
                Object::Null,
                Object::Null,
            ];

            let mut item_dict = Dictionary::new();
            item_dict.set("Title", text_string(title));
            item_dict.set("Parent", Object::Reference(outline_id));
            item_dict.set("Dest", Object::Array(dest));
            if i > 0 {
                item_dict.set("Prev", Object::Reference(item_ids[i - 1]));
            }
            if let Some(next) = item_ids.get(i + 1) {
                item_dict.set("Next", Object::Reference(*next));
            }

            doc.objects.insert(item_ids[i], Object::Dictionary(item_dict));
        }

        let mut outline_dict = Dictionary::new();
        outline_dict.set("Type", Object::Name(b"Outlines".to_vec()));
        outline_dict.set("Count", Object::Integer(item_ids.len() as i64));
        if let (Some(first), Some(last)) = (item_ids.first(), item_ids.last()) {
            outline_dict.set("First", Object::Reference(*first));
            outline_dict.set("Last", Object::Reference(*last));
        }
        doc.objects.insert(outline_id, Object::Dictionary(outline_dict));

        let catalog = doc
            .catalog_mut()
            .map_err(|e| PdfMergerError::BookmarkFailed {
                reason: format!("Failed to get catalog: {e}"),
            })?;
        catalog.set("Outlines", Object::Reference(outline_id));
        catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

        log::debug!("wrote outline with {} entr(ies)", item_ids.len());
        Ok(())
    }

    /// Read the top-level outline entries back.
    ///
    /// Entries whose destination is not a page of this document are skipped.
    ///
    /// # Errors
    ///
    /// Returns `MergeFailed` if an outline node referenced from the chain is
    /// missing.
    pub fn read_outline(&self, doc: &Document) -> Result<Vec<Bookmark>> {
        let Ok(outlines_id) = doc
            .catalog()
            .and_then(|catalog| catalog.get(b"Outlines"))
            .and_then(Object::as_reference)
        else {
            return Ok(Vec::new());
        };

        let page_index: HashMap<ObjectId, usize> = doc
            .get_pages()
            .into_values()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();

        let mut bookmarks = Vec::new();
        let mut seen = HashSet::new();
        let mut next = doc
            .get_dictionary(outlines_id)?
            .get(b"First")
            .and_then(Object::as_reference)
            .ok();

        while let Some(item_id) = next {
            if !seen.insert(item_id) {
                break;
            }
            let item = doc.get_dictionary(item_id)?;

            let title = match item.get(b"Title") {
                Ok(Object::String(bytes, _)) => decode_text_string(bytes),
                _ => String::new(),
            };
            let target = match item.get(b"Dest") {
                Ok(Object::Array(dest)) => dest
                    .first()
                    .and_then(|page| page.as_reference().ok())
                    .and_then(|page| page_index.get(&page).copied()),
                _ => None,
            };
            if let Some(page_index) = target {
                bookmarks.push(Bookmark { title, page_index });
            }

            next = item.get(b"Next").and_then(Object::as_reference).ok();
        }

        Ok(bookmarks)
    }

    /// Check if a document has bookmarks.
    pub fn has_bookmarks(&self, doc: &Document) -> bool {
        doc.catalog()
            .map(|catalog| catalog.has(b"Outlines"))
            .unwrap_or(false)
    }
}
