//! The merged output document under construction.
//!
//! [`MergedDocument`] owns a fresh catalog and a single flat page tree.
//! Each appended source document is renumbered above the objects already
//! present, its pages are re-parented under the root `Pages` node, and a
//! bookmark is recorded at its first page.

use lopdf::{Document, Object, ObjectId, dictionary};

use super::bookmarks::{Bookmark, BookmarkManager};
use super::pages::PageExtractor;
use crate::error::{PdfMergerError, Result};

/// PDF version written when no input asks for a newer one.
const BASE_VERSION: &str = "1.5";

/// Output document assembled from several inputs.
#[derive(Debug)]
pub struct MergedDocument {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    bookmarks: Vec<Bookmark>,
    extractor: PageExtractor,
}

impl MergedDocument {
    /// Create an empty document with a catalog and an empty page tree.
    pub fn new() -> Self {
        let mut document = Document::with_version(BASE_VERSION);
        let pages_id = document.new_object_id();
        document.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }
            .into(),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            bookmarks: Vec::new(),
            extractor: PageExtractor::new(),
        }
    }

    /// Append every page of `source` and bookmark its first page as `label`.
    ///
    /// Returns the zero-based index of the first appended page. The
    /// source's own outline, catalog and page tree nodes are dropped.
    ///
    /// # Errors
    ///
    /// Returns `MergeFailed` if `source` has no pages or its page tree
    /// cannot be read.
    pub fn append(&mut self, source: Document, label: &str) -> Result<usize> {
        let mut source = source;
        source.renumber_objects_with(self.document.max_id + 1);

        let source_pages = self.extractor.page_ids(&source);
        if source_pages.is_empty() {
            return Err(PdfMergerError::merge_failed(format!(
                "'{label}' has no pages to append"
            )));
        }

        for page_id in &source_pages {
            self.extractor.flatten_inherited(&mut source, *page_id)?;
            source
                .get_object_mut(*page_id)?
                .as_dict_mut()?
                .set("Parent", Object::Reference(self.pages_id));
        }

        let source_root = source
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .ok();
        source
            .objects
            .retain(|id, obj| Some(*id) != source_root && !is_page_tree_node(obj));

        if version_is_newer(&source.version, &self.document.version) {
            self.document.version = source.version.clone();
        }
        self.document.max_id = self.document.max_id.max(source.max_id);
        self.document.objects.extend(source.objects);

        let first_index = self.page_ids.len();
        self.page_ids.extend(&source_pages);
        self.sync_page_tree()?;
        self.bookmarks.push(Bookmark::new(label, first_index));

        log::debug!(
            "appended '{}' ({} page(s)) at index {}",
            label,
            source_pages.len(),
            first_index
        );
        Ok(first_index)
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Bookmarks recorded so far, in input order.
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// The document as assembled so far, without its outline.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Finish assembly: write the outline and return the document.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkFailed` if the outline cannot be attached.
    pub fn into_document(self) -> Result<Document> {
        let mut document = self.document;
        BookmarkManager::new().write_outline(&mut document, &self.bookmarks)?;
        Ok(document)
    }

    fn sync_page_tree(&mut self) -> Result<()> {
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| Object::Reference(id)).collect();
        let pages = self.document.get_object_mut(self.pages_id)?.as_dict_mut()?;
        pages.set("Kids", Object::Array(kids));
        pages.set("Count", Object::Integer(self.page_ids.len() as i64));
        Ok(())
    }
}

impl Default for MergedDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn is_page_tree_node(obj: &Object) -> bool {
    obj.as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .is_ok_and(|name| name == b"Pages")
}

/// Compare `major.minor` version strings.
fn version_is_newer(candidate: &str, current: &str) -> bool {
    fn parse(version: &str) -> (u32, u32) {
        let mut parts = version.trim().split('.');
        let major = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        (major, minor)
    }
    parse(candidate) > parse(current)
}
