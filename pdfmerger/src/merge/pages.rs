//! Page-level operations.
//!
//! This module handles:
//! - Resolving attributes a page inherits from its ancestors
//! - Copying inherited attributes onto the page itself before the page is
//!   moved into another page tree
//! - Wrapping a page's content as a form XObject

use std::collections::HashSet;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::error::{PdfMergerError, Result};

/// Page attributes that may be inherited from ancestor `Pages` nodes.
pub const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// US Letter, the fallback when no MediaBox is present anywhere in the tree.
const DEFAULT_MEDIA_BOX: [i64; 4] = [0, 0, 612, 792];

/// Build a form XObject stream.
pub fn form_xobject(bbox: Vec<Object>, resources: Object, content: Vec<u8>) -> Stream {
    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "FormType" => 1,
            "BBox" => bbox,
            "Matrix" => vec![1.into(), 0.into(), 0.into(), 1.into(), 0.into(), 0.into()],
            "Resources" => resources,
        },
        content,
    )
}

/// Page extractor for reading and reshaping pages in a document.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageExtractor;

impl PageExtractor {
    /// Create a new page extractor.
    pub fn new() -> Self {
        Self
    }

    /// Page object ids in document order.
    pub fn page_ids(&self, doc: &Document) -> Vec<ObjectId> {
        doc.get_pages().into_values().collect()
    }

    /// Get the number of pages in a document.
    pub fn page_count(&self, doc: &Document) -> usize {
        doc.get_pages().len()
    }

    /// Look up `key` on the page or, failing that, on its nearest ancestor.
    ///
    /// # Errors
    ///
    /// Returns `MergeFailed` if a node on the path is missing or the parent
    /// chain loops.
    pub fn inherited_attribute(
        &self,
        doc: &Document,
        page_id: ObjectId,
        key: &[u8],
    ) -> Result<Option<Object>> {
        let mut current = page_id;
        let mut seen = HashSet::new();

        loop {
            if !seen.insert(current) {
                return Err(PdfMergerError::merge_failed(format!(
                    "Page tree loops back to object {} {}",
                    current.0, current.1
                )));
            }

            let dict = doc.get_dictionary(current)?;
            if let Ok(value) = dict.get(key) {
                return Ok(Some(value.clone()));
            }

            match dict.get(b"Parent").and_then(|p| p.as_reference()) {
                Ok(parent) => current = parent,
                Err(_) => return Ok(None),
            }
        }
    }

    /// Copy every inherited attribute the page lacks onto the page itself.
    ///
    /// After this the page no longer depends on its original ancestors and
    /// can be re-parented.
    ///
    /// # Errors
    ///
    /// Returns `MergeFailed` if the page or an ancestor cannot be read.
    pub fn flatten_inherited(&self, doc: &mut Document, page_id: ObjectId) -> Result<()> {
        let mut inherited = Vec::new();
        {
            let page = doc.get_dictionary(page_id)?;
            for key in INHERITABLE_KEYS {
                if page.has(key) {
                    continue;
                }
                if let Some(value) = self.inherited_attribute(doc, page_id, key)? {
                    inherited.push((key, value));
                }
            }
        }

        if inherited.is_empty() {
            return Ok(());
        }

        let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
        for (key, value) in inherited {
            page.set(key, value);
        }
        Ok(())
    }

    /// The page's MediaBox as a direct array, defaulting to US Letter.
    ///
    /// # Errors
    ///
    /// Returns `MergeFailed` if the MediaBox is a dangling reference or not
    /// an array.
    pub fn media_box(&self, doc: &Document, page_id: ObjectId) -> Result<Vec<Object>> {
        match self.inherited_attribute(doc, page_id, b"MediaBox")? {
            Some(Object::Reference(id)) => Ok(doc.get_object(id)?.as_array()?.clone()),
            Some(Object::Array(values)) => Ok(values),
            Some(other) => Err(PdfMergerError::merge_failed(format!(
                "MediaBox is not an array: {other:?}"
            ))),
            None => Ok(DEFAULT_MEDIA_BOX.iter().map(|&v| v.into()).collect()),
        }
    }

    /// Decoded page content, with multiple content streams joined by a
    /// newline.
    ///
    /// Streams with filters lopdf cannot decode are copied raw.
    ///
    /// # Errors
    ///
    /// Returns `MergeFailed` if a content reference does not point at a
    /// stream.
    pub fn page_content(&self, doc: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        for id in doc.get_page_contents(page_id) {
            let stream = doc.get_object(id).and_then(Object::as_stream)?;
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            if !content.is_empty() {
                content.push(b'\n');
            }
            content.extend_from_slice(&data);
        }
        Ok(content)
    }

    /// Wrap the page's content and resources as a form XObject added to
    /// `doc`, returning the new object's id.
    ///
    /// The form's BBox is the page's MediaBox, so drawing it with an
    /// identity matrix reproduces the page. A single content stream is
    /// carried over with its original encoding.
    ///
    /// # Errors
    ///
    /// Returns `MergeFailed` if the page's attributes or content cannot be
    /// read.
    pub fn page_to_form(&self, doc: &mut Document, page_id: ObjectId) -> Result<ObjectId> {
        let bbox = self.media_box(doc, page_id)?;
        let resources = self
            .inherited_attribute(doc, page_id, b"Resources")?
            .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));

        let mut form = form_xobject(bbox, resources, Vec::new());
        match doc.get_page_contents(page_id).as_slice() {
            [single] => {
                let stream = doc.get_object(*single).and_then(Object::as_stream)?;
                for key in [b"Filter".as_slice(), b"DecodeParms".as_slice()] {
                    if let Ok(value) = stream.dict.get(key) {
                        form.dict.set(key, value.clone());
                    }
                }
                form.set_content(stream.content.clone());
            }
            _ => form.set_content(self.page_content(doc, page_id)?),
        }

        Ok(doc.add_object(form))
    }
}
