//! Layering a stamp overlay under every page of a document.
//!
//! Each page is rebuilt in place (same object id) as a page that draws two
//! form XObjects: the stamp first, then the original page on top. Page
//! geometry, rotation and annotations are carried over so the stamped page
//! looks and behaves like the original.

use std::collections::HashMap;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use super::pages::{PageExtractor, form_xobject};
use crate::error::{PdfMergerError, Result};

/// XObject resource name of the stamp overlay.
pub const STAMP_XOBJECT: &str = "Stamp0";

/// XObject resource name of the original page.
pub const PAGE_XOBJECT: &str = "Page0";

/// Inherited attributes copied onto the rebuilt page.
const CARRIED_INHERITED: [&[u8]; 2] = [b"CropBox", b"Rotate"];

/// Page-local attributes copied onto the rebuilt page.
const CARRIED_LOCAL: [&[u8]; 4] = [b"Annots", b"UserUnit", b"Group", b"StructParents"];

/// Composes stamp overlays with source pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageCompositor {
    extractor: PageExtractor,
}

impl PageCompositor {
    /// Create a new compositor.
    pub fn new() -> Self {
        Self {
            extractor: PageExtractor::new(),
        }
    }

    /// Return a copy of `source` with the first page of `stamp` drawn under
    /// every page.
    ///
    /// The page count and page order are unchanged. `source` itself is not
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns `MergeFailed` if the stamp has no page or a source page
    /// cannot be read.
    pub fn apply_stamp(&self, source: &Document, stamp: &Document) -> Result<Document> {
        let mut doc = source.clone();
        let stamp_form = self.import_stamp(&mut doc, stamp)?;

        let page_ids = self.extractor.page_ids(&doc);
        for page_id in &page_ids {
            self.compose_page(&mut doc, *page_id, stamp_form)?;
        }

        log::debug!("stamped {} page(s)", page_ids.len());
        Ok(doc)
    }

    /// Copy the stamp's first page into `doc` as a form XObject.
    fn import_stamp(&self, doc: &mut Document, stamp: &Document) -> Result<ObjectId> {
        let stamp_page = stamp
            .get_pages()
            .into_values()
            .next()
            .ok_or_else(|| PdfMergerError::merge_failed("Stamp overlay has no page"))?;

        let bbox = self.extractor.media_box(stamp, stamp_page)?;
        let content = self.extractor.page_content(stamp, stamp_page)?;
        let resources = self
            .extractor
            .inherited_attribute(stamp, stamp_page, b"Resources")?
            .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));

        let mut imported = HashMap::new();
        let resources = import_object(doc, stamp, &resources, &mut imported)?;

        Ok(doc.add_object(form_xobject(bbox, resources, content)))
    }

    /// Rebuild one page as `stamp` under the original content.
    fn compose_page(&self, doc: &mut Document, page_id: ObjectId, stamp_form: ObjectId) -> Result<()> {
        let media_box = self.extractor.media_box(doc, page_id)?;

        let mut page = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box,
        };
        for key in CARRIED_INHERITED {
            if let Some(value) = self.extractor.inherited_attribute(doc, page_id, key)? {
                page.set(key, value);
            }
        }
        {
            let original = doc.get_dictionary(page_id)?;
            if let Ok(parent) = original.get(b"Parent") {
                page.set("Parent", parent.clone());
            }
            for key in CARRIED_LOCAL {
                if let Ok(value) = original.get(key) {
                    page.set(key, value.clone());
                }
            }
        }

        let page_form = self.extractor.page_to_form(doc, page_id)?;

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new("Do", vec![STAMP_XOBJECT.into()]),
                Operation::new("Q", vec![]),
                Operation::new("q", vec![]),
                Operation::new("Do", vec![PAGE_XOBJECT.into()]),
                Operation::new("Q", vec![]),
            ],
        }
        .encode()?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        page.set(
            "Resources",
            dictionary! {
                "XObject" => dictionary! {
                    STAMP_XOBJECT => stamp_form,
                    PAGE_XOBJECT => page_form,
                },
            },
        );
        page.set("Contents", content_id);

        doc.objects.insert(page_id, Object::Dictionary(page));
        Ok(())
    }
}

/// Deep copy `obj` from `source` into `target`, following references.
///
/// Each source object is copied once; `imported` maps source ids to their
/// new ids.
fn import_object(
    target: &mut Document,
    source: &Document,
    obj: &Object,
    imported: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = imported.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = target.new_object_id();
            imported.insert(*id, new_id);

            let copied = import_object(target, source, source.get_object(*id)?, imported)?;
            target.objects.insert(new_id, copied);
            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(import_dictionary(
            target, source, dict, imported,
        )?)),
        Object::Array(items) => items
            .iter()
            .map(|item| import_object(target, source, item, imported))
            .collect::<Result<Vec<_>>>()
            .map(Object::Array),
        Object::Stream(stream) => {
            let dict = import_dictionary(target, source, &stream.dict, imported)?;
            Ok(Object::Stream(Stream::new(dict, stream.content.clone())))
        }
        _ => Ok(obj.clone()),
    }
}

fn import_dictionary(
    target: &mut Document,
    source: &Document,
    dict: &Dictionary,
    imported: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut copy = Dictionary::new();
    for (key, value) in dict.iter() {
        copy.set(key.clone(), import_object(target, source, value, imported)?);
    }
    Ok(copy)
}
