//! Label stamping.
//!
//! The [`Stamper`] lays out a one-page overlay document carrying a single
//! line of Helvetica text: the input file's label. The overlay is later
//! placed under every page of that input by the
//! [`PageCompositor`](crate::merge::PageCompositor).
//!
//! Text is horizontally centered on the overlay. In [`StampPosition::Footer`]
//! mode the baseline sits a fixed distance above the bottom edge; in
//! [`StampPosition::Center`] mode the text is vertically centered and drawn
//! in grey like a watermark.
//!
//! # Examples
//!
//! ```
//! use pdfmerger::config::StampOptions;
//! use pdfmerger::stamp::Stamper;
//!
//! let overlay = Stamper::new(StampOptions::default()).render("chapter-1").unwrap();
//! assert_eq!(overlay.get_pages().len(), 1);
//! ```

pub mod helvetica;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use crate::config::{FOOTER_BASELINE, PageGeometry, StampOptions, StampPosition};
use crate::error::{PdfMergerError, Result};
use crate::utils::encode_latin1;

/// Resource name of the stamp font.
const FONT_NAME: &str = "F1";

/// Fill gray level for watermark-style stamps.
const WATERMARK_GRAY: f32 = 0.5;

/// Renders label overlays.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stamper {
    options: StampOptions,
}

impl Stamper {
    /// Create a stamper for the given layout.
    pub fn new(options: StampOptions) -> Self {
        Self { options }
    }

    /// Render `text` onto a fresh one-page document.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the content stream cannot be encoded.
    pub fn render(&self, text: &str) -> Result<Document> {
        render_stamp(
            text,
            self.options.geometry(),
            self.options.position,
            self.options.font_size,
        )
    }
}

/// Lower-left corner of the text's first glyph.
pub fn text_origin(
    encoded: &[u8],
    geometry: PageGeometry,
    position: StampPosition,
    font_size: f32,
) -> (f32, f32) {
    let x = (geometry.width - helvetica::text_width(encoded, font_size)) / 2.0;
    let y = match position {
        StampPosition::Footer => FOOTER_BASELINE,
        StampPosition::Center => (geometry.height - font_size) / 2.0,
    };
    (x, y)
}

/// Build a one-page document of size `geometry` with `text` drawn at
/// `position`.
///
/// # Errors
///
/// Returns `RenderError` naming the text if the content stream cannot be
/// encoded.
pub fn render_stamp(
    text: &str,
    geometry: PageGeometry,
    position: StampPosition,
    font_size: f32,
) -> Result<Document> {
    let encoded = encode_latin1(text);
    let (x, y) = text_origin(&encoded, geometry, position, font_size);

    let mut operations = Vec::with_capacity(7);
    if position == StampPosition::Center {
        operations.push(Operation::new("g", vec![WATERMARK_GRAY.into()]));
    }
    operations.extend([
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![FONT_NAME.into(), font_size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::String(encoded, StringFormat::Literal)]),
        Operation::new("ET", vec![]),
    ]);

    let content = Content { operations }
        .encode()
        .map_err(|e| PdfMergerError::render(text, e.to_string()))?;

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
        "Resources" => dictionary! {
            "Font" => dictionary! { FONT_NAME => font_id },
        },
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    log::trace!("rendered stamp {text:?} at ({x:.1}, {y:.1})");
    Ok(doc)
}
