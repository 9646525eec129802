#![no_main]

use libfuzzer_sys::fuzz_target;
use lopdf::Object;
use pdfmerger::config::{Orientation, PageSize, StampPosition};
use pdfmerger::stamp::render_stamp;
use pdfmerger::utils::{decode_text_string, text_string};

// Labels come from arbitrary file names, so any string must render and
// survive the bookmark title round trip.
fuzz_target!(|label: &str| {
    let geometry = PageSize::A4.geometry(Orientation::Portrait);
    for position in [StampPosition::Footer, StampPosition::Center] {
        let doc = render_stamp(label, geometry, position, 15.0).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    if let Object::String(bytes, _) = text_string(label) {
        assert_eq!(decode_text_string(&bytes), label);
    }
});
