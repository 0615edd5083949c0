use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use report_logging::report_warn;

/// A fetched page decoded to UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: String,
    /// True when malformed sequences were replaced during decoding.
    pub had_replacements: bool,
}

/// Decode raw page bytes using: BOM -> Content-Type charset -> chardetng.
///
/// Malformed input decodes lossily instead of failing; the replacement
/// output is the kind of text the title normalizer's artifact table exists
/// for, so it flows through the pipeline like any other page.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> DecodedPage {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _bom_len)| encoding)
        .or_else(|| {
            header_charset(content_type).and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| detect_encoding(bytes));

    let (text, used, had_replacements) = encoding.decode(bytes);
    if had_replacements {
        report_warn!(
            "page decoded as {} with replacement characters; source bytes were not clean",
            used.name()
        );
    }

    DecodedPage {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_replacements,
    }
}

fn header_charset(content_type: Option<&str>) -> Option<String> {
    content_type?.split(';').map(str::trim).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim_matches([' ', '"', '\''].as_ref()).to_string())
        } else {
            None
        }
    })
}

fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}
