/// Known mojibake artifacts observed in scraped title text.
///
/// Each entry is a literal byte sequence left behind by a historical
/// encoding mismatch on the source wiki. The normalizer removes them as
/// data; extend this table when a new artifact shows up, nothing else
/// needs to change.
pub const MOJIBAKE_ARTIFACTS: &[&str] = &["A?â,¢", "A?Å¡", "™", "š"];

/// Star glyph variants that decorate some in-game titles.
pub const STAR_GLYPHS: &[char] = &['☆', '★', '✦', '✩', '✪', '✫', '✬', '✭', '✮', '✯'];

/// Canonicalize a title for equality comparison.
///
/// Curly apostrophes become straight, known mojibake artifacts and star
/// glyphs are removed, and whitespace is collapsed. The result is stable:
/// normalizing twice returns the same string.
pub fn normalize_title(raw: &str) -> String {
    let mut text = raw.replace('\u{2019}', "'");

    // Removing an artifact can splice the two halves of another together,
    // and so can removing a star glyph sitting inside one, so repeat both
    // removals until nothing changes.
    loop {
        let len_before = text.len();
        for artifact in MOJIBAKE_ARTIFACTS {
            text = text.replace(artifact, "");
        }
        text.retain(|ch| !STAR_GLYPHS.contains(&ch));
        if text.len() == len_before {
            break;
        }
    }

    collapse_whitespace(&text)
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}
