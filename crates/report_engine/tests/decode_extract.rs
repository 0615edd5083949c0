use pretty_assertions::assert_eq;
use report_engine::{decode_page, extract_title_rows, ExtractError};
use url::Url;

fn base() -> Url {
    Url::parse("https://www.bg-wiki.com").unwrap()
}

fn page(table_body: &str) -> String {
    format!(
        "<html><body><table>\
         <tr><th>Titles</th><th>How to obtain</th><th>Title NPC</th></tr>\
         {table_body}</table></body></html>"
    )
}

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_page(bytes, Some("text/html; charset=ISO-8859-1"));
    assert_eq!(decoded.html, "café");
    assert!(!decoded.had_replacements);
}

#[test]
fn decode_handles_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_page(bytes, Some("text/html"));
    assert_eq!(decoded.html, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_bom_wins_over_charset_header() {
    let bytes = b"\xEF\xBB\xBFcaf\xC3\xA9";
    let decoded = decode_page(bytes, Some("text/html; charset=ISO-8859-1"));
    assert_eq!(decoded.html, "café");
}

#[test]
fn decode_replaces_malformed_sequences_instead_of_failing() {
    let bytes = b"caf\xFF";
    let decoded = decode_page(bytes, Some("text/html; charset=utf-8"));
    assert!(decoded.had_replacements);
    assert_eq!(decoded.html, "caf\u{FFFD}");
}

#[test]
fn decode_detects_encoding_without_header() {
    let decoded = decode_page(b"<html>plain</html>", None);
    assert_eq!(decoded.html, "<html>plain</html>");
    assert!(!decoded.had_replacements);
}

#[test]
fn locates_the_titles_table_among_others() {
    let html = r#"<html><body>
    <table><tr><th>Zone</th><th>Level</th></tr><tr><td>x</td><td>y</td></tr></table>
    <table>
      <tr><th>Titles</th><th>How to obtain</th><th>Title NPC</th></tr>
      <tr><td>Star Breaker</td><td><b>Defeat <a href="/ffxi/Foo">Foo</a></b></td><td>Abena</td></tr>
    </table>
    </body></html>"#;

    let rows = extract_title_rows(html, &base()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Star Breaker");
    assert_eq!(rows[0].how_to_obtain, "Defeat Foo");
    assert_eq!(
        rows[0].how_markup,
        r#"Defeat <a href="https://www.bg-wiki.com/ffxi/Foo">Foo</a>"#
    );
    assert_eq!(
        rows[0].how_links,
        vec!["https://www.bg-wiki.com/ffxi/Foo".to_string()]
    );
    assert_eq!(rows[0].npc, "Abena");
}

#[test]
fn fails_when_no_table_has_the_expected_headers() {
    let html = "<html><body><table><tr><th>Wrong</th></tr></table></body></html>";
    let err = extract_title_rows(html, &base()).unwrap_err();
    assert_eq!(err, ExtractError::TableNotFound);
}

#[test]
fn rows_with_unexpected_cell_counts_are_skipped() {
    let html = page(concat!(
        "<tr><td>Two</td><td>cells</td></tr>",
        "<tr><td>Four</td><td>c</td><td>d</td><td>e</td></tr>",
        "<tr><td>Kept Row</td><td>Defeat something</td><td>NPC</td></tr>",
    ));
    let rows = extract_title_rows(&html, &base()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Kept Row");
}

#[test]
fn header_match_survives_whitespace_noise() {
    let html = "<html><body><table>
        <tr><th> Titles </th><th>How  to obtain</th><th>
        Title NPC</th></tr>
        <tr><td>T</td><td>H</td><td>N</td></tr>
    </table></body></html>";
    let rows = extract_title_rows(html, &base()).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn extra_header_columns_do_not_block_the_match() {
    let html = "<html><body><table>\
        <tr><th>Titles</th><th>How to obtain</th><th>Title NPC</th><th>Notes</th></tr>\
        <tr><td>T</td><td>H</td><td>N</td></tr>\
    </table></body></html>";
    let rows = extract_title_rows(html, &base()).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn rows_with_runaway_markup_are_dropped_not_fatal() {
    let mut deep = String::new();
    for _ in 0..80 {
        deep.push_str("<i>");
    }
    deep.push('x');
    for _ in 0..80 {
        deep.push_str("</i>");
    }
    let body = format!(
        "<tr><td>Deep</td><td>{deep}</td><td>N</td></tr>\
         <tr><td>Sane</td><td>ok</td><td>N</td></tr>"
    );

    let rows = extract_title_rows(&page(&body), &base()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Sane");
}
