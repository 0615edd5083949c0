use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

use report_core::{collapse_whitespace, TitleRow};
use report_logging::{report_debug, report_warn};

use crate::sanitize::sanitize_cell;

/// Header labels identifying the one table worth extracting, in order.
pub const EXPECTED_HEADERS: [&str; 3] = ["Titles", "How to obtain", "Title NPC"];

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("static selector"));
static HEADER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("static selector"));
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("static selector"));
static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static selector"));

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// No table whose leading headers match [`EXPECTED_HEADERS`].
    #[error("no table with headers {EXPECTED_HEADERS:?} found in page")]
    TableNotFound,
}

/// Pull title rows out of a decoded page.
///
/// The page is scanned for the first table whose leading `<th>` cells match
/// [`EXPECTED_HEADERS`]; each body row with exactly three cells becomes a
/// [`TitleRow`]. Rows with any other cell count are skipped, as are rows
/// whose obtain cell fails sanitizing.
pub fn extract_title_rows(html: &str, base: &Url) -> Result<Vec<TitleRow>, ExtractError> {
    let document = Html::parse_document(html);
    let table = document
        .select(&TABLE_SELECTOR)
        .find(|table| table_matches(*table))
        .ok_or(ExtractError::TableNotFound)?;

    let mut rows = Vec::new();
    for row in table.select(&ROW_SELECTOR) {
        let cells: Vec<ElementRef<'_>> = row.select(&CELL_SELECTOR).collect();
        if cells.is_empty() {
            // Header row.
            continue;
        }
        if cells.len() != 3 {
            report_debug!("skipping row with {} cells", cells.len());
            continue;
        }
        let obtain = match sanitize_cell(cells[1], base) {
            Ok(cell) => cell,
            Err(err) => {
                report_warn!("skipping row '{}': {err}", cell_text(cells[0]));
                continue;
            }
        };
        rows.push(TitleRow::new(
            cell_text(cells[0]),
            cell_text(cells[1]),
            obtain.markup,
            obtain.links,
            cell_text(cells[2]),
        ));
    }
    Ok(rows)
}

fn table_matches(table: ElementRef<'_>) -> bool {
    let mut headers = table.select(&HEADER_SELECTOR);
    EXPECTED_HEADERS
        .iter()
        .all(|expected| headers.next().is_some_and(|th| cell_text(th) == *expected))
}

/// Visible text of an element: fragments joined with a space, then collapsed.
fn cell_text(cell: ElementRef<'_>) -> String {
    let mut joined = String::new();
    for piece in cell.text() {
        joined.push_str(piece);
        joined.push(' ');
    }
    collapse_whitespace(&joined)
}
