use std::collections::HashSet;

use crate::normalize::normalize_title;
use crate::title::{EnemyTag, TitleRow};
use crate::wanted::WantedList;

/// Result of joining extracted rows against the wanted list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TitleReport {
    /// Matched rows, tagged and ordered by the wanted list.
    pub rows: Vec<TitleRow>,
    /// Wanted lines with no matching row, in input order.
    pub missing: Vec<String>,
}

/// Filter `rows` down to the wanted titles.
///
/// Matching compares normalized titles. Kept rows are ordered by the
/// first-occurrence index of their key in the wanted list; when the source
/// table repeats a normalized title, the first row wins and later ones are
/// dropped. Every wanted line whose key matched nothing is echoed back in
/// `missing`.
pub fn build_report(wanted: &WantedList, rows: Vec<TitleRow>) -> TitleReport {
    let mut claimed: HashSet<String> = HashSet::new();
    let mut kept: Vec<(usize, TitleRow)> = Vec::new();

    for mut row in rows {
        let key = normalize_title(&row.title);
        let Some(index) = wanted.order_of(&key) else {
            continue;
        };
        if !claimed.insert(key) {
            continue;
        }
        row.enemy_tag = EnemyTag::classify(&row.how_to_obtain, &row.npc);
        kept.push((index, row));
    }

    // Stable, so rows sharing an index would keep source order; keys are
    // unique per index, which makes the order fully deterministic.
    kept.sort_by_key(|(index, _)| *index);

    let missing = wanted
        .raw_entries()
        .iter()
        .filter(|raw| !claimed.contains(&normalize_title(raw)))
        .cloned()
        .collect();

    TitleReport {
        rows: kept.into_iter().map(|(_, row)| row).collect(),
        missing,
    }
}
