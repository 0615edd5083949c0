use std::collections::HashMap;

use crate::normalize::normalize_title;

/// The user's wanted titles, in the order they were written.
///
/// Each raw line is normalized once into a match key; the key's
/// first-occurrence index defines the output order of the report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WantedList {
    entries: Vec<String>,
    order: HashMap<String, usize>,
}

impl WantedList {
    /// Parse a raw text block, one title per line. Lines are trimmed and
    /// blank lines dropped; duplicate lines keep their first index.
    pub fn parse(raw: &str) -> Self {
        let entries: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        let mut order = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            order.entry(normalize_title(entry)).or_insert(index);
        }

        Self { entries, order }
    }

    /// Raw lines in input order, duplicates included.
    pub fn raw_entries(&self) -> &[String] {
        &self.entries
    }

    /// First-occurrence index of a normalized match key.
    pub fn order_of(&self, normalized: &str) -> Option<usize> {
        self.order.get(normalized).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
