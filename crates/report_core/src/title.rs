use std::fmt;

/// Acquisition methods that start with this prefix are enemy-granted titles.
const ENEMY_PREFIX: &str = "Enemy";

/// The NPC that hands out every Abyssea enemy title.
const ABYSSEA_NPC: &str = "Zuah Lepahnyu";

/// One row of the titles table, as extracted from the source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRow {
    /// Title text of the first cell.
    pub title: String,
    /// Plain text of the acquisition cell.
    pub how_to_obtain: String,
    /// Restricted-HTML rendition of the acquisition cell (anchors and line
    /// breaks only, hrefs absolute).
    pub how_markup: String,
    /// Absolute link targets of the acquisition cell, first-seen order.
    pub how_links: Vec<String>,
    /// Granting NPC of the third cell.
    pub npc: String,
    /// Classification attached during report building.
    pub enemy_tag: EnemyTag,
}

impl TitleRow {
    pub fn new(
        title: String,
        how_to_obtain: String,
        how_markup: String,
        how_links: Vec<String>,
        npc: String,
    ) -> Self {
        Self {
            title,
            how_to_obtain,
            how_markup,
            how_links,
            npc,
            enemy_tag: EnemyTag::None,
        }
    }
}

/// Whether a title is granted by an enemy, and if so from which side of the
/// Abyssea divide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyTag {
    #[default]
    None,
    Abyssea,
    NonAbyssea,
}

impl EnemyTag {
    /// Classify a row from its acquisition text and granting NPC.
    pub fn classify(how_to_obtain: &str, npc: &str) -> Self {
        if !how_to_obtain.starts_with(ENEMY_PREFIX) {
            return EnemyTag::None;
        }
        if npc.trim() == ABYSSEA_NPC {
            EnemyTag::Abyssea
        } else {
            EnemyTag::NonAbyssea
        }
    }

    /// Report-column rendition of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            EnemyTag::None => "",
            EnemyTag::Abyssea => "Abyssea Enemy",
            EnemyTag::NonAbyssea => "Non-Abyssea Enemy",
        }
    }
}

impl fmt::Display for EnemyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
