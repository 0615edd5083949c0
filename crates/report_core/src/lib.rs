//! Report core: pure title normalization, matching and tagging.
mod normalize;
mod report;
mod title;
mod wanted;

pub use normalize::{collapse_whitespace, normalize_title, MOJIBAKE_ARTIFACTS, STAR_GLYPHS};
pub use report::{build_report, TitleReport};
pub use title::{EnemyTag, TitleRow};
pub use wanted::WantedList;
