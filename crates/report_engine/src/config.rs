use std::path::PathBuf;

use report_core::WantedList;

use crate::fetch::FetchSettings;

/// Page that carries the title table.
pub const DEFAULT_SOURCE_URL: &str = "https://www.bg-wiki.com/ffxi/Titles";
/// Origin that relative hrefs in the obtain column resolve against.
pub const DEFAULT_BASE_ORIGIN: &str = "https://www.bg-wiki.com";
/// Default name of the CSV artifact.
pub const DEFAULT_CSV_FILENAME: &str = "titles_filtered.csv";
/// Default name of the sortable page artifact.
pub const DEFAULT_HTML_FILENAME: &str = "titles_filtered.html";

/// Everything one report run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Page to fetch.
    pub source_url: String,
    /// Origin that relative hrefs resolve against.
    pub base_origin: String,
    /// The wanted titles driving the filter and the output order.
    pub wanted: WantedList,
    /// Directory the report files land in.
    pub output_dir: PathBuf,
    pub csv_filename: String,
    pub html_filename: String,
    /// When set, a JSON manifest describing the run is written alongside
    /// the report files.
    pub manifest_filename: Option<String>,
    /// RFC 3339 timestamp recorded in the manifest.
    pub generated_utc: String,
    pub fetch: FetchSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            base_origin: DEFAULT_BASE_ORIGIN.to_string(),
            wanted: WantedList::default(),
            output_dir: PathBuf::from("."),
            csv_filename: DEFAULT_CSV_FILENAME.to_string(),
            html_filename: DEFAULT_HTML_FILENAME.to_string(),
            manifest_filename: None,
            generated_utc: String::new(),
            fetch: FetchSettings::default(),
        }
    }
}

impl RunConfig {
    /// Config with defaults everywhere except the wanted list.
    pub fn for_wanted(wanted: WantedList) -> Self {
        Self {
            wanted,
            ..Self::default()
        }
    }
}
