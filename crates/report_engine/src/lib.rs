//! Report engine: IO pipeline from page fetch to written report.
mod run;
mod table;
mod sanitize;
mod decode;
mod render;
mod persist;
mod config;
mod fetch;
mod types;

pub use config::{
    RunConfig, DEFAULT_BASE_ORIGIN, DEFAULT_CSV_FILENAME, DEFAULT_HTML_FILENAME,
    DEFAULT_SOURCE_URL,
};
pub use decode::{decode_page, DecodedPage};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use persist::{OutputStage, PersistError};
pub use render::{render_csv, render_html, RenderError, CSV_HEADERS, LINK_SEPARATOR};
pub use run::{run_report, run_report_blocking, RunError, RunSummary};
pub use sanitize::{sanitize_cell, SanitizeError, SanitizedCell};
pub use table::{extract_title_rows, ExtractError, EXPECTED_HEADERS};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
