use std::path::PathBuf;

use serde_json::json;
use thiserror::Error;
use url::Url;

use report_core::{build_report, TitleReport};
use report_logging::{report_info, report_warn};

use crate::config::RunConfig;
use crate::decode::decode_page;
use crate::fetch::Fetcher;
use crate::persist::{OutputStage, PersistError};
use crate::render::{render_csv, render_html, RenderError};
use crate::table::{extract_title_rows, ExtractError};
use crate::types::FetchError;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid base origin '{origin}': {source}")]
    InvalidBaseOrigin {
        origin: String,
        source: url::ParseError,
    },
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Paths written, in staging order: CSV, page, then manifest if any.
    pub written: Vec<PathBuf>,
    /// Rows kept by the filter.
    pub row_count: usize,
    /// Wanted lines with no matching row, in input order.
    pub missing: Vec<String>,
    /// Encoding label the page decoded with.
    pub encoding: String,
    /// URL the fetch ended at after redirects.
    pub final_url: String,
}

/// Run the whole pipeline: fetch the page, decode it, extract and filter
/// the title rows, then commit the rendered artifacts.
///
/// Outputs are staged in memory and nothing touches the output directory
/// until every artifact rendered, so a failed run leaves it as it was.
pub async fn run_report(config: &RunConfig, fetcher: &dyn Fetcher) -> Result<RunSummary, RunError> {
    let base = Url::parse(&config.base_origin).map_err(|source| RunError::InvalidBaseOrigin {
        origin: config.base_origin.clone(),
        source,
    })?;

    report_info!("fetching {}", config.source_url);
    let fetched = fetcher.fetch(&config.source_url).await?;
    let page = decode_page(&fetched.bytes, fetched.metadata.content_type.as_deref());
    report_info!(
        "decoded {} bytes as {}",
        fetched.metadata.byte_len,
        page.encoding_label
    );

    let rows = extract_title_rows(&page.html, &base)?;
    report_info!("extracted {} rows", rows.len());

    let TitleReport { rows, missing } = build_report(&config.wanted, rows);
    report_info!(
        "kept {} of {} wanted titles",
        rows.len(),
        config.wanted.len()
    );
    if !missing.is_empty() {
        report_warn!("{} wanted titles had no match", missing.len());
    }

    let mut stage = OutputStage::new(&config.output_dir)?;
    stage.stage(&config.csv_filename, render_csv(&rows)?);
    stage.stage(&config.html_filename, render_html(&rows));
    if let Some(manifest_filename) = &config.manifest_filename {
        stage.stage(
            manifest_filename,
            render_manifest(
                config,
                &fetched.metadata.final_url,
                &page.encoding_label,
                rows.len(),
                &missing,
            ),
        );
    }
    let written = stage.commit()?;
    report_info!("wrote {} files to {:?}", written.len(), config.output_dir);

    Ok(RunSummary {
        written,
        row_count: rows.len(),
        missing,
        encoding: page.encoding_label,
        final_url: fetched.metadata.final_url,
    })
}

/// Synchronous front door for callers without their own runtime.
pub fn run_report_blocking(
    config: &RunConfig,
    fetcher: &dyn Fetcher,
) -> Result<RunSummary, RunError> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_report(config, fetcher))
}

fn render_manifest(
    config: &RunConfig,
    final_url: &str,
    encoding: &str,
    row_count: usize,
    missing: &[String],
) -> String {
    let manifest = json!({
        "generated_utc": config.generated_utc,
        "source_url": config.source_url,
        "final_url": final_url,
        "encoding": encoding,
        "row_count": row_count,
        "missing": missing,
        "outputs": [config.csv_filename, config.html_filename],
    });
    manifest.to_string()
}
