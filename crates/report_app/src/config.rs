use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use report_core::WantedList;
use report_engine::RunConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Args;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read wanted list {path:?}: {source}")]
    WantedList { path: PathBuf, source: io::Error },
    #[error("wanted list {path:?} has no entries")]
    EmptyWantedList { path: PathBuf },
    #[error("could not read config file {path:?}: {source}")]
    ConfigFile { path: PathBuf, source: io::Error },
    #[error("could not parse config file {path:?}: {message}")]
    ConfigParse { path: PathBuf, message: String },
}

/// Optional RON file mirroring the command line flags.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub source_url: Option<String>,
    pub base_origin: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub csv_filename: Option<String>,
    pub html_filename: Option<String>,
    pub manifest_filename: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

/// Build the run configuration from the wanted-list file, the optional
/// config file and the command line flags, in that precedence order.
pub fn load(args: &Args) -> Result<RunConfig, ConfigError> {
    let wanted_raw = fs::read_to_string(&args.wanted).map_err(|source| ConfigError::WantedList {
        path: args.wanted.clone(),
        source,
    })?;
    let wanted = WantedList::parse(&wanted_raw);
    if wanted.is_empty() {
        return Err(ConfigError::EmptyWantedList {
            path: args.wanted.clone(),
        });
    }

    let mut config = RunConfig::for_wanted(wanted);

    if let Some(path) = &args.config {
        apply_file(&mut config, &read_file_config(path)?);
    }
    apply_args(&mut config, args);

    config.generated_utc = Utc::now().to_rfc3339();
    Ok(config)
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|err| ConfigError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn apply_file(config: &mut RunConfig, file: &FileConfig) {
    if let Some(source_url) = &file.source_url {
        config.source_url = source_url.clone();
    }
    if let Some(base_origin) = &file.base_origin {
        config.base_origin = base_origin.clone();
    }
    if let Some(output_dir) = &file.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(csv_filename) = &file.csv_filename {
        config.csv_filename = csv_filename.clone();
    }
    if let Some(html_filename) = &file.html_filename {
        config.html_filename = html_filename.clone();
    }
    if file.manifest_filename.is_some() {
        config.manifest_filename = file.manifest_filename.clone();
    }
    if let Some(secs) = file.request_timeout_secs {
        config.fetch.request_timeout = Duration::from_secs(secs);
    }
    if let Some(user_agent) = &file.user_agent {
        config.fetch.user_agent = user_agent.clone();
    }
}

fn apply_args(config: &mut RunConfig, args: &Args) {
    if let Some(url) = &args.url {
        config.source_url = url.clone();
    }
    if let Some(base) = &args.base {
        config.base_origin = base.clone();
    }
    if let Some(out_dir) = &args.out_dir {
        config.output_dir = out_dir.clone();
    }
    if let Some(csv) = &args.csv {
        config.csv_filename = csv.clone();
    }
    if let Some(html) = &args.html {
        config.html_filename = html.clone();
    }
    if args.manifest.is_some() {
        config.manifest_filename = args.manifest.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn write_wanted(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("wanted.txt");
        fs::write(&path, "First Title\nSecond Title\n").unwrap();
        path
    }

    fn parse_args(extra: &[&str], wanted: &Path) -> Args {
        let mut argv = vec!["title_report", "--wanted", wanted.to_str().unwrap()];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_point_at_the_wiki() {
        let temp = TempDir::new().unwrap();
        let wanted = write_wanted(&temp);

        let config = load(&parse_args(&[], &wanted)).unwrap();

        assert_eq!(config.source_url, report_engine::DEFAULT_SOURCE_URL);
        assert_eq!(config.base_origin, report_engine::DEFAULT_BASE_ORIGIN);
        assert_eq!(config.csv_filename, "titles_filtered.csv");
        assert_eq!(config.html_filename, "titles_filtered.html");
        assert_eq!(config.manifest_filename, None);
        assert_eq!(config.wanted.len(), 2);
        assert!(!config.generated_utc.is_empty());
    }

    #[test]
    fn missing_wanted_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let args = parse_args(&[], &temp.path().join("absent.txt"));
        assert!(matches!(load(&args), Err(ConfigError::WantedList { .. })));
    }

    #[test]
    fn blank_wanted_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wanted.txt");
        fs::write(&path, "\n   \n").unwrap();

        let args = parse_args(&[], &path);
        assert!(matches!(load(&args), Err(ConfigError::EmptyWantedList { .. })));
    }

    #[test]
    fn config_file_overrides_defaults_and_flags_override_it() {
        let temp = TempDir::new().unwrap();
        let wanted = write_wanted(&temp);
        let config_path = temp.path().join("report.ron");
        fs::write(
            &config_path,
            r#"(
    source_url: Some("https://mirror.example/titles"),
    csv_filename: Some("from_file.csv"),
    request_timeout_secs: Some(5),
)"#,
        )
        .unwrap();

        let args = parse_args(
            &[
                "--config",
                config_path.to_str().unwrap(),
                "--csv",
                "from_flag.csv",
            ],
            &wanted,
        );
        let config = load(&args).unwrap();

        assert_eq!(config.source_url, "https://mirror.example/titles");
        assert_eq!(config.csv_filename, "from_flag.csv");
        assert_eq!(config.fetch.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let wanted = write_wanted(&temp);
        let config_path = temp.path().join("report.ron");
        fs::write(&config_path, "(source_url: 12)").unwrap();

        let args = parse_args(&["--config", config_path.to_str().unwrap()], &wanted);
        assert!(matches!(load(&args), Err(ConfigError::ConfigParse { .. })));
    }
}
