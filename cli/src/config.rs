//! Layered configuration: CLI flags, then environment (through clap's `env`),
//! then `config.toml`, then compiled defaults.
//!
//! A missing default config file is fine. A missing file passed explicitly
//! with `--config` is an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use taskboard_core::repository::file::default_data_dir;

const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
    display: DisplayFileConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DisplayFileConfig {
    date_format: Option<String>,
}

/// Values that may come from flags or environment variables.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_level: String,
    /// chrono format string for due dates in tables.
    pub date_format: String,
}

impl Config {
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let file = match &overrides.config {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file {} does not exist", path.display());
                }
                read_config_file(path)?
            }
            None => match default_data_dir() {
                Ok(dir) if dir.join(CONFIG_FILE_NAME).exists() => {
                    read_config_file(&dir.join(CONFIG_FILE_NAME))?
                }
                _ => ConfigFile::default(),
            },
        };
        Self::resolve(file, overrides)
    }

    fn resolve(file: ConfigFile, overrides: &Overrides) -> Result<Self> {
        let data_dir = match overrides.data_dir.clone().or(file.data_dir) {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Self {
            data_dir,
            log_level: overrides
                .log_level
                .clone()
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            date_format: file
                .display
                .date_format
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
        })
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let file = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(file)
}
