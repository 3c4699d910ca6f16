// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use xdg::BaseDirectories;

pub const APP_NAME: &str = "rowscope";
pub const DEFAULT_CONFIG_FILENAME: &str = "config.toml";

// Main configuration structure, mapping to config.toml
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub interface: InterfaceConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
    /// Optional descriptor overrides; when present they fix the column set
    /// and its order instead of inferring from the data.
    #[serde(default)]
    pub columns: Vec<ColumnRule>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct InterfaceConfig {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

fn default_refresh_interval_ms() -> u64 {
    500
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        InterfaceConfig {
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Data file to open when none is given on the command line.
    #[serde(default)]
    pub default_path: Option<String>,
    /// How many records participate in column inference.
    #[serde(default = "default_infer_limit")]
    pub infer_limit: usize,
}

fn default_infer_limit() -> usize {
    100
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            default_path: None,
            infer_limit: default_infer_limit(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // "debug", "info", "warn", "error"
    #[serde(default = "default_log_dir")]
    pub log_dir: String, // Path, can use ~
    #[serde(default = "default_rotate_daily")]
    pub rotate_daily: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "~/.rowscope/logs".to_string()
}
fn default_rotate_daily() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            log_dir: default_log_dir(),
            rotate_daily: default_rotate_daily(),
        }
    }
}

/// One `[[columns]]` entry.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ColumnRule {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_true")]
    pub filterable: bool,
    #[serde(default = "default_true")]
    pub sortable: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct KeyBindingsConfig {
    #[serde(default = "default_quit")] pub quit: String,
    #[serde(default = "default_help")] pub help: String,
    #[serde(default = "default_next_tab")] pub next_tab: String,
    #[serde(default = "default_prev_tab")] pub prev_tab: String,
    #[serde(default = "default_up")] pub up: String,
    #[serde(default = "default_down")] pub down: String,
    #[serde(default = "default_filter")] pub filter: String,
    #[serde(default = "default_filter_column")] pub filter_column: String,
    #[serde(default = "default_sort")] pub sort: String,
    #[serde(default = "default_prev_col")] pub prev_col: String,
    #[serde(default = "default_next_col")] pub next_col: String,
    #[serde(default = "default_next_page")] pub next_page: String,
    #[serde(default = "default_prev_page")] pub prev_page: String,
    #[serde(default = "default_first_page")] pub first_page: String,
    #[serde(default = "default_last_page")] pub last_page: String,
    #[serde(default = "default_reload")] pub reload: String,
}

fn default_quit() -> String { "q".to_string() }
fn default_help() -> String { "?".to_string() }
fn default_next_tab() -> String { "Tab".to_string() }
fn default_prev_tab() -> String { "BackTab".to_string() }
fn default_up() -> String { "Up".to_string() }
fn default_down() -> String { "Down".to_string() }
fn default_filter() -> String { "/".to_string() }
fn default_filter_column() -> String { "f".to_string() }
fn default_sort() -> String { "s".to_string() }
fn default_prev_col() -> String { "[".to_string() }
fn default_next_col() -> String { "]".to_string() }
fn default_next_page() -> String { "n".to_string() }
fn default_prev_page() -> String { "p".to_string() }
fn default_first_page() -> String { "g".to_string() }
fn default_last_page() -> String { "G".to_string() }
fn default_reload() -> String { "r".to_string() }

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            help: default_help(),
            next_tab: default_next_tab(),
            prev_tab: default_prev_tab(),
            up: default_up(),
            down: default_down(),
            filter: default_filter(),
            filter_column: default_filter_column(),
            sort: default_sort(),
            prev_col: default_prev_col(),
            next_col: default_next_col(),
            next_page: default_next_page(),
            prev_page: default_prev_page(),
            first_page: default_first_page(),
            last_page: default_last_page(),
            reload: default_reload(),
        }
    }
}

impl Config {
    pub fn load(config_path_override: Option<&Path>) -> Result<Self> {
        let xdg_dirs = BaseDirectories::with_prefix(APP_NAME)?;
        let config_path = match config_path_override {
            Some(path) => {
                debug!("Using provided config path override: {}", path.display());
                path.to_path_buf()
            }
            None => xdg_dirs
                .find_config_file(DEFAULT_CONFIG_FILENAME)
                .with_context(|| {
                    format!(
                        "Could not find default config file '{}'",
                        DEFAULT_CONFIG_FILENAME
                    )
                })?,
        };

        info!("Loading configuration from {}", config_path.display());
        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }
}
