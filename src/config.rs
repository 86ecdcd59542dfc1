//! Configuration file handling.
//!
//! The configuration file is stored at `$HOME/.fnb-scrape/config.json` unless another path is
//! given. It holds the rendering contract of the banking page: which section and toggles to
//! navigate to, how rows and cells are selected, and how amounts and dates are written. When no
//! file exists at the default location the built-in defaults are used.

use crate::api::{
    RowQuery, DEFAULT_CELL_SELECTOR, DEFAULT_ROW_SELECTOR, PENDING_TOGGLE, POSTED_TOGGLE,
    TRANSACTION_SECTION, TYPE_LABEL,
};
use crate::extract::LAYOUT_VERSION;
use crate::normalize::{
    Normalizer, DEFAULT_ARTIFACT_TOKENS, DEFAULT_CURRENCY_SYMBOL, DEFAULT_DATE_FORMAT,
};
use crate::pipeline::TransactionMode;
use crate::utils;
use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "fnb-scrape";
const CONFIG_VERSION: u8 = 1;
const CONFIG_DIR: &str = ".fnb-scrape";
const CONFIG_JSON: &str = "config.json";

/// Represents the serialization and deserialization format of the configuration file. Fields
/// that are missing from the file take their default values.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "fnb-scrape",
///   "config_version": 1,
///   "layout_version": 1,
///   "section_label": "Transaction",
///   "posted_toggle": "tableSwitcherButton_1",
///   "pending_toggle": "tableSwitcherButton_2",
///   "type_label": "Type",
///   "row_selector": ".tableRow",
///   "cell_selector": ".tableCell .tableCellItem",
///   "currency_symbol": "R",
///   "artifact_tokens": ["eB"],
///   "date_format": "%d %b %Y"
/// }
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    app_name: String,
    config_version: u8,
    /// The version of the positional column layout this file was written for.
    layout_version: u32,
    section_label: String,
    posted_toggle: String,
    pending_toggle: String,
    /// The title shown next to the account type in the account details panel.
    type_label: String,
    row_selector: String,
    cell_selector: String,
    currency_symbol: String,
    artifact_tokens: Vec<String>,
    /// A chrono format string.
    date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            layout_version: LAYOUT_VERSION,
            section_label: TRANSACTION_SECTION.to_string(),
            posted_toggle: POSTED_TOGGLE.to_string(),
            pending_toggle: PENDING_TOGGLE.to_string(),
            type_label: TYPE_LABEL.to_string(),
            row_selector: DEFAULT_ROW_SELECTOR.to_string(),
            cell_selector: DEFAULT_CELL_SELECTOR.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            artifact_tokens: DEFAULT_ARTIFACT_TOKENS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// The default location of the config file, `$HOME/.fnb-scrape/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_JSON))
    }

    /// Loads and validates the config file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, if it belongs to another app, or if
    /// it was written for a different column layout version.
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config: Config = utils::deserialize(path).await?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            config.layout_version == LAYOUT_VERSION,
            "The config file at {} was written for column layout version {} but this build \
            supports version {}",
            path.display(),
            config.layout_version,
            LAYOUT_VERSION
        );

        Ok(config)
    }

    /// Loads `path` if given. Otherwise loads the file at the default location, or returns the
    /// defaults if there is no file there.
    pub async fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::load(path).await;
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path).await,
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Saves the config to `path`, creating its directory if needed.
    pub async fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data)
            .await
            .context("Unable to write config file")
    }

    pub fn section_label(&self) -> &str {
        &self.section_label
    }

    pub fn type_label(&self) -> &str {
        &self.type_label
    }

    /// The id of the toggle that shows the table for `mode`.
    pub fn toggle_for(&self, mode: TransactionMode) -> &str {
        match mode {
            TransactionMode::Posted => &self.posted_toggle,
            TransactionMode::Pending => &self.pending_toggle,
        }
    }

    pub fn row_query(&self) -> RowQuery {
        RowQuery {
            row_selector: self.row_selector.clone(),
            cell_selector: self.cell_selector.clone(),
        }
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(
            self.currency_symbol.clone(),
            self.artifact_tokens.clone(),
            self.date_format.clone(),
        )
    }
}
