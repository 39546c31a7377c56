use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::aggregate::ColumnMapping;
use crate::error::{AppError, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Checked when the configured variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub columns: ColumnMapping,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            columns: ColumnMapping::default(),
        }
    }
}

impl Settings {
    /// Update a single field by its dotted key, as used by `config set`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.to_string();
        match key {
            "model" => self.model = value,
            "api_key_env" => self.api_key_env = value,
            "base_url" => self.base_url = value.trim_end_matches('/').to_string(),
            "columns.type" => self.columns.type_column = value,
            "columns.amount" => self.columns.amount_column = value,
            "columns.category" => self.columns.category_column = value,
            "columns.income" => self.columns.income_marker = value,
            "columns.expense" => self.columns.expense_marker = value,
            _ => return Err(AppError::Settings(format!("unknown setting '{key}'"))),
        }
        Ok(())
    }

    /// API key from the configured environment variable, then `API_KEY`.
    pub fn api_key(&self) -> Option<String> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("finanalyzer")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

fn load_settings_from(path: &std::path::Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&settings_path(), settings)
}

fn save_settings_to(path: &std::path::Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
