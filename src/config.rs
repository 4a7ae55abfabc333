use crate::constants::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_FOLDER_MODEL, DEFAULT_NOTE_EXTENSION, DEFAULT_TAG_MODEL,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration loaded from settings.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub organizer: OrganizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_tag_model")]
    pub tag_model: String,
    #[serde(default = "default_folder_model")]
    pub folder_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Note file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrganizerConfig {
    #[serde(default)]
    pub skip_confirmation: bool,
    #[serde(default)]
    pub dry_run_default: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_tag_model() -> String {
    DEFAULT_TAG_MODEL.to_string()
}

fn default_folder_model() -> String {
    DEFAULT_FOLDER_MODEL.to_string()
}

fn default_extension() -> String {
    DEFAULT_NOTE_EXTENSION.to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            tag_model: default_tag_model(),
            folder_model: default_folder_model(),
        }
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration from default location or return defaults
    pub fn load() -> Result<Self> {
        let default_paths = [
            PathBuf::from("config/settings.toml"),
            PathBuf::from(shellexpand::tilde("~/.config/notesorter/settings.toml").into_owned()),
        ];

        for path in &default_paths {
            if path.exists() {
                tracing::debug!("Loading config from {}", path.display());
                return Self::from_file(path);
            }
        }

        Ok(Self::default())
    }

    /// Load from an explicit path when given, otherwise from the default locations
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
                Self::from_file(expanded)
            }
            None => Self::load(),
        }
    }

    /// Get the API key from config or environment variable
    pub fn llm_api_key(&self) -> Option<String> {
        self.llm
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
    }
}
