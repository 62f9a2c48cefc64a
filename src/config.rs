use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::test_content;
use crate::error::ConfigError;
use crate::loader::{resolve_endpoint, source_for_endpoint, ContentSource, InlineSource};

pub const DEFAULT_RESULTS_PER_PAGE: usize = 5;
const REDACTED: &str = "********";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Built-in sample content.
    #[default]
    Test,
    /// A JSON document: local path, `file://` URL or plain http(s) URL.
    Json,
    /// A remote API with optional bearer token and `:resourceId` substitution.
    Api,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { DataSource::Test => "test", DataSource::Json => "json", DataSource::Api => "api" })
    }
}

impl std::str::FromStr for DataSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "test" => Ok(Self::Test),
            "json" => Ok(Self::Json),
            "api" => Ok(Self::Api),
            other => Err(anyhow::anyhow!("unknown data source `{}` (expected test, json, api)", other)),
        }
    }
}

/// Widget options. Every field has a default, so a partial file merges over the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    // Appearance
    pub show_search_button: bool,
    pub search_button_position: ButtonPosition,
    pub search_button_color: String,
    pub accent_color: String,
    pub secondary_color: String,
    pub search_button_selector: Option<String>,

    // Content
    pub data_source: DataSource,
    pub data_endpoint: Option<String>,
    pub api_key: Option<String>,
    pub resource_id: Option<String>,
    /// Inline raw records; wins over any endpoint.
    pub site_content: Option<Vec<Value>>,

    // Search settings
    pub results_per_page: usize,
    pub search_placeholder: String,
    pub popup_title: String,

    // Messages
    pub no_results_text: String,
    pub search_button_text: String,
    pub loading_text: String,
    pub error_text: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            show_search_button: true,
            search_button_position: ButtonPosition::BottomRight,
            search_button_color: "#4a6fa5".to_string(),
            accent_color: "#4cb5ae".to_string(),
            secondary_color: "#166088".to_string(),
            search_button_selector: None,
            data_source: DataSource::Test,
            data_endpoint: None,
            api_key: None,
            resource_id: None,
            site_content: None,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            search_placeholder: "What are you looking for?".to_string(),
            popup_title: "Search".to_string(),
            no_results_text: "No results found".to_string(),
            search_button_text: "🔍".to_string(),
            loading_text: "Loading...".to_string(),
            error_text: "Error loading content".to_string(),
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parsing search config")?;
        Ok(cfg.normalized())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file: {}", path.display()))?;
        Self::from_toml_str(&s).with_context(|| format!("in config file: {}", path.display()))
    }

    /// `config.toml` in the platform config directory, or defaults when it does not exist.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Apply `SITESEARCH_*` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("SITESEARCH_API_KEY") { self.api_key = Some(key); }
        if let Ok(endpoint) = std::env::var("SITESEARCH_ENDPOINT") { self.data_endpoint = Some(endpoint); }
        if let Some(n) = std::env::var("SITESEARCH_RESULTS_PER_PAGE").ok().and_then(|s| s.parse().ok()) {
            self.results_per_page = n;
        }
        self.normalized()
    }

    /// Copy safe to print: the API key is masked.
    pub fn redacted(&self) -> Self {
        Self { api_key: self.api_key.as_ref().map(|_| REDACTED.to_string()), ..self.clone() }
    }

    /// Fall back to defaults for zero page sizes and blank display strings.
    pub fn normalized(mut self) -> Self {
        let d = Self::default();
        if self.results_per_page == 0 { self.results_per_page = d.results_per_page; }
        for (field, default) in [
            (&mut self.search_placeholder, d.search_placeholder),
            (&mut self.popup_title, d.popup_title),
            (&mut self.no_results_text, d.no_results_text),
            (&mut self.search_button_text, d.search_button_text),
            (&mut self.loading_text, d.loading_text),
            (&mut self.error_text, d.error_text),
        ] {
            if field.trim().is_empty() { *field = default; }
        }
        self
    }

    /// Problems worth reporting. None of them is fatal.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut problems = Vec::new();
        if self.site_content.is_none()
            && matches!(self.data_source, DataSource::Json | DataSource::Api)
            && self.endpoint().is_none()
        {
            problems.push(ConfigError::MissingEndpoint { data_source: self.data_source });
        }
        if !self.show_search_button && self.search_button_selector.as_deref().is_some_and(|s| s.trim().is_empty()) {
            problems.push(ConfigError::BlankSelector);
        }
        problems
    }

    fn endpoint(&self) -> Option<&str> {
        self.data_endpoint.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }

    /// Resolve where content comes from: inline `siteContent` first, then the configured data source.
    pub fn content_source(&self) -> Result<Box<dyn ContentSource>, ConfigError> {
        if let Some(items) = &self.site_content {
            return Ok(Box::new(InlineSource::new(items.clone())));
        }
        match self.data_source {
            DataSource::Test => Ok(Box::new(InlineSource::new(test_content()))),
            DataSource::Json => {
                let endpoint = self.endpoint().ok_or(ConfigError::MissingEndpoint { data_source: DataSource::Json })?;
                source_for_endpoint(endpoint, None)
            }
            DataSource::Api => {
                let template = self.endpoint().ok_or(ConfigError::MissingEndpoint { data_source: DataSource::Api })?;
                let endpoint = resolve_endpoint(template, self.resource_id.as_deref());
                source_for_endpoint(&endpoint, self.api_key.clone())
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("dev", "sitesearch", "sitesearch")?;
    Some(proj.config_dir().join("config.toml"))
}
