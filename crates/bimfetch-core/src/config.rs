use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::ModelDescriptor;

/// HTTP fetch settings (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Base URL that relative model URLs are resolved against (the viewer page origin).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Whole-transfer timeout in seconds. None = wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Connect timeout in seconds. None = libcurl default.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

/// Viewer model configuration loaded from `~/.config/bimfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Load `initial_models` on startup. When false, only query-string models load.
    #[serde(default = "default_true")]
    pub auto_load_initial_models: bool,
    /// When the query string names any model, ignore `initial_models` entirely.
    /// When false, both lists load (config first).
    #[serde(default)]
    pub url_params_override_config: bool,
    /// Models to load on startup, in order.
    #[serde(default)]
    pub initial_models: Vec<ModelDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch: Option<FetchConfig>,
}

fn default_true() -> bool {
    true
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            auto_load_initial_models: true,
            url_params_override_config: false,
            initial_models: Vec::new(),
            fetch: None,
        }
    }
}

impl ViewerConfig {
    /// Fetch settings, defaulted when the section is missing.
    pub fn fetch_config(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bimfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ViewerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ViewerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file. `.json` files are read as JSON, anything else as TOML.
pub fn load_from(path: &Path) -> Result<ViewerConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let cfg = if is_json {
        serde_json::from_str(&data).with_context(|| format!("parse {}", path.display()))?
    } else {
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?
    };
    Ok(cfg)
}
