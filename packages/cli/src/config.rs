use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Site file, relative to the project directory
    #[serde(default = "default_site_file")]
    pub site_file: String,

    /// Where `render` writes pages
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Slug used in product links; the site's own slug when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_slug: Option<String>,

    /// Pretty print rendered HTML
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps_api_key: Option<String>,
}

fn default_site_file() -> String {
    "site.json".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid config in {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn site_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.site_file)
    }

    pub fn out_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_file: default_site_file(),
            out_dir: default_out_dir(),
            shop_slug: None,
            pretty: default_pretty(),
            maps_api_key: None,
        }
    }
}
