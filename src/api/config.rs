use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::engine::Engine;
use crate::rules::RuleConfig;

/// Name of the optional settings file, looked up without extension
pub const CONFIG_FILE: &str = "seo_lab";

/// Prefix of the environment overrides (`SEOLAB_PORT`, `SEOLAB_BASE_URL`, ...)
pub const ENV_PREFIX: &str = "SEOLAB";

/// Configuration for the API server
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Site origin every canonical, hreflang and sitemap URL is built on
    pub base_url: String,

    /// JSON rule snapshot; the built-in defaults are used when unset
    #[serde(default)]
    pub rules_file: Option<String>,

    /// Directory for log files; logs go to stderr when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "https://example.com".to_string(),
            rules_file: None,
            log_dir: None,
        }
    }
}

impl ApiConfig {
    /// Layers defaults, `seo_lab.toml` (if present) and `SEOLAB_*` variables
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("base_url", defaults.base_url)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read server settings")?;

        let config: ApiConfig = settings
            .try_deserialize()
            .context("Invalid server settings")?;
        debug!("Loaded server settings: {:?}", config);
        Ok(config)
    }

    /// Loads the rule snapshot named by `rules_file`, or the defaults
    pub fn load_rules(&self) -> Result<RuleConfig> {
        match &self.rules_file {
            Some(path) => RuleConfig::from_json_file(Path::new(path)),
            None => {
                info!("No rules file configured, using the default rule set");
                Ok(RuleConfig::default())
            }
        }
    }

    pub fn build_engine(&self) -> Result<Engine> {
        Ok(Engine::new(self.load_rules()?, &self.base_url))
    }
}
