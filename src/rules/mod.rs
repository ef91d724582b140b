//! Rule configuration: parameter policies, pagination behavior, demo toggles
//! and hreflang languages.
//!
//! A `RuleConfig` is an immutable snapshot. The server holds one default
//! snapshot; the playground posts edited copies. Nothing in the engine
//! mutates a snapshot.

pub mod defaults;
pub mod diff;
pub mod validation;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

pub use diff::{diff_configs, ConfigChange};
pub use validation::validate_config;

/// How the engine treats a query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamPolicy {
    /// Persistent, meaningful content variation (filters).
    Stable,
    /// Reorders or reshapes output without changing content (sorting, views).
    Unstable,
    /// Tracking or technical noise; stripped and disallowed.
    Blocked,
}

impl fmt::Display for ParamPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamPolicy::Stable => write!(f, "stable"),
            ParamPolicy::Unstable => write!(f, "unstable"),
            ParamPolicy::Blocked => write!(f, "blocked"),
        }
    }
}

/// The `index|noindex` and `follow|nofollow` pair sent to crawlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotsDirective {
    #[serde(rename = "index,follow")]
    IndexFollow,
    #[serde(rename = "noindex,follow")]
    NoindexFollow,
    #[serde(rename = "index,nofollow")]
    IndexNofollow,
    #[serde(rename = "noindex,nofollow")]
    NoindexNofollow,
}

impl RobotsDirective {
    pub fn as_str(&self) -> &'static str {
        match self {
            RobotsDirective::IndexFollow => "index,follow",
            RobotsDirective::NoindexFollow => "noindex,follow",
            RobotsDirective::IndexNofollow => "index,nofollow",
            RobotsDirective::NoindexNofollow => "noindex,nofollow",
        }
    }

    pub fn is_noindex(&self) -> bool {
        self.as_str().starts_with("noindex")
    }
}

impl fmt::Display for RobotsDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy for a single named query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamRule {
    /// Query key, matched case-sensitively
    pub name: String,
    pub policy: ParamPolicy,
    #[serde(default)]
    pub description: String,
    /// Raw value (lowercased) -> canonical value, e.g. "schwarz" -> "black"
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub synonyms: BTreeMap<String, String>,
}

impl ParamRule {
    pub fn new(name: &str, policy: ParamPolicy, description: &str) -> Self {
        Self {
            name: name.to_string(),
            policy,
            description: description.to_string(),
            synonyms: BTreeMap::new(),
        }
    }

    pub fn with_synonyms(mut self, pairs: &[(&str, &str)]) -> Self {
        for (raw, canonical) in pairs {
            self.synonyms.insert(raw.to_string(), canonical.to_string());
        }
        self
    }
}

/// Where page 2+ of a paginated listing points its canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalStrategy {
    /// Each page is its own canonical (`?page=N` kept).
    #[serde(rename = "self")]
    SelfReferencing,
    /// Every page points at the unpaginated base.
    Base,
}

impl fmt::Display for CanonicalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalStrategy::SelfReferencing => write!(f, "self"),
            CanonicalStrategy::Base => write!(f, "base"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationConfig {
    pub param: String,
    pub page_two_plus: RobotsDirective,
    pub canonical_strategy: CanonicalStrategy,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            param: "page".to_string(),
            page_two_plus: RobotsDirective::IndexFollow,
            canonical_strategy: CanonicalStrategy::SelfReferencing,
        }
    }
}

/// Toggles exposed by the interactive playground.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemoFlags {
    /// When set, URLs carrying only stable filters are indexable and keep
    /// their filters in the canonical.
    pub stable_filters_indexable: bool,
    pub trailing_slash: bool,
    pub lowercase_paths: bool,
}

impl Default for DemoFlags {
    fn default() -> Self {
        Self {
            stable_filters_indexable: false,
            trailing_slash: true,
            lowercase_paths: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HreflangConfig {
    pub languages: Vec<String>,
    pub default_language: String,
}

impl Default for HreflangConfig {
    fn default() -> Self {
        Self {
            languages: defaults::LANGUAGES.iter().map(|l| l.to_string()).collect(),
            default_language: "en".to_string(),
        }
    }
}

impl HreflangConfig {
    pub fn supports(&self, lang: &str) -> bool {
        self.languages.iter().any(|l| l == lang)
    }
}

/// One immutable rule snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    pub rules: Vec<ParamRule>,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub demos: DemoFlags,
    #[serde(default)]
    pub hreflang: HreflangConfig,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            rules: defaults::default_rules(),
            pagination: PaginationConfig::default(),
            demos: DemoFlags::default(),
            hreflang: HreflangConfig::default(),
        }
    }
}

impl RuleConfig {
    /// Looks up a rule by exact name. The first declaration wins when a name
    /// is declared more than once.
    pub fn rule(&self, name: &str) -> Option<&ParamRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Rules of one policy, first declaration per name only.
    pub fn rules_with_policy(&self, policy: ParamPolicy) -> Vec<&ParamRule> {
        let mut seen = Vec::new();
        self.rules
            .iter()
            .filter(|rule| {
                if seen.contains(&rule.name.as_str()) {
                    return false;
                }
                seen.push(rule.name.as_str());
                rule.policy == policy
            })
            .collect()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RuleConfig =
            serde_json::from_str(json).context("Failed to parse rule configuration JSON")?;
        debug!("Parsed rule configuration with {} rules", config.rules.len());
        Ok(config)
    }

    /// Loads a snapshot from a JSON file in the playground format.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        info!("Loading rule configuration from {}", path.display());
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule configuration {}", path.display()))?;
        Self::from_json_str(&raw)
    }
}
