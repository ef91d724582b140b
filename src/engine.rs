use std::sync::Arc;
use tracing::{info, instrument};

use crate::canonical::{compute_canonical, CanonicalResult};
use crate::error::EngineResult;
use crate::metadata::{build_receipt, SeoReceipt};
use crate::robots::{generate_robots_txt, RobotsCheck, RobotsMatcher};
use crate::rules::{validate_config, RuleConfig};
use crate::sitemap::{generate_sitemap_entries, generate_sitemap_xml, SitemapEntry};
use crate::url_parser::normalize_base_url;

/// A rule snapshot bound to a site origin, with its robots rules compiled
///
/// Built once at startup and shared read-only between server workers. An
/// edited snapshot gets its own `Engine`.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Arc<RuleConfig>,
    base_url: String,
    matcher: RobotsMatcher,
    warnings: Vec<String>,
}

impl Engine {
    pub fn new(config: RuleConfig, base_url: &str) -> Self {
        Self::from_shared(Arc::new(config), base_url)
    }

    pub fn from_shared(config: Arc<RuleConfig>, base_url: &str) -> Self {
        let matcher = RobotsMatcher::from_config(&config);
        let warnings = validate_config(&config);
        info!(
            "Engine ready for {} with {} rules, {} robots patterns, {} config warnings",
            base_url,
            config.rules.len(),
            matcher.rules().len(),
            warnings.len()
        );
        Self {
            config,
            base_url: normalize_base_url(base_url),
            matcher,
            warnings,
        }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn shared_config(&self) -> Arc<RuleConfig> {
        Arc::clone(&self.config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn matcher(&self) -> &RobotsMatcher {
        &self.matcher
    }

    /// Resolves a path and query, attaching the robots.txt rules the URL matched
    #[instrument(level = "debug", skip(self, query))]
    pub fn evaluate(&self, path: &str, query: &[(String, String)]) -> CanonicalResult {
        let mut result = compute_canonical(path, query, &self.config, &self.base_url);
        result.robots_matched_rules = Some(self.matcher.check(path, query).matched_rules);
        result
    }

    /// Checks a URL against the compiled rules; configuration warnings come first
    pub fn check(&self, path: &str, query: &[(String, String)]) -> RobotsCheck {
        let mut check = self.matcher.check(path, query);
        let mut warnings = self.warnings.clone();
        warnings.append(&mut check.warnings);
        check.warnings = warnings;
        check
    }

    pub fn robots_txt(&self) -> String {
        generate_robots_txt(&self.config, &self.base_url)
    }

    pub fn sitemap_entries(&self) -> Vec<SitemapEntry> {
        generate_sitemap_entries(&self.config, &self.base_url)
    }

    pub fn sitemap_xml(&self) -> anyhow::Result<String> {
        generate_sitemap_xml(&self.sitemap_entries())
    }

    pub fn receipt(&self, url: &str) -> EngineResult<SeoReceipt> {
        build_receipt(url, self)
    }
}
