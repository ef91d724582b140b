//! Page metadata (robots meta, canonical link, hreflang alternates) and the
//! SEO receipt that explains every decision for one URL.

use serde::Serialize;
use tracing::{info, instrument};

use crate::canonical::{compute_canonical, CanonicalResult};
use crate::engine::Engine;
use crate::error::EngineResult;
use crate::hreflang::{
    generate_hreflang_links, language_prefix, validate_hreflang_reciprocity, HreflangAlternate,
};
use crate::robots::RobotsCheck;
use crate::rules::{RobotsDirective, RuleConfig};
use crate::url_parser::{normalize_path, RequestUrl};

/// Everything a page render knows about its own URL
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub pathname: &'a str,
    pub search_params: &'a [(String, String)],
    pub config: &'a RuleConfig,
    pub base_url: &'a str,
}

/// Head tags for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub robots: RobotsDirective,
    pub canonical_href: String,
    pub language: String,
    pub hreflang_alternates: Vec<HreflangAlternate>,
}

/// Full diagnostic for one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoReceipt {
    pub url: String,
    pub path: String,
    pub metadata: PageMetadata,
    pub canonical: CanonicalResult,
    pub robots_check: RobotsCheck,
    pub hreflang_warnings: Vec<String>,
}

/// Language of a path: its supported two-letter prefix, otherwise the
/// default language
pub fn detect_language(pathname: &str, config: &RuleConfig) -> String {
    match language_prefix(pathname) {
        Some(lang) if config.hreflang.supports(lang) => lang.to_string(),
        _ => config.hreflang.default_language.clone(),
    }
}

fn metadata_from(request: &PageRequest<'_>, canonical: &CanonicalResult) -> (PageMetadata, Vec<String>) {
    // Alternates are built from the same path the canonical uses
    let pathname = normalize_path(request.pathname, &request.config.demos);
    let language = detect_language(&pathname, request.config);
    let links = generate_hreflang_links(
        &pathname,
        &language,
        request.base_url,
        &request.config.hreflang,
    );
    let mut warnings = links.warnings;
    warnings.extend(validate_hreflang_reciprocity(&links.alternates));

    let metadata = PageMetadata {
        robots: canonical.robots,
        canonical_href: canonical.canonical.clone(),
        language,
        hreflang_alternates: links.alternates,
    };
    (metadata, warnings)
}

/// Builds the head metadata of a page from its URL and the rule snapshot
pub fn generate_page_metadata(request: &PageRequest<'_>) -> PageMetadata {
    let canonical = compute_canonical(
        request.pathname,
        request.search_params,
        request.config,
        request.base_url,
    );
    metadata_from(request, &canonical).0
}

/// Parses a raw URL (absolute or site-relative) and explains how the engine
/// treats it
///
/// # Arguments
/// * `url` - The URL as typed by the user
/// * `engine` - Rule snapshot and site origin to evaluate against
///
/// # Returns
/// * `EngineResult<SeoReceipt>` - The receipt, or the typed parse error
#[instrument(level = "debug", skip(engine))]
pub fn build_receipt(url: &str, engine: &Engine) -> EngineResult<SeoReceipt> {
    let request_url = RequestUrl::parse(url)?;

    let canonical = engine.evaluate(&request_url.path, &request_url.query);
    let robots_check = engine.check(&request_url.path, &request_url.query);

    let request = PageRequest {
        pathname: &request_url.path,
        search_params: &request_url.query,
        config: engine.config(),
        base_url: engine.base_url(),
    };
    let (metadata, hreflang_warnings) = metadata_from(&request, &canonical);

    info!(
        "Receipt for {}: {} canonical={} blocked={}",
        url, canonical.robots, canonical.canonical, robots_check.is_blocked
    );

    Ok(SeoReceipt {
        url: url.trim().to_string(),
        path: normalize_path(&request_url.path, &engine.config().demos),
        metadata,
        canonical,
        robots_check,
        hreflang_warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn engine() -> Engine {
        Engine::new(RuleConfig::default(), "https://example.com")
    }

    #[test]
    fn test_page_metadata() {
        let config = RuleConfig::default();
        let params = vec![("sort".to_string(), "price_desc".to_string())];
        let metadata = generate_page_metadata(&PageRequest {
            pathname: "/de/catalog/t-shirts/",
            search_params: &params,
            config: &config,
            base_url: "https://example.com",
        });

        assert_eq!(metadata.robots, RobotsDirective::NoindexFollow);
        assert_eq!(metadata.canonical_href, "https://example.com/de/catalog/t-shirts/");
        assert_eq!(metadata.language, "de");
        assert_eq!(metadata.hreflang_alternates.len(), 5);
        assert!(metadata
            .hreflang_alternates
            .iter()
            .any(|a| a.hreflang == "en" && a.href == "https://example.com/catalog/t-shirts/"));
    }

    #[test]
    fn test_mixed_case_path_matches_canonical() {
        let config = RuleConfig::default();
        let metadata = generate_page_metadata(&PageRequest {
            pathname: "/DE/Catalog//T-Shirts",
            search_params: &[],
            config: &config,
            base_url: "https://example.com",
        });

        assert_eq!(metadata.language, "de");
        assert_eq!(metadata.canonical_href, "https://example.com/de/catalog/t-shirts/");
        let href = |lang: &str| {
            metadata
                .hreflang_alternates
                .iter()
                .find(|a| a.hreflang == lang)
                .map(|a| a.href.clone())
                .unwrap()
        };
        assert_eq!(href("de"), metadata.canonical_href);
        assert_eq!(href("en"), "https://example.com/catalog/t-shirts/");
        assert_eq!(href("x-default"), "https://example.com/catalog/t-shirts/");
    }

    #[test]
    fn test_receipt_alternates_follow_normalized_path() {
        let receipt = build_receipt("/Catalog/T-Shirts?utm_source=fb", &engine()).unwrap();
        let en = receipt
            .metadata
            .hreflang_alternates
            .iter()
            .find(|a| a.hreflang == "en")
            .unwrap();
        assert_eq!(en.href, receipt.canonical.canonical);
        assert_eq!(en.href, "https://example.com/catalog/t-shirts/");
    }

    #[test]
    fn test_language_detection() {
        let config = RuleConfig::default();
        assert_eq!(detect_language("/fr/learn/", &config), "fr");
        assert_eq!(detect_language("/it/learn/", &config), "en");
        assert_eq!(detect_language("/learn/", &config), "en");
    }

    #[test]
    fn test_receipt_for_absolute_url() {
        let receipt = build_receipt(
            "https://example.com/Catalog/T-Shirts?utm_source=fb&color=Schwarz",
            &engine(),
        )
        .unwrap();

        assert_eq!(receipt.path, "/catalog/t-shirts/");
        assert!(receipt.canonical.block_in_robots);
        assert!(receipt.robots_check.is_blocked);
        assert!(!receipt.canonical.canonical.contains("utm_source"));
        assert_eq!(receipt.metadata.canonical_href, receipt.canonical.canonical);
        assert!(receipt.hreflang_warnings.is_empty());
    }

    #[test]
    fn test_receipt_for_relative_url() {
        let receipt = build_receipt("/catalog/t-shirts/?page=2", &engine()).unwrap();
        assert_eq!(receipt.canonical.canonical, "https://example.com/catalog/t-shirts/?page=2");
        assert_eq!(receipt.metadata.robots, RobotsDirective::IndexFollow);
        assert!(receipt.canonical.sitemap_included);
    }

    #[test]
    fn test_invalid_urls_are_typed_errors() {
        let engine = engine();
        assert_eq!(build_receipt("", &engine).unwrap_err(), EngineError::EmptyUrl);
        assert!(matches!(
            build_receipt("not a url", &engine),
            Err(EngineError::InvalidUrl { .. })
        ));
        assert!(matches!(
            build_receipt("ftp://example.com/file", &engine),
            Err(EngineError::UnsupportedScheme { .. })
        ));
    }
}
