//! Hreflang alternates for localized pages.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

use crate::rules::HreflangConfig;
use crate::url_parser::normalize_base_url;

pub const X_DEFAULT: &str = "x-default";

static LANGUAGE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/([a-z]{2})(/|$)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HreflangAlternate {
    pub hreflang: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HreflangLinks {
    pub alternates: Vec<HreflangAlternate>,
    pub warnings: Vec<String>,
}

/// Two-letter language prefix of a path, if it has one
pub fn language_prefix(path: &str) -> Option<&str> {
    LANGUAGE_PREFIX
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Path without its language prefix, always starting with `/`
pub fn strip_language_prefix(path: &str) -> String {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    match language_prefix(&path).map(|lang| lang.len() + 1) {
        Some(prefix_len) => {
            let rest = &path[prefix_len..];
            if rest.is_empty() {
                "/".to_string()
            } else {
                rest.to_string()
            }
        }
        None => path,
    }
}

/// Builds the alternates of a page for every supported language
///
/// # Arguments
/// * `path` - Page path, with or without a language prefix
/// * `current_lang` - Language of the page being rendered
/// * `base_url` - Site origin
/// * `hreflang` - Supported languages and the default one
///
/// # Returns
/// * `HreflangLinks` - One alternate per language in configured order, then
///   `x-default` pointing at the default-language URL
#[instrument(level = "debug", skip(hreflang))]
pub fn generate_hreflang_links(
    path: &str,
    current_lang: &str,
    base_url: &str,
    hreflang: &HreflangConfig,
) -> HreflangLinks {
    let base_url = normalize_base_url(base_url);
    let bare_path = strip_language_prefix(path);
    let mut links = HreflangLinks::default();

    if !hreflang.supports(current_lang) {
        let message = format!(
            "current language '{}' is not supported ({})",
            current_lang,
            hreflang.languages.join(", ")
        );
        warn!("{}", message);
        links.warnings.push(message);
    }

    let href_for = |lang: &str| {
        if lang == hreflang.default_language {
            format!("{}{}", base_url, bare_path)
        } else {
            format!("{}/{}{}", base_url, lang, bare_path)
        }
    };

    for lang in &hreflang.languages {
        links.alternates.push(HreflangAlternate {
            hreflang: lang.clone(),
            href: href_for(lang),
        });
    }
    links.alternates.push(HreflangAlternate {
        hreflang: X_DEFAULT.to_string(),
        href: href_for(&hreflang.default_language),
    });

    debug!("Generated {} hreflang alternates for {}", links.alternates.len(), bare_path);
    links
}

/// Checks one page's alternates for a missing `x-default` and for codes
/// declared more than once. Reciprocity across pages is not verified.
pub fn validate_hreflang_reciprocity(alternates: &[HreflangAlternate]) -> Vec<String> {
    let mut warnings = Vec::new();

    if !alternates.iter().any(|a| a.hreflang == X_DEFAULT) {
        warnings.push("missing x-default alternate".to_string());
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for alternate in alternates {
        *counts.entry(alternate.hreflang.as_str()).or_default() += 1;
    }
    for (code, count) in counts {
        if count > 1 {
            warnings.push(format!("hreflang '{}' declared {} times", code, count));
        }
    }

    for warning in &warnings {
        warn!("{}", warning);
    }
    warnings
}
