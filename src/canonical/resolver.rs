use tracing::{debug, instrument};

use super::trace::{names, DecisionTrace};
use super::{CanonicalResult, PrecedenceRule};
use crate::param_classifier::{classify, EvaluatedParams};
use crate::robots::protected_path_rule;
use crate::rules::{validate_config, CanonicalStrategy, RobotsDirective, RuleConfig};
use crate::url_parser::{normalize_base_url, normalize_path, reconstruct_url};

struct Decision {
    rule: PrecedenceRule,
    robots: RobotsDirective,
    block_in_robots: bool,
    canonical_params: Vec<(String, String)>,
}

impl Decision {
    fn bare(rule: PrecedenceRule, block_in_robots: bool) -> Self {
        Self {
            rule,
            robots: RobotsDirective::NoindexFollow,
            block_in_robots,
            canonical_params: Vec::new(),
        }
    }
}

fn page_pair(config: &RuleConfig, params: &EvaluatedParams) -> (String, String) {
    (
        config.pagination.param.clone(),
        params.pagination.page_number.to_string(),
    )
}

// Precedence for everything below the blocked-parameter rule
fn decide_unblocked(params: &EvaluatedParams, config: &RuleConfig, trace: &mut DecisionTrace) -> Decision {
    if params.has_multi_select() {
        trace.record(
            "rule",
            format!(
                "multi-select values in {}; combinatorial crawl trap, canonical collapses to bare path",
                names(&params.multi_select)
            ),
        );
        return Decision::bare(PrecedenceRule::MultiSelect, true);
    }

    if !params.unstable_params.is_empty() {
        let detail = if params.stable_params.is_empty() {
            format!("unstable parameters present ({})", names(params.unstable_params.keys()))
        } else {
            format!(
                "unstable parameters ({}) mixed with stable ({}); unstable wins",
                names(params.unstable_params.keys()),
                names(params.stable_params.keys())
            )
        };
        trace.record("rule", format!("{}; canonical collapses to bare path", detail));
        return Decision::bare(PrecedenceRule::UnstableParams, false);
    }

    if !params.search_params.is_empty() {
        trace.record(
            "rule",
            format!(
                "search or uncategorized parameters present ({}); canonical collapses to bare path",
                names(params.search_params.keys())
            ),
        );
        return Decision::bare(PrecedenceRule::SearchParams, false);
    }

    let indexable_filters = config.demos.stable_filters_indexable;
    if !params.stable_params.is_empty() && !indexable_filters {
        trace.record(
            "rule",
            format!(
                "stable filters ({}) are not indexable in this configuration; canonical collapses to bare path",
                names(params.stable_params.keys())
            ),
        );
        return Decision::bare(PrecedenceRule::StableFilters, false);
    }

    // Only indexable stable filters can remain from here on
    let mut canonical_params: Vec<(String, String)> = params
        .stable_params
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if params.pagination.is_paginated {
        let strategy = config.pagination.canonical_strategy;
        match strategy {
            CanonicalStrategy::SelfReferencing => canonical_params.push(page_pair(config, params)),
            CanonicalStrategy::Base => {}
        }
        trace.record(
            "rule",
            format!(
                "pagination active (page {}); canonical strategy '{}', robots from pagination.pageTwoPlus",
                params.pagination.page_number, strategy
            ),
        );
        return Decision {
            rule: PrecedenceRule::Pagination,
            robots: config.pagination.page_two_plus,
            block_in_robots: false,
            canonical_params,
        };
    }

    if !canonical_params.is_empty() {
        trace.record(
            "rule",
            format!(
                "indexable stable filters ({}) kept in canonical",
                names(params.stable_params.keys())
            ),
        );
        return Decision {
            rule: PrecedenceRule::IndexableFilters,
            robots: RobotsDirective::IndexFollow,
            block_in_robots: false,
            canonical_params,
        };
    }

    trace.record("rule", "no disqualifying parameters; canonical is the normalized path");
    Decision {
        rule: PrecedenceRule::Clean,
        robots: RobotsDirective::IndexFollow,
        block_in_robots: false,
        canonical_params: Vec::new(),
    }
}

fn decide(params: &EvaluatedParams, config: &RuleConfig, trace: &mut DecisionTrace) -> Decision {
    if !params.has_blocked() {
        return decide_unblocked(params, config, trace);
    }

    trace.record(
        "rule",
        format!(
            "blocked parameters present ({}); dropped from canonical and disallowed in robots.txt",
            names(params.blocked_params.keys())
        ),
    );

    // The canonical is whatever the remaining parameters resolve to, which
    // keeps it a fixed point of the resolver.
    let mut remaining = params.clone();
    remaining.blocked_params.clear();
    remaining
        .multi_select
        .retain(|name| !params.blocked_params.contains_key(name));
    let rest = decide_unblocked(&remaining, config, trace);

    Decision {
        rule: PrecedenceRule::BlockedParams,
        robots: RobotsDirective::NoindexFollow,
        block_in_robots: true,
        canonical_params: rest.canonical_params,
    }
}

// The request's own parameters in canonical order: sorted by name, the
// pagination parameter last.
fn self_params(query: &[(String, String)], config: &RuleConfig) -> Vec<(String, String)> {
    let page_param = config.pagination.param.as_str();
    let mut ordered: Vec<(String, String)> = query.to_vec();
    ordered.sort_by(|(a, _), (b, _)| {
        (a.as_str() == page_param, a.as_str()).cmp(&(b.as_str() == page_param, b.as_str()))
    });
    ordered
}

/// Computes canonical URL, robots directive, robots.txt blocking and sitemap
/// inclusion for one request
///
/// Precedence, highest first: blocked parameters, multi-select values,
/// unstable parameters, search or uncategorized parameters, non-indexable
/// stable filters, pagination, indexable stable filters, clean URL.
#[instrument(level = "debug", skip(query, config), fields(query_len = query.len()))]
pub fn compute_canonical(
    path: &str,
    query: &[(String, String)],
    config: &RuleConfig,
    base_url: &str,
) -> CanonicalResult {
    let base_url = normalize_base_url(base_url);
    let warnings = validate_config(config);
    let mut trace = DecisionTrace::new();

    let normalized = normalize_path(path, &config.demos);
    trace.record("normalize", format!("path '{}' -> '{}'", path, normalized));

    let params = classify(&normalized, query, config);
    trace.record("classify", params.summary());

    let decision = decide(&params, config, &mut trace);
    let canonical = reconstruct_url(&base_url, &normalized, &decision.canonical_params);
    trace.record("robots", decision.robots.as_str());

    // Protected paths are disallowed whatever the query says
    let protected_rule = protected_path_rule(&normalized);
    let block_in_robots = decision.block_in_robots || protected_rule.is_some();
    match &protected_rule {
        Some(rule) => trace.record("robots.txt", format!("disallowed (protected path, {})", rule)),
        None if decision.block_in_robots => trace.record("robots.txt", "disallowed"),
        None => trace.record("robots.txt", "crawlable"),
    }
    trace.record("canonical", &canonical);

    let self_url = reconstruct_url(&base_url, &normalized, &self_params(query, config));
    let sitemap_included = decision.robots == RobotsDirective::IndexFollow
        && !block_in_robots
        && canonical == self_url;
    let verdict = if sitemap_included {
        "included".to_string()
    } else if decision.robots != RobotsDirective::IndexFollow {
        format!("excluded ({})", decision.robots)
    } else if block_in_robots {
        "excluded (blocked in robots.txt)".to_string()
    } else {
        format!("excluded (canonical points to {})", canonical)
    };
    trace.record("sitemap", verdict);

    debug!(
        "Resolved {} -> {} ({}, rule: {})",
        path, canonical, decision.robots, decision.rule
    );

    CanonicalResult {
        canonical,
        robots: decision.robots,
        block_in_robots,
        has_blocked_params: params.has_blocked(),
        sitemap_included,
        warnings,
        trace: trace.into_lines(),
        robots_matched_rules: None,
        rule: decision.rule,
        params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{ParamPolicy, ParamRule};

    const BASE: &str = "https://example.com";

    fn query(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn resolve(path: &str, raw: &[(&str, &str)], config: &RuleConfig) -> CanonicalResult {
        compute_canonical(path, &query(raw), config, BASE)
    }

    #[test]
    fn test_mixed_parameters_collapse_to_bare_path() {
        let result = resolve(
            "/catalog/t-shirts/",
            &[("sort", "price_desc"), ("color", "black")],
            &RuleConfig::default(),
        );
        assert_eq!(result.robots, RobotsDirective::NoindexFollow);
        assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/");
        assert_eq!(result.rule, PrecedenceRule::UnstableParams);
        assert!(!result.block_in_robots);
        assert!(result.trace.iter().any(|l| l.contains("unstable wins")));
    }

    #[test]
    fn test_blocked_params_keep_remaining_canonical() {
        let result = resolve(
            "/catalog/t-shirts/",
            &[("utm_source", "fb"), ("page", "2")],
            &RuleConfig::default(),
        );
        assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/?page=2");
        assert_eq!(result.robots, RobotsDirective::NoindexFollow);
        assert!(result.block_in_robots);
        assert!(result.has_blocked_params);
        assert!(!result.sitemap_included);
    }

    #[test]
    fn test_multi_select_blocks_regardless_of_policy() {
        let result = resolve("/catalog/", &[("color", "red,blue")], &RuleConfig::default());
        assert_eq!(result.rule, PrecedenceRule::MultiSelect);
        assert!(result.block_in_robots);
        assert_eq!(result.canonical, "https://example.com/catalog/");
    }

    #[test]
    fn test_pagination_base_strategy_and_directive() {
        let mut config = RuleConfig::default();
        config.pagination.canonical_strategy = CanonicalStrategy::Base;
        config.pagination.page_two_plus = RobotsDirective::NoindexFollow;
        let result = resolve("/catalog/t-shirts/", &[("page", "3")], &config);
        assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/");
        assert_eq!(result.robots, RobotsDirective::NoindexFollow);
        assert!(!result.sitemap_included);
    }

    #[test]
    fn test_indexable_filters_flag() {
        let mut config = RuleConfig::default();
        config.demos.stable_filters_indexable = true;

        let result = resolve("/catalog/t-shirts/", &[("size", "m"), ("color", "schwarz")], &config);
        assert_eq!(result.rule, PrecedenceRule::IndexableFilters);
        assert_eq!(result.robots, RobotsDirective::IndexFollow);
        assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/?color=black&size=m");
        // The synonym spelling is not its own canonical
        assert!(!result.sitemap_included);

        let result = resolve("/catalog/t-shirts/", &[("page", "2"), ("color", "black")], &config);
        assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/?color=black&page=2");
        assert!(result.sitemap_included);
    }

    #[test]
    fn test_search_and_unknown_params_are_not_indexable() {
        let result = resolve("/catalog/", &[("q", "hoodie")], &RuleConfig::default());
        assert_eq!(result.rule, PrecedenceRule::SearchParams);
        assert_eq!(result.robots, RobotsDirective::NoindexFollow);

        let result = resolve("/catalog/", &[("mystery", "1")], &RuleConfig::default());
        assert_eq!(result.robots, RobotsDirective::NoindexFollow);
        assert_eq!(result.canonical, "https://example.com/catalog/");
    }

    #[test]
    fn test_unnormalized_path_is_normalized_in_canonical() {
        let result = resolve("/Catalog//T-Shirts", &[], &RuleConfig::default());
        assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/");
        assert_eq!(result.trace[0], "normalize: path '/Catalog//T-Shirts' -> '/catalog/t-shirts/'");
    }

    #[test]
    fn test_trace_is_deterministic_and_complete() {
        let config = RuleConfig::default();
        let a = resolve("/catalog/", &[("view", "grid"), ("utm_source", "x")], &config);
        let b = resolve("/catalog/", &[("view", "grid"), ("utm_source", "x")], &config);
        assert_eq!(a.trace, b.trace);

        let stages: Vec<&str> = a.trace.iter().map(|l| l.split(':').next().unwrap()).collect();
        assert_eq!(
            stages,
            vec!["normalize", "classify", "rule", "rule", "robots", "robots.txt", "canonical", "sitemap"]
        );
    }

    #[test]
    fn test_protected_path_is_disallowed_and_left_out_of_sitemap() {
        let result = resolve("/Checkout", &[], &RuleConfig::default());
        assert_eq!(result.rule, PrecedenceRule::Clean);
        assert_eq!(result.canonical, "https://example.com/checkout/");
        assert!(result.block_in_robots);
        assert!(!result.sitemap_included);
        assert!(result
            .trace
            .contains(&"robots.txt: disallowed (protected path, Disallow: /checkout)".to_string()));
        assert_eq!(
            result.trace.last().unwrap(),
            "sitemap: excluded (blocked in robots.txt)"
        );

        let asset = resolve("/_next/static/app.js", &[], &RuleConfig::default());
        assert!(!asset.block_in_robots);
    }

    #[test]
    fn test_config_anomalies_go_to_warnings_only() {
        let mut config = RuleConfig::default();
        config.rules.push(ParamRule::new("sort", ParamPolicy::Stable, "duplicate"));
        let result = resolve("/catalog/", &[("sort", "price")], &config);
        assert_eq!(result.warnings.len(), 2);
        // First declaration (unstable) still decides
        assert_eq!(result.rule, PrecedenceRule::UnstableParams);

        let clean = resolve("/catalog/", &[("sort", "price")], &RuleConfig::default());
        assert!(clean.warnings.is_empty());
    }
}
