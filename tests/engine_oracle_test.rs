use seo_lab::rules::defaults::PROTECTED_PATHS;
use seo_lab::rules::{CanonicalStrategy, ParamPolicy, ParamRule};
use seo_lab::sitemap::generate_sitemap_entries_for;
use seo_lab::url_parser::{parse_query, RequestUrl};
use seo_lab::{check_robots_blocking, compute_canonical, RobotsDirective, RuleConfig};

const BASE: &str = "https://example.com";

fn resolve(path: &str, raw_query: &str, config: &RuleConfig) -> seo_lab::CanonicalResult {
    compute_canonical(path, &parse_query(raw_query), config, BASE)
}

// Feeds a canonical URL back through the resolver
fn resolve_url(url: &str, config: &RuleConfig) -> seo_lab::CanonicalResult {
    let parsed = RequestUrl::parse(url).unwrap();
    compute_canonical(&parsed.path, &parsed.query, config, BASE)
}

#[test]
fn test_sort_with_color_collapses_to_bare_path() {
    let result = resolve("/catalog/t-shirts/", "sort=price_desc&color=black", &RuleConfig::default());
    assert_eq!(result.robots, RobotsDirective::NoindexFollow);
    assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/");
    assert!(!result.sitemap_included);
}

#[test]
fn test_second_page_keeps_page_param() {
    let config = RuleConfig::default();
    let result = resolve("/catalog/t-shirts/", "page=2", &config);
    assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/?page=2");
    assert_eq!(result.robots, config.pagination.page_two_plus);
    assert_eq!(result.robots, RobotsDirective::IndexFollow);
    assert!(result.sitemap_included);
}

#[test]
fn test_tracking_param_is_blocked_and_stripped() {
    let result = resolve("/catalog/t-shirts/", "utm_source=fb", &RuleConfig::default());
    assert_eq!(result.robots, RobotsDirective::NoindexFollow);
    assert!(result.block_in_robots);
    assert!(result.has_blocked_params);
    assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/");
}

#[test]
fn test_first_page_is_stripped() {
    let result = resolve("/catalog/t-shirts/", "page=1", &RuleConfig::default());
    assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/");
    assert_eq!(result.robots, RobotsDirective::IndexFollow);
}

#[test]
fn test_single_color_filter_is_noindex() {
    let result = resolve("/catalog/t-shirts/", "color=blue", &RuleConfig::default());
    assert_eq!(result.robots, RobotsDirective::NoindexFollow);
    assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/");
}

#[test]
fn test_baseline_without_query() {
    let result = resolve("/Catalog/Hoodies", "", &RuleConfig::default());
    assert_eq!(result.canonical, "https://example.com/catalog/hoodies/");
    assert_eq!(result.robots, RobotsDirective::IndexFollow);
    assert!(result.sitemap_included);
    assert!(!result.block_in_robots);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_canonical_is_a_fixed_point() {
    let mut indexable = RuleConfig::default();
    indexable.demos.stable_filters_indexable = true;
    let mut base_strategy = RuleConfig::default();
    base_strategy.pagination.canonical_strategy = CanonicalStrategy::Base;

    let queries = [
        "",
        "page=1",
        "page=2",
        "page=0",
        "color=black",
        "color=Schwarz&size=m",
        "color=black,white",
        "sort=price_asc&page=3",
        "utm_source=fb&page=2",
        "utm_source=fb&color=black&page=4",
        "q=hoodie",
        "mystery=1",
        "price_min=10",
    ];

    for config in [RuleConfig::default(), indexable, base_strategy] {
        for query in queries {
            let first = resolve("/catalog/T-Shirts", query, &config);
            let second = resolve_url(&first.canonical, &config);
            assert_eq!(
                first.canonical, second.canonical,
                "canonical of '{}' is not stable",
                query
            );
            assert!(!second.has_blocked_params);
        }
    }
}

#[test]
fn test_blocked_params_never_reach_the_canonical() {
    let config = RuleConfig::default();
    for blocked in config.rules_with_policy(ParamPolicy::Blocked) {
        let query = format!("{}=abc&page=2", blocked.name);
        let result = resolve("/catalog/hoodies/", &query, &config);
        assert!(result.block_in_robots, "{} should be disallowed", blocked.name);
        assert!(!result.canonical.contains(&format!("{}=", blocked.name)));
        assert_eq!(result.canonical, "https://example.com/catalog/hoodies/?page=2");
    }
}

#[test]
fn test_noindex_is_never_in_sitemap() {
    let config = RuleConfig::default();
    for query in ["color=black", "sort=price_asc", "q=x", "utm_medium=cpc", "size=s,m"] {
        let result = resolve("/catalog/hoodies/", query, &config);
        assert!(result.robots.is_noindex());
        assert!(!result.sitemap_included);
    }
}

#[test]
fn test_multi_select_is_blocked_in_robots() {
    let config = RuleConfig::default();
    let query = parse_query("color=black%2Cwhite");
    assert!(check_robots_blocking("/catalog/t-shirts/", &query, &config).is_blocked);

    let result = compute_canonical("/catalog/t-shirts/", &query, &config, BASE);
    assert!(result.block_in_robots);
    assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/");

    // Repeated keys count as multi-select too
    let repeated = resolve("/catalog/t-shirts/", "size=s&size=m", &config);
    assert!(repeated.block_in_robots);
}

#[test]
fn test_pagination_override_applies_to_page_two_plus() {
    let mut config = RuleConfig::default();
    config.pagination.page_two_plus = RobotsDirective::NoindexFollow;
    let result = resolve("/catalog/t-shirts/", "page=5", &config);
    assert_eq!(result.robots, RobotsDirective::NoindexFollow);
    assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/?page=5");
    assert!(!result.sitemap_included);
}

#[test]
fn test_added_rule_changes_the_outcome() {
    let mut config = RuleConfig::default();
    config
        .rules
        .push(ParamRule::new("brand", ParamPolicy::Stable, "Brand filter"));
    config.demos.stable_filters_indexable = true;

    let result = resolve("/catalog/t-shirts/", "brand=acme", &config);
    assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/?brand=acme");
    assert_eq!(result.robots, RobotsDirective::IndexFollow);

    // Unknown names still fall into the search bucket
    let unknown = resolve("/catalog/t-shirts/", "vendor=acme", &config);
    assert_eq!(unknown.canonical, "https://example.com/catalog/t-shirts/");
    assert!(unknown.robots.is_noindex());
}

#[test]
fn test_protected_paths_are_blocked_and_never_listed() {
    let config = RuleConfig::default();
    for protected in PROTECTED_PATHS {
        let root = format!("{}/", protected.trim_end_matches('/'));
        let nested = format!("{}orders/", root);
        for candidate in [root, nested] {
            let result = resolve(&candidate, "", &config);
            let check = check_robots_blocking(&candidate, &[], &config);
            assert!(result.block_in_robots, "{} should be disallowed", candidate);
            assert!(check.is_blocked, "robots.txt should disallow {}", candidate);
            assert!(!result.sitemap_included, "{} must stay out of the sitemap", candidate);
        }
    }

    let candidates = vec!["/cart/".to_string(), "/admin/".to_string(), "/catalog/".to_string()];
    let entries = generate_sitemap_entries_for(&candidates, &config, BASE);
    assert!(!entries[0].included);
    assert_eq!(entries[0].reason, "blocked in robots.txt");
    assert!(!entries[1].included);
    assert!(entries[2].included);
}

#[test]
fn test_static_assets_under_protected_prefix_stay_crawlable() {
    let result = resolve("/_next/static/chunk.js", "", &RuleConfig::default());
    assert!(!result.block_in_robots);
    assert!(result.sitemap_included);
}

#[test]
fn test_stable_filter_outranks_pagination() {
    let result = resolve("/catalog/t-shirts/", "color=black&page=2", &RuleConfig::default());
    assert_eq!(result.robots, RobotsDirective::NoindexFollow);
    assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/");
    assert!(!result.sitemap_included);

    let mut indexable = RuleConfig::default();
    indexable.demos.stable_filters_indexable = true;
    let result = resolve("/catalog/t-shirts/", "color=black&page=2", &indexable);
    assert_eq!(result.canonical, "https://example.com/catalog/t-shirts/?color=black&page=2");
    assert_eq!(result.robots, RobotsDirective::IndexFollow);
}
