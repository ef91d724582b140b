use seo_lab::robots::RobotsMatcher;
use seo_lab::rules::{ParamPolicy, ParamRule};
use seo_lab::url_parser::parse_query;
use seo_lab::{compute_canonical, generate_robots_txt, RuleConfig};

const BASE: &str = "https://example.com";

const TARGETS: &[&str] = &[
    "/",
    "/catalog/t-shirts/",
    "/catalog/t-shirts/?page=2",
    "/catalog/t-shirts/?color=black",
    "/catalog/t-shirts/?color=black,white",
    "/catalog/t-shirts/?size=m&color=black,white",
    "/catalog/t-shirts/?size=s&size=m",
    "/catalog/t-shirts/?sort=price&sort=name",
    "/catalog/t-shirts/?utm_source=fb",
    "/catalog/t-shirts/?page=2&utm_campaign=spring",
    "/catalog/t-shirts/?gclid=abc",
    "/catalog/t-shirts/?price_min=10&price_max=20",
    "/catalog/t-shirts/?sort=price_asc",
    "/cart",
    "/checkout/step-1",
    "/api/products",
    "/_next/static/chunk.js",
    "/_next/data/build.json",
    "/searchresults",
];

fn configs() -> Vec<RuleConfig> {
    let mut extended = RuleConfig::default();
    extended
        .rules
        .push(ParamRule::new("affiliate", ParamPolicy::Blocked, "Affiliate id"));
    extended
        .rules
        .push(ParamRule::new("brand", ParamPolicy::Stable, "Brand filter"));
    vec![RuleConfig::default(), extended]
}

#[test]
fn test_generated_text_agrees_with_compiled_rules() {
    for config in configs() {
        let compiled = RobotsMatcher::from_config(&config);
        let parsed = RobotsMatcher::parse(&generate_robots_txt(&config, BASE), "Googlebot");

        assert_eq!(compiled.rules().len(), parsed.rules().len());
        for target in TARGETS {
            assert_eq!(
                compiled.is_allowed(target),
                parsed.is_allowed(target),
                "robots.txt text and compiled rules disagree on {}",
                target
            );
        }
    }
}

#[test]
fn test_sitemap_line_points_at_base() {
    let parsed = RobotsMatcher::parse(&generate_robots_txt(&RuleConfig::default(), BASE), "*");
    assert_eq!(parsed.sitemaps(), ["https://example.com/sitemap.xml".to_string()]);
}

#[test]
fn test_expected_verdicts() {
    let matcher = RobotsMatcher::from_config(&RuleConfig::default());

    assert!(matcher.is_allowed("/"));
    assert!(matcher.is_allowed("/catalog/t-shirts/?page=2"));
    assert!(matcher.is_allowed("/catalog/t-shirts/?color=black"));
    assert!(matcher.is_allowed("/_next/static/chunk.js"));

    assert!(!matcher.is_allowed("/catalog/t-shirts/?utm_source=fb"));
    assert!(!matcher.is_allowed("/catalog/t-shirts/?page=2&utm_campaign=spring"));
    assert!(!matcher.is_allowed("/catalog/t-shirts/?color=black,white"));
    assert!(!matcher.is_allowed("/catalog/t-shirts/?price_min=10"));
    assert!(!matcher.is_allowed("/_next/data/build.json"));
    assert!(!matcher.is_allowed("/cart"));
}

#[test]
fn test_resolver_blocking_matches_robots_txt() {
    // The resolver's disallow flag and the served robots.txt must agree on
    // every URL, protected paths and repeated keys included
    for config in configs() {
        let matcher = RobotsMatcher::parse(&generate_robots_txt(&config, BASE), "*");

        for &target in TARGETS {
            let (path, raw_query) = target.split_once('?').unwrap_or((target, ""));
            let query = parse_query(raw_query);
            let result = compute_canonical(path, &query, &config, BASE);
            let check = matcher.check(path, &query);
            assert_eq!(
                result.block_in_robots, check.is_blocked,
                "resolver and robots.txt disagree on {}",
                target
            );
        }
    }
}

#[test]
fn test_repeated_filter_key_is_disallowed_by_the_text() {
    let matcher = RobotsMatcher::parse(&generate_robots_txt(&RuleConfig::default(), BASE), "*");
    assert!(!matcher.is_allowed("/catalog/t-shirts/?size=s&size=m"));
    assert!(matcher.is_allowed("/catalog/t-shirts/?size=s&color=black"));
}
