use tracing::{debug, info, instrument};

use super::SitemapEntry;
use crate::canonical::compute_canonical;
use crate::rules::{RobotsDirective, RuleConfig};
use crate::url_parser::{normalize_base_url, parse_query};

/// Candidate URLs of the demo site: root, learning pages, catalog roots and
/// the known variants of one category
pub fn default_candidates() -> Vec<String> {
    [
        "/",
        "/learn/",
        "/learn/robots-txt/",
        "/learn/canonical-urls/",
        "/learn/pagination/",
        "/learn/parameters/",
        "/learn/hreflang/",
        "/catalog/",
        "/catalog/t-shirts/",
        "/catalog/hoodies/",
        "/catalog/accessories/",
        "/catalog/t-shirts",
        "/catalog/t-shirts/?page=1",
        "/catalog/t-shirts/?page=2",
        "/catalog/t-shirts/?color=black",
        "/catalog/t-shirts/?sort=price_asc",
        "/catalog/t-shirts/?utm_source=newsletter",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn entry_for(candidate: &str, config: &RuleConfig, base_url: &str) -> SitemapEntry {
    let (path, raw_query) = candidate.split_once('?').unwrap_or((candidate, ""));
    let query = parse_query(raw_query);
    let loc = format!("{}{}", base_url, candidate);

    let result = compute_canonical(path, &query, config, base_url);
    let included = result.robots == RobotsDirective::IndexFollow
        && !result.block_in_robots
        && result.canonical == loc;

    let reason = if included {
        "indexable and its own canonical".to_string()
    } else if result.robots != RobotsDirective::IndexFollow {
        format!("robots directive is {}", result.robots)
    } else if result.block_in_robots {
        "blocked in robots.txt".to_string()
    } else {
        format!("duplicate: canonical is {}", result.canonical)
    };
    debug!("Sitemap candidate {}: included={} ({})", loc, included, reason);

    SitemapEntry {
        loc,
        included,
        reason,
        canonical: result.canonical,
        robots: result.robots,
    }
}

/// Evaluates each candidate (`/path` or `/path?query`) against the snapshot
///
/// A candidate is included only when it is `index,follow`, crawlable, and its
/// canonical is the candidate URL itself. Excluded entries are kept for the
/// diagnostic view.
#[instrument(level = "debug", skip(candidates, config))]
pub fn generate_sitemap_entries_for(
    candidates: &[String],
    config: &RuleConfig,
    base_url: &str,
) -> Vec<SitemapEntry> {
    let base_url = normalize_base_url(base_url);
    let entries: Vec<SitemapEntry> = candidates
        .iter()
        .map(|candidate| entry_for(candidate, config, &base_url))
        .collect();
    info!(
        "Sitemap: {} of {} candidates included",
        entries.iter().filter(|e| e.included).count(),
        entries.len()
    );
    entries
}

pub fn generate_sitemap_entries(config: &RuleConfig, base_url: &str) -> Vec<SitemapEntry> {
    generate_sitemap_entries_for(&default_candidates(), config, base_url)
}
