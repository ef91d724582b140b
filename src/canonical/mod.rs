//! Canonical Resolver: turns a path, its query and a rule snapshot into the
//! canonical URL, robots directive, robots.txt blocking flag and sitemap
//! verdict, with a trace of every decision.

pub mod resolver;
pub mod trace;

use serde::Serialize;
use std::fmt;

pub use resolver::compute_canonical;
pub use trace::DecisionTrace;

use crate::param_classifier::EvaluatedParams;
use crate::rules::RobotsDirective;

/// Precedence rule that decided the outcome, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PrecedenceRule {
    BlockedParams,
    MultiSelect,
    UnstableParams,
    SearchParams,
    StableFilters,
    Pagination,
    IndexableFilters,
    Clean,
}

impl fmt::Display for PrecedenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PrecedenceRule::BlockedParams => "blocked parameters",
            PrecedenceRule::MultiSelect => "multi-select values",
            PrecedenceRule::UnstableParams => "unstable parameters",
            PrecedenceRule::SearchParams => "search or uncategorized parameters",
            PrecedenceRule::StableFilters => "stable filters",
            PrecedenceRule::Pagination => "pagination",
            PrecedenceRule::IndexableFilters => "indexable stable filters",
            PrecedenceRule::Clean => "no disqualifying parameters",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalResult {
    /// Absolute canonical URL; never carries a blocked parameter
    pub canonical: String,
    pub robots: RobotsDirective,
    pub block_in_robots: bool,
    pub has_blocked_params: bool,
    /// Never true when `robots` is noindex
    pub sitemap_included: bool,
    /// Configuration anomalies only
    pub warnings: Vec<String>,
    pub trace: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots_matched_rules: Option<Vec<String>>,
    pub rule: PrecedenceRule,
    pub params: EvaluatedParams,
}
