use tracing::{debug, trace};

use super::patterns::{is_multi_select, is_range_param};
use super::{EvaluatedParams, ParamBucket, PaginationState};
use crate::rules::defaults::SEARCH_PARAMS;
use crate::rules::{ParamPolicy, ParamRule, RuleConfig};

/// Maps a raw value onto its canonical spelling using the rule's synonyms
///
/// Each comma-separated selection is trimmed and looked up case-insensitively;
/// values without a synonym are kept as written.
pub fn normalize_value(raw: &str, rule: &ParamRule) -> String {
    if rule.synonyms.is_empty() {
        return raw.trim().to_string();
    }
    raw.split(',')
        .map(|part| {
            let part = part.trim();
            match rule.synonyms.get(&part.to_lowercase()) {
                Some(canonical) => canonical.clone(),
                None => part.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

// Repeated keys collapse into one comma-joined value, keeping first-seen order
fn merge_repeated(query: &[(String, String)]) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = Vec::new();
    for (key, value) in query {
        match merged.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, joined)) => {
                joined.push(',');
                joined.push_str(value);
            }
            None => merged.push((key.clone(), value.clone())),
        }
    }
    merged
}

// Plain decimal digits only; signs, commas and overflow are not page numbers
fn parse_page_number(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn bucket_for(name: &str, config: &RuleConfig) -> ParamBucket {
    match config.rule(name) {
        Some(rule) => match rule.policy {
            ParamPolicy::Stable => ParamBucket::Stable,
            ParamPolicy::Unstable => ParamBucket::Unstable,
            ParamPolicy::Blocked => ParamBucket::Blocked,
        },
        None if SEARCH_PARAMS.contains(&name) => ParamBucket::Search,
        None if is_range_param(name) => ParamBucket::Blocked,
        None => ParamBucket::Search,
    }
}

/// Partitions a request's query parameters into policy buckets
///
/// The pagination parameter is intercepted first: `1` counts as absent and a
/// value that is not a positive page number is treated as uncategorized.
/// Parameters no rule claims land in the search bucket so they can never be
/// indexable by accident.
pub fn classify(path: &str, query: &[(String, String)], config: &RuleConfig) -> EvaluatedParams {
    let mut evaluated = EvaluatedParams::default();
    let page_param = config.pagination.param.as_str();

    for (name, raw) in merge_repeated(query) {
        let multi = is_multi_select(&raw);

        let bucket = if !page_param.is_empty() && name == page_param {
            ParamBucket::Pagination
        } else {
            bucket_for(&name, config)
        };
        trace!("Parameter {}={} -> {:?}", name, raw, bucket);

        match bucket {
            ParamBucket::Pagination => match parse_page_number(&raw) {
                Some(page_number) if page_number > 1 => {
                    evaluated.pagination = PaginationState {
                        is_paginated: true,
                        page_number,
                    };
                }
                Some(1) => debug!("Page 1 on {} is treated as unpaginated", path),
                _ => {
                    debug!("Page value '{}' on {} is not a page number", raw, path);
                    evaluated.search_params.insert(name.clone(), raw.clone());
                }
            },
            ParamBucket::Stable | ParamBucket::Unstable | ParamBucket::Blocked => {
                let value = match config.rule(&name) {
                    Some(rule) => normalize_value(&raw, rule),
                    None => raw.clone(),
                };
                let target = match bucket {
                    ParamBucket::Stable => &mut evaluated.stable_params,
                    ParamBucket::Unstable => &mut evaluated.unstable_params,
                    _ => &mut evaluated.blocked_params,
                };
                target.insert(name.clone(), value);
            }
            ParamBucket::Search => {
                evaluated.search_params.insert(name.clone(), raw.clone());
            }
        }

        if multi {
            evaluated.multi_select.insert(name);
        }
    }

    debug!("Classified {} parameters on {}: {}", query.len(), path, evaluated.summary());
    evaluated
}
