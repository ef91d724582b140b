use std::collections::BTreeMap;
use tracing::warn;

use super::defaults::PAGINATION_NAMES;
use super::{ParamPolicy, RuleConfig};

/// Collects configuration-level anomalies.
///
/// Nothing here rejects a snapshot. Each anomaly becomes one warning line and
/// evaluation continues with first-match semantics for duplicated names.
pub fn validate_config(config: &RuleConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut declared: BTreeMap<&str, Vec<ParamPolicy>> = BTreeMap::new();

    for rule in &config.rules {
        if rule.name.trim().is_empty() {
            warnings.push("rule with an empty parameter name is ignored".to_string());
            continue;
        }
        declared.entry(rule.name.as_str()).or_default().push(rule.policy);
    }

    for (name, policies) in &declared {
        if policies.len() < 2 {
            continue;
        }
        warnings.push(format!(
            "duplicate rule name '{}' declared {} times; the first declaration ({}) is used",
            name,
            policies.len(),
            policies[0]
        ));
        if policies.iter().any(|p| *p != policies[0]) {
            let listed: Vec<String> = policies.iter().map(|p| p.to_string()).collect();
            warnings.push(format!(
                "conflicting policies for '{}': {}",
                name,
                listed.join(", ")
            ));
        }
    }

    let page_param = config.pagination.param.as_str();
    if page_param.trim().is_empty() {
        warnings.push("pagination parameter name is empty; pagination is disabled".to_string());
    } else {
        if !PAGINATION_NAMES.contains(&page_param) {
            warnings.push(format!(
                "pagination parameter '{}' is not a recognized pagination name ({})",
                page_param,
                PAGINATION_NAMES.join(", ")
            ));
        }
        if declared.contains_key(page_param) {
            warnings.push(format!(
                "pagination parameter '{}' is also declared as a rule; pagination handling takes precedence",
                page_param
            ));
        }
    }

    let hreflang = &config.hreflang;
    if !hreflang.supports(&hreflang.default_language) {
        warnings.push(format!(
            "hreflang default language '{}' is not in the supported languages ({})",
            hreflang.default_language,
            hreflang.languages.join(", ")
        ));
    }

    for warning in &warnings {
        warn!("Rule configuration: {}", warning);
    }
    warnings
}
