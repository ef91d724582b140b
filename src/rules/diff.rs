use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::{ParamPolicy, ParamRule, RuleConfig};

/// One difference between two rule snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConfigChange {
    RuleAdded { name: String, policy: ParamPolicy },
    RuleRemoved { name: String, policy: ParamPolicy },
    PolicyChanged { name: String, from: ParamPolicy, to: ParamPolicy },
    SynonymsChanged { name: String },
    PaginationChanged { field: String, from: String, to: String },
    DemoFlagChanged { flag: String, from: bool, to: bool },
    HreflangChanged { from: String, to: String },
}

impl fmt::Display for ConfigChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigChange::RuleAdded { name, policy } => {
                write!(f, "rule added: {} ({})", name, policy)
            }
            ConfigChange::RuleRemoved { name, policy } => {
                write!(f, "rule removed: {} ({})", name, policy)
            }
            ConfigChange::PolicyChanged { name, from, to } => {
                write!(f, "policy changed: {} {} -> {}", name, from, to)
            }
            ConfigChange::SynonymsChanged { name } => write!(f, "synonyms changed: {}", name),
            ConfigChange::PaginationChanged { field, from, to } => {
                write!(f, "pagination changed: {} {} -> {}", field, from, to)
            }
            ConfigChange::DemoFlagChanged { flag, from, to } => {
                write!(f, "demo flag changed: {} {} -> {}", flag, from, to)
            }
            ConfigChange::HreflangChanged { from, to } => {
                write!(f, "hreflang changed: {} -> {}", from, to)
            }
        }
    }
}

// First declaration per name, matching lookup semantics.
fn effective_rules(config: &RuleConfig) -> BTreeMap<&str, &ParamRule> {
    let mut map = BTreeMap::new();
    for rule in &config.rules {
        map.entry(rule.name.as_str()).or_insert(rule);
    }
    map
}

fn describe_hreflang(config: &RuleConfig) -> String {
    format!(
        "[{}] default {}",
        config.hreflang.languages.join(","),
        config.hreflang.default_language
    )
}

/// Lists every difference between `base` and `edited`: rules in name order,
/// then pagination, demo flags and hreflang.
pub fn diff_configs(base: &RuleConfig, edited: &RuleConfig) -> Vec<ConfigChange> {
    let mut changes = Vec::new();
    let before = effective_rules(base);
    let after = effective_rules(edited);

    let mut names: Vec<&str> = before.keys().chain(after.keys()).copied().collect();
    names.sort_unstable();
    names.dedup();

    for name in names {
        match (before.get(name), after.get(name)) {
            (Some(old), None) => changes.push(ConfigChange::RuleRemoved {
                name: name.to_string(),
                policy: old.policy,
            }),
            (None, Some(new)) => changes.push(ConfigChange::RuleAdded {
                name: name.to_string(),
                policy: new.policy,
            }),
            (Some(old), Some(new)) => {
                if old.policy != new.policy {
                    changes.push(ConfigChange::PolicyChanged {
                        name: name.to_string(),
                        from: old.policy,
                        to: new.policy,
                    });
                }
                if old.synonyms != new.synonyms {
                    changes.push(ConfigChange::SynonymsChanged { name: name.to_string() });
                }
            }
            (None, None) => {}
        }
    }

    let (p0, p1) = (&base.pagination, &edited.pagination);
    if p0.param != p1.param {
        changes.push(ConfigChange::PaginationChanged {
            field: "param".to_string(),
            from: p0.param.clone(),
            to: p1.param.clone(),
        });
    }
    if p0.page_two_plus != p1.page_two_plus {
        changes.push(ConfigChange::PaginationChanged {
            field: "pageTwoPlus".to_string(),
            from: p0.page_two_plus.to_string(),
            to: p1.page_two_plus.to_string(),
        });
    }
    if p0.canonical_strategy != p1.canonical_strategy {
        changes.push(ConfigChange::PaginationChanged {
            field: "canonicalStrategy".to_string(),
            from: p0.canonical_strategy.to_string(),
            to: p1.canonical_strategy.to_string(),
        });
    }

    let (d0, d1) = (&base.demos, &edited.demos);
    let flags = [
        ("stableFiltersIndexable", d0.stable_filters_indexable, d1.stable_filters_indexable),
        ("trailingSlash", d0.trailing_slash, d1.trailing_slash),
        ("lowercasePaths", d0.lowercase_paths, d1.lowercase_paths),
    ];
    for (flag, from, to) in flags {
        if from != to {
            changes.push(ConfigChange::DemoFlagChanged { flag: flag.to_string(), from, to });
        }
    }

    if base.hreflang != edited.hreflang {
        changes.push(ConfigChange::HreflangChanged {
            from: describe_hreflang(base),
            to: describe_hreflang(edited),
        });
    }

    changes
}
