use super::RuleKind;
use crate::rules::defaults::{ALLOWED_PATHS, PROTECTED_PATHS};
use crate::rules::{ParamPolicy, RuleConfig};

/// One `Allow`/`Disallow` line, optionally documented by a comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsLine {
    pub kind: RuleKind,
    pub pattern: String,
    pub comment: Option<String>,
}

impl RobotsLine {
    fn disallow(pattern: String) -> Self {
        Self { kind: RuleKind::Disallow, pattern, comment: None }
    }

    fn allow(pattern: &str) -> Self {
        Self { kind: RuleKind::Allow, pattern: pattern.to_string(), comment: None }
    }

    fn documented(mut self, comment: String) -> Self {
        self.comment = Some(comment);
        self
    }
}

/// A titled group of lines. Sections always come out in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsSection {
    pub title: &'static str,
    pub lines: Vec<RobotsLine>,
}

pub const MULTI_SELECT_TITLE: &str = "Multi-select parameters (comma-separated or repeated values)";

/// Path rules that hold for every snapshot: system paths disallowed, static
/// assets allowed back
pub fn protected_section() -> RobotsSection {
    let mut lines: Vec<RobotsLine> = PROTECTED_PATHS
        .iter()
        .map(|path| RobotsLine::disallow(path.to_string()))
        .collect();
    lines.extend(ALLOWED_PATHS.iter().map(|path| RobotsLine::allow(path)));
    RobotsSection {
        title: "Protected and system paths",
        lines,
    }
}

/// Derives the categorical robots.txt rules for a snapshot
///
/// Order: protected paths, blocked (tracking/UI) parameters, multi-select
/// parameters, numeric ranges. Empty categories are left out.
pub fn derive_sections(config: &RuleConfig) -> Vec<RobotsSection> {
    let mut sections = vec![protected_section()];

    let mut blocked = Vec::new();
    for rule in config.rules_with_policy(ParamPolicy::Blocked) {
        if rule.name.trim().is_empty() {
            continue;
        }
        let comment = if rule.description.is_empty() {
            rule.name.clone()
        } else {
            format!("{}: {}", rule.name, rule.description)
        };
        blocked.push(RobotsLine::disallow(format!("/*?{}=", rule.name)).documented(comment));
        blocked.push(RobotsLine::disallow(format!("/*&{}=", rule.name)));
    }
    if !blocked.is_empty() {
        sections.push(RobotsSection {
            title: "Tracking and UI parameters (blocked policy)",
            lines: blocked,
        });
    }

    let mut multi = Vec::new();
    for rule in config.rules_with_policy(ParamPolicy::Stable) {
        if rule.name.trim().is_empty() {
            continue;
        }
        multi.push(
            RobotsLine::disallow(format!("/*{}=*,*", rule.name))
                .documented(format!("{}: more than one value selected", rule.name)),
        );
        multi.push(RobotsLine::disallow(format!("/*{}=*%2C*", rule.name)));
        multi.push(RobotsLine::disallow(format!("/*{}=*&{}=", rule.name, rule.name)));
    }
    if !multi.is_empty() {
        sections.push(RobotsSection {
            title: MULTI_SELECT_TITLE,
            lines: multi,
        });
    }

    sections.push(RobotsSection {
        title: "Numeric range parameters (*_min / *_max)",
        lines: vec![
            RobotsLine::disallow("/*_min=".to_string()),
            RobotsLine::disallow("/*_max=".to_string()),
        ],
    });

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{ParamRule, RuleConfig};

    #[test]
    fn test_sections_in_fixed_order() {
        let titles: Vec<&str> = derive_sections(&RuleConfig::default()).iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Protected and system paths",
                "Tracking and UI parameters (blocked policy)",
                MULTI_SELECT_TITLE,
                "Numeric range parameters (*_min / *_max)",
            ]
        );
    }

    #[test]
    fn test_empty_categories_are_omitted() {
        let config = RuleConfig {
            rules: vec![ParamRule::new("sort", ParamPolicy::Unstable, "")],
            ..RuleConfig::default()
        };
        let sections = derive_sections(&config);
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_blocked_rule_yields_two_documented_patterns() {
        let sections = derive_sections(&RuleConfig::default());
        let blocked = &sections[1];
        assert_eq!(blocked.lines[0].pattern, "/*?utm_source=");
        assert_eq!(blocked.lines[0].comment.as_deref(), Some("utm_source: Campaign source tracking"));
        assert_eq!(blocked.lines[1].pattern, "/*&utm_source=");
        assert_eq!(blocked.lines[1].comment, None);
    }

    #[test]
    fn test_stable_rule_disallows_repeated_keys() {
        let sections = derive_sections(&RuleConfig::default());
        let multi = sections.iter().find(|s| s.title == MULTI_SELECT_TITLE).unwrap();
        assert!(multi.lines.iter().any(|l| l.pattern == "/*size=*&size="));
    }
}
