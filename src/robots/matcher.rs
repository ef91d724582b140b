use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

use super::directives::{derive_sections, protected_section, RobotsLine};
use super::{RobotsCheck, RuleKind};
use crate::param_classifier::patterns::is_multi_select;
use crate::rules::{validate_config, RuleConfig};

/// A robots.txt pattern compiled into an anchored regex
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub kind: RuleKind,
    pub pattern: String,
    regex: Regex,
}

impl CompiledRule {
    /// Compiles `*` (any sequence) and a trailing `$` (end anchor); every
    /// other character matches literally from the start of `path?query`.
    pub fn compile(kind: RuleKind, pattern: &str) -> Option<Self> {
        if pattern.is_empty() {
            return None;
        }
        let (body, anchored) = match pattern.strip_suffix('$') {
            Some(body) => (body, true),
            None => (pattern, false),
        };
        let mut expr = String::from("^");
        for (i, part) in body.split('*').enumerate() {
            if i > 0 {
                expr.push_str(".*");
            }
            expr.push_str(&regex::escape(part));
        }
        if anchored {
            expr.push('$');
        }

        match Regex::new(&expr) {
            Ok(regex) => Some(Self {
                kind,
                pattern: pattern.to_string(),
                regex,
            }),
            Err(e) => {
                warn!("Skipping robots pattern '{}': {}", pattern, e);
                None
            }
        }
    }

    pub fn matches(&self, target: &str) -> bool {
        self.regex.is_match(target)
    }

    // Length used for precedence: the longer pattern is the more specific one
    fn specificity(&self) -> usize {
        self.pattern.len()
    }
}

impl std::fmt::Display for CompiledRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.pattern)
    }
}

/// Compiled rule set for one user-agent group
#[derive(Debug, Clone, Default)]
pub struct RobotsMatcher {
    rules: Vec<CompiledRule>,
    sitemaps: Vec<String>,
}

impl RobotsMatcher {
    /// Compiles the categorical rules of a snapshot, once per snapshot
    pub fn from_config(config: &RuleConfig) -> Self {
        let sections = derive_sections(config);
        let matcher = Self::from_lines(sections.iter().flat_map(|section| section.lines.iter()));
        debug!("Compiled {} robots rules from configuration", matcher.rules.len());
        matcher
    }

    fn from_lines<'a>(lines: impl Iterator<Item = &'a RobotsLine>) -> Self {
        Self {
            rules: lines
                .filter_map(|line| CompiledRule::compile(line.kind, &line.pattern))
                .collect(),
            sitemaps: Vec::new(),
        }
    }

    /// Parses robots.txt text and keeps the group that applies to
    /// `user_agent`, falling back to the `*` group
    pub fn parse(txt: &str, user_agent: &str) -> Self {
        let ua_lower = user_agent.to_lowercase();
        let mut groups: Vec<(Vec<String>, Vec<(RuleKind, String)>)> = Vec::new();
        let mut sitemaps = Vec::new();
        let mut collecting_agents = false;

        for line in txt.lines() {
            // Remove comments
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    if collecting_agents {
                        if let Some((agents, _)) = groups.last_mut() {
                            agents.push(value.to_lowercase());
                        }
                    } else {
                        groups.push((vec![value.to_lowercase()], Vec::new()));
                    }
                    collecting_agents = true;
                }
                "allow" | "disallow" => {
                    collecting_agents = false;
                    // An empty Disallow allows everything
                    if value.is_empty() {
                        continue;
                    }
                    let kind = if key == "allow" { RuleKind::Allow } else { RuleKind::Disallow };
                    if let Some((_, rules)) = groups.last_mut() {
                        rules.push((kind, value.to_string()));
                    }
                }
                "sitemap" => {
                    // Sitemap directives are global
                    if !value.is_empty() {
                        sitemaps.push(value.to_string());
                    }
                }
                _ => {
                    collecting_agents = false;
                }
            }
        }

        let specific: Vec<&(Vec<String>, Vec<(RuleKind, String)>)> = groups
            .iter()
            .filter(|(agents, _)| agents.iter().any(|a| *a == ua_lower && a != "*"))
            .collect();
        let selected = if specific.is_empty() {
            groups.iter().filter(|(agents, _)| agents.iter().any(|a| a == "*")).collect()
        } else {
            specific
        };

        let rules: Vec<CompiledRule> = selected
            .iter()
            .flat_map(|(_, rules)| rules.iter())
            .filter_map(|(kind, pattern)| CompiledRule::compile(*kind, pattern))
            .collect();
        debug!("Parsed robots.txt: {} rules for '{}', {} sitemaps", rules.len(), user_agent, sitemaps.len());

        Self { rules, sitemaps }
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Rules matching `target` in document order, and the deciding rule:
    /// the longest pattern wins, Allow wins a tie.
    pub fn evaluate<'a>(&'a self, target: &str) -> (Vec<&'a CompiledRule>, Option<&'a CompiledRule>) {
        let matched: Vec<&CompiledRule> = self.rules.iter().filter(|r| r.matches(target)).collect();
        let decisive = matched.iter().copied().max_by(|a, b| {
            a.specificity()
                .cmp(&b.specificity())
                .then_with(|| (a.kind == RuleKind::Allow).cmp(&(b.kind == RuleKind::Allow)))
        });
        (matched, decisive)
    }

    /// Whether a raw `path?query` string may be crawled
    pub fn is_allowed(&self, target: &str) -> bool {
        match self.evaluate(target).1 {
            Some(rule) => rule.kind == RuleKind::Allow,
            None => true,
        }
    }

    /// Evaluates a path and decoded query pairs
    ///
    /// Commas are sent literally, as a browser would. A comma in any value
    /// blocks the URL no matter which rules matched.
    pub fn check(&self, path: &str, query: &[(String, String)]) -> RobotsCheck {
        let mut check = RobotsCheck::default();

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            check
                .warnings
                .push(format!("path '{}' has no leading slash; evaluated as '/{}'", path, path));
            format!("/{}", path)
        };
        let target = to_target(&path, query);

        let (matched, decisive) = self.evaluate(&target);
        check.matched_rules = matched.iter().map(|r| r.to_string()).collect();
        check.decisive_rule = decisive.map(|r| r.to_string());
        check.is_blocked = matches!(decisive, Some(rule) if rule.kind == RuleKind::Disallow);

        let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
        for (name, value) in query {
            *occurrences.entry(name.as_str()).or_default() += 1;
            if is_multi_select(value) {
                check.is_blocked = true;
                check
                    .matched_rules
                    .push(format!("multi-select: comma in '{}' value", name));
            }
        }
        for (name, count) in occurrences {
            if count > 1 {
                check.is_blocked = true;
                check
                    .matched_rules
                    .push(format!("multi-select: '{}' repeated {} times", name, count));
            }
        }

        debug!("Robots check for {}: blocked={}", target, check.is_blocked);
        check
    }
}

fn to_target(path: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let pairs: Vec<String> = query
        .iter()
        .map(|(k, v)| {
            format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)).replace("%2C", ",")
        })
        .collect();
    format!("{}?{}", path, pairs.join("&"))
}

static PROTECTED_PATHS_MATCHER: Lazy<RobotsMatcher> =
    Lazy::new(|| RobotsMatcher::from_lines(protected_section().lines.iter()));

/// The protected-path Disallow that blocks a normalized path, if any
///
/// These rules are the same for every snapshot; a longer Allow (such as
/// static assets) wins as it does in the served robots.txt.
pub fn protected_path_rule(path: &str) -> Option<String> {
    match PROTECTED_PATHS_MATCHER.evaluate(path).1 {
        Some(rule) if rule.kind == RuleKind::Disallow => Some(rule.to_string()),
        _ => None,
    }
}

/// Re-derives the snapshot's robots rules and evaluates one URL
///
/// Compiles the rules for this call only; long-lived callers should build a
/// `RobotsMatcher` once and reuse it.
#[instrument(level = "debug", skip(query, config))]
pub fn check_robots_blocking(path: &str, query: &[(String, String)], config: &RuleConfig) -> RobotsCheck {
    let matcher = RobotsMatcher::from_config(config);
    let mut check = matcher.check(path, query);
    let mut warnings = validate_config(config);
    warnings.append(&mut check.warnings);
    check.warnings = warnings;
    check
}
