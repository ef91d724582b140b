//! robots.txt generation from a rule snapshot, and matching of arbitrary URLs
//! against compiled robots.txt rules.

pub mod directives;
pub mod generator;
pub mod matcher;

use serde::Serialize;
use std::fmt;

pub use directives::{derive_sections, protected_section, RobotsLine, RobotsSection};
pub use generator::generate_robots_txt;
pub use matcher::{check_robots_blocking, protected_path_rule, CompiledRule, RobotsMatcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleKind {
    Allow,
    Disallow,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Allow => write!(f, "Allow"),
            RuleKind::Disallow => write!(f, "Disallow"),
        }
    }
}

/// Outcome of evaluating one URL against robots.txt rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsCheck {
    pub is_blocked: bool,
    /// Every rule that matched, in document order, plus the multi-select
    /// marker when a value carried a comma
    pub matched_rules: Vec<String>,
    /// The rule that decided the verdict, if any matched
    pub decisive_rule: Option<String>,
    pub warnings: Vec<String>,
}
