use tracing::trace;

/// Ordered, human-readable record of one decision.
///
/// Lines are `stage: detail`. Identical inputs always produce identical
/// lines, so traces can be compared verbatim in tests and in the receipt UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionTrace {
    lines: Vec<String>,
}

impl DecisionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: &str, detail: impl AsRef<str>) {
        let line = format!("{}: {}", stage, detail.as_ref());
        trace!("{}", line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Joins parameter names for trace output: `sort, view`.
pub fn names<'a, I>(keys: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    keys.into_iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
}
