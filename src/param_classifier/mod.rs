pub mod classifier;
pub mod patterns;

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub use classifier::{classify, normalize_value};

/// Bucket a query parameter lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamBucket {
    Stable,
    Unstable,
    Blocked,
    /// Internal search terms and every parameter no rule claims.
    Search,
    Pagination,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub is_paginated: bool,
    pub page_number: u32,
}

/// Query parameters of one request, partitioned by policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedParams {
    pub stable_params: BTreeMap<String, String>,
    pub unstable_params: BTreeMap<String, String>,
    pub blocked_params: BTreeMap<String, String>,
    pub search_params: BTreeMap<String, String>,
    /// Names whose value held more than one selection.
    pub multi_select: BTreeSet<String>,
    pub pagination: PaginationState,
}

impl EvaluatedParams {
    pub fn has_blocked(&self) -> bool {
        !self.blocked_params.is_empty()
    }

    pub fn has_multi_select(&self) -> bool {
        !self.multi_select.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.stable_params.is_empty()
            && self.unstable_params.is_empty()
            && self.blocked_params.is_empty()
            && self.search_params.is_empty()
            && !self.pagination.is_paginated
    }

    /// One-line summary used in the decision trace.
    pub fn summary(&self) -> String {
        fn render(map: &BTreeMap<String, String>) -> String {
            let items: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            format!("[{}]", items.join(", "))
        }
        let pagination = if self.pagination.is_paginated {
            format!("page {}", self.pagination.page_number)
        } else {
            "none".to_string()
        };
        let multi: Vec<&str> = self.multi_select.iter().map(|s| s.as_str()).collect();
        format!(
            "stable={} unstable={} blocked={} search={} multi-select=[{}] pagination={}",
            render(&self.stable_params),
            render(&self.unstable_params),
            render(&self.blocked_params),
            render(&self.search_params),
            multi.join(", "),
            pagination
        )
    }
}
