use once_cell::sync::Lazy;
use regex::Regex;

/// Numeric range families such as `price_min` / `price_max`.
pub static RANGE_PARAM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+_(min|max)$").unwrap()
});

pub fn is_range_param(name: &str) -> bool {
    RANGE_PARAM_REGEX.is_match(name)
}

pub fn is_multi_select(value: &str) -> bool {
    value.contains(',')
}
