/// Trims whitespace and trailing slashes so paths can be appended directly
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Reconstructs an absolute URL from a base, a normalized path and query
/// pairs, keeping the pairs in the order given
pub fn reconstruct_url(base_url: &str, path: &str, params: &[(String, String)]) -> String {
    let mut url = format!("{}{}", normalize_base_url(base_url), path);

    if !params.is_empty() {
        let query: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect();
        url.push('?');
        url.push_str(&query.join("&"));
    }

    url
}
