use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::rules::DemoFlags;

static REPEATED_SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"/{2,}").unwrap());

/// Normalizes a request path the way every canonical URL is written
///
/// Leading slash, single slashes, no `index.html`, then case and trailing
/// slash per the demo flags. A last segment containing a dot is a file and
/// never gets a trailing slash.
pub fn normalize_path(path: &str, demos: &DemoFlags) -> String {
    let trimmed = path.trim();
    let mut normalized = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };

    normalized = REPEATED_SLASHES.replace_all(&normalized, "/").into_owned();

    if normalized.ends_with("/index.html") {
        normalized.truncate(normalized.len() - "index.html".len());
    }

    if demos.lowercase_paths {
        normalized = normalized.to_lowercase();
    }

    if normalized != "/" {
        if demos.trailing_slash {
            let last_segment = normalized.rsplit('/').next().unwrap_or("");
            if !normalized.ends_with('/') && !last_segment.contains('.') {
                normalized.push('/');
            }
        } else {
            while normalized.len() > 1 && normalized.ends_with('/') {
                normalized.pop();
            }
        }
    }

    trace!("Normalized path {} -> {}", path, normalized);
    normalized
}
