use tracing::error;

use crate::error::{EngineError, EngineResult};

// Constants for validation
pub const MAX_URL_LENGTH: usize = 2048;  // Maximum allowable URL length

/// Validates basic URL requirements before parsing
///
/// Site-relative input (`/path?x=1`) is accepted as is; anything else must
/// carry an http or https scheme.
pub fn validate_url(url: &str) -> EngineResult<()> {
    let url = url.trim();
    if url.is_empty() {
        error!("Received empty URL");
        return Err(EngineError::EmptyUrl);
    }

    if url.len() > MAX_URL_LENGTH {
        error!("URL exceeds maximum length: {} > {}", url.len(), MAX_URL_LENGTH);
        return Err(EngineError::UrlTooLong {
            length: url.len(),
            max: MAX_URL_LENGTH,
        });
    }

    if url.starts_with('/') && !url.starts_with("//") {
        return Ok(());
    }

    match url.split_once("://") {
        Some((scheme, _)) if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") => Ok(()),
        Some((scheme, _)) if !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.') => {
            error!("URL uses unsupported scheme: {}", url);
            Err(EngineError::UnsupportedScheme {
                scheme: scheme.to_ascii_lowercase(),
            })
        }
        _ => {
            error!("URL is neither absolute nor site-relative: {}", url);
            Err(EngineError::InvalidUrl {
                input: url.to_string(),
            })
        }
    }
}
