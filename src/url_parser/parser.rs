use tracing::{debug, error, instrument, trace};
use url::Url;

use super::url_validator::validate_url;
use crate::error::{EngineError, EngineResult};

/// A request URL split into the pieces the engine evaluates
///
/// Holds the raw (not yet normalized) path and the decoded query pairs in
/// the order they appeared. Repeated keys are kept as separate pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    pub host: Option<String>,             // Host of an absolute URL, None for site-relative input
    pub path: String,                     // Percent-encoded path as received
    pub query: Vec<(String, String)>,     // Decoded query pairs, in order
}

impl RequestUrl {
    /// Parses an absolute (`https://host/path?x=1`) or site-relative
    /// (`/path?x=1`) URL
    ///
    /// # Returns
    /// * `EngineResult<RequestUrl>` - The split URL, or a typed error for
    ///   malformed input
    #[instrument(level = "debug", skip_all, fields(url = %input))]
    pub fn parse(input: &str) -> EngineResult<Self> {
        validate_url(input)?;
        let input = input.trim();

        let parsed = if input.starts_with('/') {
            // Any base works for resolving a site-relative reference
            Url::parse("http://localhost").and_then(|base| base.join(input))
        } else {
            Url::parse(input)
        };

        let parsed = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                error!("Failed to parse URL '{}': {}", input, e);
                return Err(EngineError::InvalidUrl {
                    input: input.to_string(),
                });
            }
        };

        let host = if input.starts_with('/') {
            None
        } else {
            parsed.host_str().map(|h| h.to_string())
        };

        let query: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        debug!("Parsed URL into path {} with {} query pairs", parsed.path(), query.len());

        Ok(RequestUrl {
            host,
            path: parsed.path().to_string(),
            query,
        })
    }
}

/// Decodes a raw query string (with or without the leading `?`)
pub fn parse_query(raw: &str) -> Vec<(String, String)> {
    let raw = raw.trim().trim_start_matches('?');
    trace!("Decoding query string: {}", raw);
    url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .filter(|(k, _)| !k.is_empty())
        .collect()
}
