//! Request URL handling: validation, parsing into path and query pairs,
//! path normalization and reconstruction of absolute URLs.

pub mod parser;
pub mod path_normalizer;
pub mod url_reconstructor;
pub mod url_validator;


pub use parser::{parse_query, RequestUrl};
pub use path_normalizer::normalize_path;
pub use url_reconstructor::{normalize_base_url, reconstruct_url};
pub use url_validator::validate_url;
