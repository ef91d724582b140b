//! URL indexability decision engine.
//!
//! Classifies query parameters by policy, resolves the canonical URL and
//! robots directive of a request, and derives robots.txt, the sitemap and
//! hreflang alternates from the same rule snapshot so they never disagree.

pub mod api;
pub mod canonical;
pub mod engine;
pub mod error;
pub mod hreflang;
pub mod metadata;
pub mod param_classifier;
pub mod robots;
pub mod rules;
pub mod sitemap;
pub mod url_parser;
pub mod utils;

pub use canonical::{compute_canonical, CanonicalResult, PrecedenceRule};
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use metadata::{build_receipt, generate_page_metadata, PageMetadata, PageRequest, SeoReceipt};
pub use robots::{check_robots_blocking, generate_robots_txt, RobotsCheck, RobotsMatcher};
pub use rules::{RobotsDirective, RuleConfig};
pub use sitemap::{generate_sitemap_entries, generate_sitemap_xml, SitemapEntry};
