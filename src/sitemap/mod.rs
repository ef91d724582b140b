//! Sitemap Builder: decides which candidate URLs are listed and serializes
//! the included ones as sitemap XML.

pub mod builder;
pub mod xml;

use serde::Serialize;

pub use builder::{default_candidates, generate_sitemap_entries, generate_sitemap_entries_for};
pub use xml::generate_sitemap_xml;

use crate::rules::RobotsDirective;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    /// Candidate URL exactly as it would be listed
    pub loc: String,
    pub included: bool,
    pub reason: String,
    pub canonical: String,
    pub robots: RobotsDirective,
}
