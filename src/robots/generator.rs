use tracing::{debug, instrument};

use super::directives::derive_sections;
use crate::rules::RuleConfig;
use crate::url_parser::normalize_base_url;

/// Renders robots.txt for a rule snapshot
///
/// A `User-agent: *` group with the derived sections in fixed order, each
/// line preceded by the comment naming its category, and a final
/// `Sitemap:` line pointing at `{base_url}/sitemap.xml`.
#[instrument(level = "debug", skip(config))]
pub fn generate_robots_txt(config: &RuleConfig, base_url: &str) -> String {
    let base_url = normalize_base_url(base_url);
    let mut out = String::new();

    out.push_str(&format!("# robots.txt for {}\n", base_url));
    out.push_str("# Generated from the active rule configuration.\n\n");
    out.push_str("User-agent: *\n");

    let sections = derive_sections(config);
    let mut line_count = 0;
    for section in &sections {
        out.push('\n');
        out.push_str(&format!("# {}\n", section.title));
        for line in &section.lines {
            if let Some(comment) = &line.comment {
                out.push_str(&format!("# {}\n", comment));
            }
            out.push_str(&format!("{}: {}\n", line.kind, line.pattern));
            line_count += 1;
        }
    }

    out.push('\n');
    out.push_str(&format!("Sitemap: {}/sitemap.xml\n", base_url));

    debug!("Generated robots.txt with {} sections and {} rules", sections.len(), line_count);
    out
}
