use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::debug;

use super::SitemapEntry;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Serializes the included entries as a `<urlset>`; excluded entries are
/// left out
pub fn generate_sitemap_xml(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;

    let mut written = 0;
    for entry in entries.iter().filter(|e| e.included) {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        writer.write_event(Event::Start(BytesStart::new("loc")))?;
        writer.write_event(Event::Text(BytesText::new(&entry.loc)))?;
        writer.write_event(Event::End(BytesEnd::new("loc")))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
        written += 1;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    debug!("Wrote sitemap with {} of {} entries", written, entries.len());

    let mut xml = String::from_utf8(writer.into_inner()).context("Sitemap XML is not valid UTF-8")?;
    xml.push('\n');
    Ok(xml)
}
