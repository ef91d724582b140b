//! Prints the receipt summary of a few catalog URLs.
//!
//! Run with `cargo run --example receipt_cli [URL...]`.

use anyhow::Result;
use seo_lab::{Engine, RuleConfig};

const SAMPLE_URLS: &[&str] = &[
    "/catalog/t-shirts/?sort=price_desc&color=black",
    "/catalog/t-shirts/?page=2",
    "/catalog/t-shirts/?utm_source=fb",
    "/catalog/t-shirts/?page=1",
    "/catalog/t-shirts/?color=blue",
    "https://example.com/de/Catalog/Hoodies?size=s,m",
];

fn main() -> Result<()> {
    let engine = Engine::new(RuleConfig::default(), "https://example.com");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let urls: Vec<&str> = if args.is_empty() {
        SAMPLE_URLS.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    for url in urls {
        let receipt = match engine.receipt(url) {
            Ok(receipt) => receipt,
            Err(e) => {
                println!("{}\n  error: {}\n", url, e);
                continue;
            }
        };

        println!("{}", receipt.url);
        println!("  canonical: {}", receipt.canonical.canonical);
        println!("  robots:    {} ({})", receipt.canonical.robots, receipt.canonical.rule);
        println!("  robots.txt blocked: {}", receipt.robots_check.is_blocked);
        println!("  sitemap:   {}", receipt.canonical.sitemap_included);
        for line in &receipt.canonical.trace {
            println!("    {}", line);
        }
        println!();
    }

    Ok(())
}
