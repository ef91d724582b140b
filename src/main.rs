use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use seo_lab::api::config::ApiConfig;
use seo_lab::api::start_server;
use seo_lab::hreflang::{generate_hreflang_links, validate_hreflang_reciprocity};
use seo_lab::utils::logger::init_logger;

#[derive(Parser, Debug)]
#[command(
    name = "seo_lab",
    about = "Decides canonical URL, robots directive and sitemap inclusion for shop URLs"
)]
struct Cli {
    /// JSON rule snapshot (playground format); built-in defaults when omitted.
    #[arg(long, global = true)]
    rules: Option<String>,

    /// Site origin used for canonical, hreflang and sitemap URLs.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server.
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the SEO receipt of one URL as JSON.
    Evaluate {
        /// Absolute or site-relative URL.
        url: String,
    },
    /// Print the generated robots.txt.
    Robots,
    /// Print sitemap.xml, or every candidate with its verdict.
    Sitemap {
        /// List excluded candidates and the reasons too.
        #[arg(long)]
        all: bool,
    },
    /// Print the hreflang alternates of a path.
    Hreflang {
        path: String,

        #[arg(long, default_value = "en")]
        lang: String,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ApiConfig::load()?;
    if let Some(rules) = cli.rules {
        config.rules_file = Some(rules);
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    init_logger(config.log_dir.as_deref())?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            info!("Starting with settings {:?}", config);
            start_server(config).await?;
        }
        command => run_command(command, &config)?,
    }

    Ok(())
}

fn run_command(command: Command, config: &ApiConfig) -> Result<()> {
    let engine = config.build_engine()?;

    match command {
        Command::Evaluate { url } => {
            let receipt = engine
                .receipt(&url)
                .with_context(|| format!("Cannot evaluate '{}'", url))?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        Command::Robots => print!("{}", engine.robots_txt()),
        Command::Sitemap { all: false } => print!("{}", engine.sitemap_xml()?),
        Command::Sitemap { all: true } => {
            for entry in engine.sitemap_entries() {
                let verdict = if entry.included { "included" } else { "excluded" };
                println!("{:<9} {} ({})", verdict, entry.loc, entry.reason);
            }
        }
        Command::Hreflang { path, lang } => {
            let links = generate_hreflang_links(&path, &lang, engine.base_url(), &engine.config().hreflang);
            for alternate in &links.alternates {
                println!("{:<10} {}", alternate.hreflang, alternate.href);
            }
            let reciprocity = validate_hreflang_reciprocity(&links.alternates);
            for warning in links.warnings.iter().chain(reciprocity.iter()) {
                eprintln!("warning: {}", warning);
            }
        }
        Command::Serve { .. } => bail!("serve has no one-shot output"),
    }

    Ok(())
}
