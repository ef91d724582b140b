//! HTTP surface: robots.txt, sitemap.xml and the JSON diagnostic endpoints.

pub mod config;
pub mod handlers;
pub mod models;

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use tracing::{error, info, instrument};

use crate::api::config::ApiConfig;
use crate::api::handlers::{
    evaluate_handler, health_check, receipt_handler, robots_check_handler, robots_txt_handler,
    sitemap_entries_handler, sitemap_xml_handler,
};

/// Registers every route; shared by the server and the HTTP tests
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/robots.txt").route(web::get().to(robots_txt_handler)))
        .service(web::resource("/sitemap.xml").route(web::get().to(sitemap_xml_handler)))
        .service(
            web::scope("/api")
                .service(web::resource("/receipt").route(web::get().to(receipt_handler)))
                .service(web::resource("/robots/check").route(web::get().to(robots_check_handler)))
                .service(web::resource("/sitemap/entries").route(web::get().to(sitemap_entries_handler)))
                .service(web::resource("/evaluate").route(web::post().to(evaluate_handler))),
        )
        .service(web::resource("/health").route(web::get().to(health_check)));
}

/// Starts the API server with the specified configuration
///
/// Builds the engine once from the configured snapshot and shares it
/// read-only with every worker.
///
/// # Arguments
/// * `config` - Bind address, site origin and rule snapshot location
///
/// # Returns
/// * `Result<()>` - Success or an error
#[instrument(skip(config), fields(host = %config.host, port = config.port))]
pub async fn start_server(config: ApiConfig) -> Result<()> {
    let engine = web::Data::new(config.build_engine()?);
    info!(
        "Starting SEO lab server on {}:{} for {}",
        config.host, config.port, config.base_url
    );

    let server_result = HttpServer::new(move || {
        App::new()
            .app_data(engine.clone())
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .map_err(|e| {
        error!("Failed to bind to {}:{}: {}", config.host, config.port, e);
        e
    })?
    .run()
    .await;

    if let Err(e) = server_result {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
