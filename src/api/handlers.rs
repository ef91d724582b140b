use actix_web::{http::header::ContentType, web, HttpResponse, Responder};
use tracing::{debug, error, info, instrument, warn};

use crate::api::models::{ErrorResponse, EvaluateRequest, EvaluateResponse, HealthStatus, UrlQuery};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::rules::diff_configs;
use crate::url_parser::RequestUrl;

fn bad_request(url: &str, e: EngineError) -> HttpResponse {
    warn!("Rejected invalid URL: {} - {:?}", url, e);
    HttpResponse::BadRequest().json(ErrorResponse { error: e.to_string() })
}

/// Serves robots.txt generated from the active snapshot
#[instrument(skip(engine))]
pub async fn robots_txt_handler(engine: web::Data<Engine>) -> impl Responder {
    debug!("Serving robots.txt");
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(engine.robots_txt())
}

/// Serves the sitemap with every included candidate URL
#[instrument(skip(engine))]
pub async fn sitemap_xml_handler(engine: web::Data<Engine>) -> impl Responder {
    match engine.sitemap_xml() {
        Ok(xml) => HttpResponse::Ok().content_type("application/xml").body(xml),
        Err(e) => {
            error!("Failed to write sitemap: {:#}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to generate sitemap".to_string(),
            })
        }
    }
}

/// Every sitemap candidate with its inclusion verdict and reason
#[instrument(skip(engine))]
pub async fn sitemap_entries_handler(engine: web::Data<Engine>) -> impl Responder {
    HttpResponse::Ok().json(engine.sitemap_entries())
}

/// Full SEO receipt for one URL
///
/// # Arguments
/// * `query` - `?url=` with an absolute or site-relative URL
/// * `engine` - Shared engine for the active snapshot
///
/// # Returns
/// * 200 with the receipt, or 400 `{ "error": ... }` for an invalid URL
#[instrument(skip(engine), fields(url = %query.url))]
pub async fn receipt_handler(query: web::Query<UrlQuery>, engine: web::Data<Engine>) -> impl Responder {
    info!("Receipt requested for {}", query.url);
    match engine.receipt(&query.url) {
        Ok(receipt) => HttpResponse::Ok().json(receipt),
        Err(e) => bad_request(&query.url, e),
    }
}

/// Robots.txt verdict for one URL
#[instrument(skip(engine), fields(url = %query.url))]
pub async fn robots_check_handler(query: web::Query<UrlQuery>, engine: web::Data<Engine>) -> impl Responder {
    match RequestUrl::parse(&query.url) {
        Ok(request_url) => {
            let check = engine.check(&request_url.path, &request_url.query);
            debug!("Robots check for {}: blocked={}", query.url, check.is_blocked);
            HttpResponse::Ok().json(check)
        }
        Err(e) => bad_request(&query.url, e),
    }
}

/// Playground endpoint: evaluates a URL against a posted snapshot
///
/// Without a posted snapshot the server's own is used and `changes` is empty.
#[instrument(skip(request, engine), fields(url = %request.url))]
pub async fn evaluate_handler(request: web::Json<EvaluateRequest>, engine: web::Data<Engine>) -> impl Responder {
    let request = request.into_inner();

    let (result, changes) = match request.config {
        Some(edited) => {
            let changes = diff_configs(engine.config(), &edited);
            info!("Evaluating {} against an edited snapshot ({} changes)", request.url, changes.len());
            let playground = Engine::new(edited, engine.base_url());
            (playground.receipt(&request.url), changes)
        }
        None => (engine.receipt(&request.url), Vec::new()),
    };

    match result {
        Ok(receipt) => HttpResponse::Ok().json(EvaluateResponse { receipt, changes }),
        Err(e) => bad_request(&request.url, e),
    }
}

/// Health check endpoint for monitoring service status
#[instrument(skip(engine))]
pub async fn health_check(engine: web::Data<Engine>) -> impl Responder {
    debug!("Processing health check request");
    HttpResponse::Ok().json(HealthStatus {
        status: "healthy".to_string(),
        rules: engine.config().rules.len(),
    })
}
