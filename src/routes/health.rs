use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// Service banner with the running version.
#[get("/")]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "TODO API is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Health check endpoint
///
/// Liveness only; it does not touch the database.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "OK" }))
}
