pub mod config;
pub mod inference;
pub mod models;
pub mod routes;

use std::sync::Arc;

use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};

use crate::inference::Classifier;
use crate::models::ErrorBody;

/// JSON extractor configured to answer malformed bodies with the same
/// structured error payload as field-level validation.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            let body = ErrorBody::message(&format!("invalid request body: {}", err));
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}

/// Wires routes and shared state into an actix app. The classifier is
/// injected here so integration tests can substitute a stub.
pub fn configure_app(model: Arc<dyn Classifier>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(model))
            .app_data(json_config());
        routes::configure(cfg);
    }
}
