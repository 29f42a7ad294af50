use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use log::{error, warn};
use serde_json::Value;

use crate::inference::Classifier;
use crate::models::{ErrorBody, IrisFeatures, Prediction, Welcome};

pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(Welcome::new())
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub async fn model_info(model: web::Data<Arc<dyn Classifier>>) -> impl Responder {
    HttpResponse::Ok().json(model.info())
}

pub async fn predict(
    model: web::Data<Arc<dyn Classifier>>,
    body: web::Json<Value>,
) -> impl Responder {
    let features = match IrisFeatures::from_json(&body) {
        Ok(features) => features,
        Err(fields) => {
            warn!(
                "rejected prediction request, invalid fields: {}",
                fields
                    .iter()
                    .map(|f| f.field.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            return HttpResponse::BadRequest().json(ErrorBody::validation(fields));
        }
    };

    match model.predict(&features) {
        Ok(label) => HttpResponse::Ok().json(Prediction {
            predicted_class: label,
        }),
        Err(e) => {
            error!("prediction failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::message("prediction failed"))
        }
    }
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ErrorBody::message("endpoint not found"))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(welcome))
        .route("/health", web::get().to(health))
        .route("/model-info", web::get().to(model_info))
        .route("/predict/", web::post().to(predict))
        .default_service(web::route().to(not_found));
}
