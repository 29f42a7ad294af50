use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use log::{error, info};

use iris_api::config::ServerConfig;
use iris_api::inference::{Classifier, OnnxClassifier};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("🌸 Starting Iris Classifier API");

    let config = ServerConfig::from_env();

    // The model must be ready before the server binds; without it there is
    // nothing to serve.
    let model: Arc<dyn Classifier> = match OnnxClassifier::load(&config.model_path) {
        Ok(model) => {
            info!("Model loaded from {}", config.model_path);
            Arc::new(model)
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let bind_address = config.bind_address();
    info!("Server listening on http://{}", bind_address);
    info!("Endpoints:");
    info!("   GET  /            - Welcome");
    info!("   GET  /health      - Liveness check");
    info!("   GET  /model-info  - Model metadata");
    info!("   POST /predict/    - Prediction");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .configure(iris_api::configure_app(model.clone()))
    })
    .workers(config.workers)
    .bind(&bind_address)?
    .run()
    .await
}
