use actix_web::{error, web, HttpResponse};
use log::warn;

use crate::web::handlers;
use crate::web::models::ErrorBody;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/api")
                .route("/emotions", web::get().to(handlers::list_emotions))
                .route("/detect-language", web::post().to(handlers::detect_language))
                .route("/emotional-response", web::post().to(handlers::emotional_response))
                .route("/chat", web::post().to(handlers::chat))
                .route("/feedback", web::post().to(handlers::feedback)),
        )
        .route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health_check));
}

// Body parse failures get a fixed message instead of the serde detail.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected request body: {}", err);
        let response = HttpResponse::BadRequest().json(ErrorBody {
            error: "Invalid request body.".to_string(),
        });
        error::InternalError::from_response(err, response).into()
    })
}
