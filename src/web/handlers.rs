use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::{error, info};
use serde_json::json;
use tera::Context;
use uuid::Uuid;

use crate::actions::{self, ActionError};
use crate::flows::emotions::{self, DEFAULT_EMOTION, EMOTIONS};
use crate::web::models::{
    ChatRequest, ChatResponse, DetectLanguageRequest, EmotionalResponseRequest, ErrorBody,
    FeedbackRequest,
};
use crate::AppState;

impl ResponseError for ActionError {
    fn status_code(&self) -> StatusCode {
        if self.invalid_input {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::BAD_GATEWAY
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

// Index page handler
pub async fn index(data: web::Data<AppState>) -> impl Responder {
    let mut context = Context::new();
    context.insert("emotions", &EMOTIONS);
    context.insert("default_emotion", DEFAULT_EMOTION.id);
    match data.tera.render("index.html", &context) {
        Ok(html) => HttpResponse::Ok().content_type("text/html").body(html),
        Err(e) => {
            error!("Template error: {}", e);
            HttpResponse::InternalServerError().body("Template error")
        }
    }
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn list_emotions() -> impl Responder {
    HttpResponse::Ok().json(&EMOTIONS)
}

pub async fn detect_language(
    data: web::Data<AppState>,
    req: web::Json<DetectLanguageRequest>,
) -> Result<HttpResponse, ActionError> {
    let result = actions::detect_language(data.provider.as_ref(), &req.text).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn emotional_response(
    data: web::Data<AppState>,
    req: web::Json<EmotionalResponseRequest>,
) -> Result<HttpResponse, ActionError> {
    let emotion = emotions::resolve_tone(req.emotion.as_deref());
    let result = actions::get_emotional_response(
        data.provider.as_ref(),
        &req.message,
        &emotion,
        req.language.as_deref(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(result))
}

// One chat turn: detect the language unless the caller already knows it,
// then ask for the reply in the chosen tone.
pub async fn chat(
    data: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> Result<HttpResponse, ActionError> {
    let req = req.into_inner();
    let id = Uuid::new_v4();
    let emotion = emotions::resolve_tone(req.emotion.as_deref());
    let provider = data.provider.as_ref();

    info!("Chat turn {} (emotion: {})", id, emotion);

    let language = match req.language.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        Some(language) => language.to_string(),
        None => actions::detect_language(provider, &req.message).await?.language,
    };

    let reply =
        actions::get_emotional_response(provider, &req.message, &emotion, Some(&language))
            .await?;

    Ok(HttpResponse::Ok().json(ChatResponse {
        id,
        response: reply.response,
        language,
        emoji: emotions::find(&emotion).map(|e| e.emoji.to_string()),
        emotion,
    }))
}

pub async fn feedback(req: web::Json<FeedbackRequest>) -> impl Responder {
    info!("Feedback submitted for message ID: {}", req.message_id);
    HttpResponse::Ok().json(json!({ "status": "received" }))
}
