use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Missing strings default to empty so they are rejected by the flow
// validation with the action's own error message.

#[derive(Debug, Serialize, Deserialize)]
pub struct DetectLanguageRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmotionalResponseRequest {
    #[serde(default)]
    pub message: String,
    pub emotion: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub emotion: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub id: Uuid,
    pub response: String,
    pub language: String,
    pub emotion: String,
    pub emoji: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub message_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
