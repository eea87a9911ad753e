pub mod openai_compatible;
#[cfg(test)]
pub mod scripted;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use openai_compatible::OpenAiCompatibleProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to model server failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed model server response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn invoke_model(&self, prompt: &str, output_schema: &Value) -> Result<String, ProviderError>;

    fn id(&self) -> &str;
}
