use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{ModelProvider, ProviderError};
use crate::config::Settings;

#[derive(Debug, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "system")]
    System,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

// Client for any server exposing the OpenAI chat completions API
// (mistral.rs, llama.cpp, vLLM, OpenAI itself).
pub struct OpenAiCompatibleProvider {
    server_url: String,
    model_name: String,
    api_key: Option<String>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    client: Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(settings: &Settings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self::with_client(settings, client))
    }

    pub fn with_client(settings: &Settings, client: Client) -> Self {
        info!(
            "Using model server at: {} (model: {})",
            settings.model_server_url, settings.model_name
        );
        Self {
            server_url: settings.model_server_url.clone(),
            model_name: settings.model_name.clone(),
            api_key: settings.api_key.clone(),
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_tokens: settings.max_tokens,
            client,
        }
    }

    fn payload(&self, prompt: &str, output_schema: &Value) -> Value {
        let schema_name = output_schema
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("output");

        let messages = vec![
            Message {
                role: Role::System,
                content: format!(
                    "Respond only with a single JSON object that conforms to this JSON Schema:\n{}",
                    output_schema
                ),
            },
            Message {
                role: Role::User,
                content: prompt.to_string(),
            },
        ];

        json!({
            "model": self.model_name,
            "messages": messages,
            "temperature": self.temperature,
            "top_p": self.top_p,
            "max_tokens": self.max_tokens,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": schema_name,
                    "schema": output_schema
                }
            }
        })
    }
}

#[async_trait]
impl ModelProvider for OpenAiCompatibleProvider {
    async fn invoke_model(&self, prompt: &str, output_schema: &Value) -> Result<String, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.server_url);
        let payload = self.payload(prompt, output_schema);
        debug!("Payload: {}", payload);

        let mut request = self.client.post(&url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        debug!("Response JSON: {}", response_json);

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("missing choices[0].message.content".to_string())
            })?;

        info!("Response length: {} characters", content.len());
        Ok(content.to_string())
    }

    fn id(&self) -> &str {
        "openai-compatible"
    }
}
