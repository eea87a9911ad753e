use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use super::{ModelProvider, ProviderError};

type Reply = dyn Fn(&str) -> Result<String, ProviderError> + Send + Sync;

pub struct ScriptedProvider {
    reply: Box<Reply>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new<F>(reply: F) -> Self
    where
        F: Fn(&str) -> Result<String, ProviderError> + Send + Sync + 'static,
    {
        Self {
            reply: Box::new(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(raw: &str) -> Self {
        let raw = raw.to_string();
        Self::new(move |_| Ok(raw.clone()))
    }

    pub fn failing(detail: &str) -> Self {
        let detail = detail.to_string();
        Self::new(move |_| {
            Err(ProviderError::Status {
                status: 503,
                body: detail.clone(),
            })
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn invoke_model(&self, prompt: &str, _output_schema: &Value) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        tokio::task::yield_now().await;
        (self.reply)(prompt)
    }

    fn id(&self) -> &str {
        "scripted"
    }
}
