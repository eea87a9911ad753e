use log::error;
use thiserror::Error;

use crate::flows::types::{
    DetectLanguageInput, DetectLanguageOutput, EmotionalResponseInput, EmotionalResponseOutput,
};
use crate::flows::{invoke, DetectLanguage, EmotionalResponse, FlowError};
use crate::model::ModelProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DetectLanguage,
    EmotionalResponse,
}

impl Action {
    pub fn failure_message(self) -> &'static str {
        match self {
            Action::DetectLanguage => "Failed to detect language.",
            Action::EmotionalResponse => "Failed to get emotional response.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .action.failure_message())]
pub struct ActionError {
    pub action: Action,
    pub invalid_input: bool,
}

impl ActionError {
    fn from_flow(action: Action, err: &FlowError) -> Self {
        Self {
            action,
            invalid_input: err.is_invalid_input(),
        }
    }
}

pub async fn detect_language(
    provider: &dyn ModelProvider,
    text: &str,
) -> Result<DetectLanguageOutput, ActionError> {
    let input = DetectLanguageInput {
        text: text.to_string(),
    };
    invoke::<DetectLanguage>(provider, &input)
        .await
        .map_err(|e| {
            error!("Error in detect_language: {}", e);
            ActionError::from_flow(Action::DetectLanguage, &e)
        })
}

pub async fn get_emotional_response(
    provider: &dyn ModelProvider,
    message: &str,
    emotion: &str,
    language: Option<&str>,
) -> Result<EmotionalResponseOutput, ActionError> {
    let input = EmotionalResponseInput {
        message: message.to_string(),
        emotion: emotion.to_string(),
        language: language.map(str::to_string),
    };
    invoke::<EmotionalResponse>(provider, &input)
        .await
        .map_err(|e| {
            error!("Error in get_emotional_response: {}", e);
            ActionError::from_flow(Action::EmotionalResponse, &e)
        })
}
