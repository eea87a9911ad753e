pub mod emotions;
pub mod invoker;
pub mod prompt;
pub mod schema;
pub mod types;

pub use invoker::{invoke, Flow, FlowError};

use prompt::{PromptTemplate, DETECT_LANGUAGE_PROMPT, EMOTIONAL_RESPONSE_PROMPT};
use types::{
    DetectLanguageInput, DetectLanguageOutput, EmotionalResponseInput, EmotionalResponseOutput,
};

pub struct DetectLanguage;

impl Flow for DetectLanguage {
    const NAME: &'static str = "detectLanguageFlow";
    type Input = DetectLanguageInput;
    type Output = DetectLanguageOutput;

    fn template() -> &'static PromptTemplate {
        &DETECT_LANGUAGE_PROMPT
    }
}

pub struct EmotionalResponse;

impl Flow for EmotionalResponse {
    const NAME: &'static str = "emotionalResponseFlow";
    type Input = EmotionalResponseInput;
    type Output = EmotionalResponseOutput;

    fn template() -> &'static PromptTemplate {
        &EMOTIONAL_RESPONSE_PROMPT
    }
}
