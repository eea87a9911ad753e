use serde_json::Value;
use tera::{Context, Tera};

use super::schema::Schema;
use super::types::{
    DETECT_LANGUAGE_INPUT, DETECT_LANGUAGE_OUTPUT, EMOTIONAL_RESPONSE_INPUT,
    EMOTIONAL_RESPONSE_OUTPUT,
};

#[derive(Debug)]
pub struct PromptTemplate {
    pub name: &'static str,
    source: &'static str,
    pub input: &'static Schema,
    pub output: &'static Schema,
}

impl PromptTemplate {
    pub const fn new(
        name: &'static str,
        source: &'static str,
        input: &'static Schema,
        output: &'static Schema,
    ) -> Self {
        Self {
            name,
            source,
            input,
            output,
        }
    }

    // Prompts are plain text, so no autoescaping.
    pub fn render(&self, validated: &Value) -> Result<String, tera::Error> {
        let context = Context::from_serialize(validated)?;
        Tera::one_off(self.source, &context, false)
    }
}

const EMOTIONAL_RESPONSE_SOURCE: &str = r#"You are AIChatBabu, an intelligent, emotional, and helpful AI assistant.

You will generate a response to the user's message with the following specifications:

Language: {{ language | default(value="") }}
Emotion: {{ emotion }}
Message: {{ message }}

Instructions:
- Understand the emotion behind the user's message.
- Respond in the same language as the user.
- Give a clear, helpful, and honest answer, tailored to the specified emotion.
- Use the specified emotion in the tone of your response.

Reply with a JSON object containing a single string field "response" that holds your answer."#;

const DETECT_LANGUAGE_SOURCE: &str = r#"Identify the language of the following text.

Text: {{ text }}

Reply with a JSON object containing a single string field "language" holding the ISO 639-1 code of the language (for example "en", "es" or "hi"). Do not add any other fields or commentary."#;

pub static EMOTIONAL_RESPONSE_PROMPT: PromptTemplate = PromptTemplate::new(
    "emotionalResponsePrompt",
    EMOTIONAL_RESPONSE_SOURCE,
    &EMOTIONAL_RESPONSE_INPUT,
    &EMOTIONAL_RESPONSE_OUTPUT,
);

pub static DETECT_LANGUAGE_PROMPT: PromptTemplate = PromptTemplate::new(
    "detectLanguagePrompt",
    DETECT_LANGUAGE_SOURCE,
    &DETECT_LANGUAGE_INPUT,
    &DETECT_LANGUAGE_OUTPUT,
);
