use serde::{Deserialize, Serialize};

use super::schema::{Field, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectLanguageInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectLanguageOutput {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalResponseInput {
    pub message: String,
    pub emotion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalResponseOutput {
    pub response: String,
}

pub static DETECT_LANGUAGE_INPUT: Schema = Schema {
    name: "DetectLanguageInput",
    fields: &[Field::required("text", "The text whose language should be identified.").non_empty()],
};

pub static DETECT_LANGUAGE_OUTPUT: Schema = Schema {
    name: "DetectLanguageOutput",
    fields: &[Field::required(
        "language",
        "The language of the text, as an ISO 639-1 code where possible.",
    )
    .non_empty()],
};

pub static EMOTIONAL_RESPONSE_INPUT: Schema = Schema {
    name: "EmotionalResponseInput",
    fields: &[
        Field::required("message", "The user message to be responded to.").non_empty(),
        Field::required(
            "emotion",
            "The desired emotional tone for the AI response (e.g., happy, sad, angry, excited).",
        ),
        Field::optional(
            "language",
            "The language of the user message and desired response.",
        ),
    ],
};

pub static EMOTIONAL_RESPONSE_OUTPUT: Schema = Schema {
    name: "EmotionalResponseOutput",
    fields: &[Field::required(
        "response",
        "The AI response with the specified emotional tone.",
    )],
};
