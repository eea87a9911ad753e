use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::prompt::PromptTemplate;
use super::schema::{self, Schema, Side, ValidationError, ValidationErrorKind};
use crate::model::{ModelProvider, ProviderError};

pub trait Flow {
    const NAME: &'static str;
    type Input: Serialize + Sync;
    type Output: DeserializeOwned;

    fn template() -> &'static PromptTemplate;
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("model provider call failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("model returned no usable output: {0}")]
    EmptyOutput(String),
    #[error("failed to serialize {flow} input: {source}")]
    Serialization {
        flow: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to render prompt `{template}`: {source}")]
    Template {
        template: &'static str,
        #[source]
        source: tera::Error,
    },
}

impl FlowError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, FlowError::Validation(err) if err.side == Side::Input)
    }
}

pub async fn invoke<F: Flow>(
    provider: &dyn ModelProvider,
    input: &F::Input,
) -> Result<F::Output, FlowError> {
    let template = F::template();

    let raw_input = serde_json::to_value(input).map_err(|source| FlowError::Serialization {
        flow: F::NAME,
        source,
    })?;
    let validated = schema::validate(template.input, Side::Input, &raw_input)?;

    let prompt = template
        .render(&validated)
        .map_err(|source| FlowError::Template {
            template: template.name,
            source,
        })?;
    debug!("{} prompt: {}", F::NAME, prompt);

    let raw_output = provider
        .invoke_model(&prompt, &template.output.to_json_schema())
        .await?;
    debug!("{} raw output from {}: {}", F::NAME, provider.id(), raw_output);

    let candidate = coerce_output(&raw_output, template.output).ok_or_else(|| {
        FlowError::EmptyOutput(format!("{} produced no parsable output", F::NAME))
    })?;

    let checked = match schema::validate(template.output, Side::Output, &candidate) {
        Err(err) if matches!(err.kind, ValidationErrorKind::MissingField(_)) => {
            return Err(FlowError::EmptyOutput(err.to_string()));
        }
        result => result?,
    };

    let output = serde_json::from_value(checked)
        .map_err(|e| FlowError::EmptyOutput(format!("{}: {}", F::NAME, e)))?;
    info!("{} completed", F::NAME);
    Ok(output)
}

// Bare text is accepted only when the schema has a single field.
fn coerce_output(raw: &str, schema: &Schema) -> Option<Value> {
    let text = strip_code_fence(raw.trim()).trim();
    if text.is_empty() {
        return None;
    }

    let single_field = match schema.fields {
        [field] => Some(field.name),
        _ => None,
    };

    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => return Some(value),
        Ok(Value::String(inner)) => return single_field.map(|name| wrap(name, inner)),
        _ => {}
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(&text[start..=end]) {
                return Some(value);
            }
        }
    }

    if text.starts_with('{') || text.starts_with('[') {
        return None;
    }
    single_field.map(|name| wrap(name, text.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_end();
    let body = rest.strip_suffix("```").unwrap_or(rest);
    // An info word such as `json` only counts when whitespace follows it.
    let info_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    match body[info_len..].chars().next() {
        Some(next) if info_len > 0 && next.is_whitespace() => &body[info_len..],
        _ => body,
    }
}

fn wrap(field: &str, text: String) -> Value {
    let mut object = Map::new();
    object.insert(field.to_string(), Value::String(text));
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::types::{
        DetectLanguageInput, EmotionalResponseInput, DETECT_LANGUAGE_OUTPUT,
        EMOTIONAL_RESPONSE_OUTPUT,
    };
    use crate::flows::{DetectLanguage, EmotionalResponse};
    use crate::model::scripted::ScriptedProvider;
    use serde_json::json;

    fn greeting(emotion: &str) -> EmotionalResponseInput {
        EmotionalResponseInput {
            message: "Hola".to_string(),
            emotion: emotion.to_string(),
            language: Some("es".to_string()),
        }
    }

    #[tokio::test]
    async fn returns_validated_output() {
        let provider = ScriptedProvider::replying(r#"{"response": "Hola"}"#);
        let output = invoke::<EmotionalResponse>(&provider, &greeting("happy"))
            .await
            .unwrap();
        assert_eq!(output.response, "Hola");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_model() {
        let provider = ScriptedProvider::replying(r#"{"language": "en"}"#);
        let input = DetectLanguageInput {
            text: "   ".to_string(),
        };

        let err = invoke::<DetectLanguage>(&provider, &input).await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn missing_output_field_is_empty_output() {
        let provider = ScriptedProvider::replying(r#"{"answer": "Hola"}"#);
        let err = invoke::<EmotionalResponse>(&provider, &greeting("happy"))
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::EmptyOutput(_)), "got {:?}", err);
        assert!(!err.is_invalid_input());
    }

    #[tokio::test]
    async fn mistyped_output_field_is_output_validation_error() {
        let provider = ScriptedProvider::replying(r#"{"response": 42}"#);
        let err = invoke::<EmotionalResponse>(&provider, &greeting("happy"))
            .await
            .unwrap_err();
        match err {
            FlowError::Validation(v) => assert_eq!(v.side, Side::Output),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn blank_output_is_empty_output() {
        let provider = ScriptedProvider::replying("  \n ");
        let err = invoke::<EmotionalResponse>(&provider, &greeting("sad"))
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::EmptyOutput(_)));
    }

    #[tokio::test]
    async fn provider_failure_is_propagated() {
        let provider = ScriptedProvider::failing("connection reset");
        let err = invoke::<EmotionalResponse>(&provider, &greeting("sad"))
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Provider(_)));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_invocations_render_their_own_prompts() {
        let provider = ScriptedProvider::new(|prompt| {
            let tone = if prompt.contains("Emotion: angry") { "angry" } else { "happy" };
            Ok(json!({ "response": tone }).to_string())
        });

        let happy = greeting("happy");
        let angry = greeting("angry");
        let (first, second) = tokio::join!(
            invoke::<EmotionalResponse>(&provider, &happy),
            invoke::<EmotionalResponse>(&provider, &angry),
        );

        assert_eq!(first.unwrap().response, "happy");
        assert_eq!(second.unwrap().response, "angry");

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts.iter().filter(|p| p.contains("Emotion: happy")).count(), 1);
        assert_eq!(prompts.iter().filter(|p| p.contains("Emotion: angry")).count(), 1);
    }

    #[test]
    fn coerces_fenced_json() {
        for raw in [
            "```json\n{\"response\": \"hi\"}\n```",
            "```\n{\"response\": \"hi\"}\n```",
            "```{\"response\":\"hi\"}```",
            "```json {\"response\": \"hi\"} ```",
        ] {
            assert_eq!(
                coerce_output(raw, &EMOTIONAL_RESPONSE_OUTPUT),
                Some(json!({"response": "hi"})),
                "raw: {:?}",
                raw
            );
        }
    }

    #[test]
    fn inline_fenced_bare_text_keeps_its_word() {
        assert_eq!(
            coerce_output("```en```", &DETECT_LANGUAGE_OUTPUT),
            Some(json!({"language": "en"}))
        );
    }

    #[tokio::test]
    async fn single_line_fenced_reply_is_accepted() {
        let provider = ScriptedProvider::replying("```{\"response\":\"Hola\"}```");
        let output = invoke::<EmotionalResponse>(&provider, &greeting("happy"))
            .await
            .unwrap();
        assert_eq!(output.response, "Hola");
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    struct BrokenInputFlow;

    impl Flow for BrokenInputFlow {
        const NAME: &'static str = "brokenInputFlow";
        type Input = Unserializable;
        type Output = crate::flows::types::DetectLanguageOutput;

        fn template() -> &'static PromptTemplate {
            &crate::flows::prompt::DETECT_LANGUAGE_PROMPT
        }
    }

    #[tokio::test]
    async fn serialization_failure_is_not_reported_as_invalid_input() {
        let provider = ScriptedProvider::replying(r#"{"language": "en"}"#);
        let err = invoke::<BrokenInputFlow>(&provider, &Unserializable)
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Serialization { flow: "brokenInputFlow", .. }), "got {:?}", err);
        assert!(!err.is_invalid_input());
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn extracts_object_from_prose() {
        let raw = "Sure! Here it is: {\"language\": \"fr\"} Hope that helps.";
        assert_eq!(
            coerce_output(raw, &DETECT_LANGUAGE_OUTPUT),
            Some(json!({"language": "fr"}))
        );
    }

    #[test]
    fn bare_text_fills_a_single_field_schema() {
        assert_eq!(
            coerce_output(" en \n", &DETECT_LANGUAGE_OUTPUT),
            Some(json!({"language": "en"}))
        );
        assert_eq!(
            coerce_output("\"de\"", &DETECT_LANGUAGE_OUTPUT),
            Some(json!({"language": "de"}))
        );
    }

    #[test]
    fn broken_json_is_not_coerced() {
        assert_eq!(coerce_output("{\"response\": ", &EMOTIONAL_RESPONSE_OUTPUT), None);
        assert_eq!(coerce_output("```\n```", &EMOTIONAL_RESPONSE_OUTPUT), None);
    }
}
