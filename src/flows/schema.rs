use serde_json::{json, Map, Value};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub non_empty: bool,
    pub description: &'static str,
}

impl Field {
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            required: true,
            non_empty: false,
            description,
        }
    }

    pub const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            required: false,
            non_empty: false,
            description,
        }
    }

    // Blank strings are rejected, but the accepted value is not trimmed.
    pub const fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in self.fields {
            let mut property = json!({
                "type": "string",
                "description": field.description,
            });
            if field.non_empty {
                property["minLength"] = json!(1);
            }
            properties.insert(field.name.to_string(), property);
            if field.required {
                required.push(Value::from(field.name));
            }
        }

        json!({
            "title": self.name,
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Input,
    Output,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Input => f.write_str("input"),
            Side::Output => f.write_str("output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    #[error("expected a JSON object")]
    NotAnObject,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` must be a string")]
    NotAString(&'static str),
    #[error("field `{0}` must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {side} for {schema}: {kind}")]
pub struct ValidationError {
    pub schema: &'static str,
    pub side: Side,
    pub kind: ValidationErrorKind,
}

// Returns only the declared fields; unknown ones are dropped, null optionals omitted.
pub fn validate(schema: &Schema, side: Side, value: &Value) -> Result<Value, ValidationError> {
    let fail = |kind| ValidationError {
        schema: schema.name,
        side,
        kind,
    };

    let object = value
        .as_object()
        .ok_or_else(|| fail(ValidationErrorKind::NotAnObject))?;

    let mut accepted = Map::new();
    for field in schema.fields {
        match object.get(field.name) {
            None | Some(Value::Null) if field.required => {
                return Err(fail(ValidationErrorKind::MissingField(field.name)));
            }
            None | Some(Value::Null) => {}
            Some(Value::String(text)) => {
                if field.non_empty && text.trim().is_empty() {
                    return Err(fail(ValidationErrorKind::Empty(field.name)));
                }
                accepted.insert(field.name.to_string(), Value::String(text.clone()));
            }
            Some(_) => return Err(fail(ValidationErrorKind::NotAString(field.name))),
        }
    }

    Ok(Value::Object(accepted))
}
