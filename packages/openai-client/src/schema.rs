//! Function parameter schemas generated from Rust types.
//!
//! Uses the `schemars` crate so the argument type a caller decodes a tool call
//! into is also the single source of the schema sent to the model.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use openai_client::FunctionParameters;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Detected {
//!     /// Detected strings
//!     detected: Vec<String>,
//! }
//!
//! let parameters = FunctionParameters::for_type::<Detected>();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::Serialize;
use serde_json::{Map, Value};

/// JSON schema describing a function's arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FunctionParameters(Value);

impl FunctionParameters {
    /// Generate an OpenAI-compatible parameter schema for `T`.
    ///
    /// Object schemas get `additionalProperties: false` and list every
    /// property in `required`; `$ref`s are inlined and the `$schema` and
    /// `definitions` keys are dropped.
    pub fn for_type<T: JsonSchema>() -> Self {
        let mut value = serde_json::to_value(schema_for!(T)).unwrap_or_default();

        let definitions = value.get("definitions").cloned().unwrap_or(Value::Null);
        inline_refs(&mut value, &definitions);
        close_objects(&mut value);

        if let Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        Self(value)
    }

    /// Use a hand-written schema as-is.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Names listed in the root `required` array.
    pub fn required(&self) -> Vec<&str> {
        self.0
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

fn close_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
                if let Some(required) = property_names(map) {
                    map.insert("required".to_string(), required);
                }
            }
            for nested in map.values_mut() {
                close_objects(nested);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(close_objects),
        _ => {}
    }
}

fn property_names(map: &Map<String, Value>) -> Option<Value> {
    let props = map.get("properties")?.as_object()?;
    Some(Value::Array(
        props.keys().cloned().map(Value::String).collect(),
    ))
}

fn inline_refs(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            let target = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|path| path.strip_prefix("#/definitions/"))
                .and_then(|name| definitions.get(name))
                .cloned();

            if let Some(def) = target {
                *value = def;
                inline_refs(value, definitions);
                return;
            }

            for nested in map.values_mut() {
                inline_refs(nested, definitions);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}
