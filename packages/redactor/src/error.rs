//! Typed errors for the redactor.
//!
//! One enum per stage: construction, detection, redaction.

use openai_client::OpenAIError;
use thiserror::Error;

/// Errors raised while constructing a [`Redactor`](crate::Redactor).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// API key or organization missing or empty
    #[error("no `api_key` or `organization` was given")]
    MissingCredentials,

    /// Model listing failed
    #[error("failed to list OpenAI models: {0}")]
    ListModels(#[source] OpenAIError),

    /// Selected model is not offered by the service
    #[error("no such model: {model} in supported models list")]
    UnsupportedModel { model: String },

    /// Environment variable present but unusable
    #[error("invalid environment: {0}")]
    Environment(String),
}

/// Errors raised while obtaining or decoding a detection response.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// Transport or API failure from the completion service
    #[error(transparent)]
    Service(#[from] OpenAIError),

    /// Completion carried no choices
    #[error("there was no choice in chat completion from the completion service")]
    NoChoices,

    /// First choice answered without calling a tool
    #[error("there was no tool call in chat completion choice from the completion service")]
    NoToolCall,

    /// Model called a function other than the declared one
    #[error("returned tool call function name: `{actual}` differs from the requested one: `{expected}`")]
    ToolNameMismatch { expected: String, actual: String },

    /// Tool call arguments did not decode into `{ detected: [string] }`
    #[error("malformed tool call arguments: {0}")]
    MalformedArguments(#[from] serde_json::Error),
}

/// Errors raised by [`Redactor::redact`](crate::Redactor::redact) and
/// [`Redactor::redact_func`](crate::Redactor::redact_func).
///
/// In both cases the caller's input text is left untouched.
#[derive(Debug, Error)]
pub enum RedactionError {
    #[error(transparent)]
    Detection(#[from] DetectionError),

    /// Detection succeeded but found nothing
    #[error("there was no private/sensitive information in the given text")]
    NothingToRedact,
}

impl RedactionError {
    /// Whether this is the non-fatal "nothing found" outcome.
    pub fn is_nothing_to_redact(&self) -> bool {
        matches!(self, Self::NothingToRedact)
    }
}
