//! The redactor client.

use openai_client::OpenAIClient;
use tracing::{debug, info};

use crate::config::{RedactorConfig, RedactorOptions};
use crate::detect::{detection_request, parse_detection};
use crate::error::{ConfigError, DetectionError, RedactionError};
use crate::redact::apply_redactions;
use crate::service::CompletionService;

/// Detects and redacts private or sensitive information with a chat model.
///
/// Holds read-only configuration and a completion service handle; every call
/// is independent and issues a fresh request.
#[derive(Debug)]
pub struct Redactor<S = OpenAIClient> {
    config: RedactorConfig,
    service: S,
}

impl Redactor<OpenAIClient> {
    /// Build a redactor backed by the OpenAI API.
    ///
    /// Fails when credentials are missing or the model is not listed by the
    /// API.
    pub async fn new(options: RedactorOptions) -> Result<Self, ConfigError> {
        let config = options.validate()?;

        let credentials = config.credentials();
        let mut client = OpenAIClient::new(
            credentials.api_key.expose(),
            credentials.organization.clone(),
        )
        .with_verbose(config.verbose());
        if let Some(url) = config.base_url() {
            client = client.with_base_url(url);
        }

        Self::connect(config, client).await
    }
}

impl<S: CompletionService> Redactor<S> {
    /// Build a redactor on top of an existing completion service.
    pub async fn with_service(options: RedactorOptions, service: S) -> Result<Self, ConfigError> {
        let config = options.validate()?;
        Self::connect(config, service).await
    }

    async fn connect(config: RedactorConfig, service: S) -> Result<Self, ConfigError> {
        let supported = service
            .supports_model(config.model())
            .await
            .map_err(ConfigError::ListModels)?;

        if !supported {
            return Err(ConfigError::UnsupportedModel {
                model: config.model().to_string(),
            });
        }

        info!(model = %config.model(), "Redactor ready");

        Ok(Self { config, service })
    }

    /// The model detection requests are sent to.
    pub fn model(&self) -> &str {
        self.config.model()
    }

    pub fn config(&self) -> &RedactorConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Ask the model which substrings of `text` are private or sensitive.
    ///
    /// Returns them in response order, duplicates included. An empty list is
    /// a valid answer.
    pub async fn detect(&self, text: &str) -> Result<Vec<String>, DetectionError> {
        let request = detection_request(self.config.model(), text);
        let completion = self.service.create_chat_completion(&request).await?;
        let detected = parse_detection(&completion)?;

        debug!(
            model = %self.config.model(),
            text_len = text.len(),
            detected_count = detected.len(),
            "Detection complete"
        );

        Ok(detected)
    }

    /// Replace every detected string in `text` with `to`.
    pub async fn redact(&self, text: &str, to: &str) -> Result<String, RedactionError> {
        self.redact_func(text, |_| to.to_string()).await
    }

    /// Replace every detected string `d` in `text` with `replace(d)`.
    ///
    /// Replacements are applied in detection order against the progressively
    /// redacted text (see [`apply_redactions`]). Fails with
    /// [`RedactionError::NothingToRedact`] when the model finds nothing.
    pub async fn redact_func<F>(&self, text: &str, replace: F) -> Result<String, RedactionError>
    where
        F: Fn(&str) -> String,
    {
        let detected = self.detect(text).await?;
        if detected.is_empty() {
            return Err(RedactionError::NothingToRedact);
        }

        Ok(apply_redactions(text, &detected, replace))
    }
}
