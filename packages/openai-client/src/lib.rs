//! Pure OpenAI REST API client
//!
//! A clean, minimal client for the OpenAI API with no domain-specific logic.
//! Supports model listing and chat completions with function calling.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, ChatRequest, Message};
//!
//! let client = OpenAIClient::from_env()?.with_verbose(true);
//!
//! let models = client.list_models().await?;
//!
//! let completion = client
//!     .create_chat_completion(
//!         &ChatRequest::new("gpt-4o").message(Message::user("Hello!")),
//!     )
//!     .await?;
//! ```

pub mod error;
pub mod schema;
pub mod tool;
pub mod types;

pub use error::{OpenAIError, Result};
pub use schema::FunctionParameters;
pub use tool::{FunctionCall, FunctionTool, NamedFunction, ToolCall, ToolChoice, ToolDefinition};
pub use types::*;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Pure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    organization: String,
    base_url: String,
    verbose: bool,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("api_key", &"[REDACTED]")
            .field("organization", &self.organization)
            .field("base_url", &self.base_url)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key and organization.
    ///
    /// An empty organization omits the `OpenAI-Organization` header.
    pub fn new(api_key: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            organization: organization.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            verbose: false,
        }
    }

    /// Create from environment variables `OPENAI_API_KEY` and `OPENAI_ORGANIZATION`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAIError::Config("OPENAI_API_KEY not set".into()))?;
        let organization = std::env::var("OPENAI_ORGANIZATION")
            .map_err(|_| OpenAIError::Config("OPENAI_ORGANIZATION not set".into()))?;
        Ok(Self::new(api_key, organization))
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Log request and response bodies.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the organization.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// List the models available to this account.
    pub async fn list_models(&self) -> Result<Vec<Model>> {
        let start = std::time::Instant::now();

        let request = self.http_client.get(format!("{}/models", self.base_url));
        let list: ModelList = self.send(request, "list models").await?;

        debug!(
            model_count = list.data.len(),
            duration_ms = start.elapsed().as_millis(),
            "OpenAI list models"
        );

        Ok(list.data)
    }

    /// Chat completion.
    ///
    /// Returns the raw completion so callers can inspect tool calls as well as
    /// text content.
    pub async fn create_chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletion> {
        let start = std::time::Instant::now();

        if self.verbose {
            info!(
                body = %serde_json::to_string(request).unwrap_or_default(),
                "OpenAI chat completion request"
            );
        }

        let builder = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(request);
        let completion: ChatCompletion = self.send(builder, "chat completion").await?;

        debug!(
            model = %request.model,
            choices = completion.choices.len(),
            duration_ms = start.elapsed().as_millis(),
            "OpenAI chat completion"
        );

        Ok(completion)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Authorization", format!("Bearer {}", self.api_key));
        if self.organization.is_empty() {
            request
        } else {
            request.header("OpenAI-Organization", &self.organization)
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, operation: &str) -> Result<T> {
        let response = self.authorize(request).send().await.map_err(|e| {
            warn!(error = %e, operation, "OpenAI request failed");
            OpenAIError::Network(e.to_string())
        })?;

        self.decode(response, operation).await
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response, operation: &str) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OpenAIError::Network(e.to_string()))?;

        if self.verbose {
            info!(status = %status, operation, body = %body, "OpenAI response");
        }

        if !status.is_success() {
            let message = types::api_error_message(&body);
            warn!(status = %status, operation, error = %message, "OpenAI API error");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| OpenAIError::Parse(format!("Failed to decode {} response: {}", operation, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = OpenAIClient::new("sk-test", "org-test")
            .with_base_url("https://custom.api.com/v1/")
            .with_verbose(true);

        assert_eq!(client.api_key(), "sk-test");
        assert_eq!(client.organization(), "org-test");
        assert_eq!(client.base_url(), "https://custom.api.com/v1");
        assert!(client.is_verbose());
    }

    #[test]
    fn test_defaults() {
        let client = OpenAIClient::new("sk-test", "org-test");

        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert!(!client.is_verbose());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = OpenAIClient::new("sk-super-secret", "org-test");
        let debug = format!("{:?}", client);

        assert!(!debug.contains("sk-super-secret"));
        assert!(debug.contains("org-test"));
    }

    #[test]
    fn test_organization_header() {
        let client = OpenAIClient::new("sk-test", "org-test");
        let request = client
            .authorize(client.http_client.get("https://example.com"))
            .build()
            .unwrap();

        assert_eq!(request.headers()["Authorization"], "Bearer sk-test");
        assert_eq!(request.headers()["OpenAI-Organization"], "org-test");
    }

    #[test]
    fn test_empty_organization_header_omitted() {
        let client = OpenAIClient::new("sk-test", "");
        let request = client
            .authorize(client.http_client.get("https://example.com"))
            .build()
            .unwrap();

        assert!(request.headers().get("OpenAI-Organization").is_none());
    }
}
