//! Completion service abstraction.
//!
//! The redactor only needs two things from a model provider: the list of
//! available models and a chat completion. [`OpenAIClient`] is the production
//! implementation; [`MockCompletionService`](crate::testing::MockCompletionService)
//! stands in for it in tests.

use async_trait::async_trait;
use openai_client::{ChatCompletion, ChatRequest, Model, OpenAIClient, OpenAIError};

/// Model listing and chat completion.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Models available to the configured account.
    async fn list_models(&self) -> Result<Vec<Model>, OpenAIError>;

    /// Run one chat completion.
    async fn create_chat_completion(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, OpenAIError>;

    /// Whether `model` is in the service's model list.
    async fn supports_model(&self, model: &str) -> Result<bool, OpenAIError> {
        let models = self.list_models().await?;
        Ok(models.iter().any(|m| m.id == model))
    }
}

#[async_trait]
impl CompletionService for OpenAIClient {
    async fn list_models(&self) -> Result<Vec<Model>, OpenAIError> {
        OpenAIClient::list_models(self).await
    }

    async fn create_chat_completion(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, OpenAIError> {
        OpenAIClient::create_chat_completion(self, request).await
    }
}
