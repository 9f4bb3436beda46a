//! Testing utilities including a mock completion service.
//!
//! Useful for exercising a `Redactor` without network calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use openai_client::{
    AssistantMessage, ChatCompletion, ChatRequest, Choice, Model, OpenAIError, ToolCall,
};

use crate::detect::TOOL_NAME;
use crate::service::CompletionService;

/// A mock completion service.
///
/// Serves a fixed model list and replays queued chat responses in order.
/// Clones share state, so a test can keep a handle after giving one to a
/// `Redactor`.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionService {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    models: Vec<Model>,
    list_error: Option<OpenAIError>,
    responses: VecDeque<Result<ChatCompletion, OpenAIError>>,
    calls: Vec<MockCall>,
}

/// Record of a call made to the mock.
#[derive(Debug, Clone)]
pub enum MockCall {
    ListModels,
    ChatCompletion(ChatRequest),
}

impl MockCompletionService {
    /// A mock that lists the given model ids.
    pub fn with_models<I, M>(models: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let mock = Self::default();
        mock.lock().models = models.into_iter().map(Model::new).collect();
        mock
    }

    /// Make `list_models` fail.
    pub fn fail_list_models(self, error: OpenAIError) -> Self {
        self.lock().list_error = Some(error);
        self
    }

    /// Queue a raw completion.
    pub fn push_completion(&self, completion: ChatCompletion) -> &Self {
        self.lock().responses.push_back(Ok(completion));
        self
    }

    /// Queue a well-formed detection answer.
    pub fn push_detected<I, D>(&self, detected: I) -> &Self
    where
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        let detected: Vec<String> = detected.into_iter().map(Into::into).collect();
        let arguments = serde_json::json!({ "detected": detected }).to_string();
        self.push_tool_call(TOOL_NAME, arguments)
    }

    /// Queue an answer consisting of one tool call.
    pub fn push_tool_call(&self, name: &str, arguments: impl Into<String>) -> &Self {
        self.push_completion(completion(vec![ToolCall::new("call_mock", name, arguments)]))
    }

    /// Queue a failure.
    pub fn push_error(&self, error: OpenAIError) -> &Self {
        self.lock().responses.push_back(Err(error));
        self
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Chat requests made so far.
    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::ChatCompletion(request) => Some(request),
                MockCall::ListModels => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A single-choice completion carrying the given tool calls.
pub fn completion(tool_calls: Vec<ToolCall>) -> ChatCompletion {
    ChatCompletion {
        id: "chatcmpl-mock".to_string(),
        model: "mock".to_string(),
        choices: vec![Choice {
            index: 0,
            message: AssistantMessage {
                role: "assistant".to_string(),
                content: None,
                tool_calls,
            },
            finish_reason: Some("tool_calls".to_string()),
        }],
        usage: None,
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    async fn list_models(&self) -> Result<Vec<Model>, OpenAIError> {
        let mut state = self.lock();
        state.calls.push(MockCall::ListModels);

        match state.list_error.take() {
            Some(error) => Err(error),
            None => Ok(state.models.clone()),
        }
    }

    async fn create_chat_completion(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, OpenAIError> {
        let mut state = self.lock();
        state.calls.push(MockCall::ChatCompletion(request.clone()));

        state.responses.pop_front().unwrap_or_else(|| {
            Err(OpenAIError::Network(
                "mock completion service has no queued response".into(),
            ))
        })
    }
}
