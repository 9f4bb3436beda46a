//! Detection request and response handling.
//!
//! The model is asked to call a single function whose only argument is the
//! list of sensitive strings it found, which keeps the answer machine-readable.

use openai_client::{
    ChatCompletion, ChatRequest, FunctionParameters, FunctionTool, Message, ToolChoice,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DetectionError;

/// Name of the function the model is asked to call.
pub const TOOL_NAME: &str = "detect_private_or_sensitive_info";

pub const TOOL_DESCRIPTION: &str =
    "This function detects private or sensitive information from the given text.";

pub const SYSTEM_PROMPT: &str = "You are an AI administrator who detects private or sensitive information from texts passed by the user.";

/// Low temperature biases the model toward literal extraction.
pub const TEMPERATURE: f32 = 0.1;

/// End-user tag sent with every detection request.
pub const USER_AGENT: &str = "redactor";

/// Arguments of the detection function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectedInfo {
    /// An array of detected private or sensitive information texts
    pub detected: Vec<String>,
}

/// The function tool declared on every detection request.
pub fn detection_tool() -> FunctionTool {
    FunctionTool::new(
        TOOL_NAME,
        TOOL_DESCRIPTION,
        FunctionParameters::for_type::<DetectedInfo>(),
    )
}

/// Build the chat request that asks `model` to inspect `text`.
///
/// The text is sent verbatim as the user message.
pub fn detection_request(model: &str, text: &str) -> ChatRequest {
    ChatRequest::new(model)
        .message(Message::system(SYSTEM_PROMPT))
        .message(Message::user(text))
        .temperature(TEMPERATURE)
        .tool(detection_tool())
        .tool_choice(ToolChoice::function(TOOL_NAME))
        .user(USER_AGENT)
}

/// Pull the detected strings out of a completion.
///
/// Only the first choice and its first tool call are considered.
pub fn parse_detection(completion: &ChatCompletion) -> Result<Vec<String>, DetectionError> {
    let message = completion.first_message().ok_or(DetectionError::NoChoices)?;
    let call = message
        .tool_calls
        .first()
        .ok_or(DetectionError::NoToolCall)?;

    if call.function.name != TOOL_NAME {
        return Err(DetectionError::ToolNameMismatch {
            expected: TOOL_NAME.to_string(),
            actual: call.function.name.clone(),
        });
    }

    let args: DetectedInfo = call.parse_arguments()?;
    Ok(args.detected)
}
