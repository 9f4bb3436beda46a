//! Function calling types.
//!
//! A request declares [`FunctionTool`]s; the model answers with [`ToolCall`]s
//! whose arguments are a JSON string that callers decode into their own types.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{ChatRequest, FunctionParameters, FunctionTool, ToolChoice};
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct SearchArgs {
//!     query: String,
//! }
//!
//! let request = ChatRequest::new("gpt-4o")
//!     .tool(FunctionTool::new(
//!         "web_search",
//!         "Search the web for information",
//!         FunctionParameters::for_type::<SearchArgs>(),
//!     ))
//!     .tool_choice(ToolChoice::function("web_search"));
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use crate::schema::FunctionParameters;

/// A function the model may call, in OpenAI's `tools` array format.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionTool {
    #[serde(rename = "type")]
    pub kind: String,

    pub function: ToolDefinition,
}

impl FunctionTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: FunctionParameters,
    ) -> Self {
        Self {
            kind: "function".to_string(),
            function: ToolDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    /// The declared function name.
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Function name, description and parameter schema.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// The name of the tool.
    pub name: String,

    /// A description of what the tool does.
    pub description: String,

    /// JSON schema for the tool's parameters.
    pub parameters: FunctionParameters,
}

/// How the model should pick among declared tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolChoice {
    /// `"none"`, `"auto"` or `"required"`.
    Mode(String),

    /// Force a call to one named function.
    Function {
        #[serde(rename = "type")]
        kind: String,
        function: NamedFunction,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedFunction {
    pub name: String,
}

impl ToolChoice {
    pub fn auto() -> Self {
        Self::Mode("auto".to_string())
    }

    pub fn required() -> Self {
        Self::Mode("required".to_string())
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::Function {
            kind: "function".to_string(),
            function: NamedFunction { name: name.into() },
        }
    }
}

/// A tool call from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// The ID of this tool call (for matching responses).
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,

    pub function: FunctionCall,
}

fn function_kind() -> String {
    "function".to_string()
}

/// Name and raw JSON arguments of a called function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,

    /// The arguments as a JSON string.
    #[serde(default)]
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: function_kind(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    /// Parse arguments into a typed struct.
    pub fn parse_arguments<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.function.arguments)
    }
}
