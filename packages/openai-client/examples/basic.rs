//! Basic OpenAI client usage example

use openai_client::{ChatRequest, FunctionParameters, FunctionTool, Message, OpenAIClient, ToolChoice};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
struct Cities {
    /// City names mentioned in the text
    cities: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize from environment
    let client = OpenAIClient::from_env()?;

    println!("=== Models ===");
    let models = client.list_models().await?;
    println!("{} models available", models.len());

    println!("\n=== Chat Completion ===");
    let completion = client
        .create_chat_completion(
            &ChatRequest::new("gpt-4o")
                .message(Message::system("You are a helpful assistant."))
                .message(Message::user("What is Rust in one sentence?"))
                .temperature(0.7)
                .max_tokens(100),
        )
        .await?;
    if let Some(message) = completion.first_message() {
        println!("Response: {}", message.content.as_deref().unwrap_or_default());
    }

    println!("\n=== Function Calling ===");
    let completion = client
        .create_chat_completion(
            &ChatRequest::new("gpt-4o")
                .message(Message::user("I flew from Oslo to Lima via Madrid."))
                .tool(FunctionTool::new(
                    "list_cities",
                    "Lists the cities mentioned in the text",
                    FunctionParameters::for_type::<Cities>(),
                ))
                .tool_choice(ToolChoice::function("list_cities")),
        )
        .await?;
    if let Some(call) = completion.first_message().and_then(|m| m.tool_calls.first()) {
        let cities: Cities = call.parse_arguments()?;
        println!("Cities: {:?}", cities.cities);
    }

    Ok(())
}
