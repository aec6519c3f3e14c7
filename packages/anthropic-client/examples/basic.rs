//! Basic Anthropic client usage example

use anthropic_client::{AnthropicClient, Message, MessagesRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize from environment
    let client = AnthropicClient::from_env()?;

    println!("=== Messages ===");
    let response = client
        .messages(
            &MessagesRequest::new("claude-3-5-sonnet-20241022")
                .system("You are a concise assistant.")
                .message(Message::user("What is Rust in one sentence?"))
                .max_tokens(200)
                .temperature(0.7),
        )
        .await?;

    println!("Response: {}", response.text());
    println!(
        "Usage: {} input / {} output tokens",
        response.usage.input_tokens, response.usage.output_tokens
    );
    if let Some(stop_reason) = response.stop_reason {
        println!("Stop reason: {:?}", stop_reason);
    }

    Ok(())
}
