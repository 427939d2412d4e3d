//! Integration tests for [`openai_client::OpenAIClient::chat_completion`] against a mock server.
//!
//! The mock stands in for an OpenAI-compatible `/chat/completions` endpoint so the request
//! body (model, temperature, max_tokens) and response parsing can be checked offline.

use mockito::Matcher;
use openai_client::{ChatCompletionRequestUserMessageArgs, CompletionOptions, OpenAIClient};
use serde_json::json;

fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4-0613",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
    .to_string()
}

/// **Test: Options are sent in the body and the first choice's content is returned.**
#[tokio::test]
async fn chat_completion_sends_options_and_returns_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4-0613",
            "temperature": 0.0,
            "max_tokens": 2048
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Hello from the tutor."))
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test-key-123456".to_string(), server.url());
    let messages = vec![ChatCompletionRequestUserMessageArgs::default()
        .content("Hi")
        .build()
        .unwrap()
        .into()];

    let reply = client
        .chat_completion(
            "gpt-4-0613",
            messages,
            CompletionOptions::default()
                .with_temperature(0.0)
                .with_max_tokens(2048),
        )
        .await
        .unwrap();

    assert_eq!(reply, "Hello from the tutor.");
    mock.assert_async().await;
}

/// **Test: A response without choices is an error, not an empty string.**
#[tokio::test]
async fn chat_completion_without_choices_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "created": 1_700_000_000,
                "model": "gpt-3.5-turbo",
                "choices": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test-key-123456".to_string(), server.url());
    let messages = vec![ChatCompletionRequestUserMessageArgs::default()
        .content("Hi")
        .build()
        .unwrap()
        .into()];

    let result = client
        .chat_completion("gpt-3.5-turbo", messages, CompletionOptions::default().with_temperature(0.0))
        .await;
    assert!(result.is_err());
}
