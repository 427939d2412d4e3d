//! Tests for the terminal REPL driven by an in-memory input buffer.

use std::sync::Arc;
use std::time::Duration;

use prompt::{HistoryMode, TUTOR_RULES};
use retrieval::ContextRetriever;
use tutor_bot::repl::run_repl;
use tutor_bot::{KeywordExtractor, Session, TurnPipeline, TutorEngine};

use mock_llm_client::MockLlmClient;

fn pipeline(interpreter: MockLlmClient, tutor: MockLlmClient, url: String) -> TurnPipeline {
    TurnPipeline::new(
        KeywordExtractor::new(Arc::new(interpreter), true),
        ContextRetriever::new(url, Duration::from_secs(5)).unwrap(),
        TutorEngine::new(Arc::new(tutor), HistoryMode::Structured),
        TUTOR_RULES,
        Duration::from_secs(5),
    )
}

/// **Test: One turn, then /keywords, /history and /quit; output shows greeting, indicator, reply and transcript.**
#[tokio::test]
async fn test_repl_turn_and_commands() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/query")
        .with_status(200)
        .with_body(r#"{"context":"--START OF CONTEXT-- Leaves are green. --END OF CONTEXT--"}"#)
        .create_async()
        .await;

    let pipeline = pipeline(
        MockLlmClient::new("i").reply("leaves green color"),
        MockLlmClient::new("t").reply("Leaves are green because of chlorophyll."),
        format!("{}/query", server.url()),
    );
    let mut session = Session::new("How can I assist you?", 10);
    let input: &[u8] = b"why are leaves green?\n/keywords\n/history\n/quit\nnever read\n";
    let mut out = Vec::new();

    run_repl(&pipeline, &mut session, input, &mut out, "typing...")
        .await
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("Tutor: How can I assist you?\n"));
    assert!(out.contains("typing...\n"));
    assert!(out.contains("Tutor: Leaves are green because of chlorophyll.\n"));
    assert!(out.contains("Keywords: leaves green color\n"));
    assert!(out.contains("You: why are leaves green?\nTutor: Leaves are green because of chlorophyll.\n"));
    assert_eq!(session.transcript().len(), 1);
}

/// **Test: A failed turn prints the error and the loop keeps going until EOF.**
#[tokio::test]
async fn test_repl_reports_turn_error_and_continues() {
    let pipeline = pipeline(
        MockLlmClient::new("i").fail("invalid api key"),
        MockLlmClient::new("t"),
        "http://127.0.0.1:9/query".to_string(),
    );
    let mut session = Session::new("Hi", 10);
    let input: &[u8] = b"hello\n/keywords\n";
    let mut out = Vec::new();

    run_repl(&pipeline, &mut session, input, &mut out, "...")
        .await
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Error: Interpreter failed: invalid api key\n"));
    assert!(out.contains("No keywords yet.\n"));
    assert!(session.transcript().is_empty());
}
