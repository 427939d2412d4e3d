//! tutor-bot binary: load config, init logging, run the chosen command.

use anyhow::Result;
use clap::Parser;
use llm_client::mask_token;
use memory_core::TranscriptStore;
use tracing::info;
use tutor_bot::cli::{Cli, Commands};
use tutor_bot::config::{BaseConfig, RetrievalConfig};
use tutor_bot::{init_tracing, repl, Session, TurnPipeline, TutorBotConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command() {
        Commands::Retrieve { keywords } => run_retrieve(&keywords, cli.verbose).await,
        Commands::Interpret { message } => run_with_models(&cli, Some(message)).await,
        Commands::Chat => run_with_models(&cli, None).await,
    }
}

/// Retrieval stage alone. Makes no model call, so no provider key is loaded.
async fn run_retrieve(keywords: &str, verbose: bool) -> Result<()> {
    let retrieval = RetrievalConfig::from_env();
    retrieval.validate()?;
    init_tracing(&BaseConfig::log_file_from_env(), verbose)?;
    info!(retrieval_url = %retrieval.url, "Running retrieval only");

    let result = retrieval.build_retriever()?.retrieve(keywords).await?;
    println!("{}", result.context_text);
    Ok(())
}

/// `interpret` (with a message) or `chat` (without): full config, both model clients.
async fn run_with_models(cli: &Cli, interpret: Option<String>) -> Result<()> {
    let config = TutorBotConfig::load(cli.api_key.clone())?;
    config.validate()?;
    init_tracing(config.log_file(), cli.verbose)?;

    info!(
        api_key = %mask_token(&config.base.api_key),
        base_url = %config.base.base_url,
        interpreter_model = %config.interpreter.model,
        tutor_model = %config.tutor.model,
        history_mode = config.tutor.history_mode.as_str(),
        retrieval_url = %config.retrieval.url,
        "Initializing tutor-bot"
    );

    let pipeline = TurnPipeline::from_config(&config)?;

    match interpret {
        Some(message) => {
            // Same seed conversation a chat session starts with.
            let transcript = TranscriptStore::new(config.tutor.seed_greeting.clone());
            let keywords = pipeline
                .extractor()
                .extract(&transcript.messages(), &message)
                .await?;
            println!("{}", keywords);
        }
        None => {
            let mut session = Session::new(
                config.tutor.seed_greeting.clone(),
                config.tutor.memory_window,
            );
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            repl::run_repl(
                &pipeline,
                &mut session,
                stdin,
                &mut stdout,
                config.thinking_message(),
            )
            .await?;
            let summary = session.end();
            println!("Session ended after {} exchange(s).", summary.exchanges);
        }
    }

    Ok(())
}
