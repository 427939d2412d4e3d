//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tutor-bot")]
#[command(about = "Retrieval-augmented tutor: chat, interpret, retrieve", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Mirror log lines to stderr in addition to LOG_FILE.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Provider API key; overrides API_KEY / OPENAI_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive tutor session (default).
    Chat,
    /// Run only the keyword interpreter on one message and print the keywords.
    Interpret { message: String },
    /// Run only the retrieval stage for the given keywords and print the context.
    Retrieve { keywords: String },
}

impl Cli {
    /// The subcommand to run; `chat` when none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat)
    }
}
