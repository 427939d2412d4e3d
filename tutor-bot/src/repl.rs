//! Line-oriented terminal chat: one input line per turn.
//!
//! Commands: `/history` prints the transcript, `/keywords` the last extracted keywords,
//! `/help` the command list, `/quit` (or EOF, or Ctrl-C at the prompt) ends the session.
//! Ctrl-C while a turn runs cancels only that turn.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::core::TurnError;
use crate::pipeline::TurnPipeline;
use crate::session::Session;

const HELP: &str = "Commands: /history, /keywords, /help, /quit";

/// Prints every transcript row: greeting first, then request/response pairs.
pub fn render_history<W: Write>(session: &Session, out: &mut W) -> std::io::Result<()> {
    for (request, response) in session.transcript().render_transcript() {
        if let Some(request) = request {
            writeln!(out, "You: {}", request)?;
        }
        writeln!(out, "Tutor: {}", response)?;
    }
    Ok(())
}

/// Runs the chat loop until `/quit`, end of input or Ctrl-C at the prompt.
pub async fn run_repl<R, W>(
    pipeline: &TurnPipeline,
    session: &mut Session,
    input: R,
    out: &mut W,
    thinking_message: &str,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "Tutor: {}", session.transcript().greeting())?;

    loop {
        write!(out, "You: ")?;
        out.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            writeln!(out)?;
            break;
        };

        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => writeln!(out, "{}", HELP)?,
            "/history" => render_history(session, out)?,
            "/keywords" => match session.last_keywords() {
                Some(k) => writeln!(out, "Keywords: {}", k)?,
                None => writeln!(out, "No keywords yet.")?,
            },
            text => {
                writeln!(out, "{}", thinking_message)?;
                out.flush()?;

                let cancel = CancellationToken::new();
                let turn = pipeline.run_turn(session, text, &cancel);
                tokio::pin!(turn);
                let result = loop {
                    tokio::select! {
                        result = &mut turn => break result,
                        _ = tokio::signal::ctrl_c() => {
                            info!("Ctrl-C received, cancelling turn");
                            cancel.cancel();
                        }
                    }
                };

                match result {
                    Ok(outcome) => writeln!(out, "Tutor: {}", outcome.reply)?,
                    Err(TurnError::Cancelled) => writeln!(out, "(cancelled)")?,
                    Err(e) => {
                        error!(error = %e, "Turn failed");
                        writeln!(out, "Error: {}", e)?;
                    }
                }
            }
        }
    }

    Ok(())
}
