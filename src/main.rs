use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use ttychat::api::CompletionClient;
use ttychat::core::config::Config;
use ttychat::core::constants::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use ttychat::logging;
use ttychat::ui::chat_loop;

#[derive(Parser)]
#[command(name = "ttychat")]
#[command(version)]
#[command(about = "A full-screen terminal chat client for local Ollama models")]
#[command(long_about = "Ttychat is a full-screen terminal chat interface that talks to a \
local Ollama-style model server. Each submitted line goes out as a single \
completion request and the reply appears as a new message.\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/Wheel     Scroll through chat history\n\
  Backspace         Delete characters in the input field\n\
  /quit             Leave the session\n\
  Ctrl+C            Quit immediately")]
struct Args {
    /// Model to request from the server
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL of the model server
    #[arg(short, long)]
    base_url: Option<String>,

    /// Append diagnostics to this file (stdout/stderr are never used)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    // Setup failures all happen before raw mode is engaged, so a plain
    // diagnostic on stderr is safe here.
    if let Err(err) = run() {
        eprintln!("ttychat: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::load()?;

    let log_file = args.log_file.or(config.log_file);
    logging::init(log_file.as_deref())?;

    let model = args
        .model
        .or(config.model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let base_url = args
        .base_url
        .or(config.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    tracing::info!(%model, %base_url, "starting session");

    let client = CompletionClient::new(&base_url, &model)?;
    chat_loop::run(&client)
}
