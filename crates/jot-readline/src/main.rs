use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jot_application::{DialogueEngine, OutboundMessage, Request, Response};
use jot_core::config::{AnswerConfig, AnswerProvider, JotConfig};
use jot_core::session::{Language, Settings};
use jot_infrastructure::{ConfigService, JotPaths, JsonNoteRepository};
use jot_interaction::{AnswerAgent, GeminiApiAgent, UnconfiguredAgent};

mod helper;

use helper::CliHelper;

#[derive(Parser)]
#[command(name = "jot")]
#[command(about = "JOT - chat with your notes in English or Hebrew", long_about = None)]
struct Cli {
    /// Reply language (en or he)
    #[arg(long)]
    lang: Option<String>,

    /// Treat any answer to a confirmation question as yes
    #[arg(long)]
    auto_confirm: bool,

    /// Notes file to use instead of the configured one
    #[arg(long)]
    notes: Option<PathBuf>,

    /// Configuration file to use instead of ~/.config/jot/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Lines handled by the REPL itself instead of the dialogue engine.
enum LocalCommand {
    Quit,
    Commands,
    Language(String),
    AutoConfirm(bool),
}

impl LocalCommand {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let head = parts.next()?;
        let arg = parts.next();
        match (head, arg) {
            ("quit" | "exit", None) => Some(Self::Quit),
            (":commands", None) => Some(Self::Commands),
            (":lang", Some(code)) => Some(Self::Language(code.to_string())),
            (":auto", Some("on")) => Some(Self::AutoConfirm(true)),
            (":auto", Some("off")) => Some(Self::AutoConfirm(false)),
            _ => None,
        }
    }
}

fn init_tracing(config: &JotConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_agent(config: &AnswerConfig) -> Arc<dyn AnswerAgent> {
    match config.provider {
        AnswerProvider::None => Arc::new(UnconfiguredAgent),
        AnswerProvider::Gemini => match GeminiApiAgent::from_config(config) {
            Ok(agent) => {
                info!("[Startup] Using Gemini model {}", agent.model());
                Arc::new(agent)
            }
            Err(e) => {
                warn!("[Startup] {}; AI conversations are disabled", e);
                Arc::new(UnconfiguredAgent)
            }
        },
    }
}

fn print_reply(text: &str) {
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
    println!();
}

fn print_response(response: &Response) {
    match response {
        Response::Reply { text } => print_reply(text),
        Response::AvailableCommands { commands } => {
            for cmd in commands {
                println!(
                    "{} {}",
                    format!("{:<20}", cmd.command).bright_cyan(),
                    cmd.description.bright_black()
                );
            }
            println!();
        }
    }
}

/// Persists the language and auto-confirm choices for the next start.
fn remember_settings(service: &ConfigService, config: &mut JotConfig, settings: Settings) {
    config.language = settings.language;
    config.auto_confirm = settings.auto_confirm;
    if let Err(e) = service.save_config(config) {
        warn!("[Startup] Could not save settings: {}", e);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ===== Configuration =====
    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new()?,
    };
    let mut config = config_service.get_config()?;
    init_tracing(&config);

    let mut settings = config.settings();
    if let Some(code) = &cli.lang {
        settings.language = Language::from_code(code);
    }
    if cli.auto_confirm {
        settings.auto_confirm = true;
    }

    let notes_file = match cli.notes.or_else(|| config.storage.notes_file.clone()) {
        Some(path) => path,
        None => JotPaths::default().notes_file()?,
    };
    let notes = Arc::new(JsonNoteRepository::open(notes_file.clone())?);
    info!("[Startup] Notes loaded from {}", notes_file.display());

    // ===== Engine =====
    let agent = build_agent(&config.answer);
    let (engine, mut outbound) = DialogueEngine::new(notes, agent, settings);

    let outbound_printer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            match message {
                OutboundMessage::AiAnswer { text, .. } => {
                    println!("{}", "[AI]".bright_magenta());
                    print_reply(&text);
                }
                OutboundMessage::AiFailure { text, .. } => {
                    println!("{}", text.red());
                }
            }
        }
    });

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== JOT ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/help' for commands, ':commands' for what you can do now, or 'quit' to exit."
            .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let request = match LocalCommand::parse(trimmed) {
                    Some(LocalCommand::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Some(LocalCommand::Commands) => Request::GetCommands,
                    Some(LocalCommand::Language(code)) => {
                        settings.language = Language::from_code(&code);
                        remember_settings(&config_service, &mut config, settings);
                        Request::SaveSettings {
                            lang: Some(code),
                            auto_confirm: None,
                        }
                    }
                    Some(LocalCommand::AutoConfirm(enabled)) => {
                        settings.auto_confirm = enabled;
                        remember_settings(&config_service, &mut config, settings);
                        Request::SaveSettings {
                            lang: None,
                            auto_confirm: Some(enabled),
                        }
                    }
                    None => {
                        println!("{}", format!("> {}", trimmed).green());
                        Request::chat(trimmed)
                    }
                };

                let response = engine.handle(request).await;
                print_response(&response);
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // Answers still in flight are not waited for.
    outbound_printer.abort();
    let _ = outbound_printer.await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_commands() {
        assert!(matches!(LocalCommand::parse("quit"), Some(LocalCommand::Quit)));
        assert!(matches!(
            LocalCommand::parse(":lang he"),
            Some(LocalCommand::Language(code)) if code == "he"
        ));
        assert!(matches!(
            LocalCommand::parse(":auto on"),
            Some(LocalCommand::AutoConfirm(true))
        ));
        assert!(LocalCommand::parse(":auto maybe").is_none());
        assert!(LocalCommand::parse("quit now").is_none());
        assert!(LocalCommand::parse("/help").is_none());
    }
}
