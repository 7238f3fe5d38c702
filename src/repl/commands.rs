//! Command handler for REPL built-in commands
//!
//! Commands that only read the session run here. Commands that load
//! content or ask a question are handed back to the REPL loop as a
//! [`CommandOutcome`], since they need the input handler or an await.

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::events::confidence_percent;
use crate::rag::PassageRetriever;
use crate::repl::display::DisplayManager;
use crate::session::QaSession;

/// Sample questions offered by `/suggest`
pub const SUGGESTED_QUESTIONS: [&str; 5] = [
    "What is the time complexity of quicksort?",
    "Explain the difference between breadth-first and depth-first search",
    "How does dynamic programming solve optimization problems?",
    "What are the key principles of divide and conquer algorithms?",
    "Describe the concept of computational complexity theory",
];

const DEFAULT_HISTORY_LIMIT: usize = 10;

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Load { path: Option<PathBuf> },
    Paste,
    History { limit: Option<usize> },
    Passages { question: String },
    /// List suggestions, or ask the n-th (1-based)
    Suggest { index: Option<usize> },
    Status,
    Reset,
    Exit,
    Verbose { enable: bool },
    Clear,
    Unknown { input: String },
}

/// What the REPL loop should do after a command ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Exit,
    LoadFile(PathBuf),
    Paste,
    Ask(String),
    Reset,
}

/// Command handler for parsing and executing REPL commands
pub struct CommandHandler {
    verbose: bool,
    retriever: PassageRetriever,
}

impl CommandHandler {
    /// Create new command handler
    pub fn new() -> Self {
        Self::with_retriever(PassageRetriever::new())
    }

    /// Command handler whose `/passages` uses the given retriever
    pub fn with_retriever(retriever: PassageRetriever) -> Self {
        CommandHandler {
            verbose: false,
            retriever,
        }
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        let Some(body) = trimmed.strip_prefix('/') else {
            return Command::Unknown { input: input.to_string() };
        };

        let mut split = body.splitn(2, char::is_whitespace);
        let name = split.next().unwrap_or("").to_lowercase();
        let rest = split.next().map(str::trim).unwrap_or("");

        match name.as_str() {
            "help" | "h" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            "load" => Command::Load {
                path: (!rest.is_empty()).then(|| PathBuf::from(rest)),
            },
            "paste" => Command::Paste,
            "history" => Command::History {
                limit: rest.parse().ok(),
            },
            "passages" => Command::Passages {
                question: rest.to_string(),
            },
            "suggest" => Command::Suggest {
                index: rest.parse().ok(),
            },
            "status" => Command::Status,
            "reset" => Command::Reset,
            "verbose" => {
                let enable = if rest.is_empty() {
                    true
                } else {
                    let value = rest.to_lowercase();
                    value == "on" || value == "1" || value == "true"
                };
                Command::Verbose { enable }
            }
            "clear" | "cls" => Command::Clear,
            _ => Command::Unknown { input: input.to_string() },
        }
    }

    /// Execute a command
    pub fn execute(
        &mut self,
        command: Command,
        session: &QaSession,
        display: &DisplayManager,
    ) -> Result<CommandOutcome> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(CommandOutcome::Continue)
            }
            Command::Exit => {
                println!("{}", "Goodbye!".green());
                Ok(CommandOutcome::Exit)
            }
            Command::Load { path: Some(path) } => Ok(CommandOutcome::LoadFile(path)),
            Command::Load { path: None } => {
                display.show_warning("Usage: /load <file.txt>");
                Ok(CommandOutcome::Continue)
            }
            Command::Paste => Ok(CommandOutcome::Paste),
            Command::History { limit } => {
                self.show_history(session, limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
                Ok(CommandOutcome::Continue)
            }
            Command::Passages { question } => {
                if question.is_empty() {
                    display.show_warning("Usage: /passages <question>");
                } else if !session.has_content() {
                    display.show_warning("No textbook content loaded.");
                } else {
                    let keywords = self.retriever.keyword_set(&question);
                    let scored = self.retriever.score_sentences(session.corpus(), &question);
                    display.show_scored(keywords.as_slice(), &scored);
                }
                Ok(CommandOutcome::Continue)
            }
            Command::Suggest { index: None } => {
                self.show_suggestions();
                Ok(CommandOutcome::Continue)
            }
            Command::Suggest { index: Some(n) } => match suggestion(n) {
                Some(question) => Ok(CommandOutcome::Ask(question.to_string())),
                None => {
                    display.show_warning(&format!(
                        "Pick a suggestion between 1 and {}",
                        SUGGESTED_QUESTIONS.len()
                    ));
                    Ok(CommandOutcome::Continue)
                }
            },
            Command::Status => {
                self.show_status(session);
                Ok(CommandOutcome::Continue)
            }
            Command::Reset => Ok(CommandOutcome::Reset),
            Command::Verbose { enable } => {
                self.verbose = enable;
                let status = if enable { "enabled" } else { "disabled" };
                println!("{}", format!("Verbose mode {}", status).cyan());
                Ok(CommandOutcome::Continue)
            }
            Command::Clear => {
                display.clear_screen()?;
                Ok(CommandOutcome::Continue)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(CommandOutcome::Continue)
            }
        }
    }

    /// Display help information
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = [
            ("/help, /h", "Show this help message"),
            ("/load <file.txt>", "Load textbook content from a text file"),
            ("/paste", "Paste textbook content, end with a line holding only ."),
            ("/history [n]", "Show last n answers (default: 10)"),
            ("/passages <question>", "Show how each sentence scores for a question"),
            ("/suggest [n]", "List sample questions, or ask number n"),
            ("/status", "Show session status"),
            ("/reset", "Discard content and answer history"),
            ("/verbose [on|off]", "Toggle verbose output"),
            ("/clear, /cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit REPL"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<22} {}", cmd.green(), desc);
        }

        println!("\n{}", "Usage:".bold());
        println!("  - Type your question directly (no / prefix)");
        println!("  - Use {} for command history", "UP/DOWN arrows".cyan());
        println!("  - Press {} or {} to exit", "Ctrl-D".cyan(), "/exit".cyan());
        println!();
    }

    /// Display answer history, newest first
    fn show_history(&self, session: &QaSession, limit: usize) {
        let history = session.recent_answers(limit);

        if history.is_empty() {
            println!("{}", "No questions answered yet.".yellow());
            return;
        }

        println!(
            "\n{}",
            format!("Answer History (last {}):", history.len()).bold().cyan()
        );
        println!("{}", "=".repeat(60).cyan());

        for (i, record) in history.iter().enumerate() {
            let confidence = format!("{}%", confidence_percent(record.confidence));
            let time = record.timestamp.format("%H:%M:%S").to_string();

            println!(
                "  {}. {} {} {}",
                (i + 1).to_string().cyan(),
                record.question,
                confidence.green(),
                time.dimmed()
            );

            if self.verbose {
                println!("     Answer: {}", record.answer.dimmed());
            }
        }
        println!();
    }

    /// Display session status
    fn show_status(&self, session: &QaSession) {
        println!("\n{}", "Session Status:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        println!("  Session:          {}", session.id().to_string().dimmed());
        println!("  State:            {}", session.state().display_name().green());
        println!(
            "  Content Loaded:   {}",
            if session.has_content() {
                format!("{} characters", session.corpus_len()).green()
            } else {
                "No".red()
            }
        );
        println!("  Answers:          {}", session.history_len().to_string().green());
        println!(
            "  Latency:          {}",
            format!("{}ms", session.config().simulated_latency_ms).green()
        );
        println!(
            "  Verbose Mode:     {}",
            if self.verbose { "On".green() } else { "Off".red() }
        );
        println!();
    }

    fn show_suggestions(&self) {
        println!("\n{}", "Suggested Questions:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());
        for (i, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
            println!("  {}. {}", (i + 1).to_string().cyan(), question);
        }
        println!("\nAsk one with {}", "/suggest <n>".green());
        println!();
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Set verbose mode
    pub fn set_verbose(&mut self, enable: bool) {
        self.verbose = enable;
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/')
}

/// Suggested question by 1-based index
pub fn suggestion(index: usize) -> Option<&'static str> {
    index
        .checked_sub(1)
        .and_then(|i| SUGGESTED_QUESTIONS.get(i))
        .copied()
}
