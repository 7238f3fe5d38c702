//! REPL (Read-Eval-Print Loop) for interactive question answering
//!
//! Ties together line input, built-in commands, the question-answering
//! session, and terminal display. Session notices travel over a
//! [`NotificationBus`] and are printed after each input is handled.

pub mod commands;
pub mod display;
pub mod input;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::{Config, Verbosity};
use crate::events::{drain, Notification, NotificationBus, Notifier, Severity};
use crate::ingest::{failure_notice, load_text_file, normalize_pasted};
use crate::rag::{PassageRetriever, QaPipeline};
use crate::repl::commands::{is_command, CommandHandler, CommandOutcome};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::{InputHandler, PASTE_TERMINATOR};
use crate::session::QaSession;

/// REPL session coordinator
pub struct ReplSession {
    input_handler: InputHandler,
    command_handler: CommandHandler,
    session: QaSession,
    display_manager: DisplayManager,
    notification_bus: NotificationBus,
    notices: mpsc::Receiver<Notification>,
    config: Config,
    verbosity: Verbosity,
}

impl ReplSession {
    /// Create new REPL session with persistent line history
    pub fn new(config: Config, verbosity: Verbosity) -> Result<Self> {
        let input_handler = InputHandler::with_history(config.history_path())?;
        Self::with_input(input_handler, config, verbosity)
    }

    /// Create REPL session around an existing input handler
    pub fn with_input(
        input_handler: InputHandler,
        config: Config,
        verbosity: Verbosity,
    ) -> Result<Self> {
        let (notification_bus, notices) = NotificationBus::new();
        let session = build_session(&config, &notification_bus);

        let mut command_handler =
            CommandHandler::with_retriever(PassageRetriever::with_config(config.retrieval.clone()));
        command_handler.set_verbose(verbosity.show_events());

        let mut display_manager = DisplayManager::new();
        display_manager.set_show_progress(verbosity.show_progress());

        Ok(ReplSession {
            input_handler,
            command_handler,
            session,
            display_manager,
            notification_bus,
            notices,
            config,
            verbosity,
        })
    }

    /// Show welcome banner
    pub fn show_welcome(&self, version: &str) {
        if self.verbosity != Verbosity::Quiet {
            self.display_manager.show_banner(version);
        }
    }

    /// Main loop; returns when the user exits or input ends
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let line = match self.input_handler.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) if err.to_string() == "Interrupted" => {
                    self.display_manager.show_info("Use /exit or Ctrl-D to quit");
                    continue;
                }
                Err(err) => return Err(err),
            };

            if !self.handle_input(&line).await? {
                break;
            }
        }

        self.save()?;
        Ok(())
    }

    /// Handle user input (command or question)
    ///
    /// Returns true if the REPL should continue, false to exit
    pub async fn handle_input(&mut self, input: &str) -> Result<bool> {
        if input.trim().is_empty() {
            return Ok(true);
        }

        if !is_command(input) {
            self.ask(input.trim()).await;
            return Ok(true);
        }

        let command = self.command_handler.parse(input);
        debug!(?command, "running command");
        let outcome =
            self.command_handler
                .execute(command, &self.session, &self.display_manager)?;

        match outcome {
            CommandOutcome::Continue => {}
            CommandOutcome::Exit => return Ok(false),
            CommandOutcome::LoadFile(path) => self.load_file(&path).await,
            CommandOutcome::Paste => self.paste().await?,
            CommandOutcome::Ask(question) => self.ask(&question).await,
            CommandOutcome::Reset => self.reset(),
        }

        self.flush_notices();
        Ok(true)
    }

    /// Load a `.txt` file into the session
    pub async fn load_file(&mut self, path: &Path) {
        match load_text_file(path) {
            Ok(loaded) => {
                self.notification_bus.notify(Notification::file_uploaded()).await;
                if self.session.submit_corpus(&loaded.content).await.is_ok() {
                    self.display_manager.show_info(&loaded.summary());
                }
            }
            Err(err) => {
                debug!(error = %err, "file load failed");
                self.notification_bus.notify(failure_notice(&err)).await;
            }
        }
        self.flush_notices();
    }

    /// Read pasted lines and load them into the session
    async fn paste(&mut self) -> Result<()> {
        if self.verbosity != Verbosity::Quiet {
            self.display_manager.show_info(&format!(
                "Paste textbook content. Finish with a line containing only '{}'.",
                PASTE_TERMINATOR
            ));
        }

        let block = self.input_handler.read_block()?;
        match normalize_pasted(&block) {
            Ok(content) => {
                let chars = content.chars().count();
                if self.session.submit_corpus(&content).await.is_ok() {
                    self.display_manager.show_info(&format!(
                        "Content loaded: {} characters. Ready for processing.",
                        chars
                    ));
                }
            }
            Err(err) => {
                self.notification_bus.notify(failure_notice(&err)).await;
            }
        }
        Ok(())
    }

    /// Answer a question and print the resulting card
    pub async fn ask(&mut self, question: &str) {
        self.display_manager.start_processing(question);
        let record = self.session.submit_question(question).await.cloned();
        self.display_manager.finish_current();

        self.flush_notices();
        if let Some(record) = record {
            self.display_manager
                .show_answer(&record, self.config.repl.show_passages);
        }
    }

    /// Discard content and history, starting a fresh session
    fn reset(&mut self) {
        self.session = build_session(&self.config, &self.notification_bus);
        info!(session = %self.session.id(), "session reset");
        self.display_manager
            .show_warning("Session reset. Content and answer history cleared.");
    }

    /// Print every queued notice
    ///
    /// Quiet mode keeps only errors.
    pub fn flush_notices(&mut self) {
        for notice in drain(&mut self.notices) {
            if self.verbosity == Verbosity::Quiet && notice.severity != Severity::Error {
                continue;
            }
            self.display_manager.show_notice(&notice);
        }
    }

    /// Get the question-answering session
    pub fn session(&self) -> &QaSession {
        &self.session
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.command_handler.is_verbose()
    }

    /// Save line history
    pub fn save(&mut self) -> Result<()> {
        self.input_handler.save_history()?;
        Ok(())
    }
}

fn build_session(config: &Config, bus: &NotificationBus) -> QaSession {
    QaSession::new(config.session.clone())
        .with_engine(Arc::new(QaPipeline::with_config(config.pipeline_config())))
        .with_notifier(Arc::new(bus.clone()))
}
