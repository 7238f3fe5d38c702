//! Input handler for the REPL using rustyline
//!
//! Line editing, persistent history, and multi-line paste capture.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;
use std::path::PathBuf;

const PROMPT: &str = "textbook-qa> ";
const PASTE_PROMPT: &str = "... ";

/// Line that ends a `/paste` block
pub const PASTE_TERMINATOR: &str = ".";

/// Input handler managing readline interface and command history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    prompt: String,
}

impl InputHandler {
    /// Create new input handler
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()?;

        Ok(InputHandler {
            editor,
            history_path: None,
            prompt: PROMPT.to_string(),
        })
    }

    /// Create input handler with persistent history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
            prompt: PROMPT.to_string(),
        })
    }

    /// Set custom prompt
    pub fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    /// Read a line of input from user
    ///
    /// Returns:
    /// - Ok(Some(input)) for normal input
    /// - Ok(None) for EOF (Ctrl-D)
    /// - Err on interrupt (Ctrl-C) or other errors
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    return Ok(Some(String::new()));
                }

                let _ = self.editor.add_history_entry(trimmed);

                Ok(Some(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => Err(anyhow::anyhow!("Interrupted")),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }

    /// Read lines until the paste terminator or EOF
    ///
    /// Pasted lines are not added to command history.
    pub fn read_block(&mut self) -> Result<String> {
        let mut lines = Vec::new();
        loop {
            match self.editor.readline(PASTE_PROMPT) {
                Ok(line) => {
                    if line.trim() == PASTE_TERMINATOR {
                        break;
                    }
                    lines.push(line);
                }
                Err(ReadlineError::Eof) => break,
                Err(ReadlineError::Interrupted) => return Err(anyhow::anyhow!("Interrupted")),
                Err(err) => return Err(anyhow::anyhow!("Readline error: {}", err)),
            }
        }
        Ok(join_block(&lines))
    }

    /// Save history to disk
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(path)?;
        }
        Ok(())
    }

    /// Get history size
    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }
}

/// Join pasted lines back into one text block
pub fn join_block(lines: &[String]) -> String {
    lines.join("\n")
}
