//! Display manager for the interactive terminal UI
//!
//! Renders the banner, notices, answer cards, and the processing spinner.

use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

use crate::events::{confidence_percent, Notification, Severity};
use crate::rag::retrieval::ScoredSentence;
use crate::session::{AnswerRecord, ConfidenceLevel};

const RULE_WIDTH: usize = 64;
const BAR_WIDTH: usize = 20;

/// Display manager for the REPL
pub struct DisplayManager {
    current_bar: Option<ProgressBar>,
    update_interval: Duration,
    show_progress: bool,
}

impl DisplayManager {
    /// Create new display manager
    ///
    /// Spinner tick: 100ms
    pub fn new() -> Self {
        DisplayManager {
            current_bar: None,
            update_interval: Duration::from_millis(100),
            show_progress: true,
        }
    }

    /// Enable or disable spinners
    pub fn set_show_progress(&mut self, enable: bool) {
        self.show_progress = enable;
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        println!("\n{}", rule.cyan());
        println!(
            "{}",
            format!("  Academic Question-Answering System {}", version)
                .bold()
                .cyan()
        );
        println!(
            "{}",
            "  Load textbook content, ask questions, get answers with source citations"
                .dimmed()
        );
        println!("{}\n", rule.cyan());
        println!(
            "Load content with {} or {}, then type a question ({} for commands, {} to quit)\n",
            "/load <file.txt>".green(),
            "/paste".green(),
            "/help".green(),
            "/exit".green()
        );
    }

    /// Start the spinner shown while a question is processed
    pub fn start_processing(&mut self, question: &str) -> Option<ProgressBar> {
        self.finish_current();
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Analyzing: {}", question));
        pb.enable_steady_tick(self.update_interval);

        self.current_bar = Some(pb.clone());
        Some(pb)
    }

    /// Finish current spinner
    pub fn finish_current(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Display a toast notice
    pub fn show_notice(&self, notice: &Notification) {
        let icon = match notice.severity {
            Severity::Success => "✓".green().bold(),
            Severity::Info => "•".cyan().bold(),
            Severity::Error => "✗".red().bold(),
        };
        let title = match notice.severity {
            Severity::Error => notice.title.red().bold(),
            _ => notice.title.bold(),
        };
        println!("{} {} {}", icon, title, notice.description.dimmed());
    }

    /// Display one answer card
    pub fn show_answer(&self, record: &AnswerRecord, show_passages: bool) {
        println!("{}", format_answer(record, show_passages));
    }

    /// Display scored candidate sentences
    pub fn show_scored(&self, keywords: &[String], scored: &[ScoredSentence]) {
        self.show_section("Candidate Sentences");
        println!("  Keywords: {}", keywords.join(", ").cyan());

        if scored.is_empty() {
            println!("{}", "  No candidate sentences in the loaded content.".yellow());
            return;
        }

        for item in scored {
            let score = if item.score > 0 {
                item.score.to_string().green().bold()
            } else {
                item.score.to_string().dimmed()
            };
            println!("  [{}] {}", score, item.sentence);
        }
        println!();
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    /// Clear screen
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    /// Show section header
    pub fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(60).cyan());
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

fn level_label(level: ConfidenceLevel) -> ColoredString {
    match level {
        ConfidenceLevel::High => level.label().green(),
        ConfidenceLevel::Medium => level.label().yellow(),
        ConfidenceLevel::Low => level.label().red(),
    }
}

/// Text bar for a confidence score, e.g. `[##############------]`
pub fn confidence_bar(confidence: f64) -> String {
    let filled = ((confidence.clamp(0.0, 1.0) * BAR_WIDTH as f64).round()) as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Render an answer card
pub fn format_answer(record: &AnswerRecord, show_passages: bool) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    out.push_str(&format!("\n{}\n", rule.cyan()));
    out.push_str(&format!("{} {}\n", "Q:".bold().cyan(), record.question.bold()));
    out.push_str(&format!(
        "   {} | {}% confidence {} | {}\n",
        level_label(record.confidence_level()),
        confidence_percent(record.confidence),
        confidence_bar(record.confidence),
        record
            .timestamp
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .dimmed()
    ));
    out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH).cyan()));
    out.push_str(&format!("{}\n  {}\n", "Answer:".bold(), record.answer));

    if !record.source_context.is_empty() {
        out.push_str(&format!(
            "\n{}\n  \"{}\"\n",
            "Source Context:".bold(),
            record.source_context.italic()
        ));
    }

    if show_passages && !record.relevant_passages.is_empty() {
        out.push_str(&format!("\n{}\n", "Related Textbook Passages:".bold()));
        for (i, passage) in record.relevant_passages.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", (i + 1).to_string().cyan(), passage));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(confidence: f64, passages: Vec<&str>) -> AnswerRecord {
        AnswerRecord {
            question: "What is the time complexity of quicksort?".to_string(),
            answer: "Based on the textbook content, it depends.".to_string(),
            confidence,
            source_context: passages
                .first()
                .map(|p| format!("{}...", p))
                .unwrap_or_default(),
            relevant_passages: passages.into_iter().map(String::from).collect(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_display_manager_creation() {
        let manager = DisplayManager::new();
        assert!(manager.current_bar.is_none());
        assert_eq!(manager.update_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_start_and_finish_processing() {
        let mut manager = DisplayManager::new();
        let pb = manager.start_processing("What is a heap?");
        assert!(pb.is_some());
        assert!(manager.current_bar.is_some());

        manager.finish_current();
        assert!(manager.current_bar.is_none());
    }

    #[test]
    fn test_spinner_disabled() {
        let mut manager = DisplayManager::new();
        manager.set_show_progress(false);
        assert!(manager.start_processing("What is a heap?").is_none());
        assert!(manager.current_bar.is_none());
    }

    #[test]
    fn test_confidence_bar() {
        assert_eq!(confidence_bar(0.0), format!("[{}]", "-".repeat(20)));
        assert_eq!(confidence_bar(1.0), format!("[{}]", "#".repeat(20)));
        assert_eq!(
            confidence_bar(0.75),
            format!("[{}{}]", "#".repeat(15), "-".repeat(5))
        );
    }

    #[test]
    fn test_format_answer_contents() {
        let text = format_answer(&record(0.8, vec!["Quicksort partitions around a pivot"]), true);
        assert!(text.contains("What is the time complexity of quicksort?"));
        assert!(text.contains("High Confidence"));
        assert!(text.contains("80"));
        assert!(text.contains("Source Context:"));
        assert!(text.contains("Related Textbook Passages:"));
        assert!(text.contains("Quicksort partitions around a pivot"));
    }

    #[test]
    fn test_format_answer_without_passages() {
        let text = format_answer(&record(0.1, vec![]), true);
        assert!(text.contains("Low Confidence"));
        assert!(!text.contains("Source Context:"));
        assert!(!text.contains("Related Textbook Passages:"));
    }

    #[test]
    fn test_format_answer_hides_passages_when_disabled() {
        let text = format_answer(&record(0.6, vec!["Heaps are complete binary trees"]), false);
        assert!(text.contains("Medium Confidence"));
        assert!(!text.contains("Related Textbook Passages:"));
    }

    #[test]
    fn test_message_display() {
        let manager = DisplayManager::new();
        manager.show_error("Test error");
        manager.show_warning("Test warning");
        manager.show_info("Test info");
        manager.show_notice(&Notification::content_processed());
        manager.show_notice(&Notification::processing_failed());
    }
}
