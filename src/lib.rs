//! textbook-qa - Academic question answering over textbook text
//!
//! Load plain-text textbook content, ask natural-language questions, and
//! get an answer with a confidence score and the supporting passages.
//!
//! # Architecture
//!
//! - **rag**: keyword-overlap passage retrieval and rule-based answer synthesis
//! - **session**: corpus, answer history, and the Empty/Ready/Processing state machine
//! - **events**: toast-style notices delivered over a bounded channel
//! - **ingest**: `.txt` file loading and pasted-text normalization
//! - **cli** / **repl**: command-line parsing, configuration, and the interactive loop

pub mod errors;
pub mod events;
pub mod rag;
pub mod session;
pub mod ingest;
pub mod cli;
pub mod repl;

// Re-export commonly used types
pub use errors::{QaError, Result};
pub use events::{Notification, NotificationBus, Notifier, Severity};
pub use rag::{AnswerEngine, PipelineOutput, QaPipeline};
pub use session::{AnswerRecord, ConfidenceLevel, QaSession, SessionConfig, SessionState};
