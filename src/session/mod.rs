//! Question-answering session
//!
//! Owns the loaded corpus, the answer history (newest first), and the
//! Empty/Ready/Processing state machine. Every fault raised while answering
//! is turned into a notice; callers never see an error from
//! [`QaSession::submit_question`].

pub mod record;
pub mod state;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::errors::{QaError, Result};
use crate::events::{Notification, Notifier, NullNotifier};
use crate::rag::{AnswerEngine, PipelineOutput, QaPipeline};

pub use record::{AnswerRecord, ConfidenceLevel};
pub use state::{SessionEvent, SessionState};

/// Session behavior configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Artificial delay before answering, standing in for model inference
    pub simulated_latency_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 1500,
        }
    }
}

impl SessionConfig {
    /// Configuration with no artificial delay
    pub fn instant() -> Self {
        Self {
            simulated_latency_ms: 0,
        }
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

/// Question-answering session over a single corpus
pub struct QaSession {
    id: Uuid,
    state: SessionState,
    corpus: Arc<str>,
    /// Newest first
    history: VecDeque<AnswerRecord>,
    engine: Arc<dyn AnswerEngine>,
    notifier: Arc<dyn Notifier>,
    config: SessionConfig,
}

impl QaSession {
    /// Create an empty session with the default pipeline and no notifier
    pub fn new(config: SessionConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Empty,
            corpus: Arc::from(""),
            history: VecDeque::new(),
            engine: Arc::new(QaPipeline::new()),
            notifier: Arc::new(NullNotifier),
            config,
        }
    }

    /// Replace the answer engine
    pub fn with_engine(mut self, engine: Arc<dyn AnswerEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the notice sink
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Load textbook content, replacing whatever was loaded before
    ///
    /// Blank content is rejected and leaves the session untouched.
    pub async fn submit_corpus(&mut self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            self.notifier.notify(Notification::no_content_provided()).await;
            return Err(QaError::InvalidContent(
                "textbook content is empty".to_string(),
            ));
        }

        let next = match self.state.transition(SessionEvent::ContentSubmitted) {
            Ok(next) => next,
            Err(err) => {
                self.notifier.notify(Notification::busy()).await;
                return Err(err);
            }
        };

        self.corpus = Arc::from(content);
        self.state = next;
        info!(
            session = %self.id,
            chars = content.chars().count(),
            "textbook content loaded"
        );
        self.notifier.notify(Notification::content_processed()).await;
        Ok(())
    }

    /// Answer a question against the loaded corpus
    ///
    /// Returns the new record on success. Rejections and faults return
    /// `None` after emitting a notice; history is only touched on success.
    pub async fn submit_question(&mut self, question: &str) -> Option<&AnswerRecord> {
        match self.state.transition(SessionEvent::QuestionSubmitted) {
            Ok(next) => self.state = next,
            Err(QaError::EmptyCorpus) => {
                debug!(session = %self.id, "question rejected, no content");
                self.notifier.notify(Notification::no_content_available()).await;
                return None;
            }
            Err(err) => {
                warn!(session = %self.id, error = %err, "question rejected");
                self.notifier.notify(Notification::busy()).await;
                return None;
            }
        }

        debug!(session = %self.id, question, "processing question");

        match self.run_engine(question).await {
            Ok(output) => {
                let record = AnswerRecord::new(question, output, Utc::now());
                let confidence = record.confidence;
                self.history.push_front(record);
                self.finish_processing(SessionEvent::AnswerRecorded);

                info!(
                    session = %self.id,
                    confidence,
                    history = self.history.len(),
                    "question answered"
                );
                self.notifier
                    .notify(Notification::question_answered(confidence))
                    .await;
                self.history.front()
            }
            Err(err) => {
                self.finish_processing(SessionEvent::ProcessingFailed);
                error!(session = %self.id, error = %err, "question processing failed");
                self.notifier.notify(Notification::processing_failed()).await;
                None
            }
        }
    }

    /// Wait out the simulated latency, then run the engine off the async thread
    ///
    /// A panic inside the engine surfaces as a `JoinError` and is reported
    /// as a processing fault.
    async fn run_engine(&self, question: &str) -> Result<PipelineOutput> {
        let latency = self.config.simulated_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let engine = Arc::clone(&self.engine);
        let corpus = Arc::clone(&self.corpus);
        let question = question.to_string();

        tokio::task::spawn_blocking(move || engine.answer(&corpus, &question))
            .await
            .map_err(|err| QaError::ProcessingFault(format!("answer engine aborted: {}", err)))?
            .map_err(|err| match err {
                QaError::ProcessingFault(_) => err,
                other => QaError::ProcessingFault(other.to_string()),
            })
    }

    /// Leave Processing; always lands in Ready
    fn finish_processing(&mut self, event: SessionEvent) {
        self.state = self
            .state
            .transition(event)
            .unwrap_or(SessionState::Ready);
    }

    /// Snapshot of every answer, newest first
    pub fn answer_history(&self) -> Vec<AnswerRecord> {
        self.history.iter().cloned().collect()
    }

    /// Up to `limit` most recent answers, newest first
    pub fn recent_answers(&self, limit: usize) -> Vec<&AnswerRecord> {
        self.history.iter().take(limit).collect()
    }

    pub fn latest_answer(&self) -> Option<&AnswerRecord> {
        self.history.front()
    }

    /// True when the loaded corpus has non-whitespace content
    pub fn has_content(&self) -> bool {
        !self.corpus.trim().is_empty()
    }

    pub fn corpus(&self) -> &str {
        &self.corpus
    }

    /// Corpus length in characters
    pub fn corpus_len(&self) -> usize {
        self.corpus.chars().count()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state == SessionState::Processing
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl Default for QaSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
