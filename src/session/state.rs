//! Session state machine
//!
//! Valid transitions:
//! 1. Empty      → Ready       (on: ContentSubmitted)
//! 2. Ready      → Ready       (on: ContentSubmitted)
//! 3. Ready      → Processing  (on: QuestionSubmitted)
//! 4. Processing → Ready       (on: AnswerRecorded | ProcessingFailed)
//!
//! A question in Empty is rejected with `EmptyCorpus`; anything submitted
//! while Processing is rejected with `Busy`.

use crate::errors::{QaError, Result};
use serde::{Deserialize, Serialize};

/// Session states
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// No textbook content loaded
    #[default]
    Empty,

    /// Content loaded, accepting questions
    Ready,

    /// A question is being answered
    Processing,
}

/// Events that drive the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ContentSubmitted,
    QuestionSubmitted,
    AnswerRecorded,
    ProcessingFailed,
}

impl SessionState {
    /// Attempt a transition
    pub fn transition(&self, event: SessionEvent) -> Result<SessionState> {
        use SessionEvent::*;
        use SessionState::*;

        let next = match (self, event) {
            (Empty, ContentSubmitted) | (Ready, ContentSubmitted) => Ready,
            (Ready, QuestionSubmitted) => Processing,
            (Processing, AnswerRecorded) | (Processing, ProcessingFailed) => Ready,

            (Empty, QuestionSubmitted) => return Err(QaError::EmptyCorpus),
            (Processing, ContentSubmitted) | (Processing, QuestionSubmitted) => {
                return Err(QaError::Busy)
            }

            (from, event) => {
                return Err(QaError::InvalidTransition {
                    from: format!("{:?}", from),
                    event: format!("{:?}", event),
                });
            }
        };

        Ok(next)
    }

    /// Whether a question can be submitted right now
    pub fn accepts_questions(&self) -> bool {
        matches!(self, SessionState::Ready)
    }

    /// Human-readable state name
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionState::Empty => "No content",
            SessionState::Ready => "Ready",
            SessionState::Processing => "Processing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert_eq!(
            SessionState::Empty.transition(SessionEvent::ContentSubmitted).unwrap(),
            SessionState::Ready
        );
        assert_eq!(
            SessionState::Ready.transition(SessionEvent::ContentSubmitted).unwrap(),
            SessionState::Ready
        );
        assert_eq!(
            SessionState::Ready.transition(SessionEvent::QuestionSubmitted).unwrap(),
            SessionState::Processing
        );
        assert_eq!(
            SessionState::Processing.transition(SessionEvent::AnswerRecorded).unwrap(),
            SessionState::Ready
        );
        assert_eq!(
            SessionState::Processing.transition(SessionEvent::ProcessingFailed).unwrap(),
            SessionState::Ready
        );
    }

    #[test]
    fn test_question_without_content() {
        let err = SessionState::Empty
            .transition(SessionEvent::QuestionSubmitted)
            .unwrap_err();
        assert!(matches!(err, QaError::EmptyCorpus));
    }

    #[test]
    fn test_reentrant_submission_rejected() {
        let err = SessionState::Processing
            .transition(SessionEvent::QuestionSubmitted)
            .unwrap_err();
        assert!(matches!(err, QaError::Busy));

        let err = SessionState::Processing
            .transition(SessionEvent::ContentSubmitted)
            .unwrap_err();
        assert!(matches!(err, QaError::Busy));
    }

    #[test]
    fn test_invalid_transition() {
        let err = SessionState::Ready
            .transition(SessionEvent::AnswerRecorded)
            .unwrap_err();
        assert!(err.to_string().contains("Ready"));
        assert!(err.to_string().contains("AnswerRecorded"));
    }

    #[test]
    fn test_accepts_questions() {
        assert!(!SessionState::Empty.accepts_questions());
        assert!(SessionState::Ready.accepts_questions());
        assert!(!SessionState::Processing.accepts_questions());
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(SessionState::default(), SessionState::Empty);
    }
}
