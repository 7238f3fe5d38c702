//! Answer records kept in session history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rag::PipelineOutput;

/// Display bucket for a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceLevel::High
        } else if confidence >= 0.6 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High Confidence",
            ConfidenceLevel::Medium => "Medium Confidence",
            ConfidenceLevel::Low => "Low Confidence",
        }
    }
}

/// One answered question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
    pub confidence: f64,
    pub source_context: String,
    /// Passages that supported the answer, best first
    pub relevant_passages: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl AnswerRecord {
    pub fn new(question: &str, output: PipelineOutput, timestamp: DateTime<Utc>) -> Self {
        Self {
            question: question.to_string(),
            answer: output.synthesis.answer,
            confidence: output.synthesis.confidence,
            source_context: output.synthesis.source_context,
            relevant_passages: output.passages,
            timestamp,
        }
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::synthesis::Synthesis;
    use chrono::TimeZone;

    fn sample_record() -> AnswerRecord {
        let output = PipelineOutput {
            passages: vec!["Heaps support logarithmic insertion".to_string()],
            synthesis: Synthesis {
                answer: "Based on the textbook content, Heaps support logarithmic insertion..."
                    .to_string(),
                confidence: 0.5,
                source_context: "Heaps support logarithmic insertion...".to_string(),
            },
        };
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        AnswerRecord::new("Tell me about heaps", output, timestamp)
    }

    #[test]
    fn test_record_from_output() {
        let record = sample_record();
        assert_eq!(record.question, "Tell me about heaps");
        assert_eq!(record.relevant_passages.len(), 1);
        assert_eq!(record.confidence_level(), ConfidenceLevel::Low);
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(ConfidenceLevel::from_score(0.85), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.8), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.75), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.6), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.1), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::High.label(), "High Confidence");
    }

    #[test]
    fn test_record_json_fields() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["question"], "Tell me about heaps");
        assert_eq!(json["confidence"], 0.5);
        assert_eq!(json["timestamp"], "2024-03-01T12:00:00Z");
        assert!(json["relevant_passages"].is_array());
    }
}
