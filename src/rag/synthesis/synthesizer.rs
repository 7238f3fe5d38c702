// Answer synthesis from ranked passages
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::{default_rules, first_match, AnswerRule};

/// Synthesis tuning constants and rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Answer returned when retrieval found nothing
    pub no_match_answer: String,
    pub no_match_confidence: f64,
    /// Prefix of the generic passage-quoting answer
    pub answer_prefix: String,
    /// Characters of the best passage quoted in the generic answer
    pub answer_excerpt_chars: usize,
    /// Characters of the best passage kept as source context
    pub context_excerpt_chars: usize,
    /// Appended to every excerpt, even when nothing was cut
    pub ellipsis: String,
    /// Generic confidence = min(cap, base + step * passages)
    pub fallback_base_confidence: f64,
    pub fallback_step_confidence: f64,
    pub fallback_max_confidence: f64,
    /// Templated answers in priority order
    pub rules: Vec<AnswerRule>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            no_match_answer: "I couldn't find relevant information in the provided textbook \
                              content to answer this question."
                .to_string(),
            no_match_confidence: 0.1,
            answer_prefix: "Based on the textbook content, ".to_string(),
            answer_excerpt_chars: 200,
            context_excerpt_chars: 150,
            ellipsis: "...".to_string(),
            fallback_base_confidence: 0.4,
            fallback_step_confidence: 0.1,
            fallback_max_confidence: 0.9,
            rules: default_rules(),
        }
    }
}

/// Synthesized answer for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synthesis {
    pub answer: String,
    pub confidence: f64,
    pub source_context: String,
}

/// Rule-driven answer synthesizer
#[derive(Debug, Clone, Default)]
pub struct AnswerSynthesizer {
    config: SynthesisConfig,
}

impl AnswerSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Produce an answer from the question and passages ranked best first
    pub fn synthesize<S: AsRef<str>>(&self, question: &str, passages: &[S]) -> Synthesis {
        let Some(best) = passages.first().map(AsRef::as_ref) else {
            debug!("no passages, using no-match answer");
            return Synthesis {
                answer: self.config.no_match_answer.clone(),
                confidence: self.config.no_match_confidence,
                source_context: String::new(),
            };
        };

        let question_lower = question.to_lowercase();
        let source_context = self.excerpt(best, self.config.context_excerpt_chars);

        if let Some(rule) = first_match(&self.config.rules, &question_lower) {
            debug!(rule = %rule.name, "answer rule matched");
            return Synthesis {
                answer: rule.template.clone(),
                confidence: rule.confidence,
                source_context,
            };
        }

        Synthesis {
            answer: format!(
                "{}{}",
                self.config.answer_prefix,
                self.excerpt(best, self.config.answer_excerpt_chars)
            ),
            confidence: self.fallback_confidence(passages.len()),
            source_context,
        }
    }

    /// Confidence of the generic answer for a passage count
    pub fn fallback_confidence(&self, passage_count: usize) -> f64 {
        let raw = self.config.fallback_base_confidence
            + self.config.fallback_step_confidence * passage_count as f64;
        raw.min(self.config.fallback_max_confidence)
    }

    fn excerpt(&self, passage: &str, max_chars: usize) -> String {
        let mut excerpt: String = passage.chars().take(max_chars).collect();
        excerpt.push_str(&self.config.ellipsis);
        excerpt
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }
}
