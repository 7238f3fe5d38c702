// Answer synthesis module
pub mod rules;
pub mod synthesizer;

pub use rules::{default_rules, AnswerRule};
pub use synthesizer::{AnswerSynthesizer, Synthesis, SynthesisConfig};
