// Retrieval and answer synthesis
//
// Components:
// - Retrieval: split the corpus into sentences and rank them by keyword overlap
// - Synthesis: pick an answer template from an ordered rule table
// - Pipeline: run both behind the AnswerEngine trait

pub mod retrieval;
pub mod synthesis;
pub mod pipeline;

// Re-export key types
pub use retrieval::PassageRetriever;
pub use synthesis::AnswerSynthesizer;
pub use pipeline::{AnswerEngine, PipelineConfig, PipelineOutput, QaPipeline};
