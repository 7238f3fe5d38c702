// End-to-end answer pipeline: retrieval followed by synthesis
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::rag::retrieval::{PassageRetriever, RetrievalConfig};
use crate::rag::synthesis::{AnswerSynthesizer, Synthesis, SynthesisConfig};

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub retrieval: RetrievalConfig,
    pub synthesis: SynthesisConfig,
}

/// Output of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Ranked passages, best first
    pub passages: Vec<String>,
    pub synthesis: Synthesis,
}

/// Anything that can answer a question against a corpus
///
/// The session only talks to this trait, so alternative engines (or failing
/// ones in tests) can be swapped in.
pub trait AnswerEngine: Send + Sync {
    fn answer(&self, corpus: &str, question: &str) -> Result<PipelineOutput>;
}

/// Keyword-overlap retrieval plus rule-based synthesis
#[derive(Debug, Clone, Default)]
pub struct QaPipeline {
    retriever: PassageRetriever,
    synthesizer: AnswerSynthesizer,
}

impl QaPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            retriever: PassageRetriever::with_config(config.retrieval),
            synthesizer: AnswerSynthesizer::with_config(config.synthesis),
        }
    }

    pub fn retriever(&self) -> &PassageRetriever {
        &self.retriever
    }

    pub fn synthesizer(&self) -> &AnswerSynthesizer {
        &self.synthesizer
    }
}

impl AnswerEngine for QaPipeline {
    fn answer(&self, corpus: &str, question: &str) -> Result<PipelineOutput> {
        let passages = self.retriever.retrieve(corpus, question);
        let synthesis = self.synthesizer.synthesize(question, &passages);
        Ok(PipelineOutput {
            passages,
            synthesis,
        })
    }
}
