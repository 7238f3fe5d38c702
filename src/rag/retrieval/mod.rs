// Passage retrieval module
pub mod engine;
pub mod keywords;

pub use engine::{PassageRetriever, RetrievalConfig, ScoredSentence};
pub use keywords::{KeywordSet, DEFAULT_STOPWORDS};
