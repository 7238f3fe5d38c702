// Passage retrieval by keyword overlap
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::keywords::{KeywordSet, DEFAULT_STOPWORDS};

/// Retrieval parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Sentences must be strictly longer than this after trimming
    pub min_sentence_chars: usize,
    /// Question tokens must be strictly longer than this
    pub min_keyword_chars: usize,
    /// Maximum number of passages returned
    pub max_passages: usize,
    /// Question words ignored during scoring
    pub stopwords: Vec<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            min_sentence_chars: 20,
            min_keyword_chars: 3,
            max_passages: 3,
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Candidate sentence with its keyword overlap score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredSentence {
    pub sentence: String,
    pub score: usize,
}

/// Sentence-level retriever over a single corpus
#[derive(Debug, Clone, Default)]
pub struct PassageRetriever {
    config: RetrievalConfig,
}

impl PassageRetriever {
    /// Create retriever with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom parameters
    pub fn with_config(config: RetrievalConfig) -> Self {
        Self { config }
    }

    /// Split a corpus into trimmed candidate sentences, in corpus order
    ///
    /// Runs of `.`, `!` and `?` act as a single terminator. Empty pieces
    /// between adjacent terminators fall out through the length filter.
    pub fn candidate_sentences<'a>(&self, corpus: &'a str) -> Vec<&'a str> {
        corpus
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|piece| piece.chars().count() > self.config.min_sentence_chars)
            .collect()
    }

    /// Keyword set for a question under the current parameters
    pub fn keyword_set(&self, question: &str) -> KeywordSet {
        KeywordSet::extract(
            question,
            self.config.min_keyword_chars,
            &self.config.stopwords,
        )
    }

    /// Score every candidate sentence, zero scores included, in corpus order
    pub fn score_sentences(&self, corpus: &str, question: &str) -> Vec<ScoredSentence> {
        let keywords = self.keyword_set(question);
        self.candidate_sentences(corpus)
            .into_iter()
            .map(|sentence| ScoredSentence {
                score: keywords.overlap(&sentence.to_lowercase()),
                sentence: sentence.to_string(),
            })
            .collect()
    }

    /// Retrieve the top-scoring sentences for a question
    ///
    /// Only sentences with a positive score are returned. Ties keep corpus
    /// order because `sort_by` is stable.
    pub fn retrieve(&self, corpus: &str, question: &str) -> Vec<String> {
        let mut scored: Vec<ScoredSentence> = self
            .score_sentences(corpus, question)
            .into_iter()
            .filter(|item| item.score > 0)
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.config.max_passages);

        debug!(passages = scored.len(), "retrieved passages");

        scored.into_iter().map(|item| item.sentence).collect()
    }

    /// Get current configuration
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUICKSORT: &str =
        "Quicksort has O(n log n) average time complexity. It uses divide and conquer.";

    #[test]
    fn test_retrieval_config_default() {
        let config = RetrievalConfig::default();
        assert_eq!(config.min_sentence_chars, 20);
        assert_eq!(config.min_keyword_chars, 3);
        assert_eq!(config.max_passages, 3);
        assert_eq!(config.stopwords.len(), 10);
    }

    #[test]
    fn test_candidate_sentences_filters_short_pieces() {
        let retriever = PassageRetriever::new();
        let corpus = "Too short. This sentence is comfortably long enough!! Tiny? \
                      Another sentence that passes the filter";
        let sentences = retriever.candidate_sentences(corpus);
        assert_eq!(
            sentences,
            vec![
                "This sentence is comfortably long enough",
                "Another sentence that passes the filter",
            ]
        );
    }

    #[test]
    fn test_candidate_boundary_is_strict() {
        let retriever = PassageRetriever::new();
        // exactly 20 chars is dropped, 21 is kept
        let corpus = "abcdefghij klmnopqrs. abcdefghij klmnopqrst.";
        let sentences = retriever.candidate_sentences(corpus);
        assert_eq!(sentences, vec!["abcdefghij klmnopqrst"]);
    }

    #[test]
    fn test_quicksort_scenario() {
        let retriever = PassageRetriever::new();
        let passages = retriever.retrieve(QUICKSORT, "What is the time complexity of quicksort?");
        assert_eq!(
            passages,
            vec!["Quicksort has O(n log n) average time complexity"]
        );
    }

    #[test]
    fn test_empty_corpus() {
        let retriever = PassageRetriever::new();
        assert!(retriever.retrieve("", "anything about sorting").is_empty());
    }

    #[test]
    fn test_stopword_only_question() {
        let retriever = PassageRetriever::new();
        assert!(retriever.retrieve(QUICKSORT, "what does the which").is_empty());
    }

    #[test]
    fn test_nonsense_question() {
        let retriever = PassageRetriever::new();
        assert!(retriever.retrieve(QUICKSORT, "Zzyx flibber?").is_empty());
    }

    #[test]
    fn test_ranking_descending_and_stable() {
        let retriever = PassageRetriever::new();
        let corpus = "Graphs model pairwise relations between objects. \
                      Graph traversal visits every vertex of graphs once. \
                      Trees are a special kind of graphs without cycles. \
                      Traversal order matters for breadth first search.";
        let passages = retriever.retrieve(corpus, "graphs traversal");

        assert_eq!(passages.len(), 3);
        assert_eq!(passages[0], "Graph traversal visits every vertex of graphs once");
        // both score 1, corpus order preserved
        assert_eq!(passages[1], "Graphs model pairwise relations between objects");
        assert_eq!(passages[2], "Trees are a special kind of graphs without cycles");
    }

    #[test]
    fn test_max_passages_respected() {
        let retriever = PassageRetriever::with_config(RetrievalConfig {
            max_passages: 1,
            ..Default::default()
        });
        let corpus = "Hashing maps keys to buckets quickly. Hashing collisions need resolution.";
        assert_eq!(retriever.retrieve(corpus, "hashing").len(), 1);
    }

    #[test]
    fn test_returns_original_case() {
        let retriever = PassageRetriever::new();
        let corpus = "   Dijkstra's Algorithm FINDS shortest paths in graphs.  ";
        let passages = retriever.retrieve(corpus, "shortest paths");
        assert_eq!(passages, vec!["Dijkstra's Algorithm FINDS shortest paths in graphs"]);
    }

    #[test]
    fn test_score_sentences_keeps_zero_scores() {
        let retriever = PassageRetriever::new();
        let scored = retriever.score_sentences(QUICKSORT, "quicksort complexity");
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].score, 2);
        assert_eq!(scored[1].score, 0);
    }

    #[test]
    fn test_retrieve_idempotent() {
        let retriever = PassageRetriever::new();
        let question = "average time complexity";
        assert_eq!(
            retriever.retrieve(QUICKSORT, question),
            retriever.retrieve(QUICKSORT, question)
        );
    }
}
