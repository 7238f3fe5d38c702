// Question keyword extraction for overlap scoring
use std::collections::HashSet;

/// Words dropped from questions before scoring
pub const DEFAULT_STOPWORDS: [&str; 10] = [
    "what", "how", "why", "when", "where", "which", "does", "the", "and", "or",
];

/// Distinct lower-cased question tokens used for sentence scoring
///
/// Tokens are split on whitespace only, so trailing punctuation stays
/// attached (`"quicksort?"` is a keyword distinct from `"quicksort"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Extract keywords from a question
    ///
    /// Tokens whose character length is `min_chars` or less and tokens found
    /// in `stopwords` are discarded. Duplicates keep their first position.
    pub fn extract<S: AsRef<str>>(question: &str, min_chars: usize, stopwords: &[S]) -> Self {
        let lowered = question.to_lowercase();
        let mut seen = HashSet::new();
        let keywords = lowered
            .split_whitespace()
            .filter(|token| token.chars().count() > min_chars)
            .filter(|token| !stopwords.iter().any(|stop| stop.as_ref() == *token))
            .filter(|token| seen.insert(token.to_string()))
            .map(str::to_string)
            .collect();

        Self { keywords }
    }

    /// Count how many keywords occur in an already lower-cased sentence
    pub fn overlap(&self, sentence_lower: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| sentence_lower.contains(keyword.as_str()))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(question: &str) -> KeywordSet {
        KeywordSet::extract(question, 3, &DEFAULT_STOPWORDS)
    }

    #[test]
    fn test_short_tokens_and_stopwords_removed() {
        let keywords = extract("What is the time complexity of quicksort?");
        assert_eq!(keywords.as_slice(), &["time", "complexity", "quicksort?"]);
    }

    #[test]
    fn test_all_stopwords_yields_empty_set() {
        let keywords = extract("what which where when does");
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let keywords = extract("Sorting sorting SORTING arrays");
        assert_eq!(keywords.as_slice(), &["sorting", "arrays"]);
    }

    #[test]
    fn test_lowercases_before_stopword_check() {
        let keywords = extract("WHERE does Heapsort live");
        assert_eq!(keywords.as_slice(), &["heapsort", "live"]);
    }

    #[test]
    fn test_overlap_counts_each_keyword_once() {
        let keywords = extract("graph traversal");
        let sentence = "graph graph graph traversal of a graph";
        assert_eq!(keywords.overlap(sentence), 2);
    }

    #[test]
    fn test_overlap_is_substring_match() {
        let keywords = extract("sorting");
        assert_eq!(keywords.overlap("insertion sorting is quadratic"), 1);
        assert_eq!(keywords.overlap("insertion sort is quadratic"), 0);
    }

    #[test]
    fn test_length_measured_in_chars() {
        // four chars, more than four bytes
        let keywords = extract("café");
        assert_eq!(keywords.len(), 1);
    }
}
