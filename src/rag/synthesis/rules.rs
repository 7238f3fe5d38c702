// Ordered answer templates keyed on question substrings
use serde::{Deserialize, Serialize};

/// One templated answer, selected when the question contains any trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRule {
    /// Short label used in logs
    pub name: String,
    /// Lower-case substrings; any one of them selects this rule
    pub triggers: Vec<String>,
    /// Answer text returned verbatim
    pub template: String,
    pub confidence: f64,
}

impl AnswerRule {
    pub fn new(name: &str, triggers: &[&str], template: &str, confidence: f64) -> Self {
        Self {
            name: name.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            template: template.to_string(),
            confidence,
        }
    }

    /// Check a lower-cased question against the triggers
    pub fn matches(&self, question_lower: &str) -> bool {
        self.triggers
            .iter()
            .any(|trigger| question_lower.contains(trigger.as_str()))
    }
}

/// Built-in rule table, in priority order
///
/// Order is the contract: a question mentioning both complexity and dynamic
/// programming is answered by the complexity rule.
pub fn default_rules() -> Vec<AnswerRule> {
    vec![
        AnswerRule::new(
            "complexity",
            &["time complexity", "complexity"],
            "Based on the textbook content, the time complexity analysis involves examining \
             how the algorithm's runtime grows with input size. The relevant section discusses \
             algorithmic efficiency and computational complexity theory.",
            0.8,
        ),
        AnswerRule::new(
            "algorithm",
            &["algorithm", "search", "sort"],
            "According to the textbook, this algorithmic concept involves systematic \
             problem-solving approaches. The text describes various techniques and their \
             applications in computer science.",
            0.75,
        ),
        AnswerRule::new(
            "dynamic-programming",
            &["dynamic programming"],
            "Dynamic programming is an optimization technique described in the textbook that \
             solves complex problems by breaking them down into simpler subproblems. It stores \
             the results of subproblems to avoid redundant calculations.",
            0.85,
        ),
    ]
}

/// First rule whose triggers match, if any
pub fn first_match<'a>(rules: &'a [AnswerRule], question_lower: &str) -> Option<&'a AnswerRule> {
    rules.iter().find(|rule| rule.matches(question_lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_order() {
        let names: Vec<String> = default_rules().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["complexity", "algorithm", "dynamic-programming"]);
    }

    #[test]
    fn test_complexity_beats_dynamic_programming() {
        let rules = default_rules();
        let rule = first_match(&rules, "what is the complexity of dynamic programming").unwrap();
        assert_eq!(rule.name, "complexity");
    }

    #[test]
    fn test_sort_trigger_is_substring() {
        let rules = default_rules();
        let rule = first_match(&rules, "explain the resorting step").unwrap();
        assert_eq!(rule.name, "algorithm");
    }

    #[test]
    fn test_dynamic_programming_reachable() {
        let rules = default_rules();
        let rule = first_match(&rules, "how does dynamic programming help").unwrap();
        assert_eq!(rule.name, "dynamic-programming");
        assert_eq!(rule.confidence, 0.85);
    }

    #[test]
    fn test_no_match() {
        let rules = default_rules();
        assert!(first_match(&rules, "who wrote this chapter").is_none());
    }

    #[test]
    fn test_templates_are_single_spaced() {
        for rule in default_rules() {
            assert!(!rule.template.contains("  "), "{} has a double space", rule.name);
        }
    }
}
