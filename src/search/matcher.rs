//! Term matchers used by the document scorer.
//!
//! A matcher is compiled once per query term and reused for every document in
//! the collection. Haystacks passed to a matcher must already be lower-cased.

use log::warn;
use regex::Regex;

use crate::search::config::TermMatching;

/// Matches one query term against lower-cased text.
#[derive(Debug, Clone)]
pub enum TermMatcher {
    /// Plain substring containment.
    Substring(String),
    /// Word-boundary match compiled to a regex.
    WholeWord { term: String, pattern: Regex },
}

impl TermMatcher {
    /// Compile a matcher for `term`.
    ///
    /// The term is escaped before being embedded in a pattern, so callers may
    /// relax the query filter without breaking matching. If the pattern still
    /// fails to compile the matcher degrades to substring matching.
    pub fn new(term: &str, mode: TermMatching) -> Self {
        match mode {
            TermMatching::Substring => TermMatcher::Substring(term.to_string()),
            TermMatching::WholeWord => {
                // ASCII boundaries: accented letters do not continue a word
                let source = format!(r"(?-u:\b){}(?-u:\b)", regex::escape(term));
                match Regex::new(&source) {
                    Ok(pattern) => TermMatcher::WholeWord {
                        term: term.to_string(),
                        pattern,
                    },
                    Err(e) => {
                        warn!("Falling back to substring matching for {term:?}: {e}");
                        TermMatcher::Substring(term.to_string())
                    }
                }
            }
        }
    }

    /// The term this matcher looks for.
    pub fn term(&self) -> &str {
        match self {
            TermMatcher::Substring(term) => term,
            TermMatcher::WholeWord { term, .. } => term,
        }
    }

    /// Returns true if the term occurs in `haystack`.
    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            TermMatcher::Substring(term) => haystack.contains(term.as_str()),
            TermMatcher::WholeWord { pattern, .. } => pattern.is_match(haystack),
        }
    }

    /// Number of non-overlapping occurrences of the term in `haystack`.
    pub fn count(&self, haystack: &str) -> usize {
        match self {
            TermMatcher::Substring(term) if term.is_empty() => 0,
            TermMatcher::Substring(term) => haystack.matches(term.as_str()).count(),
            TermMatcher::WholeWord { pattern, .. } => pattern.find_iter(haystack).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_matching() {
        let matcher = TermMatcher::new("fund", TermMatching::Substring);

        assert!(matcher.is_match("refund policy"));
        assert_eq!(matcher.count("refund, fund, funding"), 3);
        assert_eq!(matcher.term(), "fund");
    }

    #[test]
    fn test_whole_word_matching() {
        let matcher = TermMatcher::new("fund", TermMatching::WholeWord);

        assert!(!matcher.is_match("refund policy"));
        assert!(matcher.is_match("the fund, explained"));
        assert_eq!(matcher.count("refund, fund, funding, fund."), 2);
    }

    #[test]
    fn test_whole_word_boundaries_are_ascii() {
        let matcher = TermMatcher::new("caf", TermMatching::WholeWord);

        assert!(matcher.is_match("le café"));
        assert!(!matcher.is_match("cafeteria"));
        assert_eq!(matcher.count("café, caf, cafés"), 3);
    }

    #[test]
    fn test_count_is_non_overlapping() {
        let matcher = TermMatcher::new("aa", TermMatching::Substring);
        assert_eq!(matcher.count("aaaa"), 2);
    }

    #[test]
    fn test_whole_word_escapes_metacharacters() {
        let matcher = TermMatcher::new("c++", TermMatching::WholeWord);
        assert!(matches!(matcher, TermMatcher::WholeWord { .. }));
        assert!(!matcher.is_match("cxx"));
    }
}
