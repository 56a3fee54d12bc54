//! Stop filter implementation.
//!
//! Removes words that carry almost no signal for knowledge-base lookups. Two
//! built-in lists are provided: a minimal one (articles, conjunctions and the
//! most common prepositions) and a strict one that additionally drops question
//! words, pronouns and auxiliaries, which agents often type verbatim
//! ("how do I ...").
//!
//! # Examples
//!
//! ```
//! use kbsearch::analysis::token_filter::Filter;
//! use kbsearch::analysis::token_filter::stop::StopFilter;
//! use kbsearch::analysis::token::Token;
//!
//! let filter = StopFilter::new();
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("refund", 1),
//!     Token::new("policy", 2),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "refund");
//! ```

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, LazyLock};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Minimal English stop words.
pub const MINIMAL_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
];

/// Additional words dropped by the strict list.
const STRICT_EXTRA_STOP_WORDS: &[&str] = &[
    // prepositions
    "of", "with", "by", "from", "about", "into", "as",
    // question words
    "what", "how", "when", "where", "why", "who", "which",
    // pronouns
    "i", "me", "my", "you", "your", "we", "our", "us", "it", "its", "they", "them", "their",
    "he", "him", "his", "she", "her", "this", "that", "these", "those",
    // auxiliaries
    "is", "are", "was", "were", "be", "do", "does", "did", "can", "could", "should", "would",
    "will", "have", "has", "had",
];

/// Minimal stop words as a HashSet.
pub static MINIMAL_STOP_WORDS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| MINIMAL_STOP_WORDS.iter().map(|&s| s.to_string()).collect());

/// Strict stop words (minimal list plus question words, pronouns and auxiliaries).
pub static STRICT_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    MINIMAL_STOP_WORDS
        .iter()
        .chain(STRICT_EXTRA_STOP_WORDS.iter())
        .map(|&s| s.to_string())
        .collect()
});

/// Minimal stop words as an ordered set, for serializable configuration.
pub fn minimal_stop_words() -> BTreeSet<String> {
    MINIMAL_STOP_WORDS_SET.iter().cloned().collect()
}

/// Strict stop words as an ordered set, for serializable configuration.
pub fn strict_stop_words() -> BTreeSet<String> {
    STRICT_STOP_WORDS_SET.iter().cloned().collect()
}

/// A filter that removes stop words from the token stream.
///
/// Matching is exact, so the filter should run after lowercasing.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a stop filter with the minimal English list.
    pub fn new() -> Self {
        StopFilter {
            stop_words: Arc::new(MINIMAL_STOP_WORDS_SET.clone()),
        }
    }

    /// Create a stop filter with the strict English list.
    pub fn strict() -> Self {
        StopFilter {
            stop_words: Arc::new(STRICT_STOP_WORDS_SET.clone()),
        }
    }

    /// Create a stop filter from a custom word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            stop_words: Arc::new(words.into_iter().map(Into::into).collect()),
        }
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word list is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let stop_words = Arc::clone(&self.stop_words);
        Box::new(tokens.filter(move |token| !stop_words.contains(&token.text)))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn run(filter: &StopFilter, words: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect();
        filter
            .filter(Box::new(tokens.into_iter()))
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_minimal_list() {
        let filter = StopFilter::new();
        assert_eq!(filter.len(), MINIMAL_STOP_WORDS.len());
        assert_eq!(
            run(&filter, &["how", "the", "refund", "and", "works"]),
            vec!["how", "refund", "works"]
        );
    }

    #[test]
    fn test_strict_list_drops_question_words() {
        let filter = StopFilter::strict();
        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("what"));
        assert!(filter.is_stop_word("your"));
        assert_eq!(
            run(&filter, &["what", "is", "your", "refund", "policy"]),
            vec!["refund", "policy"]
        );
    }

    #[test]
    fn test_custom_words() {
        let filter = StopFilter::from_words(["please"]);
        assert_eq!(run(&filter, &["please", "help"]), vec!["help"]);
    }

    #[test]
    fn test_ordered_sets_match_lazy_sets() {
        assert_eq!(minimal_stop_words().len(), MINIMAL_STOP_WORDS_SET.len());
        assert_eq!(strict_stop_words().len(), STRICT_STOP_WORDS_SET.len());
        assert!(strict_stop_words().contains("when"));
    }
}
