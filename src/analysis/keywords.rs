//! Keyword extraction for uploaded documents.
//!
//! Uploaded text has no curated keyword list, so one is derived from word
//! frequency: the most frequent non-trivial words become the document's
//! keywords, which the scorer then matches with keyword weight.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Words that are never promoted to keywords.
const COMMON_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is", "are",
    "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "must", "can", "shall", "this", "that", "these", "those",
    "a", "an",
];

static COMMON_WORDS_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| COMMON_WORDS.iter().copied().collect());

/// Default number of keywords kept per document.
pub const DEFAULT_MAX_KEYWORDS: usize = 10;

/// Default minimum keyword length (exclusive): words must be longer than this.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// Frequency-based keyword extractor.
///
/// # Examples
///
/// ```
/// use kbsearch::analysis::keywords::KeywordExtractor;
///
/// let keywords = KeywordExtractor::new().extract(
///     "Refunds are issued to the original card. Refunds take five days.",
/// );
/// assert_eq!(keywords[0], "refunds");
/// ```
#[derive(Clone, Debug)]
pub struct KeywordExtractor {
    max_keywords: usize,
    min_word_length: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        KeywordExtractor {
            max_keywords: DEFAULT_MAX_KEYWORDS,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
        }
    }

    /// Set how many keywords to keep.
    pub fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords;
        self
    }

    /// Extract up to `max_keywords` keywords, most frequent first. Words with
    /// equal counts keep the order in which they first appear in the text.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for word in normalized.split_whitespace() {
            if word.len() <= self.min_word_length || COMMON_WORDS_SET.contains(word) {
                continue;
            }
            let count = counts.entry(word).or_insert(0);
            if *count == 0 {
                order.push(word);
            }
            *count += 1;
        }

        // stable sort keeps first-occurrence order among equal counts
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));
        order
            .into_iter()
            .take(self.max_keywords)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_order() {
        let keywords = KeywordExtractor::new()
            .extract("Billing billing BILLING. Invoice invoice. Payment.");

        assert_eq!(keywords, vec!["billing", "invoice", "payment"]);
    }

    #[test]
    fn test_skips_short_and_common_words() {
        let keywords = KeywordExtractor::new().extract("This should have been done with care");

        assert_eq!(keywords, vec!["done", "care"]);
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let keywords = KeywordExtractor::new().extract("zeta alpha zeta alpha gamma");
        assert_eq!(keywords, vec!["zeta", "alpha", "gamma"]);
    }

    #[test]
    fn test_limit() {
        let text = "one1 two2 three3 four4 five5";
        let keywords = KeywordExtractor::new().with_max_keywords(2).extract(text);
        assert_eq!(keywords, vec!["one1", "two2"]);
    }

    #[test]
    fn test_punctuation_splits_words() {
        let keywords = KeywordExtractor::new().extract("e-mail: support@example.com");
        assert_eq!(keywords, vec!["mail", "support", "example"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(KeywordExtractor::new().extract("").is_empty());
    }
}
