//! Search result types.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::search::scorer::DocumentScore;

/// A document that cleared the inclusion threshold, with its ranking signals.
///
/// Serializes as the document's own fields plus `score`, `matchedWords` and
/// `matchRatio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    #[serde(flatten)]
    pub document: Document,

    pub score: f64,

    /// Query terms that contributed any points.
    pub matched_words: usize,

    /// `matched_words / total query terms`.
    pub match_ratio: f64,
}

impl ScoredResult {
    /// Build a result from a document and its score against a query of
    /// `term_count` terms.
    pub fn new(document: Document, score: DocumentScore, term_count: usize) -> Self {
        let match_ratio = if term_count == 0 {
            0.0
        } else {
            score.matched_words as f64 / term_count as f64
        };

        ScoredResult {
            document,
            score: score.score,
            matched_words: score.matched_words,
            match_ratio,
        }
    }
}
