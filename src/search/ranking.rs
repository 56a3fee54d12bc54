//! Inclusion threshold and result ordering.
//!
//! A scored document is included when it matched at least
//! [`required_matches`] terms and reached `minimumScore`. Included documents
//! are then ordered by the configured [`RankOrder`] and truncated to
//! `maxResults`.
//!
//! For [`RankOrder::ScoreThenCoverage`], documents are sorted by score and cut
//! into bands: a band starts at its highest score and takes every following
//! document whose score is within `scoreTieTolerance` of that anchor. Inside a
//! band, higher match ratio wins. Anchoring bands keeps the comparison a total
//! order, so the result is deterministic for any input.

use std::cmp::Ordering;

use crate::search::config::{RankOrder, SearchConfig, ShortQueryRule};
use crate::search::result::ScoredResult;
use crate::search::scorer::DocumentScore;

/// Number of matched terms a document needs for a query of `term_count` terms.
pub fn required_matches(term_count: usize, config: &SearchConfig) -> usize {
    if term_count == 0 {
        return 0;
    }

    if term_count <= config.short_query_max_tokens {
        return match config.short_query_rule {
            ShortQueryRule::All => term_count,
            ShortQueryRule::AnyOne => 1,
        };
    }

    // the epsilon keeps 0.4 * 5 from rounding up to 3
    let required = (term_count as f64 * config.match_fraction_threshold - 1e-9).ceil();
    (required.max(0.0) as usize).min(term_count)
}

/// Inclusion test for a scored document.
pub fn is_included(score: &DocumentScore, required: usize, config: &SearchConfig) -> bool {
    score.matched_words >= required && score.score >= config.minimum_score
}

fn by_score_desc(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    b.score.total_cmp(&a.score)
}

fn by_ratio_desc(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    b.match_ratio.total_cmp(&a.match_ratio)
}

/// Order included results and truncate them to `maxResults`.
///
/// Sorting is stable: documents that tie on every key keep collection order.
pub fn rank(results: &mut Vec<ScoredResult>, config: &SearchConfig) {
    match config.rank_order {
        RankOrder::ScoreThenCoverage => rank_in_bands(results, config.score_tie_tolerance),
        RankOrder::CoverageThenScore => results.sort_by(|a, b| {
            b.matched_words
                .cmp(&a.matched_words)
                .then_with(|| by_score_desc(a, b))
        }),
    }

    results.truncate(config.max_results);
}

fn rank_in_bands(results: &mut Vec<ScoredResult>, tolerance: f64) {
    results.sort_by(|a, b| by_score_desc(a, b).then_with(|| by_ratio_desc(a, b)));

    let mut start = 0;
    while start < results.len() {
        let anchor = results[start].score;
        let end = results[start..]
            .iter()
            .position(|r| anchor - r.score > tolerance)
            .map_or(results.len(), |offset| start + offset);

        results[start..end].sort_by(|a, b| by_ratio_desc(a, b).then_with(|| by_score_desc(a, b)));
        start = end;
    }
}
