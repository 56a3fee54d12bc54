//! The lexical ranking engine.
//!
//! [`SearchEngine`] is a pure function of `(query, documents)` under a fixed
//! [`SearchConfig`]: it keeps no state between calls, never mutates the
//! documents it is handed, and never fails. Degenerate input (an empty or
//! all-stop-word query, an empty collection) yields an empty result list.
//!
//! # Examples
//!
//! ```
//! use kbsearch::document::Document;
//! use kbsearch::search::{SearchConfig, SearchEngine};
//!
//! let documents = vec![
//!     Document::builder()
//!         .title("Refund Policy")
//!         .content("Customers may request a refund within 30 days.")
//!         .keywords(["refund", "policy"])
//!         .category("billing")
//!         .build(),
//! ];
//!
//! let engine = SearchEngine::new(SearchConfig::lenient());
//! let results = engine.search("refund policy", &documents);
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].matched_words, 2);
//! ```

use log::debug;
use rayon::prelude::*;

use crate::analysis::QueryAnalyzer;
use crate::document::Document;
use crate::search::config::{Preset, SearchConfig};
use crate::search::ranking;
use crate::search::result::ScoredResult;
use crate::search::scorer::{DocumentScorer, QueryPlan};

/// Collections at least this large are scored on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 512;

/// Stateless lexical search over a snapshot of documents.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: SearchConfig,
    analyzer: QueryAnalyzer,
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new(SearchConfig::default())
    }
}

impl SearchEngine {
    /// Create an engine for a configuration.
    pub fn new(config: SearchConfig) -> Self {
        let analyzer = QueryAnalyzer::from_config(&config);
        SearchEngine { config, analyzer }
    }

    /// Create an engine for a named preset.
    pub fn with_preset(preset: Preset) -> Self {
        SearchEngine::new(preset.config())
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &QueryAnalyzer {
        &self.analyzer
    }

    /// Normalize a raw query into its search terms.
    pub fn terms(&self, query: &str) -> Vec<String> {
        self.analyzer.terms(query.trim())
    }

    /// Analyze and compile a query.
    pub fn plan(&self, query: &str) -> QueryPlan {
        QueryPlan::new(self.terms(query), &self.config)
    }

    /// Score every document, keep those that clear the threshold, and return
    /// at most `maxResults` of them in rank order.
    pub fn search(&self, query: &str, documents: &[Document]) -> Vec<ScoredResult> {
        let plan = self.plan(query);
        if plan.is_empty() {
            debug!("No searchable words found in {query:?}");
            return Vec::new();
        }
        debug!("Search words: {:?}", plan.terms());

        let scorer = DocumentScorer::new(&self.config);
        let term_count = plan.len();
        let required = ranking::required_matches(term_count, &self.config);

        let evaluate = |document: &Document| -> Option<ScoredResult> {
            let score = scorer.score(&plan, document);
            debug!(
                "{:?}: score={}, matched={}/{}, required={}",
                document.title, score.score, score.matched_words, term_count, required
            );
            ranking::is_included(&score, required, &self.config)
                .then(|| ScoredResult::new(document.clone(), score, term_count))
        };

        let mut results: Vec<ScoredResult> = if documents.len() >= PARALLEL_THRESHOLD {
            documents.par_iter().filter_map(evaluate).collect()
        } else {
            documents.iter().filter_map(evaluate).collect()
        };
        debug!("Found {} matching documents", results.len());

        ranking::rank(&mut results, &self.config);
        results
    }
}

/// One-shot search with an explicit configuration.
pub fn search(query: &str, documents: &[Document], config: &SearchConfig) -> Vec<ScoredResult> {
    SearchEngine::new(config.clone()).search(query, documents)
}
