//! Query analyzer combining a tokenizer with a chain of filters.
//!
//! The analyzer applies processing in this order:
//! 1. Tokenizer: splits the query into raw pieces
//! 2. Token filters: applied sequentially in the order they were added
//!
//! [`QueryAnalyzer::from_config`] builds the standard query pipeline:
//! space tokenizer, lowercase, ASCII-alphabetic, minimum length, stop words,
//! and de-duplication.
//!
//! # Examples
//!
//! ```
//! use kbsearch::analysis::analyzer::QueryAnalyzer;
//! use kbsearch::search::config::SearchConfig;
//!
//! let analyzer = QueryAnalyzer::from_config(&SearchConfig::lenient());
//! let terms = analyzer.terms("How do I get a REFUND for my order 123");
//!
//! assert_eq!(terms, vec!["how", "get", "refund", "order"]);
//! ```

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{
    AsciiAlphabeticFilter, Filter, LowercaseFilter, MinLengthFilter, StopFilter, UniqueFilter,
};
use crate::analysis::tokenizer::{SpaceTokenizer, Tokenizer};
use crate::search::config::SearchConfig;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct QueryAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl std::fmt::Debug for QueryAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl QueryAnalyzer {
    /// Create a new analyzer with the given tokenizer and no filters.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        QueryAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Build the standard query pipeline for a search configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        QueryAnalyzer::new(Arc::new(SpaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(AsciiAlphabeticFilter::new()))
            .add_filter(Arc::new(MinLengthFilter::new(config.min_token_length)))
            .add_filter(Arc::new(StopFilter::from_words(
                config.stop_words.iter().cloned(),
            )))
            .add_filter(Arc::new(UniqueFilter::new()))
            .with_name("query".to_string())
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the analyzer name.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the pipeline and return the token stream.
    pub fn analyze(&self, text: &str) -> TokenStream {
        let mut tokens = self.tokenizer.tokenize(text);
        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    /// Run the pipeline and collect the surviving token texts.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).map(|token| token.text).collect()
    }
}
