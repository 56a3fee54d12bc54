//! Query analysis for kbsearch.
//!
//! Turns a raw query string into the ordered, de-duplicated list of terms the
//! scorer matches against documents. The pipeline is a tokenizer followed by a
//! chain of token filters, wired together by [`analyzer::QueryAnalyzer`].
//!
//! The module also hosts [`keywords::KeywordExtractor`], which derives a
//! document's keyword list from uploaded text.

pub mod analyzer;
pub mod keywords;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::QueryAnalyzer;
pub use keywords::KeywordExtractor;
pub use token::{Token, TokenStream};
