//! Lexical search: configuration, scoring, ranking.
//!
//! - **`config`**: every tunable weight and threshold, plus named presets
//! - **`matcher`**: per-term substring or whole-word matchers
//! - **`scorer`**: per-document scoring of a compiled query
//! - **`ranking`**: inclusion threshold, ordering and truncation
//! - **`result`**: the scored result returned to callers
//! - **`engine`**: the stateless entry point tying the above together

pub mod config;
pub mod engine;
pub mod matcher;
pub mod ranking;
pub mod result;
pub mod scorer;

pub use self::config::{Preset, RankOrder, ScoringMode, SearchConfig, ShortQueryRule, TermMatching};
pub use self::engine::{SearchEngine, search};
pub use self::result::ScoredResult;
pub use self::scorer::{DocumentScore, DocumentScorer, QueryPlan};
