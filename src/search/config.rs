//! Search configuration and scoring presets.
//!
//! Every weight and threshold used by the scorer and the ranking policy lives in
//! [`SearchConfig`]. Three presets cover the policies the service has shipped
//! with:
//!
//! - **lenient**: substring matching, fuzzy suffix fallback, 40% coverage for
//!   long queries, minimum score 8, near-tied scores ordered by coverage
//! - **strict**: whole-word title/content matching, question words stop-listed,
//!   phrase hits short-circuit per-term scoring, 75% coverage, minimum score 15,
//!   ordered by matched terms then score
//! - **minimal**: unscored substring containment, any single term is enough
//!
//! Configuration files are JSON objects using the camel-case field names below.
//! Keys present in the file override the chosen preset; absent keys keep the
//! preset's value.
//!
//! # Examples
//!
//! ```
//! use kbsearch::search::config::{Preset, SearchConfig};
//!
//! let config = SearchConfig::from_json_str(Preset::Strict, r#"{"maxResults": 3}"#).unwrap();
//! assert_eq!(config.max_results, 3);
//! assert_eq!(config.minimum_score, 15.0);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::stop::{minimal_stop_words, strict_stop_words};
use crate::error::{KbSearchError, Result};

/// How a query term is matched against document titles and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermMatching {
    /// Plain substring containment ("fund" matches "refund").
    #[default]
    Substring,
    /// Word-boundary matching ("fund" does not match "refund").
    WholeWord,
}

/// Whether documents are scored with weights or only counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Phrase, title, keyword, category, content and fuzzy weights.
    #[default]
    Weighted,
    /// Score is the number of terms found anywhere in the document text.
    Unscored,
}

/// Matches required for queries with at most `shortQueryMaxTokens` terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortQueryRule {
    /// Every term must match.
    #[default]
    All,
    /// A single matching term is enough.
    AnyOne,
}

/// Ordering of included documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankOrder {
    /// Score descending; scores within `scoreTieTolerance` of each other are
    /// ordered by match ratio instead.
    #[default]
    ScoreThenCoverage,
    /// Matched terms descending, then score descending.
    CoverageThenScore,
}

/// Named scoring policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Lenient,
    Strict,
    Minimal,
}

impl Preset {
    /// Build the configuration for this preset.
    pub fn config(self) -> SearchConfig {
        match self {
            Preset::Lenient => SearchConfig::lenient(),
            Preset::Strict => SearchConfig::strict(),
            Preset::Minimal => SearchConfig::minimal(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Lenient => "lenient",
            Preset::Strict => "strict",
            Preset::Minimal => "minimal",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = KbSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Preset::Lenient),
            "strict" => Ok(Preset::Strict),
            "minimal" => Ok(Preset::Minimal),
            other => Err(KbSearchError::config(format!(
                "unknown preset '{other}' (expected lenient, strict or minimal)"
            ))),
        }
    }
}

/// All tunables of the lexical ranking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchConfig {
    /// Minimum length (inclusive, in bytes) of a surviving query term.
    pub min_token_length: usize,

    /// Terms removed from queries.
    pub stop_words: BTreeSet<String>,

    /// Score added when the whole normalized query appears in the document text.
    pub phrase_bonus: f64,

    /// Stop per-term scoring once the phrase is found in the title or content.
    pub phrase_short_circuit: bool,

    pub title_weight: f64,
    pub keyword_weight: f64,
    pub category_weight: f64,

    /// Score per content occurrence of a term.
    pub content_weight_per_occurrence: f64,

    /// Upper bound on the content contribution of a single term.
    pub content_weight_cap: f64,

    /// Try the term minus its last character when nothing else matched.
    pub fuzzy_enabled: bool,
    pub fuzzy_weight: f64,

    /// Minimum term length (inclusive) for the fuzzy fallback.
    pub fuzzy_min_token_length: usize,

    pub term_matching: TermMatching,
    pub scoring_mode: ScoringMode,

    /// Queries with at most this many terms use `shortQueryRule`.
    pub short_query_max_tokens: usize,
    pub short_query_rule: ShortQueryRule,

    /// Fraction of terms that must match for longer queries.
    pub match_fraction_threshold: f64,

    /// Absolute score floor for inclusion.
    pub minimum_score: f64,

    pub rank_order: RankOrder,

    /// Scores closer than or equal to this are ordered by coverage.
    pub score_tie_tolerance: f64,

    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::lenient()
    }
}

impl SearchConfig {
    /// Generous matching: short terms, substring and fuzzy matches, low floors.
    pub fn lenient() -> Self {
        SearchConfig {
            min_token_length: 3,
            stop_words: minimal_stop_words(),
            phrase_bonus: 100.0,
            phrase_short_circuit: false,
            title_weight: 20.0,
            keyword_weight: 15.0,
            category_weight: 10.0,
            content_weight_per_occurrence: 3.0,
            content_weight_cap: 15.0,
            fuzzy_enabled: true,
            fuzzy_weight: 5.0,
            fuzzy_min_token_length: 5,
            term_matching: TermMatching::Substring,
            scoring_mode: ScoringMode::Weighted,
            short_query_max_tokens: 2,
            short_query_rule: ShortQueryRule::All,
            match_fraction_threshold: 0.4,
            minimum_score: 8.0,
            rank_order: RankOrder::ScoreThenCoverage,
            score_tie_tolerance: 10.0,
            max_results: 5,
        }
    }

    /// Precise matching: whole words, longer terms, high floors.
    pub fn strict() -> Self {
        SearchConfig {
            min_token_length: 4,
            stop_words: strict_stop_words(),
            phrase_short_circuit: true,
            fuzzy_enabled: false,
            term_matching: TermMatching::WholeWord,
            match_fraction_threshold: 0.75,
            minimum_score: 15.0,
            rank_order: RankOrder::CoverageThenScore,
            ..SearchConfig::lenient()
        }
    }

    /// Unscored substring containment; any matching term includes the document.
    pub fn minimal() -> Self {
        SearchConfig {
            phrase_bonus: 0.0,
            fuzzy_enabled: false,
            scoring_mode: ScoringMode::Unscored,
            short_query_rule: ShortQueryRule::AnyOne,
            match_fraction_threshold: 0.0,
            minimum_score: 1.0,
            rank_order: RankOrder::CoverageThenScore,
            ..SearchConfig::lenient()
        }
    }

    /// Parse a JSON object of overrides on top of a preset.
    pub fn from_json_str(base: Preset, json: &str) -> Result<Self> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(KbSearchError::config(
                "search configuration must be a JSON object",
            ));
        };

        let mut merged = match serde_json::to_value(base.config())? {
            serde_json::Value::Object(map) => map,
            _ => return Err(KbSearchError::config("preset did not serialize to an object")),
        };
        merged.extend(overrides);

        let config: SearchConfig = serde_json::from_value(serde_json::Value::Object(merged))
            .map_err(|e| KbSearchError::config(format!("invalid search configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load overrides for a preset from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(base: Preset, path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            KbSearchError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(base, &json)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.min_token_length == 0 {
            return Err(KbSearchError::config("minTokenLength must be at least 1"));
        }
        if self.max_results == 0 {
            return Err(KbSearchError::config("maxResults must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.match_fraction_threshold) {
            return Err(KbSearchError::config(format!(
                "matchFractionThreshold must be within [0, 1], got {}",
                self.match_fraction_threshold
            )));
        }
        if self.fuzzy_enabled && self.fuzzy_min_token_length < 2 {
            return Err(KbSearchError::config(
                "fuzzyMinTokenLength must be at least 2",
            ));
        }

        let weights = [
            ("phraseBonus", self.phrase_bonus),
            ("titleWeight", self.title_weight),
            ("keywordWeight", self.keyword_weight),
            ("categoryWeight", self.category_weight),
            ("contentWeightPerOccurrence", self.content_weight_per_occurrence),
            ("contentWeightCap", self.content_weight_cap),
            ("fuzzyWeight", self.fuzzy_weight),
            ("minimumScore", self.minimum_score),
            ("scoreTieTolerance", self.score_tie_tolerance),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(KbSearchError::config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}
