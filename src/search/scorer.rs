//! Per-document relevance scoring.
//!
//! [`QueryPlan`] is built once per query: the analyzed terms, the rejoined
//! phrase and one compiled [`TermMatcher`] per term. [`DocumentScorer`] then
//! evaluates the plan against each document independently.
//!
//! Weighted scoring per document:
//!
//! 1. Phrase: if the rejoined terms occur in `title content keywords`, add
//!    `phraseBonus` and mark every term as matched. With
//!    `phraseShortCircuit`, a phrase hit in the title or content ends scoring
//!    here.
//! 2. For each term: title match, any keyword containing the term, category
//!    containing the term, and content occurrences (capped) each add their
//!    weight.
//! 3. If the term minus its last character occurs in the combined text, the
//!    term earns at least the fuzzy weight. This is the only signal for a term
//!    that matched nothing else.

use crate::document::Document;
use crate::search::config::{ScoringMode, SearchConfig};
use crate::search::matcher::TermMatcher;

/// Compiled form of an analyzed query.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    terms: Vec<String>,
    phrase: String,
    matchers: Vec<TermMatcher>,
}

impl QueryPlan {
    /// Compile a plan from analyzed terms.
    pub fn new(terms: Vec<String>, config: &SearchConfig) -> Self {
        let phrase = terms.join(" ");
        let matchers = terms
            .iter()
            .map(|term| TermMatcher::new(term, config.term_matching))
            .collect();
        QueryPlan {
            terms,
            phrase,
            matchers,
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The terms rejoined with single spaces.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Score of one document against one query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DocumentScore {
    pub score: f64,
    /// Number of distinct query terms that contributed.
    pub matched_words: usize,
}

/// Lower-cased copy of the fields the scorer reads.
struct LoweredDocument {
    title: String,
    content: String,
    keywords: Vec<String>,
    category: String,
    /// `title content keywords...` used for phrase and fuzzy checks.
    surface: String,
}

impl LoweredDocument {
    fn new(document: &Document) -> Self {
        let title = document.title.to_lowercase();
        let content = document.content.to_lowercase();
        let keywords: Vec<String> = document.keywords.iter().map(|k| k.to_lowercase()).collect();
        let category = document.category.to_lowercase();
        let surface = format!("{} {} {}", title, content, keywords.join(" "));

        LoweredDocument {
            title,
            content,
            keywords,
            category,
            surface,
        }
    }
}

/// Scores documents according to a [`SearchConfig`].
#[derive(Debug, Clone, Copy)]
pub struct DocumentScorer<'a> {
    config: &'a SearchConfig,
}

impl<'a> DocumentScorer<'a> {
    pub fn new(config: &'a SearchConfig) -> Self {
        DocumentScorer { config }
    }

    /// Score one document. An empty plan scores zero.
    pub fn score(&self, plan: &QueryPlan, document: &Document) -> DocumentScore {
        if plan.is_empty() {
            return DocumentScore::default();
        }

        let lowered = LoweredDocument::new(document);
        match self.config.scoring_mode {
            ScoringMode::Weighted => self.weighted(plan, &lowered),
            ScoringMode::Unscored => Self::unscored(plan, &lowered),
        }
    }

    fn weighted(&self, plan: &QueryPlan, doc: &LoweredDocument) -> DocumentScore {
        let config = self.config;
        let mut score = 0.0;
        let mut matched = vec![false; plan.len()];

        if doc.surface.contains(plan.phrase()) {
            score += config.phrase_bonus;
            matched.iter_mut().for_each(|m| *m = true);

            if config.phrase_short_circuit
                && (doc.title.contains(plan.phrase()) || doc.content.contains(plan.phrase()))
            {
                return DocumentScore {
                    score,
                    matched_words: plan.len(),
                };
            }
        }

        let fuzzy_min = config.fuzzy_min_token_length.max(2);

        for (i, matcher) in plan.matchers.iter().enumerate() {
            let term = matcher.term();
            let mut term_score = 0.0;
            let mut fired = false;

            if matcher.is_match(&doc.title) {
                term_score += config.title_weight;
                fired = true;
            }

            if doc.keywords.iter().any(|k| k.contains(term)) {
                term_score += config.keyword_weight;
                fired = true;
            }

            if doc.category.contains(term) {
                term_score += config.category_weight;
                fired = true;
            }

            let occurrences = matcher.count(&doc.content);
            if occurrences > 0 {
                term_score += (occurrences as f64 * config.content_weight_per_occurrence)
                    .min(config.content_weight_cap);
                fired = true;
            }

            // floor at the fuzzy weight
            if config.fuzzy_enabled && term.len() >= fuzzy_min && term_score < config.fuzzy_weight {
                // terms are ASCII, so slicing off one byte drops one character
                let partial = &term[..term.len() - 1];
                if doc.surface.contains(partial) {
                    term_score = config.fuzzy_weight;
                    fired = true;
                }
            }

            score += term_score;
            if fired {
                matched[i] = true;
            }
        }

        DocumentScore {
            score,
            matched_words: matched.iter().filter(|m| **m).count(),
        }
    }

    fn unscored(plan: &QueryPlan, doc: &LoweredDocument) -> DocumentScore {
        let matched_words = plan
            .terms()
            .iter()
            .filter(|term| doc.surface.contains(term.as_str()))
            .count();

        DocumentScore {
            score: matched_words as f64,
            matched_words,
        }
    }
}
