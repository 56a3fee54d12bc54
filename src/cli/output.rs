//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{KbSearchArgs, OutputFormat};
use crate::document::Document;
use crate::service::SearchResponse;
use crate::usage::{FeedbackEntry, UnansweredQuestion};

/// Longest content excerpt shown per search result.
const EXCERPT_CHARS: usize = 160;

/// Types that know how to print themselves for a person.
pub trait HumanOutput {
    fn print_human(&self);
}

/// Result structure for `list`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentList {
    pub documents: Vec<Document>,
    pub total: usize,
}

/// Result structure for `delete`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionResult {
    pub id: u64,
    pub deleted: bool,
}

/// Result structure for `analyze`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub query: String,
    pub preset: String,
    pub terms: Vec<String>,
    pub required_matches: usize,
}

/// Result structure for `unanswered`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UnansweredReport {
    pub questions: Vec<UnansweredQuestion>,
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &KbSearchArgs) -> crate::error::Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_json<T: Serialize>(result: &T, args: &KbSearchArgs) -> crate::error::Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

fn print_document(document: &Document) {
    println!("[{}] {} ({})", document.id, document.title, document.category);
    if !document.keywords.is_empty() {
        println!("  Keywords: {}", document.keywords.join(", "));
    }
    if let Some(source) = &document.source {
        println!("  Source: {source}");
    }
    if let Some(updated) = &document.last_updated {
        println!("  Updated: {updated}");
    }
}

impl HumanOutput for SearchResponse {
    fn print_human(&self) {
        if let Some(message) = &self.message {
            println!("{message}");
            return;
        }
        if self.results.is_empty() {
            println!("No results for {:?}", self.query);
            return;
        }

        println!("Results for {:?}: {}", self.query, self.total);
        for (i, result) in self.results.iter().enumerate() {
            println!();
            println!(
                "{}. {} (score: {}, matched: {} / {:.0}%)",
                i + 1,
                result.document.title,
                result.score,
                result.matched_words,
                result.match_ratio * 100.0
            );
            println!("   id: {}  category: {}", result.document.id, result.document.category);
            println!("   {}", excerpt(&result.document.content));
        }
    }
}

impl HumanOutput for DocumentList {
    fn print_human(&self) {
        println!("Documents: {}", self.total);
        for document in &self.documents {
            print_document(document);
        }
    }
}

impl HumanOutput for Document {
    fn print_human(&self) {
        print_document(self);
        println!();
        println!("{}", self.content);
    }
}

impl HumanOutput for DeletionResult {
    fn print_human(&self) {
        if self.deleted {
            println!("Deleted document {}", self.id);
        } else {
            println!("No document with id {}", self.id);
        }
    }
}

impl HumanOutput for AnalysisResult {
    fn print_human(&self) {
        println!("Query: {:?} ({} preset)", self.query, self.preset);
        if self.terms.is_empty() {
            println!("No searchable terms");
        } else {
            println!("Terms: {}", self.terms.join(", "));
            println!("Required matches: {}", self.required_matches);
        }
    }
}

impl HumanOutput for UnansweredReport {
    fn print_human(&self) {
        if self.questions.is_empty() {
            println!("No unanswered questions");
            return;
        }
        for question in &self.questions {
            println!(
                "{:>4}x  {}  (first {}, last {}, by {})",
                question.count,
                question.question,
                question.first_asked.format("%Y-%m-%d %H:%M"),
                question.last_asked.format("%Y-%m-%d %H:%M"),
                question.agent
            );
        }
    }
}

impl HumanOutput for FeedbackEntry {
    fn print_human(&self) {
        let verdict = if self.helpful { "helpful" } else { "not helpful" };
        println!("Recorded {} as {verdict} for {}", self.result_id, self.agent);
    }
}
