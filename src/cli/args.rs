//! Command line argument parsing for the kbsearch CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::search::Preset;

/// kbsearch - lexical search over a customer-service knowledge base
#[derive(Parser, Debug, Clone)]
#[command(name = "kbsearch")]
#[command(about = "Search and curate a customer-service knowledge base")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KbSearchArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Knowledge-base file
    #[arg(
        long = "kb",
        env = "KBSEARCH_KB",
        default_value = "knowledge-base.json",
        global = true
    )]
    pub knowledge_base: PathBuf,

    /// Directory holding the usage logs
    #[arg(long, env = "KBSEARCH_LOGS", default_value = "logs", global = true)]
    pub logs: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KbSearchArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search the knowledge base
    Search(SearchArgs),

    /// Show the normalized terms of a query
    Analyze(AnalyzeArgs),

    /// List all documents
    List,

    /// Add a document
    Add(AddArgs),

    /// Edit a document
    Update(UpdateArgs),

    /// Delete a document
    Delete(DeleteArgs),

    /// Add a plain-text file as a document
    Upload(UploadArgs),

    /// Show questions that returned no results
    Unanswered,

    /// Record whether a result helped
    Feedback(FeedbackArgs),
}

/// Ranking configuration shared by `search` and `analyze`
#[derive(Args, Debug, Clone)]
pub struct RankingArgs {
    /// Built-in ranking preset
    #[arg(long, value_enum, default_value_t = Preset::Lenient)]
    pub preset: Preset,

    /// JSON file of overrides applied on top of the preset
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for searching
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub ranking: RankingArgs,

    /// Agent submitting the query
    #[arg(long)]
    pub agent: Option<String>,
}

/// Arguments for analyzing a query
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub ranking: RankingArgs,
}

/// Arguments for adding a document
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    /// Keyword (repeatable, or comma separated)
    #[arg(short, long = "keyword", value_delimiter = ',')]
    pub keywords: Vec<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub section: Option<String>,
}

/// Arguments for editing a document
#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Document id
    #[arg(value_name = "ID")]
    pub id: u64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    /// Replacement keyword list (repeatable, or comma separated)
    #[arg(short, long = "keyword", value_delimiter = ',')]
    pub keywords: Option<Vec<String>>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub section: Option<String>,
}

/// Arguments for deleting a document
#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Document id
    #[arg(value_name = "ID")]
    pub id: u64,
}

/// Arguments for uploading a file
#[derive(Args, Debug, Clone)]
pub struct UploadArgs {
    /// Plain-text file (.txt, .text or .md)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for recording feedback
#[derive(Args, Debug, Clone)]
pub struct FeedbackArgs {
    /// Id of the document the feedback is about
    #[arg(value_name = "RESULT_ID")]
    pub result_id: u64,

    /// The result helped
    #[arg(long, conflicts_with = "not_helpful", required_unless_present = "not_helpful")]
    pub helpful: bool,

    /// The result did not help
    #[arg(long)]
    pub not_helpful: bool,

    /// Agent giving the feedback
    #[arg(long)]
    pub agent: Option<String>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
