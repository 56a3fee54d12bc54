//! Usage log: what agents searched for, what went unanswered, and what they
//! thought of the answers.
//!
//! Nothing recorded here feeds back into ranking. The unanswered-question
//! aggregate exists so that curators can see which topics the knowledge base
//! is missing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::DocumentId;
use crate::error::Result;

pub mod file;
pub mod memory;

pub use file::FileUsageLog;
pub use memory::MemoryUsageLog;

/// Agent name recorded when the caller does not identify itself.
pub const UNKNOWN_AGENT: &str = "unknown";

/// One submitted query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchLogEntry {
    pub query: String,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate of a question that returned no results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnansweredQuestion {
    pub question: String,
    pub count: u64,
    pub first_asked: DateTime<Utc>,
    pub last_asked: DateTime<Utc>,
    /// Agent who first asked.
    pub agent: String,
}

/// Agent feedback on one search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub result_id: DocumentId,
    pub helpful: bool,
    pub agent: String,
    pub timestamp: DateTime<Utc>,
}

/// Sink for search activity.
pub trait UsageLog: Send + Sync + std::fmt::Debug {
    /// Record a submitted query.
    fn record_search(&self, query: &str, at: DateTime<Utc>) -> Result<()>;

    /// Record a query that returned nothing, merging with earlier asks of the
    /// same question.
    fn record_unanswered(&self, question: &str, agent: &str, at: DateTime<Utc>) -> Result<()>;

    fn record_feedback(&self, entry: FeedbackEntry) -> Result<()>;

    fn searches(&self) -> Result<Vec<SearchLogEntry>>;

    fn unanswered(&self) -> Result<Vec<UnansweredQuestion>>;

    fn feedback(&self) -> Result<Vec<FeedbackEntry>>;
}

/// Merge one unanswered ask into `entries`.
///
/// Questions are compared trimmed and case-insensitively. The first spelling
/// seen is the one kept.
pub fn upsert_unanswered(
    entries: &mut Vec<UnansweredQuestion>,
    question: &str,
    agent: &str,
    at: DateTime<Utc>,
) {
    let question = question.trim();
    let key = question.to_lowercase();

    match entries
        .iter_mut()
        .find(|entry| entry.question.trim().to_lowercase() == key)
    {
        Some(entry) => {
            entry.count += 1;
            entry.last_asked = at;
        }
        None => entries.push(UnansweredQuestion {
            question: question.to_string(),
            count: 1,
            first_asked: at,
            last_asked: at,
            agent: agent.to_string(),
        }),
    }
}
