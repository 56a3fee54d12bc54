//! The request handler around the ranking engine.
//!
//! [`KnowledgeBaseService`] owns a document store, a usage log and a
//! [`SearchEngine`]. Each search takes a fresh snapshot of the store, runs the
//! engine over it, and then records the query (and, if nothing matched, the
//! unanswered question) in the usage log. Ranking never depends on the log,
//! and a failing log never fails a search.
//!
//! # Example
//!
//! ```
//! use kbsearch::document::NewDocument;
//! use kbsearch::service::KnowledgeBaseService;
//! use kbsearch::storage::{DocumentStore, MemoryStore};
//! use kbsearch::usage::{MemoryUsageLog, UsageLog};
//!
//! # fn main() -> kbsearch::error::Result<()> {
//! let service = KnowledgeBaseService::new(MemoryStore::new(), MemoryUsageLog::new());
//! service.store().create(NewDocument {
//!     title: "Refund Policy".to_string(),
//!     content: "Customers may request a refund within 30 days.".to_string(),
//!     ..Default::default()
//! })?;
//!
//! let response = service.search("refund policy", Some("alice"))?;
//! assert_eq!(response.total, 1);
//!
//! let response = service.search("teleportation", None)?;
//! assert_eq!(response.total, 0);
//! assert_eq!(service.usage_log().unanswered()?[0].agent, "unknown");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentId};
use crate::error::Result;
use crate::search::{ScoredResult, SearchConfig, SearchEngine};
use crate::storage::DocumentStore;
use crate::usage::{FeedbackEntry, UNKNOWN_AGENT, UnansweredQuestion, UsageLog};

/// Message returned for a blank query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search term";

/// Outcome of one search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<ScoredResult>,
    pub query: String,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Search service over a document store and a usage log.
#[derive(Debug)]
pub struct KnowledgeBaseService<S, L> {
    store: S,
    usage_log: L,
    engine: SearchEngine,
}

impl<S: DocumentStore, L: UsageLog> KnowledgeBaseService<S, L> {
    /// Create a service using the default (lenient) configuration.
    pub fn new(store: S, usage_log: L) -> Self {
        Self::with_engine(store, usage_log, SearchEngine::default())
    }

    pub fn with_config(store: S, usage_log: L, config: SearchConfig) -> Self {
        Self::with_engine(store, usage_log, SearchEngine::new(config))
    }

    pub fn with_engine(store: S, usage_log: L, engine: SearchEngine) -> Self {
        KnowledgeBaseService {
            store,
            usage_log,
            engine,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn usage_log(&self) -> &L {
        &self.usage_log
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Run a search on behalf of `agent`.
    ///
    /// Only failing to read the store is an error. A blank query returns an
    /// empty response with a message and records nothing.
    pub fn search(&self, query: &str, agent: Option<&str>) -> Result<SearchResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResponse {
                results: Vec::new(),
                query: String::new(),
                total: 0,
                message: Some(EMPTY_QUERY_MESSAGE.to_string()),
            });
        }

        let now = Utc::now();
        if let Err(e) = self.usage_log.record_search(query, now) {
            warn!("Failed to record search {query:?}: {e}");
        }

        let documents = self.store.snapshot()?;
        let results = self.engine.search(query, &documents);
        info!(
            "Search {:?} matched {} of {} documents",
            query,
            results.len(),
            documents.len()
        );

        if results.is_empty() {
            let agent = agent.unwrap_or(UNKNOWN_AGENT);
            if let Err(e) = self.usage_log.record_unanswered(query, agent, now) {
                warn!("Failed to record unanswered question {query:?}: {e}");
            }
        }

        Ok(SearchResponse {
            total: results.len(),
            results,
            query: query.to_string(),
            message: None,
        })
    }

    /// Current documents, as the next search would see them.
    pub fn documents(&self) -> Result<Arc<Vec<Document>>> {
        self.store.snapshot()
    }

    /// Unanswered questions, most frequently asked first.
    pub fn unanswered(&self) -> Result<Vec<UnansweredQuestion>> {
        let mut questions = self.usage_log.unanswered()?;
        questions.sort_by(|a, b| b.count.cmp(&a.count).then(b.last_asked.cmp(&a.last_asked)));
        Ok(questions)
    }

    /// Record whether a result helped.
    pub fn feedback(
        &self,
        result_id: DocumentId,
        helpful: bool,
        agent: Option<&str>,
    ) -> Result<FeedbackEntry> {
        let entry = FeedbackEntry {
            result_id,
            helpful,
            agent: agent.unwrap_or(UNKNOWN_AGENT).to_string(),
            timestamp: Utc::now(),
        };
        self.usage_log.record_feedback(entry.clone())?;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KbSearchError;
    use crate::storage::MemoryStore;
    use crate::usage::{MemoryUsageLog, SearchLogEntry};
    use chrono::DateTime;

    fn service() -> KnowledgeBaseService<MemoryStore, MemoryUsageLog> {
        let store = MemoryStore::with_documents(vec![
            Document::builder()
                .id(1)
                .title("Refund Policy")
                .content("Customers may request a refund within 30 days.")
                .keywords(["refund", "policy"])
                .category("billing")
                .build(),
            Document::builder()
                .id(2)
                .title("Shipping Times")
                .content("Standard shipping takes five business days.")
                .keywords(["shipping", "delivery"])
                .category("shipping")
                .build(),
        ]);
        KnowledgeBaseService::new(store, MemoryUsageLog::new())
    }

    #[test]
    fn test_blank_query_records_nothing() {
        let service = service();
        let response = service.search("   ", Some("alice")).unwrap();

        assert_eq!(response.total, 0);
        assert_eq!(response.message.as_deref(), Some(EMPTY_QUERY_MESSAGE));
        assert!(service.usage_log().searches().unwrap().is_empty());
        assert!(service.usage_log().unanswered().unwrap().is_empty());
    }

    #[test]
    fn test_search_records_query() {
        let service = service();
        let response = service.search("  refund policy ", Some("alice")).unwrap();

        assert_eq!(response.query, "refund policy");
        assert_eq!(response.total, 1);
        assert_eq!(response.results[0].document.id, 1);

        let searches = service.usage_log().searches().unwrap();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].query, "refund policy");
        assert!(service.usage_log().unanswered().unwrap().is_empty());
    }

    #[test]
    fn test_zero_results_record_unanswered() {
        let service = service();
        service.search("teleportation", Some("alice")).unwrap();
        service.search("Teleportation", Some("bob")).unwrap();

        service.search("gift wrapping", None).unwrap();

        let unanswered = service.unanswered().unwrap();
        assert_eq!(unanswered.len(), 2);
        assert_eq!(unanswered[0].question, "teleportation");
        assert_eq!(unanswered[0].count, 2);
        assert_eq!(unanswered[0].agent, "alice");
        assert_eq!(unanswered[1].count, 1);
        assert_eq!(service.documents().unwrap().len(), 2);
    }

    #[test]
    fn test_stop_word_only_query_is_unanswered() {
        let service = service();
        let response = service.search("the and or", None).unwrap();

        assert_eq!(response.total, 0);
        assert!(response.message.is_none());
        assert_eq!(service.usage_log().unanswered().unwrap()[0].agent, "unknown");
    }

    #[derive(Debug)]
    struct BrokenLog;

    impl UsageLog for BrokenLog {
        fn record_search(&self, _: &str, _: DateTime<Utc>) -> Result<()> {
            Err(KbSearchError::storage("read-only"))
        }
        fn record_unanswered(&self, _: &str, _: &str, _: DateTime<Utc>) -> Result<()> {
            Err(KbSearchError::storage("read-only"))
        }
        fn record_feedback(&self, _: FeedbackEntry) -> Result<()> {
            Err(KbSearchError::storage("read-only"))
        }
        fn searches(&self) -> Result<Vec<SearchLogEntry>> {
            Ok(Vec::new())
        }
        fn unanswered(&self) -> Result<Vec<UnansweredQuestion>> {
            Ok(Vec::new())
        }
        fn feedback(&self) -> Result<Vec<FeedbackEntry>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_log_failure_does_not_fail_search() {
        let service = KnowledgeBaseService::new(MemoryStore::new(), BrokenLog);
        let response = service.search("anything here", None).unwrap();
        assert_eq!(response.total, 0);

        assert!(service.feedback(1, true, None).is_err());
    }

    #[test]
    fn test_feedback() {
        let service = service();
        let entry = service.feedback(2, false, Some("carol")).unwrap();

        assert_eq!(entry.result_id, 2);
        assert!(!entry.helpful);
        assert_eq!(service.usage_log().feedback().unwrap(), vec![entry]);
    }
}
