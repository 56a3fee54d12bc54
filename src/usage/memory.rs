//! In-memory usage log.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::error::Result;
use crate::usage::{
    FeedbackEntry, SearchLogEntry, UnansweredQuestion, UsageLog, upsert_unanswered,
};

#[derive(Debug, Default)]
struct Entries {
    searches: Vec<SearchLogEntry>,
    unanswered: Vec<UnansweredQuestion>,
    feedback: Vec<FeedbackEntry>,
}

/// A usage log that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryUsageLog {
    entries: Mutex<Entries>,
}

impl MemoryUsageLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UsageLog for MemoryUsageLog {
    fn record_search(&self, query: &str, at: DateTime<Utc>) -> Result<()> {
        self.entries.lock().searches.push(SearchLogEntry {
            query: query.to_string(),
            timestamp: at,
        });
        Ok(())
    }

    fn record_unanswered(&self, question: &str, agent: &str, at: DateTime<Utc>) -> Result<()> {
        upsert_unanswered(&mut self.entries.lock().unanswered, question, agent, at);
        Ok(())
    }

    fn record_feedback(&self, entry: FeedbackEntry) -> Result<()> {
        self.entries.lock().feedback.push(entry);
        Ok(())
    }

    fn searches(&self) -> Result<Vec<SearchLogEntry>> {
        Ok(self.entries.lock().searches.clone())
    }

    fn unanswered(&self) -> Result<Vec<UnansweredQuestion>> {
        Ok(self.entries.lock().unanswered.clone())
    }

    fn feedback(&self) -> Result<Vec<FeedbackEntry>> {
        Ok(self.entries.lock().feedback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_usage_log() {
        let log = MemoryUsageLog::new();
        let now = Utc::now();

        log.record_search("refund", now).unwrap();
        log.record_unanswered("teleport", "alice", now).unwrap();
        log.record_unanswered("Teleport", "bob", now).unwrap();
        log.record_feedback(FeedbackEntry {
            result_id: 1,
            helpful: true,
            agent: "alice".to_string(),
            timestamp: now,
        })
        .unwrap();

        assert_eq!(log.searches().unwrap().len(), 1);
        assert_eq!(log.unanswered().unwrap()[0].count, 2);
        assert!(log.feedback().unwrap()[0].helpful);
    }
}
