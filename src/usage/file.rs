//! File-backed usage log.
//!
//! Three JSON array files live side by side in one directory:
//!
//! - `search-logs.json`: every submitted query
//! - `unanswered-questions.json`: the unanswered aggregate
//! - `feedback-logs.json`: result feedback
//!
//! Each file is read, modified and rewritten per record. Entries are kept as
//! raw JSON values, so records written by older versions of the service in a
//! different shape survive rewrites even though the typed accessors skip
//! them. A file that is missing, unreadable or not a JSON array is treated as
//! empty so that a damaged log never blocks searching.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::usage::{
    FeedbackEntry, SearchLogEntry, UnansweredQuestion, UsageLog, upsert_unanswered,
};

pub const SEARCH_LOG_FILE: &str = "search-logs.json";
pub const UNANSWERED_FILE: &str = "unanswered-questions.json";
pub const FEEDBACK_LOG_FILE: &str = "feedback-logs.json";

/// Usage log stored as JSON files in a directory.
#[derive(Debug)]
pub struct FileUsageLog {
    directory: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileUsageLog {
    /// Open the log directory, creating it and any missing files.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;

        for name in [SEARCH_LOG_FILE, UNANSWERED_FILE, FEEDBACK_LOG_FILE] {
            let path = directory.join(name);
            if !path.exists() {
                fs::write(&path, "[]")?;
                debug!("Initialised {}", path.display());
            }
        }

        Ok(FileUsageLog {
            directory,
            write_lock: Mutex::new(()),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Raw entries of one log file.
    fn read_values(&self, name: &str) -> Vec<Value> {
        let path = self.directory.join(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Treating {} as empty: {e}", path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(values) => values,
            Err(e) => {
                warn!("Treating {} as empty: {e}", path.display());
                Vec::new()
            }
        }
    }

    /// Entries of one log file that match the current schema.
    fn read<T: DeserializeOwned>(&self, name: &str) -> Vec<T> {
        self.read_values(name)
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping malformed entry in {name}: {e}");
                    None
                }
            })
            .collect()
    }

    fn modify<F>(&self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Value>) -> Result<()>,
    {
        let _guard = self.write_lock.lock();
        let mut values = self.read_values(name);
        f(&mut values)?;
        let json = serde_json::to_string_pretty(&values)?;
        fs::write(self.directory.join(name), json)?;
        Ok(())
    }

    fn append<T: Serialize>(&self, name: &str, entry: &T) -> Result<()> {
        let value = serde_json::to_value(entry)?;
        self.modify(name, |values| {
            values.push(value);
            Ok(())
        })
    }
}

/// Merge one unanswered ask into raw log entries, matching on the `question`
/// field the same way [`upsert_unanswered`] does.
fn upsert_unanswered_value(
    values: &mut Vec<Value>,
    question: &str,
    agent: &str,
    at: DateTime<Utc>,
) -> Result<()> {
    let question = question.trim();
    let key = question.to_lowercase();

    let existing = values.iter().position(|value| {
        value
            .get("question")
            .and_then(Value::as_str)
            .is_some_and(|q| q.trim().to_lowercase() == key)
    });

    match existing.and_then(|index| values[index].as_object_mut()) {
        Some(entry) => {
            let count = entry.get("count").and_then(Value::as_u64).unwrap_or(0);
            entry.insert("count".to_string(), Value::from(count + 1));
            entry.insert("lastAsked".to_string(), serde_json::to_value(at)?);
        }
        None => {
            let mut entries = Vec::new();
            upsert_unanswered(&mut entries, question, agent, at);
            for entry in entries {
                values.push(serde_json::to_value(entry)?);
            }
        }
    }
    Ok(())
}

impl UsageLog for FileUsageLog {
    fn record_search(&self, query: &str, at: DateTime<Utc>) -> Result<()> {
        self.append(
            SEARCH_LOG_FILE,
            &SearchLogEntry {
                query: query.to_string(),
                timestamp: at,
            },
        )
    }

    fn record_unanswered(&self, question: &str, agent: &str, at: DateTime<Utc>) -> Result<()> {
        self.modify(UNANSWERED_FILE, |values| {
            upsert_unanswered_value(values, question, agent, at)
        })
    }

    fn record_feedback(&self, entry: FeedbackEntry) -> Result<()> {
        self.append(FEEDBACK_LOG_FILE, &entry)
    }

    fn searches(&self) -> Result<Vec<SearchLogEntry>> {
        Ok(self.read(SEARCH_LOG_FILE))
    }

    fn unanswered(&self) -> Result<Vec<UnansweredQuestion>> {
        Ok(self.read(UNANSWERED_FILE))
    }

    fn feedback(&self) -> Result<Vec<FeedbackEntry>> {
        Ok(self.read(FEEDBACK_LOG_FILE))
    }
}
