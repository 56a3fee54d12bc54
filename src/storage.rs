//! Document storage for the knowledge base.
//!
//! The ranking engine only ever reads an immutable snapshot of the collection.
//! Mutation lives here: every backend keeps its documents behind an
//! `Arc<Vec<Document>>` and applies create/update/delete copy-on-write under a
//! single-writer lock, so a snapshot taken before a mutation is never changed
//! by it.
//!
//! # Storage Types
//!
//! ## JsonFileStore
//! - The knowledge-base JSON file (`{"documents": [...]}`)
//! - Created empty when missing; rewritten atomically after each mutation
//!
//! ## MemoryStore
//! - In-memory collection for tests and embedding
//!
//! # Example
//!
//! ```
//! use kbsearch::document::NewDocument;
//! use kbsearch::storage::{DocumentStore, StorageConfig, StorageFactory};
//!
//! # fn main() -> kbsearch::error::Result<()> {
//! let store = StorageFactory::create(StorageConfig::Memory)?;
//! let doc = store.create(NewDocument {
//!     title: "Store hours".to_string(),
//!     content: "We are open 9 to 5.".to_string(),
//!     ..Default::default()
//! })?;
//!
//! assert_eq!(store.snapshot()?.len(), 1);
//! assert_eq!(store.get(doc.id)?.unwrap().category, "general");
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::document::{Document, DocumentId, DocumentUpdate, NewDocument};
use crate::error::{KbSearchError, Result};

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// A trait for document collections the search service reads from.
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Current immutable view of every document.
    fn snapshot(&self) -> Result<Arc<Vec<Document>>>;

    /// Look up one document.
    fn get(&self, id: DocumentId) -> Result<Option<Document>> {
        Ok(self.snapshot()?.iter().find(|doc| doc.id == id).cloned())
    }

    /// Add a document, assigning its id and date.
    fn create(&self, document: NewDocument) -> Result<Document>;

    /// Apply a partial edit. Unknown ids are an error.
    fn update(&self, id: DocumentId, update: DocumentUpdate) -> Result<Document>;

    /// Remove a document. Returns false if the id was not present.
    fn delete(&self, id: DocumentId) -> Result<bool>;

    /// Number of stored documents.
    fn len(&self) -> Result<usize> {
        Ok(self.snapshot()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Type-safe configuration for the supported backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Memory,
    JsonFile(PathBuf),
}

/// Helper for constructing concrete stores.
pub struct StorageFactory;

impl StorageFactory {
    pub fn create(config: StorageConfig) -> Result<Arc<dyn DocumentStore>> {
        match config {
            StorageConfig::Memory => Ok(Arc::new(MemoryStore::new())),
            StorageConfig::JsonFile(path) => Ok(Arc::new(JsonFileStore::open(path)?)),
        }
    }
}

/// Date stamp stored in `lastUpdated`.
pub(crate) fn date_stamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Millisecond timestamp ids, bumped past the current maximum so ids stay
/// unique when several documents are created within one millisecond.
pub(crate) fn next_id(documents: &[Document], now: DateTime<Utc>) -> DocumentId {
    let from_clock = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let after_max = documents
        .iter()
        .map(|doc| doc.id)
        .max()
        .map_or(1, |max| max.saturating_add(1));
    from_clock.max(after_max)
}

pub(crate) fn create_in(
    documents: &mut Vec<Document>,
    new_document: NewDocument,
    now: DateTime<Utc>,
) -> Document {
    let id = next_id(documents, now);
    let document = new_document.into_document(id, date_stamp(now));
    documents.push(document.clone());
    document
}

pub(crate) fn update_in(
    documents: &mut [Document],
    id: DocumentId,
    update: DocumentUpdate,
    now: DateTime<Utc>,
) -> Result<Document> {
    let document = documents
        .iter_mut()
        .find(|doc| doc.id == id)
        .ok_or_else(|| KbSearchError::not_found("Document not found"))?;
    update.apply_to(document, date_stamp(now));
    Ok(document.clone())
}

pub(crate) fn delete_in(documents: &mut Vec<Document>, id: DocumentId) -> bool {
    let before = documents.len();
    documents.retain(|doc| doc.id != id);
    documents.len() != before
}
