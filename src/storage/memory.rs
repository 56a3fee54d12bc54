//! In-memory document store.

use std::sync::Arc;

use chrono::Utc;
use log::info;
use parking_lot::RwLock;

use crate::document::{Document, DocumentId, DocumentUpdate, NewDocument};
use crate::error::Result;
use crate::storage::{DocumentStore, create_in, delete_in, update_in};

/// An in-memory document store.
///
/// Readers clone the current `Arc` and never block writers for longer than
/// the pointer swap.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Arc<Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given documents.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        MemoryStore {
            documents: RwLock::new(Arc::new(documents)),
        }
    }

    /// Apply `apply` to a private copy of the collection, hand the result to
    /// `commit`, and publish it only if both succeed.
    pub(crate) fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut Vec<Document>) -> Result<T>,
        commit: impl FnOnce(&[Document], &T) -> Result<()>,
    ) -> Result<T> {
        let mut guard = self.documents.write();
        let mut next = (**guard).clone();
        let value = apply(&mut next)?;
        commit(&next, &value)?;
        *guard = Arc::new(next);
        Ok(value)
    }

    pub(crate) fn create_with(
        &self,
        document: NewDocument,
        commit: impl FnOnce(&[Document]) -> Result<()>,
    ) -> Result<Document> {
        let created = self.mutate(
            |docs| Ok(create_in(docs, document, Utc::now())),
            |docs, _| commit(docs),
        )?;
        info!("Created document {} ({:?})", created.id, created.title);
        Ok(created)
    }

    pub(crate) fn update_with(
        &self,
        id: DocumentId,
        update: DocumentUpdate,
        commit: impl FnOnce(&[Document]) -> Result<()>,
    ) -> Result<Document> {
        let updated = self.mutate(
            |docs| update_in(docs, id, update, Utc::now()),
            |docs, _| commit(docs),
        )?;
        info!("Updated document {id}");
        Ok(updated)
    }

    pub(crate) fn delete_with(
        &self,
        id: DocumentId,
        commit: impl FnOnce(&[Document]) -> Result<()>,
    ) -> Result<bool> {
        let removed = self.mutate(
            |docs| Ok(delete_in(docs, id)),
            |docs, removed: &bool| if *removed { commit(docs) } else { Ok(()) },
        )?;
        if removed {
            info!("Deleted document {id}");
        }
        Ok(removed)
    }
}

impl DocumentStore for MemoryStore {
    fn snapshot(&self) -> Result<Arc<Vec<Document>>> {
        Ok(Arc::clone(&self.documents.read()))
    }

    fn create(&self, document: NewDocument) -> Result<Document> {
        self.create_with(document, |_| Ok(()))
    }

    fn update(&self, id: DocumentId, update: DocumentUpdate) -> Result<Document> {
        self.update_with(id, update, |_| Ok(()))
    }

    fn delete(&self, id: DocumentId) -> Result<bool> {
        self.delete_with(id, |_| Ok(()))
    }
}
