//! Knowledge-base file store.
//!
//! Documents live in a single pretty-printed JSON file shaped like
//! `{"documents": [...]}`. Every mutation rewrites the whole file through a
//! sibling temporary file and a rename, so readers of the file never observe a
//! half-written collection.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use crate::document::{Document, DocumentId, DocumentUpdate, KnowledgeBaseFile, NewDocument};
use crate::error::{KbSearchError, Result};
use crate::storage::{DocumentStore, MemoryStore};

/// A document store backed by the knowledge-base JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Path of the knowledge-base file.
    path: PathBuf,
    /// Loaded documents.
    documents: MemoryStore,
}

impl JsonFileStore {
    /// Open the file at `path`, creating an empty knowledge base if it does
    /// not exist. A file that exists but does not parse is an error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let documents = if path.exists() {
            Self::read_file(&path)?
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            write_file(&path, &[])?;
            info!("Created empty knowledge base at {}", path.display());
            Vec::new()
        };

        debug!("Loaded {} documents from {}", documents.len(), path.display());

        Ok(JsonFileStore {
            path,
            documents: MemoryStore::with_documents(documents),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> Result<Vec<Document>> {
        let text = fs::read_to_string(path)?;
        let file: KnowledgeBaseFile = serde_json::from_str(&text).map_err(|e| {
            KbSearchError::storage(format!(
                "Failed to parse knowledge base {}: {e}",
                path.display()
            ))
        })?;
        Ok(file.documents)
    }
}

/// Write `documents` to `path` via a temporary sibling file.
fn write_file(path: &Path, documents: &[Document]) -> Result<()> {
    let file = KnowledgeBaseFile {
        documents: documents.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file)?;

    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    fs::write(&temp, json)?;
    fs::rename(&temp, path)?;
    Ok(())
}

impl DocumentStore for JsonFileStore {
    fn snapshot(&self) -> Result<Arc<Vec<Document>>> {
        self.documents.snapshot()
    }

    fn create(&self, document: NewDocument) -> Result<Document> {
        self.documents
            .create_with(document, |docs| write_file(&self.path, docs))
    }

    fn update(&self, id: DocumentId, update: DocumentUpdate) -> Result<Document> {
        self.documents
            .update_with(id, update, |docs| write_file(&self.path, docs))
    }

    fn delete(&self, id: DocumentId) -> Result<bool> {
        self.documents
            .delete_with(id, |docs| write_file(&self.path, docs))
    }
}
