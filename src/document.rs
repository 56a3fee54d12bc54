//! Knowledge-base documents.
//!
//! A [`Document`] is what agents search: a short `title`, a longer `content`
//! body, an ordered list of `keywords` and a `category`. The remaining fields
//! (`id`, `source`, `section`, `last_updated`) are bookkeeping owned by the
//! store; the ranking core never looks at them.
//!
//! Field names serialize in the camel-case shape of the on-disk knowledge-base
//! file (`lastUpdated`), and also accept the snake-case column names used by the
//! hosted table (`last_updated`).
//!
//! # Examples
//!
//! ```
//! use kbsearch::document::Document;
//!
//! let doc = Document::builder()
//!     .title("Refund Policy")
//!     .content("Customers may request a refund within 30 days.")
//!     .keyword("refund")
//!     .keyword("policy")
//!     .category("billing")
//!     .build();
//!
//! assert_eq!(doc.keywords.len(), 2);
//! assert_eq!(doc.category, "billing");
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// Category assigned to documents that do not name one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Identifier of a stored document.
pub type DocumentId = u64;

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_category))
}

/// A single knowledge-base record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: DocumentId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,

    /// Missing or `null` keywords deserialize as an empty list.
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,

    #[serde(
        default = "default_category",
        deserialize_with = "null_as_default_category"
    )]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Date of the last edit, `YYYY-MM-DD`.
    #[serde(
        default,
        alias = "last_updated",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            id: 0,
            title: String::new(),
            content: String::new(),
            keywords: Vec::new(),
            category: default_category(),
            source: None,
            section: None,
            last_updated: None,
        }
    }
}

impl Document {
    /// Create a builder for a document.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }
}

/// Builder for [`Document`], mostly useful in tests and fixtures.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn id(mut self, id: DocumentId) -> Self {
        self.document.id = id;
        self
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.document.title = title.into();
        self
    }

    pub fn content<S: Into<String>>(mut self, content: S) -> Self {
        self.document.content = content.into();
        self
    }

    /// Append one keyword.
    pub fn keyword<S: Into<String>>(mut self, keyword: S) -> Self {
        self.document.keywords.push(keyword.into());
        self
    }

    /// Replace the keyword list.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.document.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn category<S: Into<String>>(mut self, category: S) -> Self {
        self.document.category = category.into();
        self
    }

    pub fn source<S: Into<String>>(mut self, source: S) -> Self {
        self.document.source = Some(source.into());
        self
    }

    pub fn section<S: Into<String>>(mut self, section: S) -> Self {
        self.document.section = Some(section.into());
        self
    }

    pub fn build(self) -> Document {
        self.document
    }
}

/// Fields supplied when creating a document. The store assigns `id` and
/// `lastUpdated`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,

    /// `None` falls back to [`DEFAULT_CATEGORY`].
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub section: Option<String>,
}

impl NewDocument {
    /// Turn this request into a stored document with the given id and date.
    pub fn into_document(self, id: DocumentId, last_updated: String) -> Document {
        Document {
            id,
            title: self.title,
            content: self.content,
            keywords: self.keywords,
            category: self
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(default_category),
            source: self.source,
            section: self.section,
            last_updated: Some(last_updated),
        }
    }
}

/// Partial edit of an existing document. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub section: Option<String>,
}

impl DocumentUpdate {
    /// Returns true when the update would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.keywords.is_none()
            && self.category.is_none()
            && self.source.is_none()
            && self.section.is_none()
    }

    /// Apply the edit in place and stamp the new date.
    pub fn apply_to(self, document: &mut Document, last_updated: String) {
        if let Some(title) = self.title {
            document.title = title;
        }
        if let Some(content) = self.content {
            document.content = content;
        }
        if let Some(keywords) = self.keywords {
            document.keywords = keywords;
        }
        if let Some(category) = self.category {
            document.category = if category.trim().is_empty() {
                default_category()
            } else {
                category
            };
        }
        if let Some(source) = self.source {
            document.source = Some(source);
        }
        if let Some(section) = self.section {
            document.section = Some(section);
        }
        document.last_updated = Some(last_updated);
    }
}

/// On-disk shape of the knowledge-base file: `{"documents": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub documents: Vec<Document>,
}
