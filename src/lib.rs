//! # kbsearch
//!
//! Lexical search for a customer-service knowledge base.
//!
//! Agents type free-text questions; the engine scores every document in a
//! small collection against the normalized query and returns a short, ranked
//! list. Around the engine sit the pieces a deployment needs: a document
//! store, a usage log that tracks unanswered questions, plain-text ingestion
//! and a CLI.
//!
//! ## Features
//!
//! - Weighted field scoring (phrase, title, keywords, category, content)
//! - Coverage threshold and minimum score before a document is shown
//! - Lenient, strict and minimal ranking presets, tunable from JSON
//! - Pure ranking core over immutable document snapshots
//! - JSON file store with copy-on-write snapshots
//!
//! ## Example
//!
//! ```
//! use kbsearch::document::Document;
//! use kbsearch::search::{SearchConfig, search};
//!
//! let documents = vec![
//!     Document::builder()
//!         .id(1)
//!         .title("Refund Policy")
//!         .content("Customers may request a refund within 30 days.")
//!         .keywords(["refund", "policy"])
//!         .build(),
//! ];
//!
//! let results = search("refund policy", &documents, &SearchConfig::default());
//! assert_eq!(results[0].document.id, 1);
//! ```

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod ingest;
pub mod search;
pub mod service;
pub mod storage;
pub mod usage;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
