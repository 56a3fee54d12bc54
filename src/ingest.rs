//! Turning uploaded files into documents.
//!
//! Only plain text is understood. The title comes from the file name, the
//! keywords from [`KeywordExtractor`].

use std::fs;
use std::path::Path;

use log::info;

use crate::analysis::KeywordExtractor;
use crate::document::{DEFAULT_CATEGORY, NewDocument};
use crate::error::{KbSearchError, Result};

/// Section recorded on every uploaded document.
pub const UPLOADED_SECTION: &str = "Uploaded Document";

/// File extensions accepted by [`ingest_file`].
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text", "md"];

/// Build a document from an uploaded file's name and text.
pub fn ingest_text(file_name: &str, text: &str) -> NewDocument {
    NewDocument {
        title: title_from_file_name(file_name),
        content: text.trim().to_string(),
        keywords: KeywordExtractor::new().extract(text),
        category: Some(DEFAULT_CATEGORY.to_string()),
        source: Some(file_name.to_string()),
        section: Some(UPLOADED_SECTION.to_string()),
    }
}

/// Read a plain-text file and build a document from it.
pub fn ingest_file<P: AsRef<Path>>(path: P) -> Result<NewDocument> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(KbSearchError::unsupported(format!(
            "cannot extract text from {}; supported extensions: {}",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| KbSearchError::invalid_argument(format!("bad file name: {}", path.display())))?;

    let text = fs::read_to_string(path)?;
    let document = ingest_text(file_name, &text);
    info!(
        "Ingested {} ({} chars, {} keywords)",
        file_name,
        document.content.len(),
        document.keywords.len()
    );
    Ok(document)
}

/// File name with its last extension removed.
fn title_from_file_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => file_name[..dot].to_string(),
        _ => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_title_from_file_name() {
        assert_eq!(title_from_file_name("returns.policy.txt"), "returns.policy");
        assert_eq!(title_from_file_name("README"), "README");
        assert_eq!(title_from_file_name(".hidden"), ".hidden");
    }

    #[test]
    fn test_ingest_text() {
        let doc = ingest_text(
            "Shipping Times.txt",
            "  Standard shipping takes five days. Express shipping takes two days.  ",
        );

        assert_eq!(doc.title, "Shipping Times");
        assert_eq!(
            doc.content,
            "Standard shipping takes five days. Express shipping takes two days."
        );
        assert_eq!(doc.keywords[0], "shipping");
        assert_eq!(doc.source.as_deref(), Some("Shipping Times.txt"));
        assert_eq!(doc.section.as_deref(), Some(UPLOADED_SECTION));
        assert_eq!(doc.category.as_deref(), Some("general"));
    }

    #[test]
    fn test_ingest_file_rejects_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manual.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();

        let err = ingest_file(&path).unwrap_err();
        assert!(matches!(err, KbSearchError::Unsupported(_)));
    }

    #[test]
    fn test_ingest_markdown_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("warranty.MD");
        fs::write(&path, "Warranty claims need a receipt.").unwrap();

        let doc = ingest_file(&path).unwrap();
        assert_eq!(doc.title, "warranty");
        assert!(doc.keywords.contains(&"warranty".to_string()));
    }
}
