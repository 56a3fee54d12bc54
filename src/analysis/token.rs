//! Token types for query analysis.
//!
//! # Examples
//!
//! ```
//! use kbsearch::analysis::token::Token;
//!
//! let token = Token::new("refund", 0);
//! assert_eq!(token.text, "refund");
//! assert_eq!(token.position, 0);
//! assert_eq!(token.len(), 6);
//! ```

use serde::{Deserialize, Serialize};

/// A single unit of query text flowing through the analysis pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// Position of the token in the raw query (0-based, counted before filtering)
    pub position: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text, keeping the position.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

/// A boxed stream of tokens passed between tokenizer and filters.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("policy", 3);
        assert_eq!(token.text, "policy");
        assert_eq!(token.position, 3);
        assert!(!token.is_empty());
    }

    #[test]
    fn test_with_text_keeps_position() {
        let token = Token::new("Refund", 1).with_text("refund");
        assert_eq!(token.text, "refund");
        assert_eq!(token.position, 1);
    }
}
