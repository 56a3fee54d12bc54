//! Tokenizer implementations for query analysis.

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert text into tokens.
///
/// Tokenizers in this crate cannot fail: any input, including the empty
/// string, produces a (possibly empty) stream.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod space;

pub use space::SpaceTokenizer;
