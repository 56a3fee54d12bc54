//! Single-space tokenizer.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};

/// A tokenizer that splits text on each individual `' '` character.
///
/// Runs of spaces produce empty pieces, which are dropped; other whitespace
/// (tabs, newlines) is left inside the token, where the alphabetic filter
/// later rejects it. Callers are expected to trim the query first.
///
/// # Examples
///
/// ```
/// use kbsearch::analysis::tokenizer::{SpaceTokenizer, Tokenizer};
///
/// let tokens: Vec<_> = SpaceTokenizer::new().tokenize("reset  my password").collect();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[1].text, "my");
/// assert_eq!(tokens[1].position, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpaceTokenizer;

impl SpaceTokenizer {
    /// Create a new space tokenizer.
    pub fn new() -> Self {
        SpaceTokenizer
    }
}

impl Tokenizer for SpaceTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        let tokens: Vec<Token> = text
            .split(' ')
            .filter(|piece| !piece.is_empty())
            .enumerate()
            .map(|(position, piece)| Token::new(piece, position))
            .collect();

        Box::new(tokens.into_iter())
    }

    fn name(&self) -> &'static str {
        "space"
    }
}
