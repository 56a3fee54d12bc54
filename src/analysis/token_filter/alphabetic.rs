//! ASCII-alphabetic filter.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Keeps only tokens made entirely of ASCII letters (`[a-zA-Z]+`).
///
/// Because every surviving term is plain ASCII letters, terms can be embedded
/// in a regex pattern without further escaping concerns.
#[derive(Clone, Debug, Default)]
pub struct AsciiAlphabeticFilter;

impl AsciiAlphabeticFilter {
    pub fn new() -> Self {
        AsciiAlphabeticFilter
    }

    /// Returns true if the text is non-empty and all ASCII letters.
    pub fn is_alphabetic(text: &str) -> bool {
        !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphabetic())
    }
}

impl Filter for AsciiAlphabeticFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        Box::new(tokens.filter(|token| Self::is_alphabetic(&token.text)))
    }

    fn name(&self) -> &'static str {
        "ascii_alphabetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_rejects_digits_and_punctuation() {
        let tokens = vec![
            Token::new("refund", 0),
            Token::new("30", 1),
            Token::new("days?", 2),
            Token::new("e-mail", 3),
            Token::new("café", 4),
        ];

        let result: Vec<_> = AsciiAlphabeticFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["refund"]);
    }
}
