//! Lowercase filter implementation.
//!
//! # Examples
//!
//! ```
//! use kbsearch::analysis::token_filter::Filter;
//! use kbsearch::analysis::token_filter::lowercase::LowercaseFilter;
//! use kbsearch::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Refund", 0), Token::new("POLICY", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(filtered[0].text, "refund");
//! assert_eq!(filtered[1].text, "policy");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// A filter that converts tokens to lowercase.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        Box::new(tokens.map(|token| {
            if token.text.is_ascii() {
                let lowered = token.text.to_ascii_lowercase();
                token.with_text(lowered)
            } else {
                let lowered = token.text.to_lowercase();
                token.with_text(lowered)
            }
        }))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_lowercase_filter() {
        let filter = LowercaseFilter::new();
        let tokens = vec![Token::new("HeLLo", 0), Token::new("ÉTÉ", 1)];

        let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();

        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "été");
        assert_eq!(result[1].position, 1);
    }
}
