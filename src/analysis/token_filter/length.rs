//! Minimum-length filter.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Drops tokens shorter than `min_length` bytes.
#[derive(Clone, Debug)]
pub struct MinLengthFilter {
    min_length: usize,
}

impl MinLengthFilter {
    /// Create a filter keeping tokens with `len() >= min_length`.
    pub fn new(min_length: usize) -> Self {
        MinLengthFilter { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Filter for MinLengthFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let min_length = self.min_length;
        Box::new(tokens.filter(move |token| token.len() >= min_length))
    }

    fn name(&self) -> &'static str {
        "min_length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_min_length_is_inclusive() {
        let tokens = vec![
            Token::new("go", 0),
            Token::new("how", 1),
            Token::new("fees", 2),
        ];

        let result: Vec<_> = MinLengthFilter::new(3)
            .filter(Box::new(tokens.into_iter()))
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["how", "fees"]);
    }
}
