//! De-duplication filter.

use std::collections::HashSet;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Keeps the first occurrence of each token text and drops repeats, so the
/// resulting stream is an insertion-ordered set.
#[derive(Clone, Debug, Default)]
pub struct UniqueFilter;

impl UniqueFilter {
    pub fn new() -> Self {
        UniqueFilter
    }
}

impl Filter for UniqueFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let mut seen = HashSet::new();
        Box::new(tokens.filter(move |token| seen.insert(token.text.clone())))
    }

    fn name(&self) -> &'static str {
        "unique"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_keeps_first_occurrence_order() {
        let tokens = vec![
            Token::new("refund", 0),
            Token::new("policy", 1),
            Token::new("refund", 2),
        ];

        let result: Vec<_> = UniqueFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "refund");
        assert_eq!(result[0].position, 0);
        assert_eq!(result[1].text, "policy");
    }
}
