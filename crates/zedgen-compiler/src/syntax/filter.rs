use super::token::{Token, TokenKind};

/// Drops comment tokens, keeping every other token unchanged and in order.
pub fn filter_comments(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|token| token.kind != TokenKind::Comment)
        .collect()
}
