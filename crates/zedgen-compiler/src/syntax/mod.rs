//! Schema syntax: tokens, scanner, comment filter, AST and parser.
//!
//! ```text
//! text ──scan──▶ tokens ──filter_comments──▶ tokens ──parse──▶ [Definition]
//! ```

mod ast;
mod filter;
mod parser;
#[cfg(test)]
mod parser_proptest;
mod scanner;
mod token;

pub use ast::{
    Definition, ObjectType, Operator, PermExpr, PermissionDecl, RelationDecl, RelationExpr,
};
pub use filter::filter_comments;
pub use parser::{parse, Expected, ParseError, Parser, ParserResult};
pub use scanner::{scan, Scanner};
pub use token::{Token, TokenKind};

/// Scans, filters and parses schema text.
pub fn parse_schema(input: &str) -> ParserResult<Vec<Definition>> {
    let tokens = filter_comments(scan(input));
    tracing::debug!(tokens = tokens.len(), "scanned schema");
    parse(&tokens)
}
