//! Recursive-descent parser for the schema language.
//!
//! Consumes a comment-free token stream with one token of lookahead and no
//! backtracking. The first unexpected token aborts the parse; no partial
//! result is returned.
//!
//! Grammar:
//! ```text
//! program        := definition* EOF
//! definition     := "definition" IDENT "{" (relationDecl | permissionDecl)* "}"
//! relationDecl   := "relation" IDENT ":" relationExpr
//! relationExpr   := relationAtom ("|" relationAtom)*
//! relationAtom   := IDENT+ ":*"*
//! permissionDecl := "permission" IDENT "=" permExpr
//! permExpr       := union
//! union          := intersection ("+" intersection)*
//! intersection   := exclusion ("&" exclusion)*
//! exclusion      := term ("-" term)*
//! term           := arrowChain | "(" permExpr ")"
//! arrowChain     := IDENT ("->" IDENT)*
//! ```

use std::fmt;

use thiserror::Error;

use super::ast::{
    Definition, ObjectType, Operator, PermExpr, PermissionDecl, RelationDecl, RelationExpr,
};
use super::token::{Token, TokenKind};

/// Token kinds acceptable at the position where parsing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expected(pub Vec<TokenKind>);

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{single}"),
            kinds => {
                let names: Vec<String> = kinds.iter().map(ToString::to_string).collect();
                write!(f, "one of {}", names.join(", "))
            }
        }
    }
}

/// Syntax errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found} at line {}, column {}", .found.line, .found.column)]
    UnexpectedToken { expected: Expected, found: Token },

    #[error("caveat declarations are not supported (line {line}, column {column})")]
    UnsupportedCaveat { line: usize, column: usize },
}

impl ParseError {
    /// Line and column of the offending token.
    pub fn position(&self) -> (usize, usize) {
        match self {
            Self::UnexpectedToken { found, .. } => (found.line, found.column),
            Self::UnsupportedCaveat { line, column } => (*line, *column),
        }
    }
}

/// Result type for parser operations.
pub type ParserResult<T> = Result<T, ParseError>;

/// Returned by `peek` when the token slice is exhausted or empty.
static END_OF_INPUT: Token = Token {
    kind: TokenKind::Eof,
    literal: String::new(),
    line: 1,
    column: 1,
};

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses every definition up to end of input.
    pub fn parse_definitions(mut self) -> ParserResult<Vec<Definition>> {
        let mut definitions = Vec::new();
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Eof => return Ok(definitions),
                TokenKind::Definition => definitions.push(self.parse_definition()?),
                TokenKind::Caveat => {
                    return Err(ParseError::UnsupportedCaveat {
                        line: token.line,
                        column: token.column,
                    })
                }
                _ => return Err(self.unexpected(&[TokenKind::Definition, TokenKind::Eof])),
            }
        }
    }

    // ============ Token Access ============

    fn peek(&self) -> &'a Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&END_OF_INPUT)
    }

    /// Returns the current token and moves past it. Never moves past the
    /// final token.
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn consume(&mut self, expected: TokenKind) -> ParserResult<&'a Token> {
        if self.peek().kind == expected {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&[expected]))
        }
    }

    fn unexpected(&self, expected: &[TokenKind]) -> ParseError {
        ParseError::UnexpectedToken {
            expected: Expected(expected.to_vec()),
            found: self.peek().clone(),
        }
    }

    // ============ Definitions ============

    fn parse_definition(&mut self) -> ParserResult<Definition> {
        let keyword = self.consume(TokenKind::Definition)?;
        let path = self.consume(TokenKind::Identifier)?;
        self.consume(TokenKind::LBrace)?;

        let mut definition = Definition {
            object_type: ObjectType::from_path(&path.literal),
            relations: Vec::new(),
            permissions: Vec::new(),
            line: keyword.line,
            column: keyword.column,
        };

        loop {
            match self.peek().kind {
                TokenKind::Relation => definition.relations.push(self.parse_relation()?),
                TokenKind::Permission => definition.permissions.push(self.parse_permission()?),
                TokenKind::RBrace => {
                    self.advance();
                    return Ok(definition);
                }
                _ => {
                    return Err(self.unexpected(&[
                        TokenKind::Relation,
                        TokenKind::Permission,
                        TokenKind::RBrace,
                    ]))
                }
            }
        }
    }

    // ============ Relations ============

    fn parse_relation(&mut self) -> ParserResult<RelationDecl> {
        self.consume(TokenKind::Relation)?;
        let name = self.consume(TokenKind::Identifier)?.literal.clone();
        self.consume(TokenKind::Colon)?;
        let expression = self.parse_relation_expression()?;
        Ok(RelationDecl { name, expression })
    }

    fn parse_relation_expression(&mut self) -> ParserResult<RelationExpr> {
        let mut expression = self.parse_relation_atom()?;
        while self.peek().is(TokenKind::Pipe) {
            self.advance();
            let right = self.parse_relation_atom()?;
            expression = RelationExpr::union(expression, right);
        }
        Ok(expression)
    }

    /// Consecutive identifiers are concatenated into one subject type; a
    /// trailing `:*` marks the atom as a wildcard.
    fn parse_relation_atom(&mut self) -> ParserResult<RelationExpr> {
        let mut value = self.consume(TokenKind::Identifier)?.literal.clone();
        while self.peek().is(TokenKind::Identifier) {
            value.push_str(&self.advance().literal);
        }

        let mut wildcard = false;
        while self.peek().is(TokenKind::Wildcard) {
            self.advance();
            wildcard = true;
        }

        Ok(RelationExpr::Single { value, wildcard })
    }

    // ============ Permissions ============

    fn parse_permission(&mut self) -> ParserResult<PermissionDecl> {
        self.consume(TokenKind::Permission)?;
        let name = self.consume(TokenKind::Identifier)?.literal.clone();
        self.consume(TokenKind::Equal)?;
        let expression = self.parse_permission_expression()?;
        Ok(PermissionDecl { name, expression })
    }

    fn parse_permission_expression(&mut self) -> ParserResult<PermExpr> {
        self.parse_union()
    }

    fn parse_union(&mut self) -> ParserResult<PermExpr> {
        self.parse_left_associative(TokenKind::Plus, Operator::Union, Self::parse_intersection)
    }

    fn parse_intersection(&mut self) -> ParserResult<PermExpr> {
        self.parse_left_associative(
            TokenKind::Ampersand,
            Operator::Intersection,
            Self::parse_exclusion,
        )
    }

    fn parse_exclusion(&mut self) -> ParserResult<PermExpr> {
        self.parse_left_associative(TokenKind::Minus, Operator::Exclusion, Self::parse_term)
    }

    /// operand (token operand)*, folded to the left.
    fn parse_left_associative(
        &mut self,
        token: TokenKind,
        operator: Operator,
        operand: fn(&mut Self) -> ParserResult<PermExpr>,
    ) -> ParserResult<PermExpr> {
        let mut left = operand(self)?;
        while self.peek().is(token) {
            self.advance();
            let right = operand(self)?;
            left = PermExpr::binary(operator, left, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> ParserResult<PermExpr> {
        match self.peek().kind {
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_permission_expression()?;
                self.consume(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Identifier => self.parse_arrow_chain(),
            _ => Err(self.unexpected(&[TokenKind::Identifier, TokenKind::LParen])),
        }
    }

    /// `a->b->c` folds to `(a->b)->c`; every traversal target is a bare name.
    fn parse_arrow_chain(&mut self) -> ParserResult<PermExpr> {
        let mut left = PermExpr::identifier(self.consume(TokenKind::Identifier)?.literal.clone());
        while self.peek().is(TokenKind::Arrow) {
            self.advance();
            let target = PermExpr::identifier(self.consume(TokenKind::Identifier)?.literal.clone());
            left = PermExpr::binary(Operator::Arrow, left, target);
        }
        Ok(left)
    }
}

/// Parses a comment-free token sequence into definitions.
pub fn parse(tokens: &[Token]) -> ParserResult<Vec<Definition>> {
    Parser::new(tokens).parse_definitions()
}
