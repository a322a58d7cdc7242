//! Scanner turning schema text into tokens.
//!
//! The scanner never fails: characters it does not recognize become
//! [`TokenKind::Illegal`] tokens and scanning continues, leaving the decision
//! to reject them to the parser. Comments are kept as [`TokenKind::Comment`]
//! tokens; [`filter_comments`](super::filter_comments) removes them.
//!
//! Example schema:
//! ```text
//! // forums live under the platform namespace
//! definition platform/forum {
//!     relation owner: platform/user
//!     relation viewer: platform/user | platform/user:*
//!     permission view = owner + viewer
//! }
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while},
    character::complete::{char, satisfy},
    combinator::{consumed, opt, recognize, rest, value},
    sequence::{pair, tuple},
    IResult,
};

use super::token::{Token, TokenKind};

// ============ Lexeme Recognizers ============

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

/// `// ...` up to, not including, the end of line.
fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("//"), take_while(|c| c != '\n')))(input)
}

/// `/* ... */`, or everything to end of input when unterminated.
fn block_comment(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        tag("/*"),
        alt((take_until("*/"), rest)),
        opt(tag("*/")),
    )))(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    alt((line_comment, block_comment))(input)
}

/// Punctuation and operators. Two-character operators are tried first.
fn punctuation(input: &str) -> IResult<&str, TokenKind> {
    alt((
        value(TokenKind::Wildcard, tag(":*")),
        value(TokenKind::Arrow, tag("->")),
        value(TokenKind::Colon, char(':')),
        value(TokenKind::Minus, char('-')),
        value(TokenKind::LBrace, char('{')),
        value(TokenKind::RBrace, char('}')),
        value(TokenKind::LParen, char('(')),
        value(TokenKind::RParen, char(')')),
        value(TokenKind::Pipe, char('|')),
        value(TokenKind::Ampersand, char('&')),
        value(TokenKind::Plus, char('+')),
        value(TokenKind::Equal, char('=')),
    ))(input)
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Path separators are part of identifiers so `platform/user` is one token.
fn is_identifier_char(c: char) -> bool {
    is_identifier_start(c) || c == '/'
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(is_identifier_start),
        take_while(is_identifier_char),
    ))(input)
}

/// Classifies the lexeme at the start of a non-empty `input`.
fn lexeme(input: &str) -> (TokenKind, &str) {
    if let Ok((_, text)) = comment(input) {
        return (TokenKind::Comment, text);
    }
    if let Ok((_, (text, kind))) = consumed(punctuation)(input) {
        return (kind, text);
    }
    if let Ok((_, word)) = identifier(input) {
        let kind = TokenKind::keyword(word).unwrap_or(TokenKind::Identifier);
        return (kind, word);
    }
    let width = input.chars().next().map_or(0, char::len_utf8);
    (TokenKind::Illegal, &input[..width])
}

// ============ Scanner ============

/// Incremental scanner tracking line and column as characters are consumed.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    rest: &'a str,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            line: 1,
            column: 1,
        }
    }

    /// Scans the whole input. The result always ends with exactly one
    /// [`TokenKind::Eof`] token.
    pub fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            if self.rest.is_empty() {
                tokens.push(Token::new(TokenKind::Eof, "", self.line, self.column));
                return tokens;
            }
            tokens.push(self.next_token());
        }
    }

    fn next_token(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let (kind, text) = lexeme(self.rest);
        self.advance(text.len());
        Token::new(kind, text, line, column)
    }

    fn skip_whitespace(&mut self) {
        if let Ok((_, spaces)) = whitespace(self.rest) {
            self.advance(spaces.len());
        }
    }

    /// Consumes `len` bytes, updating the position.
    fn advance(&mut self, len: usize) {
        let (consumed, remaining) = self.rest.split_at(len);
        for c in consumed.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.rest = remaining;
    }
}

/// Scans `input` into tokens, comments included.
pub fn scan(input: &str) -> Vec<Token> {
    Scanner::new(input).scan()
}
