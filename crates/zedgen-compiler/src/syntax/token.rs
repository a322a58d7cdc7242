//! Lexical token definitions.

use std::fmt;

/// Classification of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Always the last token of a scan.
    Eof,
    /// A character the scanner does not recognize.
    Illegal,
    Identifier,

    // Keywords
    Definition,
    Relation,
    Permission,
    Caveat,

    /// `// ...` or `/* ... */`
    Comment,

    // Punctuation and operators
    LBrace,
    RBrace,
    LParen,
    RParen,
    Colon,
    Pipe,
    Ampersand,
    Plus,
    Minus,
    Equal,
    Arrow,
    Wildcard,
}

impl TokenKind {
    /// Returns the keyword kind for a reserved word, if `literal` is one.
    pub fn keyword(literal: &str) -> Option<Self> {
        match literal {
            "definition" => Some(Self::Definition),
            "relation" => Some(Self::Relation),
            "permission" => Some(Self::Permission),
            "caveat" => Some(Self::Caveat),
            _ => None,
        }
    }

    /// The fixed literal of punctuation and keyword kinds.
    pub fn fixed_literal(self) -> Option<&'static str> {
        let literal = match self {
            Self::Definition => "definition",
            Self::Relation => "relation",
            Self::Permission => "permission",
            Self::Caveat => "caveat",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Colon => ":",
            Self::Pipe => "|",
            Self::Ampersand => "&",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Equal => "=",
            Self::Arrow => "->",
            Self::Wildcard => ":*",
            Self::Eof | Self::Illegal | Self::Identifier | Self::Comment => return None,
        };
        Some(literal)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eof => f.write_str("end of input"),
            Self::Illegal => f.write_str("illegal character"),
            Self::Identifier => f.write_str("identifier"),
            Self::Comment => f.write_str("comment"),
            Self::Definition | Self::Relation | Self::Permission | Self::Caveat => {
                write!(f, "keyword '{}'", self.fixed_literal().unwrap_or_default())
            }
            other => write!(f, "'{}'", other.fixed_literal().unwrap_or_default()),
        }
    }
}

/// A classified slice of schema text with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
            column,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "{}", self.kind),
            TokenKind::Identifier | TokenKind::Illegal | TokenKind::Comment => {
                write!(f, "{} '{}'", self.kind, self.literal)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
