//! Lexer output.

use std::fmt;

use miette::SourceSpan;

/// Byte range in the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Span covering `start..end`.
    pub fn between(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            len: end.saturating_sub(start),
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from((span.offset, span.len))
    }
}

/// The kinds of paired block tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    If,
    IfEq,
    Unless,
    Each,
}

impl BlockKind {
    /// Look up a block kind by its tag name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "if" => Some(BlockKind::If),
            "if_eq" => Some(BlockKind::IfEq),
            "unless" => Some(BlockKind::Unless),
            "each" => Some(BlockKind::Each),
            _ => None,
        }
    }

    /// The tag name, as written after `#` or `/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::If => "if",
            BlockKind::IfEq => "if_eq",
            BlockKind::Unless => "unless",
            BlockKind::Each => "each",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A lexical token.
///
/// Block arguments are already checked by the lexer: `if`, `unless` and
/// `each` carry exactly one path, `if_eq` carries a path followed by the
/// unquoted literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    Var(String),
    BlockOpen { kind: BlockKind, args: Vec<String> },
    Else,
    BlockClose(BlockKind),
}

/// A token with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

impl SpannedToken {
    pub fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }
}
