use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::token::BlockKind;

/// Result type for template compilation (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Fatal template errors.
///
/// Every variant carries the offending span. The template source is not
/// stored here; attach it when reporting with
/// `miette::Report::new(err).with_source_code(..)`.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum Error {
    #[error("unterminated tag starting at offset {offset}")]
    #[diagnostic(
        code(stencil::unterminated_tag),
        help("close the tag with '}}}}', or write '\\{{{{' for a literal '{{{{'")
    )]
    UnterminatedTag {
        offset: usize,
        #[label("tag opened here")]
        span: SourceSpan,
    },

    #[error("empty tag")]
    #[diagnostic(code(stencil::empty_tag))]
    EmptyTag {
        #[label("nothing between the braces")]
        span: SourceSpan,
    },

    #[error("invalid variable path '{path}'")]
    #[diagnostic(
        code(stencil::invalid_path),
        help("paths use letters, digits, '_', '-' and '@', separated by '.'")
    )]
    InvalidPath {
        path: String,
        #[label("invalid path")]
        span: SourceSpan,
    },

    #[error("unknown block '{name}'")]
    #[diagnostic(
        code(stencil::unknown_block),
        help("supported blocks are: if, if_eq, unless, each")
    )]
    UnknownBlock {
        name: String,
        #[label("unknown block")]
        span: SourceSpan,
    },

    #[error("'{kind}' block is missing {expected}")]
    #[diagnostic(code(stencil::missing_argument))]
    MissingArgument {
        kind: BlockKind,
        expected: &'static str,
        #[label("in this tag")]
        span: SourceSpan,
    },

    #[error("unexpected argument '{arg}' in '{kind}' tag")]
    #[diagnostic(code(stencil::unexpected_argument))]
    UnexpectedArgument {
        kind: BlockKind,
        arg: String,
        #[label("in this tag")]
        span: SourceSpan,
    },

    #[error("unterminated string literal")]
    #[diagnostic(code(stencil::unterminated_literal))]
    UnterminatedLiteral {
        #[label("literal starts in this tag")]
        span: SourceSpan,
    },

    #[error("mismatched closing tag: expected '/{expected}', found '/{found}'")]
    #[diagnostic(code(stencil::mismatched_close))]
    MismatchedClose {
        expected: BlockKind,
        found: BlockKind,
        #[label("'{expected}' block opened here")]
        open: SourceSpan,
        #[label("closed with '/{found}'")]
        span: SourceSpan,
    },

    #[error("closing tag '/{found}' has no matching open tag")]
    #[diagnostic(code(stencil::unexpected_close))]
    UnexpectedClose {
        found: BlockKind,
        #[label("nothing to close")]
        span: SourceSpan,
    },

    #[error("'{kind}' block is never closed")]
    #[diagnostic(code(stencil::unclosed_block), help("add '{{{{/{kind}}}}}'"))]
    UnclosedBlock {
        kind: BlockKind,
        #[label("opened here")]
        span: SourceSpan,
    },

    #[error("'else' outside of a block")]
    #[diagnostic(code(stencil::unexpected_else))]
    UnexpectedElse {
        #[label("not inside a block")]
        span: SourceSpan,
    },

    #[error("'{kind}' block has more than one 'else'")]
    #[diagnostic(code(stencil::duplicate_else))]
    DuplicateElse {
        kind: BlockKind,
        #[label("second 'else'")]
        span: SourceSpan,
    },

    #[error("blocks nested deeper than {limit} levels")]
    #[diagnostic(
        code(stencil::max_nesting_exceeded),
        help("flatten the template or raise the nesting limit")
    )]
    MaxNestingExceeded {
        limit: usize,
        #[label("this block exceeds the limit")]
        span: SourceSpan,
    },
}

impl Error {
    /// True for malformed-template errors, false for resource limits.
    pub fn is_syntax(&self) -> bool {
        !matches!(self, Error::MaxNestingExceeded { .. })
    }

    /// The primary span of the error.
    pub fn span(&self) -> SourceSpan {
        match self {
            Error::UnterminatedTag { span, .. }
            | Error::EmptyTag { span }
            | Error::InvalidPath { span, .. }
            | Error::UnknownBlock { span, .. }
            | Error::MissingArgument { span, .. }
            | Error::UnexpectedArgument { span, .. }
            | Error::UnterminatedLiteral { span }
            | Error::MismatchedClose { span, .. }
            | Error::UnexpectedClose { span, .. }
            | Error::UnclosedBlock { span, .. }
            | Error::UnexpectedElse { span }
            | Error::DuplicateElse { span, .. }
            | Error::MaxNestingExceeded { span, .. } => *span,
        }
    }

    /// Byte offset of the error in the template source.
    pub fn offset(&self) -> usize {
        self.span().offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::MismatchedClose {
            expected: BlockKind::If,
            found: BlockKind::Each,
            open: (0, 9).into(),
            span: (10, 9).into(),
        };
        assert_eq!(
            err.to_string(),
            "mismatched closing tag: expected '/if', found '/each'"
        );
        assert!(err.is_syntax());
        assert_eq!(err.offset(), 10);
    }

    #[test]
    fn test_nesting_is_not_syntax() {
        let err = Error::MaxNestingExceeded {
            limit: 32,
            span: (0, 1).into(),
        };
        assert!(!err.is_syntax());
    }
}
