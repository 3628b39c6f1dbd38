//! Recursive-descent parser from tokens to a [`Node`] tree.

use crate::{
    error::{Error, Result},
    node::{Node, VarPath},
    token::{BlockKind, Span, SpannedToken, Token},
};

/// Default limit on nested blocks.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Parse tokens with the default nesting limit.
pub fn parse(tokens: &[SpannedToken]) -> Result<Vec<Node>> {
    Parser::new().parse(tokens)
}

/// Template parser configuration.
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum number of nested blocks.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build the node tree.
    ///
    /// Every block must be closed by a tag of the same kind, innermost
    /// first. Nesting deeper than the configured limit fails with
    /// [`Error::MaxNestingExceeded`] instead of recursing further.
    pub fn parse(&self, tokens: &[SpannedToken]) -> Result<Vec<Node>> {
        let mut cursor = Cursor {
            tokens,
            pos: 0,
            max_depth: self.max_depth,
        };
        let (nodes, end) = cursor.sequence(0)?;
        match end {
            End::Eof => {
                tracing::trace!(nodes = nodes.len(), "parsed template");
                Ok(nodes)
            }
            End::Else(span) => Err(Box::new(Error::UnexpectedElse { span: span.into() })),
            End::Close(found, span) => Err(Box::new(Error::UnexpectedClose {
                found,
                span: span.into(),
            })),
        }
    }
}

/// What stopped a sequence of nodes.
enum End {
    Eof,
    Else(Span),
    Close(BlockKind, Span),
}

struct Cursor<'t> {
    tokens: &'t [SpannedToken],
    pos: usize,
    max_depth: usize,
}

impl<'t> Cursor<'t> {
    /// Parse nodes until end of input, `else` or a closing tag.
    ///
    /// `depth` is the number of blocks enclosing this sequence.
    fn sequence(&mut self, depth: usize) -> Result<(Vec<Node>, End)> {
        let tokens = self.tokens;
        let mut nodes: Vec<Node> = Vec::new();

        while let Some(spanned) = tokens.get(self.pos) {
            self.pos += 1;
            match &spanned.token {
                Token::Text(text) => match nodes.last_mut() {
                    Some(Node::Text(prev)) => prev.push_str(text),
                    _ => nodes.push(Node::Text(text.clone())),
                },
                Token::Var(path) => nodes.push(Node::Var(VarPath::new(path.as_str()))),
                Token::BlockOpen { kind, args } => {
                    let node = self.block(*kind, args, spanned.span, depth)?;
                    nodes.push(node);
                }
                Token::Else => return Ok((nodes, End::Else(spanned.span))),
                Token::BlockClose(kind) => return Ok((nodes, End::Close(*kind, spanned.span))),
            }
        }

        Ok((nodes, End::Eof))
    }

    fn block(
        &mut self,
        kind: BlockKind,
        args: &[String],
        open: Span,
        depth: usize,
    ) -> Result<Node> {
        if depth >= self.max_depth {
            return Err(Box::new(Error::MaxNestingExceeded {
                limit: self.max_depth,
                span: open.into(),
            }));
        }

        let (body, end) = self.sequence(depth + 1)?;
        let otherwise = match end {
            End::Else(_) => {
                let (otherwise, end) = self.sequence(depth + 1)?;
                match end {
                    End::Else(span) => {
                        return Err(Box::new(Error::DuplicateElse {
                            kind,
                            span: span.into(),
                        }));
                    }
                    end => {
                        self.expect_close(kind, open, end)?;
                        otherwise
                    }
                }
            }
            end => {
                self.expect_close(kind, open, end)?;
                Vec::new()
            }
        };

        Ok(build_block(kind, args, body, otherwise))
    }

    fn expect_close(&self, kind: BlockKind, open: Span, end: End) -> Result<()> {
        match end {
            End::Close(found, _) if found == kind => Ok(()),
            End::Close(found, span) => Err(Box::new(Error::MismatchedClose {
                expected: kind,
                found,
                open: open.into(),
                span: span.into(),
            })),
            End::Eof => Err(Box::new(Error::UnclosedBlock {
                kind,
                span: open.into(),
            })),
            End::Else(span) => Err(Box::new(Error::DuplicateElse {
                kind,
                span: span.into(),
            })),
        }
    }
}

fn build_block(kind: BlockKind, args: &[String], body: Vec<Node>, otherwise: Vec<Node>) -> Node {
    let path = VarPath::new(args.first().map(String::as_str).unwrap_or_default());
    match kind {
        BlockKind::If => Node::If {
            cond: path,
            body,
            otherwise,
        },
        BlockKind::Unless => Node::Unless {
            cond: path,
            body,
            otherwise,
        },
        BlockKind::IfEq => Node::IfEq {
            name: path,
            literal: args.get(1).cloned().unwrap_or_default(),
            body,
            otherwise,
        },
        BlockKind::Each => Node::Each {
            collection: path,
            body,
            otherwise,
        },
    }
}
