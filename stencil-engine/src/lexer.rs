//! Scans template text into a flat token stream.

use crate::{
    error::{Error, Result},
    token::{BlockKind, Span, SpannedToken, Token},
};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Tokenize template source.
///
/// Text outside tags becomes [`Token::Text`]; adjacent text (including
/// escaped braces) is merged into a single run.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>> {
    let tokens = Lexer::new(source).run()?;
    tracing::trace!(tokens = tokens.len(), bytes = source.len(), "tokenized template");
    Ok(tokens)
}

struct Lexer<'a> {
    src: &'a str,
    tokens: Vec<SpannedToken>,
    text: String,
    text_start: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            tokens: Vec::new(),
            text: String::new(),
            text_start: 0,
        }
    }

    fn run(mut self) -> Result<Vec<SpannedToken>> {
        let src = self.src;
        let bytes = src.as_bytes();
        let mut pos = 0;
        let mut run_start = 0;

        while pos < bytes.len() {
            // Tags and escapes start with an ASCII byte, which is always a
            // char boundary, so slicing at `pos` below is safe.
            if !matches!(bytes[pos], b'\\' | b'{') {
                pos += 1;
                continue;
            }

            let rest = &src[pos..];
            let escape = if rest.starts_with("\\{\\{") {
                Some(4)
            } else if rest.starts_with("\\{{") {
                Some(3)
            } else {
                None
            };

            if let Some(len) = escape {
                self.push_text(run_start, pos);
                self.push_literal(pos, OPEN);
                pos += len;
                run_start = pos;
                continue;
            }

            if rest.starts_with(OPEN) {
                self.push_text(run_start, pos);
                self.flush_text(pos);
                pos = self.lex_tag(pos)?;
                run_start = pos;
                continue;
            }

            pos += 1;
        }

        self.push_text(run_start, bytes.len());
        self.flush_text(bytes.len());
        Ok(self.tokens)
    }

    /// Append `src[start..end]` to the pending text run.
    fn push_text(&mut self, start: usize, end: usize) {
        if start < end {
            let src = self.src;
            self.push_literal(start, &src[start..end]);
        }
    }

    fn push_literal(&mut self, at: usize, text: &str) {
        if self.text.is_empty() {
            self.text_start = at;
        }
        self.text.push_str(text);
    }

    fn flush_text(&mut self, end: usize) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        let span = Span::between(self.text_start, end);
        self.tokens.push(SpannedToken::new(Token::Text(text), span));
    }

    /// Lex the tag opening at `open`, returning the position after it.
    fn lex_tag(&mut self, open: usize) -> Result<usize> {
        let inner_start = open + OPEN.len();
        let Some(close) = find_close(&self.src[inner_start..]) else {
            return Err(Box::new(Error::UnterminatedTag {
                offset: open,
                span: Span::between(open, self.src.len()).into(),
            }));
        };
        let inner_end = inner_start + close;
        let end = inner_end + CLOSE.len();
        let span = Span::between(open, end);
        let inner = self.src[inner_start..inner_end].trim();

        if let Some(token) = lex_tag_body(inner, span)? {
            self.tokens.push(SpannedToken::new(token, span));
        }
        Ok(end)
    }
}

/// Offset of the `}}` ending a tag body.
///
/// In `if_eq` tags a `}}` inside the quoted literal does not close the tag.
/// If the quotes never balance, the first `}}` is used so the literal is
/// reported as unterminated.
fn find_close(body: &str) -> Option<usize> {
    let trimmed = body.trim_start();
    let is_if_eq = trimmed
        .strip_prefix('#')
        .and_then(|rest| rest.strip_prefix(BlockKind::IfEq.as_str()))
        .is_some_and(|rest| rest.starts_with(char::is_whitespace));
    if !is_if_eq {
        return body.find(CLOSE);
    }

    let bytes = body.as_bytes();
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate() {
        match (quote, b) {
            (None, q @ (b'\'' | b'"')) => quote = Some(q),
            (Some(q), b) if b == q => quote = None,
            (None, b'}') if bytes.get(i + 1) == Some(&b'}') => return Some(i),
            _ => {}
        }
    }
    body.find(CLOSE)
}

/// Classify the trimmed contents of a tag. Comments yield `None`.
fn lex_tag_body(inner: &str, span: Span) -> Result<Option<Token>> {
    if inner.is_empty() {
        return Err(Box::new(Error::EmptyTag { span: span.into() }));
    }

    if inner.starts_with('!') {
        return Ok(None);
    }

    if let Some(rest) = inner.strip_prefix('#') {
        let (name, args) = split_word(rest);
        let kind = block_kind(name, span)?;
        let args = lex_block_args(kind, args, span)?;
        return Ok(Some(Token::BlockOpen { kind, args }));
    }

    if let Some(rest) = inner.strip_prefix('/') {
        let (name, extra) = split_word(rest);
        let kind = block_kind(name, span)?;
        if !extra.is_empty() {
            return Err(Box::new(Error::UnexpectedArgument {
                kind,
                arg: extra.to_string(),
                span: span.into(),
            }));
        }
        return Ok(Some(Token::BlockClose(kind)));
    }

    if inner == "else" {
        return Ok(Some(Token::Else));
    }

    let path = check_path(inner, span)?;
    Ok(Some(Token::Var(path)))
}

fn block_kind(name: &str, span: Span) -> Result<BlockKind> {
    BlockKind::from_name(name).ok_or_else(|| {
        Box::new(Error::UnknownBlock {
            name: name.to_string(),
            span: span.into(),
        })
    })
}

fn lex_block_args(kind: BlockKind, args: &str, span: Span) -> Result<Vec<String>> {
    let (path, rest) = split_word(args);
    if path.is_empty() {
        return Err(Box::new(Error::MissingArgument {
            kind,
            expected: "a variable name",
            span: span.into(),
        }));
    }
    let path = check_path(path, span)?;

    match kind {
        BlockKind::IfEq => {
            let literal = lex_literal(kind, rest, span)?;
            Ok(vec![path, literal])
        }
        _ => {
            if let Some(extra) = rest.split_whitespace().next() {
                return Err(Box::new(Error::UnexpectedArgument {
                    kind,
                    arg: extra.to_string(),
                    span: span.into(),
                }));
            }
            Ok(vec![path])
        }
    }
}

/// Parse a single- or double-quoted literal that must end the tag.
fn lex_literal(kind: BlockKind, rest: &str, span: Span) -> Result<String> {
    let mut chars = rest.chars();
    let quote = match chars.next() {
        Some(q @ ('\'' | '"')) => q,
        _ => {
            return Err(Box::new(Error::MissingArgument {
                kind,
                expected: "a quoted literal",
                span: span.into(),
            }));
        }
    };

    let body = &rest[quote.len_utf8()..];
    let Some(end) = body.find(quote) else {
        return Err(Box::new(Error::UnterminatedLiteral { span: span.into() }));
    };

    let trailing = body[end + quote.len_utf8()..].trim();
    if !trailing.is_empty() {
        return Err(Box::new(Error::UnexpectedArgument {
            kind,
            arg: trailing.to_string(),
            span: span.into(),
        }));
    }
    Ok(body[..end].to_string())
}

/// Split off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

fn check_path(path: &str, span: Span) -> Result<String> {
    let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '@');
    let valid = path
        .split('.')
        .all(|segment| !segment.is_empty() && segment.chars().all(valid_char));
    if valid {
        Ok(path.to_string())
    } else {
        Err(Box::new(Error::InvalidPath {
            path: path.to_string(),
            span: span.into(),
        }))
    }
}
