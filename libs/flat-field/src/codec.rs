//! Bracket codec for [`FlatField`] trees
//!
//! A node is written as its children joined by [`VALUE_SEPARATOR`] and wrapped
//! in [`LEVEL_START`] and [`LEVEL_END`]; a leaf is written as its trimmed
//! value. Nesting is carried by bracket pairing alone, so depth is unbounded.
//!
//! ```text
//! ["a", ["b", ""], "c"]   =>   {--a|--|{--b|--|--}|--|c--}
//! ```
//!
//! Inside a leaf, `\`, `{`, `}` and `|` are written behind [`ESCAPE`], so no
//! leaf value can form or complete a token, since every token contains one of
//! them. A node whose only child is an empty leaf is written exactly like an
//! empty node and reads back as one.

use crate::error::{Error, Result};
use crate::field::FlatField;

pub const LEVEL_START: &str = "{--";
pub const LEVEL_END: &str = "--}";
pub const VALUE_SEPARATOR: &str = "|--|";

pub const ESCAPE: char = '\\';

const TOKENS: [&str; 3] = [LEVEL_START, LEVEL_END, VALUE_SEPARATOR];

/// Serializes `field` into its stored text form.
pub fn build(field: &FlatField) -> String {
    let mut out = String::new();
    write_field(field, &mut out);
    out
}

fn write_field(field: &FlatField, out: &mut String) {
    match field {
        FlatField::Leaf(value) => {
            for c in value.trim().chars() {
                if matches!(c, ESCAPE | '{' | '}' | '|') {
                    out.push(ESCAPE);
                }
                out.push(c);
            }
        }
        FlatField::Node(children) => {
            out.push_str(LEVEL_START);
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push_str(VALUE_SEPARATOR);
                }
                write_field(child, out);
            }
            out.push_str(LEVEL_END);
        }
    }
}

/// Reads a tree back from its stored text form.
///
/// Text without any token is a single leaf. Anything else must be exactly
/// one balanced level; otherwise [`Error::MalformedFlatField`] reports the
/// byte offset where reading stopped.
pub fn parse(input: &str) -> Result<FlatField> {
    let tokens = Lexer::new(input).tokenize();
    match tokens.as_slice() {
        [] => return Ok(FlatField::leaf("")),
        [(_, Tok::Text(value))] => return Ok(FlatField::leaf(unescape(value))),
        [(_, Tok::Start), ..] => {}
        [(pos, _), ..] => {
            return Err(Error::malformed(*pos, "expected a level start"));
        }
    }

    let mut parser = Parser {
        tokens,
        idx: 1,
        end: input.len(),
    };
    let root = parser.parse_level(1)?;
    if let Some((pos, _)) = parser.next() {
        return Err(Error::malformed(pos, "unexpected content after the root level"));
    }
    Ok(root)
}

/// Drops the escape character in front of each escaped character. A trailing
/// lone escape is kept as is.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            out.push(chars.next().unwrap_or(ESCAPE));
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tok<'a> {
    Start,
    End,
    Separator,
    Text(&'a str),
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn tokenize(mut self) -> Vec<(usize, Tok<'a>)> {
        let mut out = Vec::new();
        while let Some(tok) = self.next_tok() {
            out.push(tok);
        }
        out
    }

    fn next_tok(&mut self) -> Option<(usize, Tok<'a>)> {
        let rest = &self.input[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let start = self.pos;

        for (token, tok) in [
            (LEVEL_START, Tok::Start),
            (LEVEL_END, Tok::End),
            (VALUE_SEPARATOR, Tok::Separator),
        ] {
            if rest.starts_with(token) {
                self.pos += token.len();
                return Some((start, tok));
            }
        }

        // Tokens are ASCII, so only their first bytes need a closer look and
        // every stop lands on a char boundary.
        let bytes = rest.as_bytes();
        let mut len = 0;
        while len < bytes.len() {
            match bytes[len] {
                b'\\' => {
                    len += 1;
                    len += rest[len..].chars().next().map_or(0, char::len_utf8);
                }
                b'{' | b'-' | b'|'
                    if len > 0 && TOKENS.iter().any(|t| bytes[len..].starts_with(t.as_bytes())) =>
                {
                    break
                }
                _ => len += 1,
            }
        }
        self.pos += len;
        Some((start, Tok::Text(&rest[..len])))
    }
}

struct Parser<'a> {
    tokens: Vec<(usize, Tok<'a>)>,
    idx: usize,
    end: usize,
}

impl<'a> Parser<'a> {
    fn next(&mut self) -> Option<(usize, Tok<'a>)> {
        let tok = self.tokens.get(self.idx).copied();
        if tok.is_some() {
            self.idx += 1;
        }
        tok
    }

    /// Reads the children of a level whose start token was just consumed.
    fn parse_level(&mut self, depth: usize) -> Result<FlatField> {
        tracing::trace!(depth, "reading flat field level");

        let mut children = Vec::new();
        // Text seen in the current slot, if any.
        let mut text: Option<&str> = None;
        // The current slot already holds a nested level.
        let mut nested = false;
        let mut separated = false;

        loop {
            let Some((pos, tok)) = self.next() else {
                return Err(Error::malformed(
                    self.end,
                    format!("level at depth {depth} is never closed"),
                ));
            };

            match tok {
                Tok::Text(value) => {
                    if nested {
                        if !value.trim().is_empty() {
                            return Err(Error::malformed(
                                pos,
                                "text follows a nested level without a separator",
                            ));
                        }
                    } else {
                        text = Some(value);
                    }
                }
                Tok::Start => {
                    if nested {
                        return Err(Error::malformed(
                            pos,
                            "nested levels must be separated by a value separator",
                        ));
                    }
                    if text.is_some_and(|t| !t.trim().is_empty()) {
                        return Err(Error::malformed(
                            pos,
                            "text precedes a nested level without a separator",
                        ));
                    }
                    children.push(self.parse_level(depth + 1)?);
                    text = None;
                    nested = true;
                }
                Tok::Separator => {
                    if !nested {
                        children.push(FlatField::leaf(unescape(text.unwrap_or(""))));
                    }
                    text = None;
                    nested = false;
                    separated = true;
                }
                Tok::End => {
                    if !nested && (text.is_some() || separated) {
                        children.push(FlatField::leaf(unescape(text.unwrap_or(""))));
                    }
                    tracing::trace!(depth, children = children.len(), "closed flat field level");
                    return Ok(FlatField::Node(children));
                }
            }
        }
    }
}
