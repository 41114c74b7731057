//! Scanner for rich text markup.
//!
//! A forward-only cursor over the input that yields one lexical item per
//! call: a line break, an opening tag, a closing tag, a no-op for anything
//! that looked like a tag but was not one, or the end of input. Plain text is
//! never emitted; it is whatever lies between the offsets of the tag tokens.

use std::collections::HashMap;

use memchr::memchr2;

use crate::catalog::{self, Tag};

/// Attribute map of an opening tag. The tag's own value is stored under
/// [`VALUE_KEY`].
pub type Attributes<'a> = HashMap<&'a str, &'a str>;

/// Attribute key holding the value of `<name=value>`.
pub const VALUE_KEY: &str = "value";

/// An opening tag, `<color=red>` or `<#ff0000>` or `<b>`.
#[derive(Clone, Debug, PartialEq)]
pub struct OpenTag<'a> {
    pub tag: Tag,
    pub attributes: Attributes<'a>,
    /// Exact markup consumed, from `<` to `>` inclusive.
    pub raw: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> OpenTag<'a> {
    pub fn value(&self) -> Option<&'a str> {
        self.attributes.get(VALUE_KEY).copied()
    }
}

/// A closing tag, `</color>`.
#[derive(Clone, Debug, PartialEq)]
pub struct CloseTag<'a> {
    pub tag: Tag,
    pub raw: &'a str,
    pub start: usize,
    pub end: usize,
}

/// A token produced by the scanner.
///
/// Offsets are byte offsets into the original input.
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'a> {
    Open(OpenTag<'a>),
    Close(CloseTag<'a>),
    /// A `\n` at `offset`.
    Newline { offset: usize },
    /// Something starting with `<` at `offset` that is not a valid tag.
    Noop { offset: usize },
    EndOfInput,
}

/// Scanner over rich text markup.
///
/// # Examples
///
/// ```
/// use textmesh::parser::{Scanner, Token};
///
/// let mut scanner = Scanner::new("<b>hi</b>");
/// assert!(matches!(scanner.next_token(), Token::Open(_)));
/// assert!(matches!(scanner.next_token(), Token::Close(_)));
/// assert_eq!(scanner.next_token(), Token::EndOfInput);
/// ```
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            done: false,
        }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    /// Advance while `pred` holds and return the consumed slice.
    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn skip_spaces(&mut self) {
        self.take_while(|b| b == b' ');
    }

    fn parse_name(&mut self) -> &'a str {
        self.take_while(|b| b.is_ascii_lowercase() || b == b'-')
    }

    fn parse_hex(&mut self) -> &'a str {
        self.take_while(|b| b.is_ascii_hexdigit())
    }

    /// Parse a value after `=`: quoted, `#` hex, or bare up to space or `>`.
    fn parse_value(&mut self) -> &'a str {
        match self.peek() {
            Some(b'"') => {
                self.pos += 1;
                let start = self.pos;
                match memchr::memchr(b'"', &self.bytes()[start..]) {
                    Some(rel) => {
                        self.pos = start + rel + 1;
                        &self.input[start..start + rel]
                    }
                    None => {
                        self.pos = self.input.len();
                        &self.input[start..]
                    }
                }
            }
            Some(b'#') => {
                let start = self.pos;
                self.pos += 1;
                self.parse_hex();
                &self.input[start..self.pos]
            }
            _ => self.take_while(|b| b != b' ' && b != b'>'),
        }
    }

    /// Parse what follows `<`. Returns `None` when the token is not a tag.
    fn parse_open(&mut self) -> Option<(Tag, Attributes<'a>)> {
        self.skip_spaces();

        let mut attributes = Attributes::new();

        if self.peek() == Some(b'#') {
            let start = self.pos;
            self.pos += 1;
            let digits = self.parse_hex();
            if digits.is_empty() || digits.len() > 6 {
                return None;
            }
            attributes.insert(VALUE_KEY, &self.input[start..self.pos]);
            return Some((Tag::Color, attributes));
        }

        let tag = catalog::lookup(self.parse_name())?;

        if !tag.accepts_value() {
            return Some((tag, attributes));
        }

        // Spaces are only skipped after a value, never after a bare name.
        if self.peek() == Some(b'=') {
            self.pos += 1;
            attributes.insert(VALUE_KEY, self.parse_value());
            self.skip_spaces();
        }

        while self.peek().is_some_and(|b| b != b'>') {
            let name = self.parse_name();
            if name.is_empty() || self.peek() != Some(b'=') {
                return None;
            }
            self.pos += 1;
            let value = self.parse_value();
            attributes.insert(name, value);
            self.skip_spaces();
        }

        Some((tag, attributes))
    }

    /// Parse what follows `</`.
    fn parse_close(&mut self) -> Option<Tag> {
        self.skip_spaces();
        catalog::lookup(self.parse_name())
    }

    /// Scan the next token.
    ///
    /// Every call strictly advances the cursor until [`Token::EndOfInput`],
    /// which is then returned on every subsequent call.
    pub fn next_token(&mut self) -> Token<'a> {
        let Some(rel) = memchr2(b'<', b'\n', &self.bytes()[self.pos..]) else {
            self.pos = self.input.len();
            return Token::EndOfInput;
        };

        let start = self.pos + rel;
        self.pos = start + 1;

        if self.bytes()[start] == b'\n' {
            return Token::Newline { offset: start };
        }

        let closing = self.peek() == Some(b'/');
        if closing {
            self.pos += 1;
        }

        let token = if closing {
            self.parse_close().map(|tag| (tag, Attributes::new()))
        } else {
            self.parse_open()
        };

        let Some((tag, attributes)) = token else {
            log::trace!("noop token at {start}");
            return Token::Noop { offset: start };
        };

        if self.peek() != Some(b'>') {
            log::trace!("unterminated tag at {start}");
            return Token::Noop { offset: start };
        }
        self.pos += 1;

        let raw = &self.input[start..self.pos];
        if closing {
            Token::Close(CloseTag {
                tag,
                raw,
                start,
                end: self.pos,
            })
        } else {
            Token::Open(OpenTag {
                tag,
                attributes,
                raw,
                start,
                end: self.pos,
            })
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    /// Yields every token up to, but not including, [`Token::EndOfInput`].
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Token::EndOfInput => {
                self.done = true;
                None
            }
            token => Some(token),
        }
    }
}
