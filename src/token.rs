//! Lexical tokens handed to collectors by the tokenizer.
//!
//! A token borrows its bytes from the source buffer. Unescaping happens on
//! demand and only allocates when the token actually contains escapes.

use std::borrow::Cow;

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// A field with content
    String,
    /// A field matching one of the missing-value markers
    Missing,
    /// A zero-length field
    Empty,
    /// End of input; never valid input to a collector
    Eof,
}

/// A single field of delimited input, tagged with its source position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    kind: TokenType,
    bytes: &'a [u8],
    row: usize,
    col: usize,
    has_null: bool,
    escape_double: bool,
    escape_backslash: bool,
}

impl<'a> Token<'a> {
    fn new(kind: TokenType, bytes: &'a [u8], row: usize, col: usize) -> Self {
        Self {
            kind,
            bytes,
            row,
            col,
            has_null: false,
            escape_double: false,
            escape_backslash: false,
        }
    }

    /// A string token over `bytes`; embedded NUL bytes are detected here
    pub fn string(bytes: &'a [u8], row: usize, col: usize) -> Self {
        let mut token = Self::new(TokenType::String, bytes, row, col);
        token.has_null = bytes.contains(&0);
        token
    }

    pub fn missing(row: usize, col: usize) -> Self {
        Self::new(TokenType::Missing, &[], row, col)
    }

    pub fn empty(row: usize, col: usize) -> Self {
        Self::new(TokenType::Empty, &[], row, col)
    }

    pub fn eof(row: usize, col: usize) -> Self {
        Self::new(TokenType::Eof, &[], row, col)
    }

    /// Mark the token as containing doubled quotes and/or backslash escapes
    pub fn with_escapes(mut self, escape_double: bool, escape_backslash: bool) -> Self {
        self.escape_double = escape_double;
        self.escape_backslash = escape_backslash;
        self
    }

    pub fn token_type(&self) -> TokenType {
        self.kind
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn has_null(&self) -> bool {
        self.has_null
    }

    /// The payload exactly as it appears in the source, escapes included.
    /// Non-string tokens yield an empty slice.
    pub fn raw_bytes(&self) -> &'a [u8] {
        match self.kind {
            TokenType::String => self.bytes,
            _ => &[],
        }
    }

    /// The token payload with escapes resolved. Non-string tokens yield an empty slice.
    pub fn get_string(&self) -> Cow<'a, [u8]> {
        if self.kind != TokenType::String {
            return Cow::Borrowed(&[]);
        }
        if !self.escape_double && !self.escape_backslash {
            return Cow::Borrowed(self.bytes);
        }
        Cow::Owned(unescape(
            self.bytes,
            self.escape_double,
            self.escape_backslash,
        ))
    }
}

fn unescape(bytes: &[u8], escape_double: bool, escape_backslash: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let cur = bytes[i];
        let next = bytes.get(i + 1).copied();

        if escape_double && cur == b'"' && next == Some(b'"') {
            out.push(b'"');
            i += 2;
            continue;
        }

        if escape_backslash && cur == b'\\' {
            match next {
                Some(b'n') => out.push(b'\n'),
                Some(b'r') => out.push(b'\r'),
                Some(b't') => out.push(b'\t'),
                Some(b'b') => out.push(0x08),
                Some(b'f') => out.push(0x0C),
                Some(other) => out.push(other),
                None => {
                    out.push(cur);
                    break;
                }
            }
            i += 2;
            continue;
        }

        out.push(cur);
        i += 1;
    }

    out
}
