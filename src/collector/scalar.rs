//! Logical and numeric collectors.

use super::column::{ColumnData, TypedColumn, resize_values};
use super::{Collect, token_text};
use crate::constants::expected;
use crate::parsers::{parse_double, parse_int, parse_number};
use crate::token::{Token, TokenType};
use crate::warnings::WarningSink;

/// Outcome of converting the payload of one string token
enum Parse<T> {
    Value(T),
    /// The payload did not parse; carries the expected-shape description
    Failed(&'static str),
}

/// Shared body of every numeric `set_value`: NA for missing/empty tokens,
/// otherwise convert and warn on failure.
fn collect_scalar<T>(
    values: &mut [Option<T>],
    i: usize,
    token: &Token<'_>,
    sink: &WarningSink,
    convert: impl FnOnce(&[u8]) -> Parse<T>,
) {
    values[i] = match token.token_type() {
        TokenType::String => {
            let bytes = token.get_string();
            match convert(bytes.as_ref()) {
                Parse::Value(value) => Some(value),
                Parse::Failed(expected) => {
                    sink.warn(token.row(), token.col(), expected, &token_text(token));
                    None
                }
            }
        }
        TokenType::Missing | TokenType::Empty | TokenType::Eof => None,
    };
}

/// Require the parser to have consumed the whole payload
fn fully_consumed<T>(parsed: Option<(T, &[u8])>, failure: &'static str) -> Parse<T> {
    match parsed {
        Some((value, rest)) if rest.is_empty() => Parse::Value(value),
        Some(_) => Parse::Failed(expected::NO_TRAILING),
        None => Parse::Failed(failure),
    }
}

/// Recognize the accepted spellings of a logical value
pub fn parse_logical(bytes: &[u8]) -> Option<bool> {
    match bytes {
        b"TRUE" | b"True" | b"true" | b"T" | b"t" | b"1" => Some(true),
        b"FALSE" | b"False" | b"false" | b"F" | b"f" | b"0" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogicalCollector {
    values: Vec<Option<bool>>,
}

impl LogicalCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collect for LogicalCollector {
    fn set_value(&mut self, i: usize, token: &Token<'_>, sink: &WarningSink) {
        collect_scalar(&mut self.values, i, token, sink, |bytes| {
            parse_logical(bytes).map_or(Parse::Failed(expected::LOGICAL), Parse::Value)
        });
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn resize(&mut self, n: usize) {
        resize_values(&mut self.values, n);
    }

    fn vector(&self) -> TypedColumn {
        TypedColumn::bare(ColumnData::Logical(self.values.clone()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct IntegerCollector {
    values: Vec<Option<i32>>,
}

impl IntegerCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collect for IntegerCollector {
    fn set_value(&mut self, i: usize, token: &Token<'_>, sink: &WarningSink) {
        collect_scalar(&mut self.values, i, token, sink, |bytes| {
            fully_consumed(parse_int(bytes), expected::INTEGER)
        });
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn resize(&mut self, n: usize) {
        resize_values(&mut self.values, n);
    }

    fn vector(&self) -> TypedColumn {
        TypedColumn::bare(ColumnData::Integer(self.values.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct DoubleCollector {
    decimal_mark: u8,
    values: Vec<Option<f64>>,
}

impl DoubleCollector {
    pub fn new(decimal_mark: u8) -> Self {
        Self {
            decimal_mark,
            values: Vec::new(),
        }
    }
}

impl Collect for DoubleCollector {
    fn set_value(&mut self, i: usize, token: &Token<'_>, sink: &WarningSink) {
        let decimal_mark = self.decimal_mark;
        collect_scalar(&mut self.values, i, token, sink, |bytes| {
            fully_consumed(parse_double(decimal_mark, bytes), expected::DOUBLE)
        });
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn resize(&mut self, n: usize) {
        resize_values(&mut self.values, n);
    }

    fn vector(&self) -> TypedColumn {
        TypedColumn::bare(ColumnData::Double(self.values.clone()))
    }
}

/// Numbers with grouping marks and surrounding text, e.g. `$1,234.5`.
/// Trailing text after the number is ignored.
#[derive(Debug, Clone)]
pub struct NumberCollector {
    decimal_mark: u8,
    grouping_mark: u8,
    values: Vec<Option<f64>>,
}

impl NumberCollector {
    pub fn new(decimal_mark: u8, grouping_mark: u8) -> Self {
        Self {
            decimal_mark,
            grouping_mark,
            values: Vec::new(),
        }
    }
}

impl Collect for NumberCollector {
    fn set_value(&mut self, i: usize, token: &Token<'_>, sink: &WarningSink) {
        let (decimal_mark, grouping_mark) = (self.decimal_mark, self.grouping_mark);
        collect_scalar(&mut self.values, i, token, sink, |bytes| {
            parse_number(decimal_mark, grouping_mark, bytes)
                .map_or(Parse::Failed(expected::NUMBER), |(value, _)| Parse::Value(value))
        });
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn resize(&mut self, n: usize) {
        resize_values(&mut self.values, n);
    }

    fn vector(&self) -> TypedColumn {
        TypedColumn::bare(ColumnData::Double(self.values.clone()))
    }
}
