//! Date, datetime and time collectors.
//!
//! Each cell goes through the parser in two stages: the text must match the
//! format, and the resulting fields must form a real date or clock time.
//! Either failure leaves NA and one warning.

use super::column::{ColumnClass, ColumnData, ColumnMetadata, TypedColumn, resize_values};
use super::{Collect, token_text};
use crate::constants::{TIME_UNITS, expected};
use crate::parsers::DateTimeParser;
use crate::token::{Token, TokenType};
use crate::warnings::WarningSink;

/// Run one parse attempt over a string token and report format failures.
/// Returns `false` (after warning) when the text does not match.
fn parse_token(
    parser: &mut DateTimeParser,
    token: &Token<'_>,
    sink: &WarningSink,
    attempt: impl FnOnce(&mut DateTimeParser) -> bool,
    expected: &str,
) -> bool {
    let text = token_text(token);
    parser.set_input(&text);
    if attempt(parser) {
        true
    } else {
        sink.warn(token.row(), token.col(), expected, &text);
        false
    }
}

#[derive(Debug, Clone)]
pub struct DateCollector {
    parser: DateTimeParser,
    format: Option<String>,
    values: Vec<Option<i32>>,
}

impl DateCollector {
    /// `format = None` uses the parser's locale date format
    pub fn new(parser: DateTimeParser, format: Option<String>) -> Self {
        Self {
            parser,
            format,
            values: Vec::new(),
        }
    }

    fn expected(&self) -> String {
        let format = self.format.as_deref().unwrap_or(self.parser.date_format());
        format!("date like {}", format)
    }
}

impl Collect for DateCollector {
    fn set_value(&mut self, i: usize, token: &Token<'_>, sink: &WarningSink) {
        if token.token_type() != TokenType::String {
            self.values[i] = None;
            return;
        }

        let expected = self.expected();
        let format = self.format.clone();
        let matched = parse_token(
            &mut self.parser,
            token,
            sink,
            |p| match &format {
                Some(f) => p.parse(f),
                None => p.parse_locale_date(),
            },
            &expected,
        );

        self.values[i] = if matched {
            let dt = self.parser.make_date();
            if dt.valid_date() {
                dt.date()
            } else {
                sink.warn(token.row(), token.col(), expected::VALID_DATE, &token_text(token));
                None
            }
        } else {
            None
        };
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn resize(&mut self, n: usize) {
        resize_values(&mut self.values, n);
    }

    fn vector(&self) -> TypedColumn {
        TypedColumn {
            data: ColumnData::Date(self.values.clone()),
            metadata: ColumnMetadata::with_class(ColumnClass::Date),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatetimeCollector {
    parser: DateTimeParser,
    format: Option<String>,
    tz: String,
    values: Vec<Option<f64>>,
}

impl DatetimeCollector {
    /// `format = None` reads ISO8601. `tz` is recorded as column metadata.
    pub fn new(parser: DateTimeParser, format: Option<String>, tz: impl Into<String>) -> Self {
        Self {
            parser,
            format,
            tz: tz.into(),
            values: Vec::new(),
        }
    }
}

impl Collect for DatetimeCollector {
    fn set_value(&mut self, i: usize, token: &Token<'_>, sink: &WarningSink) {
        if token.token_type() != TokenType::String {
            self.values[i] = None;
            return;
        }

        let expected = format!(
            "date like {}",
            self.format.as_deref().unwrap_or(expected::ISO8601)
        );
        let format = self.format.clone();
        let matched = parse_token(
            &mut self.parser,
            token,
            sink,
            |p| match &format {
                Some(f) => p.parse(f),
                None => p.parse_iso8601(),
            },
            &expected,
        );

        self.values[i] = if matched {
            match self.parser.make_datetime() {
                Some(dt) if dt.valid_datetime() => dt.datetime(),
                _ => {
                    sink.warn(token.row(), token.col(), expected::VALID_DATE, &token_text(token));
                    None
                }
            }
        } else {
            None
        };
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn resize(&mut self, n: usize) {
        resize_values(&mut self.values, n);
    }

    fn vector(&self) -> TypedColumn {
        TypedColumn {
            data: ColumnData::Datetime(self.values.clone()),
            metadata: ColumnMetadata {
                timezone: Some(self.tz.clone()),
                ..ColumnMetadata::with_class(ColumnClass::DateTime)
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimeCollector {
    parser: DateTimeParser,
    format: Option<String>,
    values: Vec<Option<f64>>,
}

impl TimeCollector {
    /// `format = None` uses the parser's locale time format
    pub fn new(parser: DateTimeParser, format: Option<String>) -> Self {
        Self {
            parser,
            format,
            values: Vec::new(),
        }
    }

    fn expected(&self) -> String {
        let format = self.format.as_deref().unwrap_or(self.parser.time_format());
        format!("time like {}", format)
    }
}

impl Collect for TimeCollector {
    fn set_value(&mut self, i: usize, token: &Token<'_>, sink: &WarningSink) {
        if token.token_type() != TokenType::String {
            self.values[i] = None;
            return;
        }

        let expected = self.expected();
        let format = self.format.clone();
        let matched = parse_token(
            &mut self.parser,
            token,
            sink,
            |p| match &format {
                Some(f) => p.parse(f),
                None => p.parse_locale_time(),
            },
            &expected,
        );

        self.values[i] = if matched {
            let dt = self.parser.make_time();
            if dt.valid_time() {
                Some(dt.time())
            } else {
                sink.warn(token.row(), token.col(), expected::VALID_TIME, &token_text(token));
                None
            }
        } else {
            None
        };
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn resize(&mut self, n: usize) {
        resize_values(&mut self.values, n);
    }

    fn vector(&self) -> TypedColumn {
        TypedColumn {
            data: ColumnData::Time(self.values.clone()),
            metadata: ColumnMetadata {
                units: Some(TIME_UNITS.to_string()),
                ..ColumnMetadata::with_class(ColumnClass::Time)
            },
        }
    }
}
