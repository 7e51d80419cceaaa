//! String-valued collectors.

use super::column::{ColumnData, TypedColumn, resize_values};
use super::Collect;
use crate::constants::actual;
use crate::encoding::Transcoder;
use crate::error::{ReadError, Result};
use crate::token::{Token, TokenType};
use crate::warnings::WarningSink;

/// Transcode the payload of a string token, warning on an embedded NUL.
/// The value is kept (cut at the NUL) either way.
pub(crate) fn transcode_token(
    transcoder: &Transcoder,
    token: &Token<'_>,
    sink: &WarningSink,
) -> String {
    if token.has_null() {
        sink.warn(token.row(), token.col(), "", actual::EMBEDDED_NULL);
    }
    transcoder.make_string(&token.get_string(), token.has_null())
}

#[derive(Debug, Clone, Default)]
pub struct CharacterCollector {
    transcoder: Transcoder,
    values: Vec<Option<String>>,
}

impl CharacterCollector {
    pub fn new(transcoder: Transcoder) -> Self {
        Self {
            transcoder,
            values: Vec::new(),
        }
    }

    /// Write an already decoded value, bypassing token conversion
    pub fn set_string(&mut self, i: usize, value: &str) -> Result<()> {
        let size = self.values.len();
        let slot = self
            .values
            .get_mut(i)
            .ok_or(ReadError::RowOutOfBounds { row: i, size })?;
        *slot = Some(value.to_string());
        Ok(())
    }
}

impl Collect for CharacterCollector {
    fn set_value(&mut self, i: usize, token: &Token<'_>, sink: &WarningSink) {
        self.values[i] = match token.token_type() {
            TokenType::String => Some(transcode_token(&self.transcoder, token, sink)),
            TokenType::Empty => Some(String::new()),
            TokenType::Missing | TokenType::Eof => None,
        };
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn resize(&mut self, n: usize) {
        resize_values(&mut self.values, n);
    }

    fn vector(&self) -> TypedColumn {
        TypedColumn::bare(ColumnData::Character(self.values.clone()))
    }
}

/// Unconverted token bytes
#[derive(Debug, Clone, Default)]
pub struct RawCollector {
    values: Vec<Option<Vec<u8>>>,
}

impl RawCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collect for RawCollector {
    fn set_value(&mut self, i: usize, token: &Token<'_>, _sink: &WarningSink) {
        self.values[i] = match token.token_type() {
            TokenType::String => Some(token.raw_bytes().to_vec()),
            TokenType::Missing | TokenType::Empty | TokenType::Eof => None,
        };
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn resize(&mut self, n: usize) {
        resize_values(&mut self.values, n);
    }

    fn vector(&self) -> TypedColumn {
        TypedColumn::bare(ColumnData::Raw(self.values.clone()))
    }
}
