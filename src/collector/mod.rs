//! Per-column token conversion.
//!
//! A `Collector` owns one output column. The driver sizes it with `resize`,
//! feeds it one token per row through `set_value`, and finally takes the
//! finished column with `vector`. Cells that fail to convert become NA and
//! are reported through the collector's `WarningSink`; only contract
//! violations (end-of-input tokens, rows beyond the column length) are
//! errors.
//!
//! # Architecture
//!
//! - [`column`] - finished columns and their metadata
//! - [`scalar`] - logical, integer, double and number collectors
//! - [`text`] - character and raw collectors
//! - [`temporal`] - date, datetime and time collectors
//! - [`factor`] - categorical collector and its level dictionary
//!
//! # Basic Usage
//!
//! ```rust
//! use textcols::{Collector, ColumnSpec, LocaleInfo, Token, Warnings};
//!
//! # fn example() -> textcols::Result<()> {
//! let warnings = Warnings::shared();
//! let mut collector = Collector::create(&ColumnSpec::integer(), &LocaleInfo::default())?;
//! collector.set_warnings(warnings.clone());
//! collector.resize(2);
//!
//! collector.set_value(0, &Token::string(b"42", 0, 0))?;
//! collector.set_value(1, &Token::string(b"4x", 1, 0))?;
//!
//! assert_eq!(warnings.borrow().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod column;
pub mod factor;
pub mod scalar;
pub mod temporal;
pub mod text;

#[cfg(test)]
mod tests;

use crate::config::LocaleInfo;
use crate::error::{ReadError, Result};
use crate::models::{CollectorType, ColumnSpec};
use crate::parsers::DateTimeParser;
use crate::token::{Token, TokenType};
use crate::warnings::{SharedWarnings, WarningSink};
use tracing::debug;

pub use column::{ColumnClass, ColumnData, ColumnMetadata, TypedColumn};
pub use factor::{FactorCollector, LevelDictionary};
pub use scalar::{DoubleCollector, IntegerCollector, LogicalCollector, NumberCollector};
pub use temporal::{DateCollector, DatetimeCollector, TimeCollector};
pub use text::{CharacterCollector, RawCollector};

/// Operations every storing collector implements
pub trait Collect {
    /// Convert `token` into slot `i`. `i` is already bounds-checked and the
    /// token is never end-of-input.
    fn set_value(&mut self, i: usize, token: &Token<'_>, sink: &WarningSink);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resize(&mut self, n: usize);

    /// The finished column; may be called any number of times
    fn vector(&self) -> TypedColumn;
}

/// Lossy text of a token payload, used as the "actual" part of warnings
pub(crate) fn token_text(token: &Token<'_>) -> String {
    String::from_utf8_lossy(&token.get_string()).into_owned()
}

/// The concrete collector behind a `Collector`
#[derive(Debug, Clone)]
pub enum CollectorKind {
    Skip,
    Logical(LogicalCollector),
    Integer(IntegerCollector),
    Double(DoubleCollector),
    Number(NumberCollector),
    Character(CharacterCollector),
    Date(DateCollector),
    Datetime(DatetimeCollector),
    Time(TimeCollector),
    Factor(FactorCollector),
    Raw(RawCollector),
}

impl CollectorKind {
    fn storage(&self) -> Option<&dyn Collect> {
        match self {
            CollectorKind::Skip => None,
            CollectorKind::Logical(c) => Some(c),
            CollectorKind::Integer(c) => Some(c),
            CollectorKind::Double(c) => Some(c),
            CollectorKind::Number(c) => Some(c),
            CollectorKind::Character(c) => Some(c),
            CollectorKind::Date(c) => Some(c),
            CollectorKind::Datetime(c) => Some(c),
            CollectorKind::Time(c) => Some(c),
            CollectorKind::Factor(c) => Some(c),
            CollectorKind::Raw(c) => Some(c),
        }
    }

    fn storage_mut(&mut self) -> Option<&mut dyn Collect> {
        match self {
            CollectorKind::Skip => None,
            CollectorKind::Logical(c) => Some(c),
            CollectorKind::Integer(c) => Some(c),
            CollectorKind::Double(c) => Some(c),
            CollectorKind::Number(c) => Some(c),
            CollectorKind::Character(c) => Some(c),
            CollectorKind::Date(c) => Some(c),
            CollectorKind::Datetime(c) => Some(c),
            CollectorKind::Time(c) => Some(c),
            CollectorKind::Factor(c) => Some(c),
            CollectorKind::Raw(c) => Some(c),
        }
    }

    pub fn collector_type(&self) -> CollectorType {
        match self {
            CollectorKind::Skip => CollectorType::Skip,
            CollectorKind::Logical(_) => CollectorType::Logical,
            CollectorKind::Integer(_) => CollectorType::Integer,
            CollectorKind::Double(_) => CollectorType::Double,
            CollectorKind::Number(_) => CollectorType::Number,
            CollectorKind::Character(_) => CollectorType::Character,
            CollectorKind::Date(_) => CollectorType::Date,
            CollectorKind::Datetime(_) => CollectorType::Datetime,
            CollectorKind::Time(_) => CollectorType::Time,
            CollectorKind::Factor(_) => CollectorType::Factor,
            CollectorKind::Raw(_) => CollectorType::Raw,
        }
    }
}

/// One output column and the sink its warnings go to
#[derive(Debug, Clone)]
pub struct Collector {
    kind: CollectorKind,
    warnings: WarningSink,
}

impl Collector {
    /// Wrap a concrete collector; warnings are reported immediately until
    /// `set_warnings` is called.
    pub fn new(kind: CollectorKind) -> Self {
        Self {
            kind,
            warnings: WarningSink::immediate(),
        }
    }

    /// Build the collector described by `spec`, taking from `locale` only the
    /// settings that collector type uses.
    pub fn create(spec: &ColumnSpec, locale: &LocaleInfo) -> Result<Self> {
        let format = spec.declared_format().map(str::to_string);

        let kind = match spec.collector_type {
            CollectorType::Skip => CollectorKind::Skip,
            CollectorType::Logical => CollectorKind::Logical(LogicalCollector::new()),
            CollectorType::Integer => CollectorKind::Integer(IntegerCollector::new()),
            CollectorType::Double => {
                CollectorKind::Double(DoubleCollector::new(locale.decimal_byte()))
            }
            CollectorType::Number => CollectorKind::Number(NumberCollector::new(
                locale.decimal_byte(),
                locale.grouping_byte(),
            )),
            CollectorType::Character => {
                CollectorKind::Character(CharacterCollector::new(locale.encoder()?))
            }
            CollectorType::Date => {
                CollectorKind::Date(DateCollector::new(DateTimeParser::from_locale(locale)?, format))
            }
            CollectorType::Datetime => CollectorKind::Datetime(DatetimeCollector::new(
                DateTimeParser::from_locale(locale)?,
                format,
                locale.tz.clone(),
            )),
            CollectorType::Time => {
                CollectorKind::Time(TimeCollector::new(DateTimeParser::from_locale(locale)?, format))
            }
            CollectorType::Factor => CollectorKind::Factor(FactorCollector::new(
                locale.encoder()?,
                spec.levels.clone(),
                spec.ordered,
                spec.include_na,
            )),
            CollectorType::Raw => CollectorKind::Raw(RawCollector::new()),
        };

        debug!("Created {} collector", spec.collector_type);
        Ok(Self::new(kind))
    }

    /// Build a collector from a type tag such as `"integer"` or `"collector_date"`
    pub fn from_tag(tag: &str, locale: &LocaleInfo) -> Result<Self> {
        Self::create(&ColumnSpec::from_tag(tag)?, locale)
    }

    pub fn kind(&self) -> &CollectorKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut CollectorKind {
        &mut self.kind
    }

    pub fn collector_type(&self) -> CollectorType {
        self.kind.collector_type()
    }

    /// Route warnings into a list shared with the other collectors of a parse
    pub fn set_warnings(&mut self, warnings: SharedWarnings) {
        self.warnings = WarningSink::batched(warnings);
    }

    /// Convert `token` into row `i`
    pub fn set_value(&mut self, i: usize, token: &Token<'_>) -> Result<()> {
        if token.token_type() == TokenType::Eof {
            return Err(ReadError::InvalidToken {
                row: token.row(),
                col: token.col(),
            });
        }

        let Some(storage) = self.kind.storage_mut() else {
            return Ok(());
        };

        let size = storage.len();
        if i >= size {
            return Err(ReadError::RowOutOfBounds { row: i, size });
        }

        storage.set_value(i, token, &self.warnings);
        Ok(())
    }

    /// Set the column length. Skip collectors ignore this.
    pub fn resize(&mut self, n: usize) {
        let collector_type = self.kind.collector_type();
        if let Some(storage) = self.kind.storage_mut() {
            if storage.len() != n {
                debug!(
                    "Resizing {} column from {} to {} rows",
                    collector_type,
                    storage.len(),
                    n
                );
                storage.resize(n);
            }
        }
    }

    pub fn clear(&mut self) {
        self.resize(0);
    }

    pub fn size(&self) -> usize {
        self.kind.storage().map_or(0, |s| s.len())
    }

    /// Whether this column is dropped from the output
    pub fn skip(&self) -> bool {
        matches!(self.kind, CollectorKind::Skip)
    }

    /// The finished column with its metadata; `None` for skipped columns
    pub fn vector(&self) -> Option<TypedColumn> {
        self.kind.storage().map(|s| s.vector())
    }
}

/// Create one collector per spec
pub fn collectors_create(specs: &[ColumnSpec], locale: &LocaleInfo) -> Result<Vec<Collector>> {
    locale.validate()?;
    specs
        .iter()
        .map(|spec| Collector::create(spec, locale))
        .collect()
}

pub fn collectors_resize(collectors: &mut [Collector], n: usize) {
    for collector in collectors.iter_mut() {
        collector.resize(n);
    }
}

pub fn collectors_clear(collectors: &mut [Collector]) {
    for collector in collectors.iter_mut() {
        collector.clear();
    }
}

/// Point every collector at the same warnings list
pub fn collectors_set_warnings(collectors: &mut [Collector], warnings: &SharedWarnings) {
    for collector in collectors.iter_mut() {
        collector.set_warnings(warnings.clone());
    }
}
