//! Typed column materialization for delimited text.
//!
//! This library converts tokens produced by a delimited-text tokenizer into
//! strongly typed columns. It provides:
//! - Per-column collectors for logical, integer, double, number, character,
//!   date, datetime, time, factor and raw columns
//! - Factor level dictionaries with explicit or first-seen level ordering
//! - Locale-aware numeric and date/time parsing
//! - Batched, non-fatal warnings for cells that fail to convert
//! - Byte order mark detection and quote-aware line skipping
//! - Conversion of finished columns into Polars series and data frames

pub mod collector;
pub mod config;
pub mod constants;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod models;
pub mod parsers;
pub mod source;
pub mod token;
pub mod warnings;

// Re-export commonly used types
pub use collector::{
    Collector, CollectorKind, ColumnClass, ColumnData, ColumnMetadata, TypedColumn,
    collectors_clear, collectors_create, collectors_resize, collectors_set_warnings,
};
pub use config::LocaleInfo;
pub use encoding::Transcoder;
pub use error::{ReadError, Result};
pub use frame::columns_to_dataframe;
pub use models::{CollectorType, ColumnSpec, parse_compact};
pub use parsers::{DateTime, DateTimeParser, utc_time};
pub use source::{ByteOrderMark, data_start, detect_bom, skip_bom, skip_lines};
pub use token::{Token, TokenType};
pub use warnings::{SharedWarnings, Warning, WarningSink, Warnings};
