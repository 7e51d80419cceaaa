//! Locale configuration and validation.
//!
//! A `LocaleInfo` bundles the marks, default formats, timezone and source
//! encoding that collectors consult. Collectors only ever receive the subset
//! they need, resolved through the accessors here.

use crate::constants::{
    AUTO_DATE_FORMAT, AUTO_TIME_FORMAT, DEFAULT_DECIMAL_MARK, DEFAULT_ENCODING,
    DEFAULT_GROUPING_MARK, DEFAULT_TZ,
};
use crate::encoding::Transcoder;
use crate::error::{ReadError, Result};
use chrono::{FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Locale settings for a single parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleInfo {
    /// Character separating the integer and fractional parts of a number
    pub decimal_mark: char,

    /// Character grouping digits of large numbers (thousands separator)
    pub grouping_mark: char,

    /// Default date format for date columns declared without one
    pub date_format: String,

    /// Default time format for time columns declared without one
    pub time_format: String,

    /// Timezone applied to datetimes without an explicit offset
    pub tz: String,

    /// Encoding label of the source bytes
    pub encoding: String,
}

impl Default for LocaleInfo {
    fn default() -> Self {
        Self {
            decimal_mark: DEFAULT_DECIMAL_MARK,
            grouping_mark: DEFAULT_GROUPING_MARK,
            date_format: AUTO_DATE_FORMAT.to_string(),
            time_format: AUTO_TIME_FORMAT.to_string(),
            tz: DEFAULT_TZ.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

impl LocaleInfo {
    /// Load a locale from a JSON document; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let locale: LocaleInfo = serde_json::from_str(json)?;
        locale.validate()?;
        Ok(locale)
    }

    /// Set the decimal mark
    pub fn with_decimal_mark(mut self, mark: char) -> Self {
        self.decimal_mark = mark;
        self
    }

    /// Set the grouping mark
    pub fn with_grouping_mark(mut self, mark: char) -> Self {
        self.grouping_mark = mark;
        self
    }

    /// Set the default date format
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Set the default time format
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Set the timezone label
    pub fn with_tz(mut self, tz: impl Into<String>) -> Self {
        self.tz = tz.into();
        self
    }

    /// Set the source encoding label
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Check the locale for inconsistencies that would make parsing ambiguous
    pub fn validate(&self) -> Result<()> {
        if self.decimal_mark == self.grouping_mark {
            return Err(ReadError::configuration(format!(
                "decimal mark and grouping mark must be different (both '{}')",
                self.decimal_mark
            )));
        }
        if !self.decimal_mark.is_ascii() || !self.grouping_mark.is_ascii() {
            return Err(ReadError::configuration(
                "decimal and grouping marks must be single-byte characters",
            ));
        }
        self.timezone()?;
        self.encoder()?;

        debug!(
            "Validated locale: decimal='{}', grouping='{}', tz={}, encoding={}",
            self.decimal_mark, self.grouping_mark, self.tz, self.encoding
        );
        Ok(())
    }

    /// Resolve the timezone label
    pub fn timezone(&self) -> Result<Timezone> {
        parse_tz(&self.tz)
    }

    /// Build the transcoder for the source encoding
    pub fn encoder(&self) -> Result<Transcoder> {
        Transcoder::for_label(&self.encoding)
    }

    /// Decimal mark as a byte
    pub fn decimal_byte(&self) -> u8 {
        ascii_byte(self.decimal_mark)
    }

    /// Grouping mark as a byte
    pub fn grouping_byte(&self) -> u8 {
        ascii_byte(self.grouping_mark)
    }
}

fn ascii_byte(c: char) -> u8 {
    if c.is_ascii() { c as u8 } else { b'?' }
}

/// A resolved timezone: an IANA zone with its daylight saving rules, or a
/// fixed offset from UTC
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timezone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl Timezone {
    pub fn utc() -> Self {
        Timezone::Fixed(Utc.fix())
    }

    /// Offset in force at a local wall-clock time. An ambiguous time (clocks
    /// going back) takes the earlier offset; a time skipped by clocks going
    /// forward has no offset.
    pub fn offset_at(&self, local: &NaiveDateTime) -> Option<FixedOffset> {
        match self {
            Timezone::Fixed(offset) => Some(*offset),
            Timezone::Named(tz) => tz
                .offset_from_local_datetime(local)
                .earliest()
                .map(|offset| offset.fix()),
        }
    }
}

/// Parse a timezone label: UTC aliases, an IANA name such as
/// `America/Chicago`, or a fixed offset such as `+05:30`
pub fn parse_tz(label: &str) -> Result<Timezone> {
    let trimmed = label.trim();
    match trimmed.to_ascii_uppercase().as_str() {
        "" | "UTC" | "GMT" | "Z" | "ETC/UTC" | "ETC/GMT" => return Ok(Timezone::utc()),
        _ => {}
    }

    if let Ok(tz) = trimmed.parse::<Tz>() {
        return Ok(Timezone::Named(tz));
    }

    trimmed
        .parse::<FixedOffset>()
        .map(Timezone::Fixed)
        .map_err(|_| {
            ReadError::configuration(format!(
                "unsupported timezone '{}': use an IANA name or a fixed offset such as +05:30",
                label
            ))
        })
}
