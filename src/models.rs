//! Declarative column specifications.
//!
//! A `ColumnSpec` names the output type of one column plus the options that
//! type understands. Specs are normally deserialized from JSON or built from a
//! compact code string such as `"ciD_f"`.

use crate::error::{ReadError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output types a collector can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectorType {
    Skip,
    Logical,
    Integer,
    Double,
    Number,
    Character,
    Date,
    Datetime,
    Time,
    Factor,
    Raw,
}

impl CollectorType {
    pub const ALL: [CollectorType; 11] = [
        CollectorType::Skip,
        CollectorType::Logical,
        CollectorType::Integer,
        CollectorType::Double,
        CollectorType::Number,
        CollectorType::Character,
        CollectorType::Date,
        CollectorType::Datetime,
        CollectorType::Time,
        CollectorType::Factor,
        CollectorType::Raw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectorType::Skip => "skip",
            CollectorType::Logical => "logical",
            CollectorType::Integer => "integer",
            CollectorType::Double => "double",
            CollectorType::Number => "number",
            CollectorType::Character => "character",
            CollectorType::Date => "date",
            CollectorType::Datetime => "datetime",
            CollectorType::Time => "time",
            CollectorType::Factor => "factor",
            CollectorType::Raw => "raw",
        }
    }

    /// Resolve a single-character compact code
    pub fn from_code(code: char) -> Result<Self> {
        match code {
            '_' | '-' => Ok(CollectorType::Skip),
            'l' => Ok(CollectorType::Logical),
            'i' => Ok(CollectorType::Integer),
            'd' => Ok(CollectorType::Double),
            'n' => Ok(CollectorType::Number),
            'c' => Ok(CollectorType::Character),
            'D' => Ok(CollectorType::Date),
            'T' => Ok(CollectorType::Datetime),
            't' => Ok(CollectorType::Time),
            'f' => Ok(CollectorType::Factor),
            'r' => Ok(CollectorType::Raw),
            other => Err(ReadError::unsupported_column_type(other.to_string())),
        }
    }
}

impl fmt::Display for CollectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectorType {
    type Err = ReadError;

    /// Accepts plain names (`integer`) and prefixed class names (`collector_integer`)
    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let name = normalized
            .strip_prefix("collector_")
            .unwrap_or(normalized.as_str());

        CollectorType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| ReadError::unsupported_column_type(value))
    }
}

/// Specification of one output column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Output type of the column
    #[serde(rename = "type")]
    pub collector_type: CollectorType,

    /// Date/time format; `None` (or empty) means "use the locale default"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Factor levels; `None` means levels are discovered from the data.
    /// A `None` entry inside the list is the NA level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<Option<String>>>,

    /// Factor levels carry an order
    #[serde(default)]
    pub ordered: bool,

    /// Missing values become a factor level of their own
    #[serde(default)]
    pub include_na: bool,
}

impl ColumnSpec {
    pub fn new(collector_type: CollectorType) -> Self {
        Self {
            collector_type,
            format: None,
            levels: None,
            ordered: false,
            include_na: false,
        }
    }

    /// Build a spec from a type tag, failing on unknown tags
    pub fn from_tag(tag: &str) -> Result<Self> {
        Ok(Self::new(tag.parse()?))
    }

    pub fn skip() -> Self {
        Self::new(CollectorType::Skip)
    }

    pub fn logical() -> Self {
        Self::new(CollectorType::Logical)
    }

    pub fn integer() -> Self {
        Self::new(CollectorType::Integer)
    }

    pub fn double() -> Self {
        Self::new(CollectorType::Double)
    }

    pub fn number() -> Self {
        Self::new(CollectorType::Number)
    }

    pub fn character() -> Self {
        Self::new(CollectorType::Character)
    }

    pub fn raw() -> Self {
        Self::new(CollectorType::Raw)
    }

    pub fn date(format: Option<&str>) -> Self {
        Self::new(CollectorType::Date).with_format(format)
    }

    pub fn datetime(format: Option<&str>) -> Self {
        Self::new(CollectorType::Datetime).with_format(format)
    }

    pub fn time(format: Option<&str>) -> Self {
        Self::new(CollectorType::Time).with_format(format)
    }

    /// Factor column. `levels = None` discovers levels in first-seen order.
    pub fn factor(levels: Option<Vec<Option<String>>>, ordered: bool, include_na: bool) -> Self {
        Self {
            levels,
            ordered,
            include_na,
            ..Self::new(CollectorType::Factor)
        }
    }

    fn with_format(mut self, format: Option<&str>) -> Self {
        self.format = format.map(str::to_string);
        self
    }

    /// The declared format, treating an empty string as undeclared
    pub fn declared_format(&self) -> Option<&str> {
        self.format.as_deref().filter(|f| !f.is_empty())
    }

    /// Parse a list of specs from a JSON array
    pub fn list_from_json(json: &str) -> Result<Vec<ColumnSpec>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Expand a compact code string (one character per column) into specs.
/// Whitespace is ignored.
pub fn parse_compact(codes: &str) -> Result<Vec<ColumnSpec>> {
    codes
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| CollectorType::from_code(c).map(ColumnSpec::new))
        .collect()
}
