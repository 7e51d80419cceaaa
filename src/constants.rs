//! Library constants
//!
//! Default locale values, automatic date/time format candidates, byte order
//! marks and the warning vocabulary shared by every collector.

// =============================================================================
// Locale Defaults
// =============================================================================

/// Decimal mark used when no locale is supplied
pub const DEFAULT_DECIMAL_MARK: char = '.';

/// Grouping (thousands) mark used when no locale is supplied
pub const DEFAULT_GROUPING_MARK: char = ',';

/// Automatic date format: accepts `Y-m-d` and `Y/m/d`
pub const AUTO_DATE_FORMAT: &str = "%AD";

/// Automatic time format: accepts `H:M`, `H:M:S`, fractional seconds and AM/PM
pub const AUTO_TIME_FORMAT: &str = "%AT";

/// Default time zone label
pub const DEFAULT_TZ: &str = "UTC";

/// Default source encoding label
pub const DEFAULT_ENCODING: &str = "UTF-8";

// =============================================================================
// Date and Time Formats
// =============================================================================

/// Candidates tried, in order, for `%AD`
pub const AUTO_DATE_CANDIDATES: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Candidates tried, in order, for `%AT`
pub const AUTO_TIME_CANDIDATES: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S%.f %p",
    "%I:%M %p",
    "%I:%M:%S%.f%p",
    "%I:%M%p",
];

/// ISO8601 candidates tried, in order, for a datetime column without a format
pub const ISO8601_CANDIDATES: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y-%m-%d",
    "%Y%m%d",
];

pub const SECONDS_PER_DAY: i64 = 86_400;

// =============================================================================
// Byte Order Marks
// =============================================================================

pub const BOM_UTF32_BE: &[u8] = &[0x00, 0x00, 0xFE, 0xFF];
pub const BOM_UTF32_LE: &[u8] = &[0xFF, 0xFE, 0x00, 0x00];
pub const BOM_UTF16_BE: &[u8] = &[0xFE, 0xFF];
pub const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
pub const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];

// =============================================================================
// Warning Vocabulary
// =============================================================================

/// Expected-value descriptions attached to warnings
pub mod expected {
    pub const LOGICAL: &str = "1/0/T/F/TRUE/FALSE";
    pub const INTEGER: &str = "an integer";
    pub const DOUBLE: &str = "a double";
    pub const NUMBER: &str = "a number";
    pub const NO_TRAILING: &str = "no trailing characters";
    pub const VALID_DATE: &str = "valid date";
    pub const VALID_TIME: &str = "valid time";
    pub const LEVEL_SET: &str = "value in level set";
    pub const ISO8601: &str = "ISO8601";
}

/// Actual-value text used when the offending value has no text of its own
pub mod actual {
    pub const EMBEDDED_NULL: &str = "embedded null";
    pub const NA: &str = "NA";
}

/// Unit label attached to time columns
pub const TIME_UNITS: &str = "secs";
