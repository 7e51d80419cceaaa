//! Field-level parsers used by the collectors.

pub mod datetime;
pub mod numeric;

pub use datetime::{DateTime, DateTimeParser, utc_time};
pub use numeric::{parse_double, parse_int, parse_number};
