//! Date, datetime and time parsing.
//!
//! Parsing happens in two stages. `DateTimeParser` first matches the text
//! against a format and records whichever calendar and clock fields it found.
//! The caller then builds a `DateTime` from those fields and checks it with
//! `valid_date`/`valid_time`/`valid_datetime`, which is where impossible dates
//! such as February 30th are rejected.

use crate::config::{LocaleInfo, Timezone};
use crate::constants::{
    AUTO_DATE_CANDIDATES, AUTO_DATE_FORMAT, AUTO_TIME_CANDIDATES, AUTO_TIME_FORMAT,
    ISO8601_CANDIDATES, SECONDS_PER_DAY,
};
use crate::error::{ReadError, Result};
use chrono::format::{Parsed, StrftimeItems, parse};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, Timelike, Utc};

/// Days from 0001-01-01 (day 1 of the common era) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Broken-down calendar and clock fields with the offset they were read in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    psec: f64,
    offset: FixedOffset,
}

impl DateTime {
    /// Fields are 1-based for month and day; `psec` is the fractional second.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        psec: f64,
        offset: FixedOffset,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            psec,
            offset,
        }
    }

    pub fn utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        psec: f64,
    ) -> Self {
        Self::new(year, month, day, hour, minute, second, psec, utc_offset())
    }

    /// Read the fields of a UTC instant given in seconds since the epoch
    pub fn from_utc_seconds(seconds: f64) -> Option<Self> {
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        let instant = chrono::DateTime::from_timestamp(whole as i64, 0)?;

        Some(Self::utc(
            instant.year(),
            instant.month(),
            instant.day(),
            instant.hour(),
            instant.minute(),
            instant.second(),
            seconds - whole,
        ))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn psec(&self) -> f64 {
        self.psec
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Wall-clock reading for timezone lookups; a leap second reads as `:59`
    fn naive_datetime(&self) -> Option<NaiveDateTime> {
        self.naive_date()?
            .and_hms_opt(self.hour, self.minute, self.second.min(59))
    }

    fn with_offset(self, offset: FixedOffset) -> Self {
        Self { offset, ..self }
    }

    pub fn valid_date(&self) -> bool {
        self.naive_date().is_some()
    }

    /// Clock fields are in range; a leap second (`:60`) is allowed
    pub fn valid_time(&self) -> bool {
        self.hour < 24
            && self.minute < 60
            && self.second <= 60
            && (0.0..1.0).contains(&self.psec)
    }

    pub fn valid_datetime(&self) -> bool {
        self.valid_date() && self.valid_time()
    }

    /// Days since 1970-01-01
    pub fn date(&self) -> Option<i32> {
        self.naive_date()
            .map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
    }

    /// Seconds since 1970-01-01T00:00:00Z; `None` unless the fields form a
    /// valid date and time
    pub fn datetime(&self) -> Option<f64> {
        if !self.valid_time() {
            return None;
        }
        let days = i64::from(self.date()?);
        let local = (days * SECONDS_PER_DAY) as f64 + self.time();
        Some(local - f64::from(self.offset.local_minus_utc()))
    }

    /// Seconds since midnight
    pub fn time(&self) -> f64 {
        f64::from(self.hour) * 3600.0
            + f64::from(self.minute) * 60.0
            + f64::from(self.second)
            + self.psec
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Fields recorded by the last successful parse
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    nanosecond: Option<u32>,
    offset: Option<i32>,
}

impl Fields {
    fn from_parsed(parsed: &Parsed) -> Self {
        let year = parsed.year().or_else(|| {
            parsed
                .year_mod_100()
                .map(|y| if y < 69 { 2000 + y } else { 1900 + y })
        });
        let hour = match (parsed.hour_div_12(), parsed.hour_mod_12()) {
            (Some(div), Some(rem)) => Some(div * 12 + rem),
            (None, Some(rem)) => Some(rem),
            (Some(div), None) => Some(div * 12),
            (None, None) => None,
        };

        Self {
            year,
            month: parsed.month(),
            day: parsed.day(),
            hour,
            minute: parsed.minute(),
            second: parsed.second(),
            nanosecond: parsed.nanosecond(),
            offset: parsed.offset(),
        }
    }
}

/// Stateful parser: set the input, parse it with a format, then build a value.
#[derive(Debug, Clone)]
pub struct DateTimeParser {
    date_format: String,
    time_format: String,
    tz: Timezone,
    input: String,
    fields: Fields,
}

impl DateTimeParser {
    pub fn new(date_format: impl Into<String>, time_format: impl Into<String>, tz: Timezone) -> Self {
        Self {
            date_format: date_format.into(),
            time_format: time_format.into(),
            tz,
            input: String::new(),
            fields: Fields::default(),
        }
    }

    /// Parser configured from the date/time subset of a locale
    pub fn from_locale(locale: &LocaleInfo) -> Result<Self> {
        Ok(Self::new(
            locale.date_format.clone(),
            locale.time_format.clone(),
            locale.timezone()?,
        ))
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Set the text to parse and forget previously parsed fields
    pub fn set_input(&mut self, input: &str) {
        self.input.clear();
        self.input.push_str(input.trim());
        self.fields = Fields::default();
    }

    /// Parse the input with a strftime-style format. `%AD` and `%AT` expand to
    /// the automatic date and time formats; `%OS` reads fractional seconds.
    pub fn parse(&mut self, format: &str) -> bool {
        let formats = expand_format(format);
        let input = self.input.clone();
        self.parse_candidates(&input, formats.iter().map(String::as_str))
    }

    pub fn parse_locale_date(&mut self) -> bool {
        let format = self.date_format.clone();
        self.parse(&format)
    }

    pub fn parse_locale_time(&mut self) -> bool {
        let format = self.time_format.clone();
        self.parse(&format)
    }

    /// Parse common ISO8601 layouts: a date alone, or a date and time joined by
    /// `T` or a space, with optional seconds, fraction, and `Z` or numeric offset.
    pub fn parse_iso8601(&mut self) -> bool {
        let input = self.input.clone();
        match input.strip_suffix(['Z', 'z']) {
            Some(stripped) => {
                let ok = self.parse_candidates(stripped, ISO8601_CANDIDATES.iter().copied());
                if ok {
                    self.fields.offset = Some(0);
                }
                ok
            }
            None => self.parse_candidates(&input, ISO8601_CANDIDATES.iter().copied()),
        }
    }

    fn parse_candidates<'f>(&mut self, input: &str, formats: impl Iterator<Item = &'f str>) -> bool {
        for format in formats {
            let mut parsed = Parsed::new();
            if parse(&mut parsed, input, StrftimeItems::new(format)).is_ok() {
                self.fields = Fields::from_parsed(&parsed);
                return true;
            }
        }
        false
    }

    fn psec(&self) -> f64 {
        f64::from(self.fields.nanosecond.unwrap_or(0)) / 1e9
    }

    /// Calendar fields only; missing month or day default to 1
    pub fn make_date(&self) -> DateTime {
        DateTime::new(
            self.fields.year.unwrap_or(1970),
            self.fields.month.unwrap_or(1),
            self.fields.day.unwrap_or(1),
            0,
            0,
            0,
            0.0,
            utc_offset(),
        )
    }

    /// Calendar and clock fields, in the parsed offset or else the locale
    /// timezone's offset at that wall-clock time. Returns `None` for a local
    /// time that the timezone skips.
    pub fn make_datetime(&self) -> Option<DateTime> {
        let dt = DateTime::utc(
            self.fields.year.unwrap_or(1970),
            self.fields.month.unwrap_or(1),
            self.fields.day.unwrap_or(1),
            self.fields.hour.unwrap_or(0),
            self.fields.minute.unwrap_or(0),
            self.fields.second.unwrap_or(0),
            self.psec(),
        );

        if let Some(offset) = self.fields.offset.and_then(FixedOffset::east_opt) {
            return Some(dt.with_offset(offset));
        }
        match dt.naive_datetime() {
            Some(local) => self.tz.offset_at(&local).map(|offset| dt.with_offset(offset)),
            // invalid fields; validation rejects them whatever the offset
            None => Some(dt),
        }
    }

    /// Clock fields only
    pub fn make_time(&self) -> DateTime {
        DateTime::new(
            1970,
            1,
            1,
            self.fields.hour.unwrap_or(0),
            self.fields.minute.unwrap_or(0),
            self.fields.second.unwrap_or(0),
            self.psec(),
            utc_offset(),
        )
    }
}

/// Expand automatic format directives into concrete chrono formats
fn expand_format(format: &str) -> Vec<String> {
    let format = format.replace("%OS", "%S%.f");
    let mut formats = vec![format];

    for (directive, candidates) in [
        (AUTO_DATE_FORMAT, AUTO_DATE_CANDIDATES),
        (AUTO_TIME_FORMAT, AUTO_TIME_CANDIDATES),
    ] {
        if formats.iter().any(|f| f.contains(directive)) {
            formats = formats
                .iter()
                .flat_map(|f| candidates.iter().map(move |c| f.replace(directive, c)))
                .collect();
        }
    }

    formats
}

/// Build UTC instants (seconds since the epoch) from parallel component slices.
///
/// `month` and `day` are 1-based. Components that do not form a valid date
/// and time produce `None`. All slices must have the same length.
pub fn utc_time(
    year: &[i32],
    month: &[i32],
    day: &[i32],
    hour: &[i32],
    minute: &[i32],
    second: &[i32],
    psec: &[f64],
) -> Result<Vec<Option<f64>>> {
    let n = year.len();
    let lengths = [
        month.len(),
        day.len(),
        hour.len(),
        minute.len(),
        second.len(),
        psec.len(),
    ];
    if lengths.iter().any(|&len| len != n) {
        return Err(ReadError::length_mismatch(format!(
            "all inputs must be the same length (year has {}, others have {:?})",
            n, lengths
        )));
    }

    Ok((0..n)
        .map(|i| {
            let component = |v: i32| u32::try_from(v).ok();
            let dt = DateTime::utc(
                year[i],
                component(month[i])?,
                component(day[i])?,
                component(hour[i])?,
                component(minute[i])?,
                component(second[i])?,
                psec[i],
            );
            if dt.valid_datetime() { dt.datetime() } else { None }
        })
        .collect())
}
