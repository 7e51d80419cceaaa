//! Tests for date, datetime and time collectors

use super::{assert_approx_eq, collect, collect_with};
use crate::collector::{ColumnClass, ColumnData};
use crate::config::LocaleInfo;
use crate::models::ColumnSpec;
use crate::parsers::DateTime;

fn days(year: i32, month: u32, day: u32) -> Option<i32> {
    DateTime::utc(year, month, day, 0, 0, 0, 0.0).date()
}

#[test]
fn test_date_with_locale_default() {
    let (column, warnings) = collect(
        &ColumnSpec::date(None),
        &[Some("2021-03-15"), Some("2021/03/16"), None, Some("")],
    );
    assert_eq!(
        column.data,
        ColumnData::Date(vec![days(2021, 3, 15), days(2021, 3, 16), None, None])
    );
    assert_eq!(column.metadata.class, Some(ColumnClass::Date));
    assert!(warnings.is_empty());
}

#[test]
fn test_date_with_declared_format() {
    let (column, warnings) = collect(
        &ColumnSpec::date(Some("%d/%m/%Y")),
        &[Some("15/03/2021"), Some("2021-03-15")],
    );
    assert_eq!(column.data, ColumnData::Date(vec![days(2021, 3, 15), None]));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].expected, "date like %d/%m/%Y");
    assert_eq!(warnings[0].actual, "2021-03-15");
}

#[test]
fn test_date_impossible_calendar_day() {
    let (column, warnings) = collect(&ColumnSpec::date(None), &[Some("2021-02-30")]);
    assert_eq!(column.data, ColumnData::Date(vec![None]));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].expected, "valid date");
}

#[test]
fn test_date_uses_locale_format() {
    let locale = LocaleInfo::default().with_date_format("%m/%d/%Y");
    let (column, warnings) = collect_with(
        &ColumnSpec::date(None),
        &locale,
        &[Some("03/15/2021"), Some("15/03/2021")],
    );
    assert_eq!(column.data, ColumnData::Date(vec![days(2021, 3, 15), None]));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].expected, "date like %m/%d/%Y");
}

#[test]
fn test_datetime_iso8601_default() {
    let (column, warnings) = collect(
        &ColumnSpec::datetime(None),
        &[
            Some("2010-10-01T20:10:05Z"),
            Some("2010-10-01 22:10:05+02:00"),
            Some("2010-10-01"),
            Some("yesterday"),
        ],
    );

    let ColumnData::Datetime(values) = &column.data else {
        panic!("Expected datetime column, got {:?}", column.data);
    };
    let expected = DateTime::utc(2010, 10, 1, 20, 10, 5, 0.0).datetime();
    assert_eq!(values[0], expected);
    assert_eq!(values[1], expected);
    assert_eq!(values[2], DateTime::utc(2010, 10, 1, 0, 0, 0, 0.0).datetime());
    assert_eq!(values[3], None);

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].expected, "date like ISO8601");
    assert_eq!(column.metadata.class, Some(ColumnClass::DateTime));
    assert_eq!(column.metadata.timezone.as_deref(), Some("UTC"));
}

#[test]
fn test_datetime_locale_timezone() {
    let locale = LocaleInfo::default().with_tz("-05:00");
    let (column, warnings) = collect_with(
        &ColumnSpec::datetime(Some("%Y-%m-%d %H:%M")),
        &locale,
        &[Some("2020-06-01 07:00")],
    );
    assert!(warnings.is_empty());
    assert_eq!(
        column.data,
        ColumnData::Datetime(vec![DateTime::utc(2020, 6, 1, 12, 0, 0, 0.0).datetime()])
    );
    assert_eq!(column.metadata.timezone.as_deref(), Some("-05:00"));
}

#[test]
fn test_datetime_named_timezone() {
    let locale = LocaleInfo::default().with_tz("America/Chicago");
    let (column, warnings) = collect_with(
        &ColumnSpec::datetime(None),
        &locale,
        &[
            Some("2021-01-15 12:00:00"),
            Some("2021-07-15 12:00:00"),
            Some("2021-03-14 02:30:00"),
            Some("2021-07-15T12:00:00Z"),
        ],
    );

    assert_eq!(
        column.data,
        ColumnData::Datetime(vec![
            DateTime::utc(2021, 1, 15, 18, 0, 0, 0.0).datetime(),
            DateTime::utc(2021, 7, 15, 17, 0, 0, 0.0).datetime(),
            None,
            DateTime::utc(2021, 7, 15, 12, 0, 0, 0.0).datetime(),
        ])
    );
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].row, 2);
    assert_eq!(warnings[0].expected, "valid date");
    assert_eq!(column.metadata.timezone.as_deref(), Some("America/Chicago"));
}

#[test]
fn test_datetime_invalid_components() {
    let (column, warnings) = collect(
        &ColumnSpec::datetime(None),
        &[Some("2021-02-29T10:00:00")],
    );
    assert_eq!(column.data, ColumnData::Datetime(vec![None]));
    assert_eq!(warnings[0].expected, "valid date");
}

#[test]
fn test_time_collector() {
    let (column, warnings) = collect(
        &ColumnSpec::time(None),
        &[Some("10:30"), Some("10:30:15.25"), Some("1:05 PM"), Some("noon"), None],
    );

    let ColumnData::Time(values) = &column.data else {
        panic!("Expected time column, got {:?}", column.data);
    };
    assert_eq!(values[0], Some(37_800.0));
    assert_approx_eq(values[1].unwrap(), 37_815.25, 1e-9);
    assert_eq!(values[2], Some(47_100.0));
    assert_eq!(values[3], None);
    assert_eq!(values[4], None);

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].expected, "time like %AT");
    assert_eq!(column.metadata.units.as_deref(), Some("secs"));
    assert_eq!(column.metadata.class, Some(ColumnClass::Time));
}

#[test]
fn test_time_with_declared_format() {
    let (column, warnings) = collect(&ColumnSpec::time(Some("%H%M")), &[Some("0945"), Some("9:45")]);
    assert_eq!(column.data, ColumnData::Time(vec![Some(35_100.0), None]));
    assert_eq!(warnings[0].expected, "time like %H%M");
}

#[test]
fn test_empty_format_falls_back_to_locale() {
    let (column, warnings) = collect(&ColumnSpec::date(Some("")), &[Some("2000-01-01")]);
    assert_eq!(column.data, ColumnData::Date(vec![Some(10_957)]));
    assert!(warnings.is_empty());
}
