//! Tests for creation, sizing, finalization and contract violations

use super::cell_token;
use crate::collector::{
    Collector, ColumnData, collectors_clear, collectors_create, collectors_resize,
    collectors_set_warnings,
};
use crate::config::LocaleInfo;
use crate::error::ReadError;
use crate::models::{CollectorType, ColumnSpec, parse_compact};
use crate::token::Token;
use crate::warnings::Warnings;

fn integer_collector(values: &[&str]) -> Collector {
    let mut collector = Collector::create(&ColumnSpec::integer(), &LocaleInfo::default()).unwrap();
    collector.resize(values.len());
    for (row, value) in values.iter().enumerate() {
        collector.set_value(row, &cell_token(Some(*value), row)).unwrap();
    }
    collector
}

#[test]
fn test_create_every_type() {
    let locale = LocaleInfo::default();
    for collector_type in CollectorType::ALL {
        let collector = Collector::create(&ColumnSpec::new(collector_type), &locale).unwrap();
        assert_eq!(collector.collector_type(), collector_type);
        assert_eq!(collector.size(), 0);
        assert_eq!(collector.skip(), collector_type == CollectorType::Skip);
    }
}

#[test]
fn test_unknown_tag_is_fatal() {
    let result = Collector::from_tag("collector_guess", &LocaleInfo::default());
    assert!(matches!(result, Err(ReadError::UnsupportedColumnType { .. })));

    let collector = Collector::from_tag("collector_double", &LocaleInfo::default()).unwrap();
    assert_eq!(collector.collector_type(), CollectorType::Double);
}

#[test]
fn test_invalid_locale_is_fatal_on_create() {
    let locale = LocaleInfo::default().with_encoding("no-such-encoding");
    assert!(Collector::create(&ColumnSpec::character(), &locale).is_err());
    // Collectors that do not transcode do not look at the encoding
    assert!(Collector::create(&ColumnSpec::integer(), &locale).is_ok());
}

#[test]
fn test_eof_token_is_fatal() {
    let mut collector = integer_collector(&["1"]);
    match collector.set_value(0, &Token::eof(3, 2)) {
        Err(ReadError::InvalidToken { row, col }) => {
            assert_eq!((row, col), (3, 2));
        }
        other => panic!("Expected InvalidToken, got {:?}", other),
    }

    let mut skip = Collector::create(&ColumnSpec::skip(), &LocaleInfo::default()).unwrap();
    assert!(skip.set_value(0, &Token::eof(0, 0)).is_err());
}

#[test]
fn test_row_out_of_bounds_is_fatal() {
    let mut collector = integer_collector(&["1", "2"]);
    match collector.set_value(2, &cell_token(Some("3"), 2)) {
        Err(ReadError::RowOutOfBounds { row, size }) => assert_eq!((row, size), (2, 2)),
        other => panic!("Expected RowOutOfBounds, got {:?}", other),
    }
}

#[test]
fn test_vector_is_idempotent() {
    let collector = integer_collector(&["1", "x", "3"]);
    let first = collector.vector().unwrap();
    let second = collector.vector().unwrap();
    assert_eq!(first, second);

    let mut factor = Collector::create(&ColumnSpec::factor(None, true, false), &LocaleInfo::default()).unwrap();
    factor.resize(2);
    factor.set_value(0, &cell_token(Some("k"), 0)).unwrap();
    factor.set_value(1, &cell_token(Some("j"), 1)).unwrap();
    assert_eq!(factor.vector(), factor.vector());
}

#[test]
fn test_resize_same_length_preserves_values() {
    let mut collector = integer_collector(&["1", "2", "3"]);
    collector.resize(3);
    collector.resize(3);
    assert_eq!(collector.size(), 3);
    assert_eq!(
        collector.vector().unwrap().data,
        ColumnData::Integer(vec![Some(1), Some(2), Some(3)])
    );
}

#[test]
fn test_resize_shrink_then_grow() {
    let mut collector = integer_collector(&["1", "2", "3"]);
    collector.resize(2);
    assert_eq!(
        collector.vector().unwrap().data,
        ColumnData::Integer(vec![Some(1), Some(2)])
    );

    collector.resize(4);
    assert_eq!(collector.size(), 4);
    assert_eq!(
        collector.vector().unwrap().data,
        ColumnData::Integer(vec![Some(1), Some(2), None, None])
    );
}

#[test]
fn test_clear() {
    let mut collector = integer_collector(&["1", "2"]);
    collector.clear();
    assert_eq!(collector.size(), 0);
    assert!(collector.vector().unwrap().is_empty());
    collector.clear();
    assert_eq!(collector.size(), 0);
}

#[test]
fn test_skip_collector_has_no_storage() {
    let mut skip = Collector::create(&ColumnSpec::skip(), &LocaleInfo::default()).unwrap();
    skip.resize(10);
    assert_eq!(skip.size(), 0);
    assert!(skip.skip());
    skip.set_value(5, &cell_token(Some("anything"), 5)).unwrap();
    assert!(skip.vector().is_none());
}

#[test]
fn test_collector_set_helpers() {
    let specs = parse_compact("i_c").unwrap();
    let mut collectors = collectors_create(&specs, &LocaleInfo::default()).unwrap();
    let warnings = Warnings::shared();
    collectors_set_warnings(&mut collectors, &warnings);
    collectors_resize(&mut collectors, 2);

    assert_eq!(collectors[0].size(), 2);
    assert_eq!(collectors[1].size(), 0);
    assert_eq!(collectors[2].size(), 2);

    for row in 0..2 {
        for (col, collector) in collectors.iter_mut().enumerate() {
            collector
                .set_value(row, &Token::string(b"x1", row, col))
                .unwrap();
        }
    }

    // "x1" is not an integer; the character column takes it as-is
    let recorded = warnings.borrow();
    assert_eq!(recorded.len(), 2);
    assert!(recorded.iter().all(|w| w.col == 0));
    drop(recorded);

    collectors_clear(&mut collectors);
    assert!(collectors.iter().all(|c| c.size() == 0));
}

#[test]
fn test_collectors_create_validates_locale() {
    let locale = LocaleInfo::default().with_grouping_mark('.');
    let result = collectors_create(&[ColumnSpec::double()], &locale);
    assert!(matches!(result, Err(ReadError::Configuration { .. })));
}

#[test]
fn test_unbatched_collector_does_not_fail() {
    let mut collector = Collector::create(&ColumnSpec::double(), &LocaleInfo::default()).unwrap();
    collector.resize(1);
    collector.set_value(0, &cell_token(Some("oops"), 0)).unwrap();
    assert_eq!(collector.vector().unwrap().data, ColumnData::Double(vec![None]));
}
