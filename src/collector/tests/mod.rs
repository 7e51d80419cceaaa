//! Unit tests for the collector module, grouped by collector family.

pub mod lifecycle_tests;
pub mod temporal_tests;

use crate::collector::{Collector, TypedColumn};
use crate::config::LocaleInfo;
use crate::models::ColumnSpec;
use crate::token::Token;
use crate::warnings::{Warning, Warnings};

/// Token for one test cell: `None` is missing, `""` is empty
pub fn cell_token(cell: Option<&str>, row: usize) -> Token<'_> {
    match cell {
        None => Token::missing(row, 0),
        Some("") => Token::empty(row, 0),
        Some(text) => Token::string(text.as_bytes(), row, 0),
    }
}

/// Feed `cells` (one per row, column 0) through a fresh collector and return
/// the finished column with every warning raised.
pub fn collect_with(
    spec: &ColumnSpec,
    locale: &LocaleInfo,
    cells: &[Option<&str>],
) -> (TypedColumn, Vec<Warning>) {
    let warnings = Warnings::shared();
    let mut collector = Collector::create(spec, locale).unwrap();
    collector.set_warnings(warnings.clone());
    collector.resize(cells.len());

    for (row, cell) in cells.iter().enumerate() {
        collector.set_value(row, &cell_token(*cell, row)).unwrap();
    }

    let column = collector.vector().expect("storing collector");
    let records = warnings.borrow().records().to_vec();
    (column, records)
}

/// `collect_with` under the default locale
pub fn collect(spec: &ColumnSpec, cells: &[Option<&str>]) -> (TypedColumn, Vec<Warning>) {
    collect_with(spec, &LocaleInfo::default(), cells)
}

/// Assert that two f64 values are approximately equal
pub fn assert_approx_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() < tolerance,
        "Values {} and {} are not approximately equal (tolerance: {})",
        a,
        b,
        tolerance
    );
}
