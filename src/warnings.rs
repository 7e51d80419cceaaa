//! Parse warnings collected across all columns of one parse.
//!
//! Every collector of a parse shares one `Warnings` list through a
//! `WarningSink`. A sink without a shared list reports each warning straight
//! away through `tracing`.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::warn;

/// One data-quality problem. `row` and `col` are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub row: usize,
    pub col: usize,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]: expected {}, but got '{}'",
            self.row + 1,
            self.col + 1,
            self.expected,
            self.actual
        )
    }
}

/// Append-only list of warnings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warnings {
    records: Vec<Warning>,
}

/// Warnings list shared by every collector of a parse
pub type SharedWarnings = Rc<RefCell<Warnings>>;

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh list ready to be handed to collectors
    pub fn shared() -> SharedWarnings {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn add_warning(
        &mut self,
        row: usize,
        col: usize,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) {
        self.records.push(Warning {
            row,
            col,
            expected: expected.into(),
            actual: actual.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Warning] {
        &self.records
    }

    /// Warnings raised for a single column
    pub fn for_column(&self, col: usize) -> Vec<&Warning> {
        self.records.iter().filter(|w| w.col == col).collect()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// All warnings, one per line, in the order they were raised
    pub fn report(&self) -> String {
        self.records
            .iter()
            .map(Warning::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Where a collector sends its warnings
#[derive(Debug, Clone, Default)]
pub struct WarningSink {
    shared: Option<SharedWarnings>,
}

impl WarningSink {
    /// A sink that batches into `warnings`
    pub fn batched(warnings: SharedWarnings) -> Self {
        Self {
            shared: Some(warnings),
        }
    }

    /// A sink that reports every warning immediately
    pub fn immediate() -> Self {
        Self { shared: None }
    }

    pub fn is_batched(&self) -> bool {
        self.shared.is_some()
    }

    pub fn warn(&self, row: usize, col: usize, expected: &str, actual: &str) {
        match &self.shared {
            Some(shared) => shared.borrow_mut().add_warning(row, col, expected, actual),
            None => warn!(
                "[{}, {}]: expected {}, but got '{}'",
                row + 1,
                col + 1,
                expected,
                actual
            ),
        }
    }
}
