//! Finished columns and the metadata that travels with them.

use serde::{Deserialize, Serialize};

/// Values of one column. `None` is the NA sentinel for every type.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Logical(Vec<Option<bool>>),
    Integer(Vec<Option<i32>>),
    Double(Vec<Option<f64>>),
    Character(Vec<Option<String>>),
    /// Days since 1970-01-01
    Date(Vec<Option<i32>>),
    /// Seconds since 1970-01-01T00:00:00Z
    Datetime(Vec<Option<f64>>),
    /// Seconds since midnight
    Time(Vec<Option<f64>>),
    /// 0-based indices into the level list of the column metadata
    Factor(Vec<Option<u32>>),
    Raw(Vec<Option<Vec<u8>>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Logical(v) => v.len(),
            ColumnData::Integer(v) => v.len(),
            ColumnData::Double(v) => v.len(),
            ColumnData::Character(v) => v.len(),
            ColumnData::Date(v) => v.len(),
            ColumnData::Datetime(v) => v.len(),
            ColumnData::Time(v) => v.len(),
            ColumnData::Factor(v) => v.len(),
            ColumnData::Raw(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Class tag of a column whose values need interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnClass {
    Date,
    DateTime,
    Time,
    Factor { ordered: bool },
}

/// Metadata attached to a column at finalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub class: Option<ColumnClass>,
    /// Timezone label of a datetime column
    pub timezone: Option<String>,
    /// Realized factor levels in discovery or declaration order; `None` is the NA level
    pub levels: Option<Vec<Option<String>>>,
    /// Unit label of a time column
    pub units: Option<String>,
}

impl ColumnMetadata {
    pub fn with_class(class: ColumnClass) -> Self {
        Self {
            class: Some(class),
            ..Self::default()
        }
    }
}

/// A finished column: values plus metadata
#[derive(Debug, Clone, PartialEq)]
pub struct TypedColumn {
    pub data: ColumnData,
    pub metadata: ColumnMetadata,
}

impl TypedColumn {
    /// A column with no metadata
    pub fn bare(data: ColumnData) -> Self {
        Self {
            data,
            metadata: ColumnMetadata::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Label of the factor value at `row`, if this is a factor column
    pub fn factor_label(&self, row: usize) -> Option<&str> {
        let ColumnData::Factor(indices) = &self.data else {
            return None;
        };
        let index = (*indices.get(row)?)? as usize;
        self.metadata.levels.as_ref()?.get(index)?.as_deref()
    }
}

/// Change the logical length of a column buffer.
///
/// Equal length is a no-op and shrinking to a non-zero length truncates in
/// place. Growing exposes `None` slots. Shrinking to zero also releases the
/// backing storage.
pub(crate) fn resize_values<T: Clone>(values: &mut Vec<Option<T>>, n: usize) {
    if n == values.len() {
        return;
    }
    if n == 0 {
        values.clear();
        values.shrink_to_fit();
    } else if n < values.len() {
        values.truncate(n);
    } else {
        values.resize(n, None);
    }
}
