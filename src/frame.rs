//! Conversion of finished columns into Polars structures.
//!
//! Dates become `Date`, datetimes become millisecond `Datetime` (UTC
//! instants; the timezone label stays in the column metadata), times become
//! `Time`, factors become `Enum` columns whose categories follow the level
//! order, and raw columns become `Binary`.

use crate::collector::{Collector, ColumnData, TypedColumn};
use crate::error::{ReadError, Result};
use crate::warnings::Warnings;
use polars::prelude::*;
use tracing::debug;

fn seconds_to_units(values: &[Option<f64>], per_second: f64) -> Vec<Option<i64>> {
    values
        .iter()
        .map(|v| v.map(|secs| (secs * per_second).round() as i64))
        .collect()
}

/// Enum series over the non-NA levels, in level order. Rows coded to the NA
/// level become null, since Polars categories cannot hold a null.
fn factor_series(
    name: PlSmallStr,
    codes: &[Option<u32>],
    levels: &[Option<String>],
) -> Result<Series> {
    let mut categories = Vec::with_capacity(levels.len());
    let remap: Vec<Option<u32>> = levels
        .iter()
        .map(|level| {
            level.as_deref().map(|label| {
                categories.push(label);
                categories.len() as u32 - 1
            })
        })
        .collect();

    let categories = Series::new(PlSmallStr::EMPTY, categories);
    let categories = categories.str()?.rechunk();
    let dtype = create_enum_dtype(categories.downcast_as_array().clone());

    let codes: Vec<Option<u32>> = codes
        .iter()
        .map(|code| code.and_then(|c| remap.get(c as usize).copied().flatten()))
        .collect();
    Ok(Series::new(name, codes).cast(&dtype)?)
}

impl TypedColumn {
    /// Convert into a named Polars series
    pub fn to_series(&self, name: &str) -> Result<Series> {
        let name = PlSmallStr::from(name);

        let series = match &self.data {
            ColumnData::Logical(values) => Series::new(name, values.as_slice()),
            ColumnData::Integer(values) => Series::new(name, values.as_slice()),
            ColumnData::Double(values) => Series::new(name, values.as_slice()),
            ColumnData::Character(values) => Series::new(name, values.as_slice()),
            ColumnData::Date(values) => {
                Series::new(name, values.as_slice()).cast(&DataType::Date)?
            }
            ColumnData::Datetime(values) => Series::new(name, seconds_to_units(values, 1e3))
                .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?,
            ColumnData::Time(values) => {
                Series::new(name, seconds_to_units(values, 1e9)).cast(&DataType::Time)?
            }
            ColumnData::Factor(codes) => {
                let levels = self.metadata.levels.as_deref().unwrap_or_default();
                factor_series(name, codes, levels)?
            }
            ColumnData::Raw(values) => {
                let chunked: BinaryChunked = values.iter().map(|v| v.as_deref()).collect();
                chunked.with_name(name).into_series()
            }
        };

        Ok(series)
    }
}

/// Build a `DataFrame` from finished collectors, one name per collector.
/// Skip collectors contribute no column.
pub fn columns_to_dataframe(names: &[&str], collectors: &[Collector]) -> Result<DataFrame> {
    if names.len() != collectors.len() {
        return Err(ReadError::length_mismatch(format!(
            "{} column names for {} collectors",
            names.len(),
            collectors.len()
        )));
    }

    let mut columns = Vec::with_capacity(collectors.len());
    for (name, collector) in names.iter().zip(collectors) {
        if let Some(column) = collector.vector() {
            columns.push(column.to_series(name)?.into_column());
        }
    }

    debug!(
        "Built DataFrame with {} of {} columns",
        columns.len(),
        collectors.len()
    );
    Ok(DataFrame::new(columns)?)
}

impl Warnings {
    /// One row per warning with 1-based `row` and `col`
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let rows: Vec<u64> = self.iter().map(|w| w.row as u64 + 1).collect();
        let cols: Vec<u64> = self.iter().map(|w| w.col as u64 + 1).collect();
        let expected: Vec<&str> = self.iter().map(|w| w.expected.as_str()).collect();
        let actual: Vec<&str> = self.iter().map(|w| w.actual.as_str()).collect();

        Ok(DataFrame::new(vec![
            Column::new("row".into(), rows),
            Column::new("col".into(), cols),
            Column::new("expected".into(), expected),
            Column::new("actual".into(), actual),
        ])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{ColumnClass, ColumnMetadata};
    use crate::config::LocaleInfo;
    use crate::models::parse_compact;
    use crate::token::Token;

    #[test]
    fn test_scalar_series() {
        let column = TypedColumn::bare(ColumnData::Integer(vec![Some(1), None, Some(3)]));
        let series = column.to_series("n").unwrap();
        assert_eq!(series.dtype(), &DataType::Int32);
        assert_eq!(series.name().as_str(), "n");
        assert_eq!(series.null_count(), 1);
        assert_eq!(series.i32().unwrap().get(2), Some(3));
    }

    #[test]
    fn test_temporal_series() {
        let date = TypedColumn::bare(ColumnData::Date(vec![Some(0), None]));
        assert_eq!(date.to_series("d").unwrap().dtype(), &DataType::Date);

        let datetime = TypedColumn::bare(ColumnData::Datetime(vec![Some(1.5)]));
        let series = datetime.to_series("dt").unwrap();
        assert_eq!(
            series.dtype(),
            &DataType::Datetime(TimeUnit::Milliseconds, None)
        );
        let physical = series.cast(&DataType::Int64).unwrap();
        assert_eq!(physical.i64().unwrap().get(0), Some(1500));

        let time = TypedColumn::bare(ColumnData::Time(vec![Some(61.0)]));
        let series = time.to_series("t").unwrap();
        assert_eq!(series.dtype(), &DataType::Time);
        let physical = series.cast(&DataType::Int64).unwrap();
        assert_eq!(physical.i64().unwrap().get(0), Some(61_000_000_000));
    }

    fn factor_column(codes: Vec<Option<u32>>, levels: &[Option<&str>]) -> TypedColumn {
        TypedColumn {
            data: ColumnData::Factor(codes),
            metadata: ColumnMetadata {
                levels: Some(levels.iter().map(|l| l.map(str::to_string)).collect()),
                ..ColumnMetadata::with_class(ColumnClass::Factor { ordered: true })
            },
        }
    }

    fn categories(series: &Series) -> Vec<String> {
        series
            .categorical()
            .unwrap()
            .get_rev_map()
            .get_categories()
            .values_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_factor_series_keeps_level_order() {
        let column = factor_column(
            vec![Some(2), Some(0), None],
            &[Some("lo"), Some("mid"), Some("hi")],
        );
        let series = column.to_series("f").unwrap();

        assert!(matches!(series.dtype(), DataType::Enum(_, _)));
        assert_eq!(categories(&series), vec!["lo", "mid", "hi"]);

        let labels = series.cast(&DataType::String).unwrap();
        let labels = labels.str().unwrap();
        assert_eq!(labels.get(0), Some("hi"));
        assert_eq!(labels.get(1), Some("lo"));
        assert_eq!(labels.get(2), None);
    }

    #[test]
    fn test_factor_series_na_level_becomes_null() {
        let column = factor_column(vec![Some(1), Some(0), Some(2)], &[Some("b"), None, Some("a")]);
        let series = column.to_series("f").unwrap();

        assert_eq!(categories(&series), vec!["b", "a"]);
        assert_eq!(series.null_count(), 1);
        let labels = series.cast(&DataType::String).unwrap();
        let labels = labels.str().unwrap();
        assert_eq!(labels.get(0), None);
        assert_eq!(labels.get(1), Some("b"));
        assert_eq!(labels.get(2), Some("a"));
    }

    #[test]
    fn test_raw_series() {
        let column = TypedColumn::bare(ColumnData::Raw(vec![Some(vec![1, 2]), None]));
        let series = column.to_series("r").unwrap();
        assert_eq!(series.dtype(), &DataType::Binary);
        assert_eq!(series.binary().unwrap().get(0), Some(&[1u8, 2][..]));
        assert_eq!(series.null_count(), 1);
    }

    #[test]
    fn test_columns_to_dataframe_omits_skip() {
        let specs = parse_compact("c_d").unwrap();
        let mut collectors =
            crate::collector::collectors_create(&specs, &LocaleInfo::default()).unwrap();
        crate::collector::collectors_resize(&mut collectors, 1);
        for (col, (collector, text)) in collectors.iter_mut().zip(["a", "b", "2.5"]).enumerate() {
            collector
                .set_value(0, &Token::string(text.as_bytes(), 0, col))
                .unwrap();
        }

        let df = columns_to_dataframe(&["name", "ignored", "value"], &collectors).unwrap();
        assert_eq!(df.shape(), (1, 2));
        assert!(df.column("ignored").is_err());
        assert_eq!(
            df.column("value").unwrap().f64().unwrap().get(0),
            Some(2.5)
        );
    }

    #[test]
    fn test_columns_to_dataframe_name_mismatch() {
        let result = columns_to_dataframe(&["a"], &[]);
        assert!(matches!(result, Err(ReadError::LengthMismatch { .. })));
    }

    #[test]
    fn test_warnings_dataframe() {
        let mut warnings = Warnings::new();
        warnings.add_warning(0, 1, "an integer", "x");
        warnings.add_warning(4, 0, "a double", "y");

        let df = warnings.to_dataframe().unwrap();
        assert_eq!(df.shape(), (2, 4));
        let rows = df.column("row").unwrap().u64().unwrap().clone();
        assert_eq!(rows.get(1), Some(5));
        let actual = df.column("actual").unwrap().str().unwrap().clone();
        assert_eq!(actual.get(0), Some("x"));
    }
}
