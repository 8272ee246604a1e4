//! Low-level Parquet column building.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int16Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use chrono::NaiveDate;
use hydrofill_gapfill::{Dataset, Flag, Quantity};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;

pub(crate) const SITE_COLUMN: &str = "site";
pub(crate) const DATE_COLUMN: &str = "date";
pub(crate) const FLAG_SUFFIX: &str = "_flag";

/// Days from 1970-01-01, the Arrow `Date32` encoding.
pub(crate) fn to_date32(date: NaiveDate) -> i32 {
    (date - NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date")).num_days() as i32
}

pub(crate) fn flag_column(quantity: Quantity) -> String {
    format!("{}{FLAG_SUFFIX}", quantity.name())
}

/// Builds the Arrow schema for reconstructed output.
///
/// Columns are `site`, `date`, then a nullable `Float64` value column and a
/// non-null `Int16` flag column per quantity. Value fields carry `units`
/// (when defined) and `flags` metadata; flag fields carry `flag_values` and
/// `flag_meanings`.
pub(crate) fn build_schema(quantities: &[Quantity]) -> Schema {
    let mut fields = vec![
        Field::new(SITE_COLUMN, DataType::Utf8, false),
        Field::new(DATE_COLUMN, DataType::Date32, false),
    ];

    for &q in quantities {
        let mut value_meta = HashMap::from([("flags".to_string(), flag_column(q))]);
        if let Some(units) = q.units() {
            value_meta.insert("units".to_string(), units.to_string());
        }
        fields.push(Field::new(q.name(), DataType::Float64, true).with_metadata(value_meta));

        let flag_meta = HashMap::from([
            ("flag_values".to_string(), Flag::values_attribute()),
            ("flag_meanings".to_string(), Flag::meanings_attribute()),
        ]);
        fields.push(Field::new(flag_column(q), DataType::Int16, false).with_metadata(flag_meta));
    }

    Schema::new(fields)
}

/// Converts every series of one site into a [`RecordBatch`], one row per day.
///
/// Missing values (only possible for skipped series) are written as nulls.
pub(crate) fn site_to_record_batch(
    dataset: &Dataset,
    site: &str,
    schema: &SchemaRef,
) -> Result<RecordBatch, IoError> {
    let axis = dataset.axis();
    let n = axis.len();

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec![site; n])),
        Arc::new(Date32Array::from(
            axis.dates().iter().map(|&d| to_date32(d)).collect::<Vec<_>>(),
        )),
    ];

    for &q in dataset.quantities() {
        let series = dataset.get(site, q).ok_or_else(|| IoError::Validation {
            count: 1,
            details: format!("no {q} series for site '{site}'"),
        })?;
        let values: Vec<Option<f64>> = series
            .values()
            .iter()
            .map(|&v| v.is_finite().then_some(v))
            .collect();
        let flags: Vec<i16> = series.flags().iter().map(|f| f.to_bits()).collect();
        columns.push(Arc::new(Float64Array::from(values)));
        columns.push(Arc::new(Int16Array::from(flags)));
    }

    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be created, or
/// [`IoError::Parquet`] if batch writing or file finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &SchemaRef,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::io(path, e))?;
    let mut writer = ArrowWriter::try_new(file, Arc::clone(schema), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrofill_calendar::DailyAxis;

    #[test]
    fn date32_epoch() {
        assert_eq!(to_date32(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(to_date32(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()), 10957);
    }

    #[test]
    fn schema_layout_and_metadata() {
        let schema = build_schema(&[Quantity::Flow, Quantity::No4Conc]);
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            vec!["site", "date", "flow", "flow_flag", "NO4_conc", "NO4_conc_flag"]
        );

        let flow = schema.field(2);
        assert_eq!(flow.metadata().get("units").map(String::as_str), Some("m3 s-1"));
        assert_eq!(flow.metadata().get("flags").map(String::as_str), Some("flow_flag"));
        assert!(schema.field(4).metadata().get("units").is_none());

        let flag = schema.field(3);
        assert_eq!(flag.data_type(), &DataType::Int16);
        assert_eq!(
            flag.metadata().get("flag_meanings").map(String::as_str),
            Some("Trend Interp Mean Clipped")
        );
        assert_eq!(
            flag.metadata().get("flag_values").map(String::as_str),
            Some("1 2 4 8")
        );
    }

    #[test]
    fn record_batch_has_one_row_per_day() {
        let axis = DailyAxis::new(
            NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2001, 1, 31).unwrap(),
        )
        .unwrap();
        let dataset = Dataset::new(axis, vec!["Davis".into()], vec![Quantity::Flow]).unwrap();
        let schema = Arc::new(build_schema(dataset.quantities()));
        let batch = site_to_record_batch(&dataset, "Davis", &schema).unwrap();
        assert_eq!(batch.num_rows(), 31);
        assert_eq!(batch.num_columns(), 4);
        // All-missing series becomes nulls.
        assert_eq!(batch.column(2).null_count(), 31);
    }
}
