//! Reads back Parquet files written by [`write_parquet`](crate::write_parquet).

use std::collections::BTreeMap;
use std::path::Path;

use arrow::array::{Array, AsArray, RecordBatch};
use arrow::datatypes::{DataType, Date32Type, Float64Type, Int16Type, Schema};
use chrono::{Days, NaiveDate};
use hydrofill_calendar::DailyAxis;
use hydrofill_gapfill::{Dataset, FlagSet, Quantity, Series};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::IoError;
use crate::parquet_write::{DATE_COLUMN, SITE_COLUMN, flag_column};

/// Reads all record batches from a Parquet file.
fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::io(path, e))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    Ok(reader.collect::<Result<Vec<_>, _>>()?)
}

/// Checks the fixed columns and returns the quantities in column order.
fn validate_schema(schema: &Schema) -> Result<Vec<Quantity>, IoError> {
    let mut problems = Vec::new();
    let expect = |i: usize, name: &str, ty: DataType, problems: &mut Vec<String>| {
        match schema.fields().get(i) {
            Some(f) if f.name() == name && *f.data_type() == ty => {}
            Some(f) => problems.push(format!(
                "column {i}: expected '{name}' ({ty}), got '{}' ({})",
                f.name(),
                f.data_type()
            )),
            None => problems.push(format!("column {i}: expected '{name}', got nothing")),
        }
    };
    expect(0, SITE_COLUMN, DataType::Utf8, &mut problems);
    expect(1, DATE_COLUMN, DataType::Date32, &mut problems);

    let mut quantities = Vec::new();
    let rest = schema.fields().len().saturating_sub(2);
    if rest % 2 != 0 {
        problems.push(format!("expected value/flag column pairs, got {rest} columns"));
    }
    for pair in 0..rest / 2 {
        let i = 2 + 2 * pair;
        let name = schema.field(i).name();
        match name.parse::<Quantity>() {
            Ok(q) => {
                expect(i, q.name(), DataType::Float64, &mut problems);
                expect(i + 1, &flag_column(q), DataType::Int16, &mut problems);
                quantities.push(q);
            }
            Err(e) => problems.push(format!("column {i}: {e}")),
        }
    }

    if problems.is_empty() {
        Ok(quantities)
    } else {
        Err(IoError::Validation {
            count: problems.len(),
            details: problems.join("; "),
        })
    }
}

/// Per-site rows gathered from all batches: date plus (value, flag) per
/// quantity.
type SiteRows = Vec<(i32, Vec<(f64, i16)>)>;

fn from_date32(days: i32) -> Result<NaiveDate, IoError> {
    let shifted = if days >= 0 {
        NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date").checked_add_days(Days::new(days as u64))
    } else {
        NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date").checked_sub_days(Days::new(days.unsigned_abs() as u64))
    };
    shifted.ok_or_else(|| IoError::Validation {
        count: 1,
        details: format!("date32 value {days} out of range"),
    })
}

/// Loads a previously exported file back into a [`Dataset`].
///
/// The axis spans the earliest to the latest date in the file. Sites keep
/// the order of their first appearance. Null values become missing; flag
/// columns are checked for unknown bits.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Parquet`] on read failure,
/// [`IoError::Validation`] for an unexpected schema or empty file, or
/// [`IoError::Model`] for invalid flag values.
pub fn read_parquet(path: &Path) -> Result<Dataset, IoError> {
    let batches = read_batches(path)?;
    let Some(first) = batches.first() else {
        return Err(IoError::Validation {
            count: 1,
            details: "file contains no record batches".to_string(),
        });
    };
    let quantities = validate_schema(&first.schema())?;

    let mut site_order: Vec<String> = Vec::new();
    let mut rows: BTreeMap<usize, SiteRows> = BTreeMap::new();
    for batch in &batches {
        let sites = batch.column(0).as_string::<i32>();
        let dates = batch.column(1).as_primitive::<Date32Type>();
        let values: Vec<_> = (0..quantities.len())
            .map(|k| batch.column(2 + 2 * k).as_primitive::<Float64Type>())
            .collect();
        let flags: Vec<_> = (0..quantities.len())
            .map(|k| batch.column(3 + 2 * k).as_primitive::<Int16Type>())
            .collect();

        for row in 0..batch.num_rows() {
            let site = sites.value(row);
            let s = match site_order.iter().position(|x| x == site) {
                Some(s) => s,
                None => {
                    site_order.push(site.to_string());
                    site_order.len() - 1
                }
            };
            let cells = (0..quantities.len())
                .map(|k| {
                    let v = if values[k].is_null(row) {
                        f64::NAN
                    } else {
                        values[k].value(row)
                    };
                    (v, flags[k].value(row))
                })
                .collect();
            rows.entry(s).or_default().push((dates.value(row), cells));
        }
    }

    let all_dates = rows.values().flatten().map(|(d, _)| *d);
    let (Some(min), Some(max)) = (all_dates.clone().min(), all_dates.max()) else {
        return Err(IoError::Validation {
            count: 1,
            details: "file contains no rows".to_string(),
        });
    };
    let axis = DailyAxis::new(from_date32(min)?, from_date32(max)?)?;
    let n = axis.len();

    let mut dataset = Dataset::new(axis, site_order.clone(), quantities.clone())?;
    for (s, site_rows) in rows {
        for (k, &q) in quantities.iter().enumerate() {
            let mut values = vec![f64::NAN; n];
            let mut flags = vec![FlagSet::EMPTY; n];
            for (date, cells) in &site_rows {
                let index = dataset
                    .axis()
                    .index_of(from_date32(*date)?)
                    .ok_or_else(|| IoError::Validation {
                        count: 1,
                        details: format!("date32 value {date} outside the file's range"),
                    })?;
                let (v, bits) = cells[k];
                values[index] = v;
                flags[index] = FlagSet::from_bits(bits)?;
            }
            dataset.insert(&site_order[s], q, Series::from_parts(values, flags)?)?;
        }
    }

    Ok(dataset)
}
