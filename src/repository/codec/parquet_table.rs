//! Parquet encoding for tables
//!
//! Each column gets one arrow type from its non-null cells: booleans map to
//! Boolean, integers to Int64, strings to Utf8, and floats to Float64. A
//! column mixing integers and floats is widened to Float64, so its integers
//! come back as floats. Any other mix, or an unsigned integer beyond the
//! Int64 range, is rejected with [`LakeError::InvalidTable`].

use std::sync::Arc;

use arrow_array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int64Array, RecordBatch, StringArray,
};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use serde_json::{Number, Value};

use crate::content::Table;
use crate::error::{LakeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Boolean,
    Int64,
    Float64,
    Utf8,
}

impl ColumnKind {
    fn data_type(self) -> DataType {
        match self {
            ColumnKind::Boolean => DataType::Boolean,
            ColumnKind::Int64 => DataType::Int64,
            ColumnKind::Float64 => DataType::Float64,
            ColumnKind::Utf8 => DataType::Utf8,
        }
    }
}

pub(super) fn encode(table: &Table) -> Result<Vec<u8>> {
    if table.num_columns() == 0 {
        return Err(LakeError::InvalidTable {
            reason: "parquet needs at least one column".to_string(),
        });
    }

    let mut fields = Vec::with_capacity(table.num_columns());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.num_columns());
    for (index, name) in table.columns().iter().enumerate() {
        let kind = column_kind(table, index)?;
        fields.push(Field::new(name.as_str(), kind.data_type(), true));
        arrays.push(build_array(table, index, kind));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(buffer)
}

pub(super) fn decode(bytes: &[u8]) -> Result<Table> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::copy_from_slice(bytes))?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect();

    let mut rows = Vec::new();
    for batch in builder.build()? {
        let batch = batch?;
        let decoded = batch
            .columns()
            .iter()
            .map(|array| decode_array(array.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        for row in 0..batch.num_rows() {
            rows.push(decoded.iter().map(|column| column[row].clone()).collect());
        }
    }

    Table::new(columns, rows)
}

fn column_kind(table: &Table, index: usize) -> Result<ColumnKind> {
    let name = &table.columns()[index];
    let mut kind = None;
    for row in table.rows() {
        let cell_kind = match &row[index] {
            Value::Null => continue,
            Value::Bool(_) => ColumnKind::Boolean,
            Value::Number(n) if n.is_i64() => ColumnKind::Int64,
            Value::Number(n) if n.is_u64() => {
                return Err(LakeError::InvalidTable {
                    reason: format!("column '{}' holds {} beyond the Int64 range", name, n),
                });
            }
            Value::Number(_) => ColumnKind::Float64,
            Value::String(_) => ColumnKind::Utf8,
            // Table construction only admits scalar cells.
            Value::Array(_) | Value::Object(_) => {
                return Err(LakeError::InvalidTable {
                    reason: format!("column '{}' holds a nested value", name),
                });
            }
        };
        kind = Some(match (kind, cell_kind) {
            (None, next) => next,
            (Some(current), next) if current == next => current,
            (Some(ColumnKind::Int64), ColumnKind::Float64)
            | (Some(ColumnKind::Float64), ColumnKind::Int64) => ColumnKind::Float64,
            (Some(current), next) => {
                return Err(LakeError::InvalidTable {
                    reason: format!(
                        "column '{}' mixes {:?} and {:?} cells",
                        name, current, next
                    ),
                });
            }
        });
    }
    Ok(kind.unwrap_or(ColumnKind::Utf8))
}

fn build_array(table: &Table, index: usize, kind: ColumnKind) -> ArrayRef {
    let cells = table.rows().iter().map(|row| &row[index]);
    match kind {
        ColumnKind::Boolean => Arc::new(cells.map(Value::as_bool).collect::<BooleanArray>()),
        ColumnKind::Int64 => Arc::new(cells.map(Value::as_i64).collect::<Int64Array>()),
        ColumnKind::Float64 => Arc::new(cells.map(Value::as_f64).collect::<Float64Array>()),
        ColumnKind::Utf8 => Arc::new(cells.map(Value::as_str).collect::<StringArray>()),
    }
}

fn decode_array(array: &dyn Array) -> Result<Vec<Value>> {
    let unsupported = || LakeError::InvalidTable {
        reason: format!("unsupported parquet column type {}", array.data_type()),
    };

    let values = match array.data_type() {
        DataType::Boolean => {
            let array = array
                .as_any()
                .downcast_ref::<BooleanArray>()
                .ok_or_else(unsupported)?;
            collect_cells(array, |i| Value::Bool(array.value(i)))
        }
        DataType::Int64 => {
            let array = array
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or_else(unsupported)?;
            collect_cells(array, |i| Value::from(array.value(i)))
        }
        DataType::Float64 => {
            let array = array
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(unsupported)?;
            collect_cells(array, |i| {
                Number::from_f64(array.value(i)).map_or(Value::Null, Value::Number)
            })
        }
        DataType::Utf8 => {
            let array = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(unsupported)?;
            collect_cells(array, |i| Value::String(array.value(i).to_string()))
        }
        _ => return Err(unsupported()),
    };

    Ok(values)
}

fn collect_cells(array: &dyn Array, cell: impl Fn(usize) -> Value) -> Vec<Value> {
    (0..array.len())
        .map(|i| if array.is_null(i) { Value::Null } else { cell(i) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_typed_columns_survive() {
        let table = Table::from_columns([
            ("id", vec![json!(1), json!(-2)]),
            ("score", vec![json!(0.5), json!(null)]),
            ("name", vec![json!("x"), json!(null)]),
            ("ok", vec![json!(true), json!(false)]),
            ("empty", vec![json!(null), json!(null)]),
        ])
        .unwrap();

        assert_eq!(decode(&encode(&table).unwrap()).unwrap(), table);
    }

    #[test]
    fn test_mixed_column_rejected() {
        let table = Table::from_columns([("v", vec![json!(1), json!("x"), json!(true)])]).unwrap();

        let err = encode(&table).unwrap_err();
        assert!(matches!(err, LakeError::InvalidTable { .. }));
    }

    #[test]
    fn test_unsigned_beyond_int64_rejected() {
        let table = Table::from_columns([("v", vec![json!(u64::MAX)])]).unwrap();
        assert!(matches!(
            encode(&table),
            Err(LakeError::InvalidTable { .. })
        ));
    }

    #[test]
    fn test_int_and_float_widen_to_float() {
        let table = Table::from_columns([("v", vec![json!(1), json!(2.5)])]).unwrap();

        let decoded = decode(&encode(&table).unwrap()).unwrap();
        assert_eq!(decoded.column("v").unwrap(), vec![&json!(1.0), &json!(2.5)]);
    }
}
