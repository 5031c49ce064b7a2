//! CSV encoding for tables
//!
//! The first record holds column names. Cell types are not stored, so they
//! are inferred on read: empty fields are null, `true`/`false` are booleans,
//! then integers, then floats, and anything else stays a string.

use serde_json::{Number, Value};

use crate::content::Table;
use crate::error::{LakeError, Result};

pub(super) fn encode(table: &Table) -> Result<Vec<u8>> {
    if table.num_columns() == 0 {
        return Ok(Vec::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(cell_to_field))?;
    }

    writer
        .into_inner()
        .map_err(|e| LakeError::Io(e.into_error()))
}

pub(super) fn decode(bytes: &[u8]) -> Result<Table> {
    if bytes.is_empty() {
        return Ok(Table::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(infer_cell).collect());
    }

    Table::new(columns, rows)
}

fn cell_to_field(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn infer_cell(field: &str) -> Value {
    match field {
        "" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(int) = field.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(uint) = field.parse::<u64>() {
        return Value::from(uint);
    }
    if let Some(number) = field.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }

    Value::String(field.to_string())
}
