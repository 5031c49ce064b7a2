//! Tabular content
//!
//! A table is a list of named columns and a list of rows holding one scalar
//! cell per column. Cells are JSON scalars (null, boolean, number, string).

use serde_json::Value;

use crate::error::{LakeError, Result};

/// Two-dimensional tabular data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from column names and rows.
    ///
    /// # Errors
    /// Returns [`LakeError::InvalidTable`] if:
    /// - a column name appears twice
    /// - a row's width differs from the number of columns
    /// - a cell is an array or an object
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(LakeError::InvalidTable {
                    reason: format!("duplicate column '{}'", name),
                });
            }
        }

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(LakeError::InvalidTable {
                    reason: format!(
                        "row {} has {} cells, expected {}",
                        row_index,
                        row.len(),
                        columns.len()
                    ),
                });
            }
            if let Some(col) = row.iter().position(|cell| !is_scalar(cell)) {
                return Err(LakeError::InvalidTable {
                    reason: format!(
                        "cell ({}, '{}') is not a scalar value",
                        row_index, columns[col]
                    ),
                });
            }
        }

        Ok(Self { columns, rows })
    }

    /// Create a table from named column vectors of equal length.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let (names, values): (Vec<String>, Vec<Vec<Value>>) = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .unzip();

        let height = values.first().map_or(0, Vec::len);
        if let Some(pos) = values.iter().position(|column| column.len() != height) {
            return Err(LakeError::InvalidTable {
                reason: format!(
                    "column '{}' has {} values, expected {}",
                    names[pos],
                    values[pos].len(),
                    height
                ),
            });
        }

        let rows = (0..height)
            .map(|row| values.iter().map(|column| column[row].clone()).collect())
            .collect();

        Self::new(names, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cells of a single column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}
