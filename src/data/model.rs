use std::fmt;

use ndarray::{Array1, Array2};

use crate::error::ValidationError;

/// Feature columns in the order the model is fit and evaluated with.
pub const FEATURE_COLUMNS: [&str; 2] = ["size", "bedrooms"];
/// Prediction target.
pub const TARGET_COLUMN: &str = "price";

// ---------------------------------------------------------------------------
// Cell – a single value in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring what a DataFrame reader would infer.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Null,
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    /// `NaN` is how the columnar formats spell a missing float.
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Cell::Null
        } else {
            Cell::Number(v)
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Index of the first null cell, if any.
    pub fn first_null(&self) -> Option<usize> {
        self.cells.iter().position(Cell::is_null)
    }

    /// Convert every cell to `f64`, failing on the first null or text cell.
    pub fn to_f64(&self) -> Result<Vec<f64>, ValidationError> {
        self.cells
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                Cell::Number(v) => Ok(*v),
                Cell::Null => Err(ValidationError::NullValues {
                    column: self.name.clone(),
                    row,
                }),
                Cell::Text(_) => Err(ValidationError::NonNumeric {
                    column: self.name.clone(),
                    row,
                }),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// HouseDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Row-aligned table of named columns, kept in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HouseDataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl HouseDataset {
    /// Build a dataset. Fails on the first column whose length disagrees with
    /// the others, or whose name was already used.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, String> {
        let n_rows = columns.first().map_or(0, |c| c.cells.len());
        for (i, col) in columns.iter().enumerate() {
            if col.cells.len() != n_rows {
                return Err(format!(
                    "column '{}' has {} values, expected {n_rows}",
                    col.name,
                    col.cells.len()
                ));
            }
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(format!("duplicate column '{}'", col.name));
            }
        }
        Ok(Self { columns, n_rows })
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Numeric view of a column; a missing column is reported as such.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, ValidationError> {
        self.column(name)
            .ok_or_else(|| ValidationError::MissingColumn(name.to_string()))?
            .to_f64()
    }

    /// Stack the named columns into an `n_rows x names.len()` matrix, in the
    /// order given.
    pub fn matrix(&self, names: &[&str]) -> Result<Array2<f64>, ValidationError> {
        let mut x = Array2::zeros((self.n_rows, names.len()));
        for (j, name) in names.iter().enumerate() {
            let values = Array1::from(self.numeric_column(name)?);
            x.column_mut(j).assign(&values);
        }
        Ok(x)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(v: &[f64]) -> Vec<Cell> {
        v.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = HouseDataset::from_columns(vec![
            Column::new("size", nums(&[1.0, 2.0])),
            Column::new("price", nums(&[1.0])),
        ])
        .unwrap_err();
        assert!(err.contains("price"));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = HouseDataset::from_columns(vec![
            Column::new("size", nums(&[1.0])),
            Column::new("size", nums(&[2.0])),
        ])
        .unwrap_err();
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn nan_becomes_null() {
        assert_eq!(Cell::from(f64::NAN), Cell::Null);
        assert_eq!(Cell::from(3.5), Cell::Number(3.5));
    }

    #[test]
    fn numeric_column_reports_first_bad_cell() {
        let ds = HouseDataset::from_columns(vec![Column::new(
            "size",
            vec![Cell::Number(1.0), Cell::Text("big".into()), Cell::Null],
        )])
        .unwrap();
        assert_eq!(
            ds.numeric_column("size"),
            Err(ValidationError::NonNumeric {
                column: "size".into(),
                row: 1
            })
        );
        assert_eq!(
            ds.numeric_column("bedrooms"),
            Err(ValidationError::MissingColumn("bedrooms".into()))
        );
    }

    #[test]
    fn matrix_follows_requested_order() {
        let ds = HouseDataset::from_columns(vec![
            Column::new("bedrooms", nums(&[1.0, 2.0])),
            Column::new("size", nums(&[50.0, 80.0])),
        ])
        .unwrap();
        let x = ds.matrix(&FEATURE_COLUMNS).unwrap();
        assert_eq!(x, ndarray::array![[50.0, 1.0], [80.0, 2.0]]);
    }
}
