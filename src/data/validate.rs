use super::model::{HouseDataset, FEATURE_COLUMNS, TARGET_COLUMN};
use crate::error::ValidationError;

/// Columns the strict profile requires, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 3] = [FEATURE_COLUMNS[0], FEATURE_COLUMNS[1], TARGET_COLUMN];

// ---------------------------------------------------------------------------
// Validation profiles
// ---------------------------------------------------------------------------

/// Which set of dataset invariants to enforce.
///
/// The two profiles check different rules and are not nested: only
/// [`Strict`](ValidationProfile::Strict) looks at `size`/`bedrooms` and value
/// positivity, while [`Minimal`](ValidationProfile::Minimal) is what training
/// runs before fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationProfile {
    /// Required columns present, no nulls, every required value > 0.
    Strict,
    /// No nulls, `price` present.
    Minimal,
}

impl ValidationProfile {
    /// Check `dataset`, returning the first violated rule.
    pub fn check(self, dataset: &HouseDataset) -> Result<(), ValidationError> {
        match self {
            ValidationProfile::Strict => {
                for name in REQUIRED_COLUMNS {
                    require_column(dataset, name)?;
                }
                check_no_nulls(dataset)?;
                for name in REQUIRED_COLUMNS {
                    check_positive(dataset, name)?;
                }
            }
            ValidationProfile::Minimal => {
                check_no_nulls(dataset)?;
                require_column(dataset, TARGET_COLUMN)?;
            }
        }
        log::debug!("{self:?} validation passed for {} rows", dataset.len());
        Ok(())
    }
}

fn require_column(dataset: &HouseDataset, name: &str) -> Result<(), ValidationError> {
    if dataset.has_column(name) {
        Ok(())
    } else {
        Err(ValidationError::MissingColumn(name.to_string()))
    }
}

fn check_no_nulls(dataset: &HouseDataset) -> Result<(), ValidationError> {
    for col in dataset.columns() {
        if let Some(row) = col.first_null() {
            return Err(ValidationError::NullValues {
                column: col.name.clone(),
                row,
            });
        }
    }
    Ok(())
}

/// Text cells count as invalid values alongside zero and negatives.
fn check_positive(dataset: &HouseDataset, name: &str) -> Result<(), ValidationError> {
    let Some(col) = dataset.column(name) else {
        return Err(ValidationError::MissingColumn(name.to_string()));
    };
    let bad = col
        .cells
        .iter()
        .position(|cell| !cell.as_f64().is_some_and(|v| v > 0.0));
    match bad {
        Some(row) => Err(ValidationError::NonPositive {
            column: name.to_string(),
            row,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Cell, Column};

    fn dataset(cols: &[(&str, Vec<Cell>)]) -> HouseDataset {
        HouseDataset::from_columns(
            cols.iter()
                .map(|(name, cells)| Column::new(*name, cells.clone()))
                .collect(),
        )
        .unwrap()
    }

    fn nums(v: &[f64]) -> Vec<Cell> {
        v.iter().map(|&x| Cell::Number(x)).collect()
    }

    fn houses() -> HouseDataset {
        dataset(&[
            ("size", nums(&[50.0, 100.0, 75.0])),
            ("bedrooms", nums(&[1.0, 2.0, 2.0])),
            ("price", nums(&[100_000.0, 200_000.0, 160_000.0])),
        ])
    }

    #[test]
    fn valid_data_passes_both_profiles() {
        let ds = houses();
        assert_eq!(ValidationProfile::Strict.check(&ds), Ok(()));
        assert_eq!(ValidationProfile::Minimal.check(&ds), Ok(()));
    }

    #[test]
    fn minimal_only_needs_price_and_no_nulls() {
        let ds = dataset(&[
            ("price", nums(&[100.0, 200.0])),
            ("size", nums(&[50.0, 70.0])),
        ]);
        assert_eq!(ValidationProfile::Minimal.check(&ds), Ok(()));
        assert_eq!(
            ValidationProfile::Strict.check(&ds),
            Err(ValidationError::MissingColumn("bedrooms".into()))
        );
    }

    #[test]
    fn missing_price_fails_minimal() {
        let ds = dataset(&[("size", nums(&[50.0])), ("bedrooms", nums(&[1.0]))]);
        assert_eq!(
            ValidationProfile::Minimal.check(&ds),
            Err(ValidationError::MissingColumn("price".into()))
        );
    }

    #[test]
    fn null_in_size_fails_both_profiles() {
        let ds = dataset(&[
            ("size", vec![Cell::Number(50.0), Cell::Null]),
            ("bedrooms", nums(&[1.0, 2.0])),
            ("price", nums(&[100.0, 200.0])),
        ]);
        let expected = Err(ValidationError::NullValues {
            column: "size".into(),
            row: 1,
        });
        assert_eq!(ValidationProfile::Strict.check(&ds), expected);
        assert_eq!(ValidationProfile::Minimal.check(&ds), expected);
    }

    #[test]
    fn negative_bedrooms_fails_only_strict() {
        let ds = dataset(&[
            ("size", nums(&[50.0, 100.0])),
            ("bedrooms", nums(&[1.0, -1.0])),
            ("price", nums(&[100.0, 200.0])),
        ]);
        assert_eq!(
            ValidationProfile::Strict.check(&ds),
            Err(ValidationError::NonPositive {
                column: "bedrooms".into(),
                row: 1
            })
        );
        assert_eq!(ValidationProfile::Minimal.check(&ds), Ok(()));
    }

    #[test]
    fn zero_price_is_not_positive() {
        let ds = dataset(&[
            ("size", nums(&[50.0])),
            ("bedrooms", nums(&[1.0])),
            ("price", nums(&[0.0])),
        ]);
        assert!(matches!(
            ValidationProfile::Strict.check(&ds),
            Err(ValidationError::NonPositive { column, .. }) if column == "price"
        ));
    }

    #[test]
    fn strict_checks_columns_before_nulls() {
        let ds = dataset(&[
            ("size", vec![Cell::Null]),
            ("price", nums(&[100.0])),
        ]);
        assert_eq!(
            ValidationProfile::Strict.check(&ds),
            Err(ValidationError::MissingColumn("bedrooms".into()))
        );
    }

    #[test]
    fn text_in_required_column_is_invalid() {
        let ds = dataset(&[
            ("size", vec![Cell::Text("big".into())]),
            ("bedrooms", nums(&[1.0])),
            ("price", nums(&[100.0])),
        ]);
        assert!(matches!(
            ValidationProfile::Strict.check(&ds),
            Err(ValidationError::NonPositive { column, row: 0 }) if column == "size"
        ));
    }
}
