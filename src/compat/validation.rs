use crate::core::{Table, Targets};
use crate::error::ValidationError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_min_samples() -> usize {
    1
}
fn default_min_features() -> usize {
    1
}

/// Checks applied to every batch before it reaches an estimator.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InputConstraints {
    #[serde(default = "default_min_samples")]
    #[schemars(
        title = "Minimum samples",
        description = "Batches with fewer rows are rejected."
    )]
    pub ensure_min_samples: usize,

    #[serde(default = "default_min_features")]
    #[schemars(
        title = "Minimum features",
        description = "Batches with fewer columns are rejected."
    )]
    pub ensure_min_features: usize,

    #[serde(default)]
    #[schemars(
        title = "Allow non-finite values",
        description = "Let NaN and infinite feature values through."
    )]
    pub allow_non_finite: bool,
}

impl Default for InputConstraints {
    fn default() -> Self {
        Self {
            ensure_min_samples: default_min_samples(),
            ensure_min_features: default_min_features(),
            allow_non_finite: false,
        }
    }
}

/// Rejects empty, non-finite or misaligned input.
pub fn validate(
    x: &Table,
    y: Option<&Targets>,
    constraints: &InputConstraints,
) -> Result<(), ValidationError> {
    if x.n_rows() < constraints.ensure_min_samples
        || x.n_columns() < constraints.ensure_min_features
    {
        return Err(ValidationError::Empty {
            rows: x.n_rows(),
            columns: x.n_columns(),
            min_samples: constraints.ensure_min_samples,
            min_features: constraints.ensure_min_features,
        });
    }

    if !constraints.allow_non_finite {
        if let Some(((row, column), _)) = x.values().indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::NonFinite { row, column });
        }
    }

    if let Some(y) = y {
        if y.len() != x.n_rows() {
            return Err(ValidationError::RowMismatch {
                x_rows: x.n_rows(),
                y_rows: y.len(),
            });
        }
        if let Targets::Values(values) = y {
            if let Some(row) = values.iter().position(|v| !v.is_finite()) {
                return Err(ValidationError::NonFiniteTarget(row));
            }
        }
    }
    Ok(())
}
