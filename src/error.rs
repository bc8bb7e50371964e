use thiserror::Error;

/// Failures raised while checking batch input before any row is replayed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("found array with {rows} sample(s) and {columns} feature(s), expected at least {min_samples} sample(s) and {min_features} feature(s)")]
    Empty {
        rows: usize,
        columns: usize,
        min_samples: usize,
        min_features: usize,
    },

    #[error("input contains a non-finite value at row {row}, column {column}")]
    NonFinite { row: usize, column: usize },

    #[error("found input variables with inconsistent numbers of samples: {x_rows} and {y_rows}")]
    RowMismatch { x_rows: usize, y_rows: usize },

    #[error("row {row} has {found} value(s), expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column {0:?} appears more than once")]
    DuplicateColumn(String),

    #[error("a target is required to fit a {0}")]
    MissingTarget(&'static str),

    #[error("expected {expected} targets, got {found}")]
    TargetKind {
        expected: &'static str,
        found: &'static str,
    },

    #[error("target contains a non-finite value at row {0}")]
    NonFiniteTarget(usize),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("expected {expected} features, got {found}")]
    Shape { expected: usize, found: usize },

    #[error("this {0} instance is not fitted yet, call `fit` first")]
    NotFitted(&'static str),

    #[error("label {0} is not part of the known classes")]
    UnknownLabel(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, Error>;
