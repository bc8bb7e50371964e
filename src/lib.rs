pub mod classifiers;
pub mod clusterers;
pub mod compat;
pub mod config;
pub mod core;
pub mod error;
pub mod regressors;
pub mod streams;
pub mod transformers;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use crate::compat::BatchAdapter;
pub use crate::core::{ClassLabel, ClassTable, Estimator, Features, Table, Target, Targets};
pub use crate::error::{Error, Result};
