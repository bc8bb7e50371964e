pub mod estimator;
pub mod features;
pub mod table;

pub use estimator::Estimator;
pub use features::{ClassLabel, Features, Target, Targets};
pub use table::{ClassTable, Table};
