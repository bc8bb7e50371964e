mod standard_scaler;
pub mod transformer;

pub use standard_scaler::StandardScaler;
pub use transformer::Transformer;
