mod linear_regression;
pub mod regressor;

pub use linear_regression::LinearRegression;
pub use regressor::Regressor;
