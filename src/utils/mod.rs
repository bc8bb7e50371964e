pub mod math;
pub mod sgd;
