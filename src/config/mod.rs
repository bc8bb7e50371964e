mod adapter_config;
mod estimator_choice;

pub use adapter_config::AdapterConfig;
pub use estimator_choice::*;
