use crate::core::{Estimator, Features};
use crate::regressors::Regressor;
use std::any::Any;

/// Remembers every target in arrival order and predicts the last one.
#[derive(Debug, Clone, Default)]
pub struct RecordingRegressor {
    pub targets: Vec<f64>,
}

impl Regressor for RecordingRegressor {
    fn learn_one(&mut self, _x: &Features, y: f64) {
        self.targets.push(y);
    }

    fn predict_one(&self, _x: &Features) -> f64 {
        self.targets.last().copied().unwrap_or(0.0)
    }
}

impl Estimator for RecordingRegressor {
    fn clone_estimator(&self) -> Box<dyn Estimator> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "RecordingRegressor"
    }

    fn as_regressor(&self) -> Option<&dyn Regressor> {
        Some(self)
    }

    fn as_regressor_mut(&mut self) -> Option<&mut dyn Regressor> {
        Some(self)
    }
}
