use crate::core::{Estimator, Features};
use crate::error::Result;
use crate::regressors::Regressor;
use crate::utils::sgd::SgdWeights;
use std::any::Any;
use std::collections::HashMap;

/// Ordinary least squares fitted online with SGD.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    sgd: SgdWeights,
}

impl LinearRegression {
    pub fn new(lr: f64, intercept_lr: f64, l2: f64) -> Result<Self> {
        Ok(Self {
            sgd: SgdWeights::new(lr, intercept_lr, l2)?,
        })
    }

    pub fn weights(&self) -> &HashMap<String, f64> {
        self.sgd.weights()
    }

    pub fn intercept(&self) -> f64 {
        self.sgd.intercept()
    }
}

impl Regressor for LinearRegression {
    fn learn_one(&mut self, x: &Features, y: f64) {
        let gradient = self.sgd.raw_dot(x) - y;
        self.sgd.step(x, gradient);
    }

    fn predict_one(&self, x: &Features) -> f64 {
        self.sgd.raw_dot(x)
    }
}

impl Estimator for LinearRegression {
    fn clone_estimator(&self) -> Box<dyn Estimator> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "LinearRegression"
    }

    fn as_regressor(&self) -> Option<&dyn Regressor> {
        Some(self)
    }

    fn as_regressor_mut(&mut self) -> Option<&mut dyn Regressor> {
        Some(self)
    }
}
