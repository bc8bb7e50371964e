use crate::core::Features;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Sparse linear weights updated by plain stochastic gradient descent.
#[derive(Debug, Clone)]
pub struct SgdWeights {
    lr: f64,
    intercept_lr: f64,
    l2: f64,
    weights: HashMap<String, f64>,
    intercept: f64,
}

impl Default for SgdWeights {
    fn default() -> Self {
        Self {
            lr: 0.01,
            intercept_lr: 0.01,
            l2: 0.0,
            weights: HashMap::new(),
            intercept: 0.0,
        }
    }
}

impl SgdWeights {
    pub fn new(lr: f64, intercept_lr: f64, l2: f64) -> Result<Self> {
        if !lr.is_finite() || lr <= 0.0 {
            return Err(Error::Configuration(format!(
                "learning rate must be a finite value > 0, got {lr}"
            )));
        }
        if !intercept_lr.is_finite() || intercept_lr < 0.0 {
            return Err(Error::Configuration(format!(
                "intercept learning rate must be a finite value >= 0, got {intercept_lr}"
            )));
        }
        if !l2.is_finite() || l2 < 0.0 {
            return Err(Error::Configuration(format!(
                "l2 must be a finite value >= 0, got {l2}"
            )));
        }
        Ok(Self {
            lr,
            intercept_lr,
            l2,
            weights: HashMap::new(),
            intercept: 0.0,
        })
    }

    pub fn weights(&self) -> &HashMap<String, f64> {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// `w . x + b`; features without a weight contribute nothing.
    pub fn raw_dot(&self, x: &Features) -> f64 {
        x.iter()
            .map(|(f, v)| self.weights.get(f).copied().unwrap_or(0.0) * v)
            .sum::<f64>()
            + self.intercept
    }

    /// One descent step given `d loss / d raw_dot`.
    pub fn step(&mut self, x: &Features, gradient: f64) {
        for (f, v) in x {
            let w = self.weights.entry(f.clone()).or_insert(0.0);
            *w -= self.lr * (gradient * v + self.l2 * *w);
        }
        self.intercept -= self.intercept_lr * gradient;
    }
}
