use crate::core::{Estimator, Features, Target};
use crate::transformers::Transformer;
use std::any::Any;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
struct RunningMoments {
    n: f64,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    // Welford
    #[inline]
    fn add(&mut self, v: f64) {
        self.n += 1.0;
        let delta = v - self.mean;
        self.mean += delta / self.n;
        self.m2 += delta * (v - self.mean);
    }

    #[inline]
    fn variance(&self) -> f64 {
        if self.n > 0.0 { self.m2 / self.n } else { 0.0 }
    }
}

/// Standardizes each feature with its running mean and population variance.
///
/// Features with zero variance, or never seen, are mapped to `0.0`.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    moments: HashMap<String, RunningMoments>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mean(&self, feature: &str) -> Option<f64> {
        self.moments.get(feature).map(|m| m.mean)
    }

    pub fn variance(&self, feature: &str) -> Option<f64> {
        self.moments.get(feature).map(RunningMoments::variance)
    }
}

impl Transformer for StandardScaler {
    fn learn_one(&mut self, x: &Features, _y: Option<&Target>) {
        for (f, &v) in x {
            self.moments.entry(f.clone()).or_default().add(v);
        }
    }

    fn transform_one(&self, x: &Features) -> Features {
        x.iter()
            .map(|(f, &v)| {
                let scaled = match self.moments.get(f) {
                    Some(m) if m.variance() > 0.0 => (v - m.mean) / m.variance().sqrt(),
                    _ => 0.0,
                };
                (f.clone(), scaled)
            })
            .collect()
    }
}

impl Estimator for StandardScaler {
    fn clone_estimator(&self) -> Box<dyn Estimator> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "StandardScaler"
    }

    fn as_transformer(&self) -> Option<&dyn Transformer> {
        Some(self)
    }

    fn as_transformer_mut(&mut self) -> Option<&mut dyn Transformer> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x(a: f64) -> Features {
        [("a".to_string(), a)].into_iter().collect()
    }

    #[test]
    fn running_moments_match_population_statistics() {
        let mut scaler = StandardScaler::new();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            scaler.learn_one(&x(v), None);
        }
        assert!((scaler.mean("a").unwrap() - 5.0).abs() < 1e-12);
        assert!((scaler.variance("a").unwrap() - 4.0).abs() < 1e-12);
        assert!((scaler.transform_one(&x(9.0))["a"] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn constant_and_unseen_features_map_to_zero() {
        let mut scaler = StandardScaler::new();
        scaler.learn_one(&x(3.0), None);
        scaler.learn_one(&x(3.0), None);
        assert_eq!(scaler.transform_one(&x(10.0))["a"], 0.0);

        let other: Features = [("b".to_string(), 1.0)].into_iter().collect();
        assert_eq!(scaler.transform_one(&other)["b"], 0.0);
    }
}
