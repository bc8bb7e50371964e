use crate::classifiers::Classifier;
use crate::core::{ClassLabel, Estimator, Features};
use crate::error::Result;
use crate::utils::math::sigmoid;
use crate::utils::sgd::SgdWeights;
use std::any::Any;
use std::collections::HashMap;

/// Binary logistic regression trained online with SGD on the log loss.
///
/// Only `ClassLabel::Int(1)` counts as the positive class; any other label is
/// learned as negative.
#[derive(Debug, Clone, Default)]
pub struct LogisticRegression {
    sgd: SgdWeights,
}

impl LogisticRegression {
    pub fn new(lr: f64, intercept_lr: f64, l2: f64) -> Result<Self> {
        Ok(Self {
            sgd: SgdWeights::new(lr, intercept_lr, l2)?,
        })
    }

    pub fn weights(&self) -> &HashMap<String, f64> {
        self.sgd.weights()
    }

    fn positive_probability(&self, x: &Features) -> f64 {
        sigmoid(self.sgd.raw_dot(x))
    }
}

impl Classifier for LogisticRegression {
    fn learn_one(&mut self, x: &Features, y: &ClassLabel) {
        let target = if y.is_positive() { 1.0 } else { 0.0 };
        let gradient = self.positive_probability(x) - target;
        self.sgd.step(x, gradient);
    }

    fn predict_proba_one(&self, x: &Features) -> HashMap<ClassLabel, f64> {
        let p = self.positive_probability(x);
        HashMap::from([(ClassLabel::Int(0), 1.0 - p), (ClassLabel::Int(1), p)])
    }

    fn is_binary_only(&self) -> bool {
        true
    }
}

impl Estimator for LogisticRegression {
    fn clone_estimator(&self) -> Box<dyn Estimator> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "LogisticRegression"
    }

    fn as_classifier(&self) -> Option<&dyn Classifier> {
        Some(self)
    }

    fn as_classifier_mut(&mut self) -> Option<&mut dyn Classifier> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x(v: f64) -> Features {
        [("x".to_string(), v)].into_iter().collect()
    }

    #[test]
    fn untrained_model_is_undecided() {
        let model = LogisticRegression::default();
        let p = model.predict_proba_one(&x(3.0));
        assert_eq!(p[&ClassLabel::Int(1)], 0.5);
        assert!(model.is_binary_only());
    }

    #[test]
    fn learns_a_separable_threshold() {
        let mut model = LogisticRegression::new(0.5, 0.5, 0.0).unwrap();
        for _ in 0..200 {
            model.learn_one(&x(2.0), &ClassLabel::Int(1));
            model.learn_one(&x(-2.0), &ClassLabel::Int(0));
        }
        assert_eq!(model.predict_one(&x(1.5)), Some(ClassLabel::Int(1)));
        assert_eq!(model.predict_one(&x(-1.5)), Some(ClassLabel::Int(0)));
        let p = model.predict_proba_one(&x(1.0));
        assert!((p.values().sum::<f64>() - 1.0).abs() < 1e-12);
    }
}
