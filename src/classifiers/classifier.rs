use crate::core::{ClassLabel, Features};
use crate::utils::math::argmax;
use std::collections::HashMap;

pub trait Classifier {
    fn learn_one(&mut self, x: &Features, y: &ClassLabel);

    /// Probability per known class. Empty when nothing has been learned.
    fn predict_proba_one(&self, x: &Features) -> HashMap<ClassLabel, f64>;

    fn predict_one(&self, x: &Features) -> Option<ClassLabel> {
        argmax(&self.predict_proba_one(x))
    }

    /// Binary-only classifiers learn from `ClassLabel::Int(0)` / `Int(1)`.
    fn is_binary_only(&self) -> bool {
        false
    }
}
