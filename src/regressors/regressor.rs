use crate::core::Features;

pub trait Regressor {
    fn learn_one(&mut self, x: &Features, y: f64);

    fn predict_one(&self, x: &Features) -> f64;
}
