use crate::core::Features;

pub trait Clusterer {
    fn learn_one(&mut self, x: &Features);

    /// Index of the cluster `x` belongs to under the current state.
    fn predict_one(&self, x: &Features) -> usize;
}
