use crate::core::{Features, Target};

pub trait Transformer {
    /// Updates the running state. Unsupervised transformers ignore `y`.
    fn learn_one(&mut self, x: &Features, y: Option<&Target>);

    fn transform_one(&self, x: &Features) -> Features;
}
