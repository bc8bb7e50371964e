use crate::clusterers::Clusterer;
use crate::core::{Estimator, Features};
use std::any::Any;

/// Assigns every sample to the cluster numbered after the samples seen so far.
///
/// Its answer changes with every update, which makes the moment a label is
/// computed observable.
#[derive(Debug, Clone, Default)]
pub struct CountingClusterer {
    pub seen: usize,
}

impl Clusterer for CountingClusterer {
    fn learn_one(&mut self, _x: &Features) {
        self.seen += 1;
    }

    fn predict_one(&self, _x: &Features) -> usize {
        self.seen
    }
}

impl Estimator for CountingClusterer {
    fn clone_estimator(&self) -> Box<dyn Estimator> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "CountingClusterer"
    }

    fn as_clusterer(&self) -> Option<&dyn Clusterer> {
        Some(self)
    }

    fn as_clusterer_mut(&mut self) -> Option<&mut dyn Clusterer> {
        Some(self)
    }
}
