use crate::classifiers::Classifier;
use crate::clusterers::Clusterer;
use crate::regressors::Regressor;
use crate::transformers::Transformer;
use std::any::Any;
use std::fmt::Debug;

/// Base of every online estimator.
///
/// Capabilities are discovered through the `as_*` accessors instead of type
/// checks, so one adapter can drive any estimator family. An implementor
/// overrides only the accessors for the capabilities it actually has.
pub trait Estimator: Any + Debug {
    /// Structurally independent copy; no mutable state is shared with `self`.
    fn clone_estimator(&self) -> Box<dyn Estimator>;

    fn as_any(&self) -> &dyn Any;

    fn name(&self) -> &'static str;

    fn as_classifier(&self) -> Option<&dyn Classifier> {
        None
    }

    fn as_classifier_mut(&mut self) -> Option<&mut dyn Classifier> {
        None
    }

    fn as_regressor(&self) -> Option<&dyn Regressor> {
        None
    }

    fn as_regressor_mut(&mut self) -> Option<&mut dyn Regressor> {
        None
    }

    fn as_transformer(&self) -> Option<&dyn Transformer> {
        None
    }

    fn as_transformer_mut(&mut self) -> Option<&mut dyn Transformer> {
        None
    }

    fn as_clusterer(&self) -> Option<&dyn Clusterer> {
        None
    }

    fn as_clusterer_mut(&mut self) -> Option<&mut dyn Clusterer> {
        None
    }
}

impl Clone for Box<dyn Estimator> {
    fn clone(&self) -> Self {
        self.clone_estimator()
    }
}
