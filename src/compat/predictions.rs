use crate::core::ClassLabel;

/// Row-aligned output of `BatchAdapter::predict`.
#[derive(Debug, Clone, PartialEq)]
pub enum Predictions {
    /// `None` where the classifier had no opinion.
    Classes(Vec<Option<ClassLabel>>),
    Values(Vec<f64>),
    Clusters(Vec<usize>),
}

impl Predictions {
    pub fn len(&self) -> usize {
        match self {
            Predictions::Classes(v) => v.len(),
            Predictions::Values(v) => v.len(),
            Predictions::Clusters(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_classes(&self) -> Option<&[Option<ClassLabel>]> {
        match self {
            Predictions::Classes(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_values(&self) -> Option<&[f64]> {
        match self {
            Predictions::Values(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_clusters(&self) -> Option<&[usize]> {
        match self {
            Predictions::Clusters(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}
