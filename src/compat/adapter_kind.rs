use crate::core::Estimator;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Which capability of the wrapped estimator a `BatchAdapter` drives.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AdapterKind {
    Classifier,
    Regressor,
    Transformer,
    Clusterer,
}

impl AdapterKind {
    pub fn supports(self, estimator: &dyn Estimator) -> bool {
        match self {
            AdapterKind::Classifier => estimator.as_classifier().is_some(),
            AdapterKind::Regressor => estimator.as_regressor().is_some(),
            AdapterKind::Transformer => estimator.as_transformer().is_some(),
            AdapterKind::Clusterer => estimator.as_clusterer().is_some(),
        }
    }

    /// Whether fitting consumes a target column.
    pub fn is_supervised(self) -> bool {
        matches!(self, AdapterKind::Classifier | AdapterKind::Regressor)
    }

    /// Picks the first matching capability: binary-only classifier,
    /// clusterer, classifier, regressor, transformer.
    pub fn detect(estimator: &dyn Estimator) -> Option<Self> {
        let binary = estimator
            .as_classifier()
            .is_some_and(|c| c.is_binary_only());
        if binary {
            return Some(AdapterKind::Classifier);
        }
        [
            AdapterKind::Clusterer,
            AdapterKind::Classifier,
            AdapterKind::Regressor,
            AdapterKind::Transformer,
        ]
        .into_iter()
        .find(|kind| kind.supports(estimator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::{ComplementNaiveBayes, LogisticRegression};
    use crate::clusterers::KMeans;
    use crate::regressors::LinearRegression;
    use crate::transformers::StandardScaler;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn detects_each_estimator_family() {
        let cases: Vec<(Box<dyn Estimator>, AdapterKind)> = vec![
            (Box::new(LogisticRegression::default()), AdapterKind::Classifier),
            (Box::new(ComplementNaiveBayes::default()), AdapterKind::Classifier),
            (Box::new(LinearRegression::default()), AdapterKind::Regressor),
            (Box::new(StandardScaler::new()), AdapterKind::Transformer),
            (Box::new(KMeans::default()), AdapterKind::Clusterer),
        ];
        for (estimator, kind) in cases {
            assert_eq!(AdapterKind::detect(estimator.as_ref()), Some(kind));
            for other in AdapterKind::iter().filter(|k| *k != kind) {
                assert!(!other.supports(estimator.as_ref()));
            }
        }
    }

    #[test]
    fn parses_kebab_case_names() {
        assert_eq!(
            AdapterKind::from_str("clusterer").unwrap(),
            AdapterKind::Clusterer
        );
        assert_eq!(AdapterKind::Regressor.to_string(), "regressor");
        assert!(AdapterKind::Classifier.is_supervised());
        assert!(!AdapterKind::Transformer.is_supervised());
    }
}
