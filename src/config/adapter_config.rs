use crate::compat::{AdapterKind, AdapterOptions, BatchAdapter};
use crate::config::EstimatorChoice;
use anyhow::{Context, Result};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything needed to build a `BatchAdapter` from a JSON document.
///
/// ```json
/// {
///   "estimator": { "type": "complement-nb", "params": { "alpha": 1.0 } },
///   "kind": "classifier",
///   "options": { "strict_binary": false }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AdapterConfig {
    pub estimator: EstimatorChoice,

    /// Detected from the estimator's capabilities when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AdapterKind>,

    #[serde(default)]
    pub options: AdapterOptions,
}

impl AdapterConfig {
    pub fn schema() -> Schema {
        schema_for!(AdapterConfig)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid adapter configuration")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("couldn't read {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("in {}", path.display()))
    }

    pub fn into_adapter(self) -> Result<BatchAdapter> {
        let estimator = self
            .estimator
            .build()
            .context("couldn't build the estimator")?;
        let kind = match self.kind {
            Some(kind) => kind,
            None => AdapterKind::detect(estimator.as_ref()).with_context(|| {
                format!("couldn't find an appropriate adapter for {}", estimator.name())
            })?,
        };
        Ok(BatchAdapter::with_options(estimator, kind, self.options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ComplementNbParams, KMeansParams};
    use std::io::Write;

    #[test]
    fn minimal_document_detects_the_kind() {
        let json = r#"{"estimator": {"type": "standard-scaler", "params": {}}}"#;
        let config = AdapterConfig::from_json_str(json).unwrap();
        assert_eq!(config.kind, None);
        let adapter = config.into_adapter().unwrap();
        assert_eq!(adapter.kind(), AdapterKind::Transformer);
        assert!(!adapter.is_fitted());
    }

    #[test]
    fn explicit_kind_and_options_are_honoured() {
        let json = r#"{
            "estimator": {"type": "logistic-regression", "params": {"lr": 0.1}},
            "kind": "classifier",
            "options": {"strict_binary": true}
        }"#;
        let adapter = AdapterConfig::from_json_str(json)
            .unwrap()
            .into_adapter()
            .unwrap();
        assert!(adapter.options().strict_binary);
        assert!(adapter.is_binary_only());
    }

    #[test]
    fn mismatched_kind_is_rejected() {
        let config = AdapterConfig {
            estimator: EstimatorChoice::KMeans(KMeansParams::default()),
            kind: Some(AdapterKind::Regressor),
            options: AdapterOptions::default(),
        };
        assert!(config.into_adapter().is_err());
    }

    #[test]
    fn invalid_parameters_surface_as_errors() {
        let config = AdapterConfig {
            estimator: EstimatorChoice::ComplementNb(ComplementNbParams { alpha: -1.0 }),
            ..AdapterConfig::default()
        };
        let err = config.into_adapter().unwrap_err();
        assert!(format!("{err:#}").contains("alpha"));
    }

    #[test]
    fn reads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"estimator": {{"type": "k-means", "params": {{"n_clusters": 3}}}}}}"#
        )
        .unwrap();

        let config = AdapterConfig::from_path(file.path()).unwrap();
        let EstimatorChoice::KMeans(p) = &config.estimator else {
            panic!("expected k-means, got {:?}", config.estimator);
        };
        assert_eq!(p.n_clusters, 3);
        assert_eq!(config.into_adapter().unwrap().kind(), AdapterKind::Clusterer);
    }

    #[test]
    fn missing_file_mentions_the_path() {
        let err = AdapterConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("not/here.json"));
    }

    #[test]
    fn schema_lists_every_estimator() {
        let schema = serde_json::to_string(&AdapterConfig::schema()).unwrap();
        for name in ["complement-nb", "logistic-regression", "k-means"] {
            assert!(schema.contains(name), "{name} missing from schema");
        }
    }
}
