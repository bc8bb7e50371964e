use crate::classifiers::{ComplementNaiveBayes, LogisticRegression};
use crate::clusterers::KMeans;
use crate::core::Estimator;
use crate::error::Result;
use crate::regressors::LinearRegression;
use crate::transformers::StandardScaler;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_alpha() -> f64 {
    1.0
}
fn default_lr() -> f64 {
    0.01
}
fn default_l2() -> f64 {
    0.0
}
fn default_n_clusters() -> usize {
    5
}
fn default_halflife() -> f64 {
    0.5
}
fn default_mu() -> f64 {
    0.0
}
fn default_sigma() -> f64 {
    1.0
}
fn default_p() -> f64 {
    2.0
}
fn default_seed() -> u64 {
    42
}

/// Empty parameter object, so every variant still has a "params" key.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct NoParams {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ComplementNbParams {
    #[serde(default = "default_alpha")]
    #[schemars(
        title = "Smoothing",
        description = "Additive smoothing strength, must be > 0.",
        default = "default_alpha"
    )]
    pub alpha: f64,
}
impl Default for ComplementNbParams {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SgdParams {
    #[serde(default = "default_lr")]
    #[schemars(
        title = "Learning rate",
        description = "Step size applied to the weights.",
        default = "default_lr"
    )]
    pub lr: f64,

    #[serde(default = "default_lr")]
    #[schemars(
        title = "Intercept learning rate",
        description = "Step size applied to the intercept.",
        default = "default_lr"
    )]
    pub intercept_lr: f64,

    #[serde(default = "default_l2")]
    #[schemars(
        title = "L2 penalty",
        description = "Ridge penalty on the weights.",
        default = "default_l2"
    )]
    pub l2: f64,
}
impl Default for SgdParams {
    fn default() -> Self {
        Self {
            lr: default_lr(),
            intercept_lr: default_lr(),
            l2: default_l2(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct KMeansParams {
    #[serde(default = "default_n_clusters")]
    #[schemars(title = "Clusters", default = "default_n_clusters")]
    pub n_clusters: usize,

    #[serde(default = "default_halflife")]
    #[schemars(
        title = "Halflife",
        description = "How far the closest center moves towards each sample, in (0, 1].",
        default = "default_halflife"
    )]
    pub halflife: f64,

    #[serde(default = "default_mu")]
    #[schemars(title = "Initial mean", default = "default_mu")]
    pub mu: f64,

    #[serde(default = "default_sigma")]
    #[schemars(title = "Initial deviation", default = "default_sigma")]
    pub sigma: f64,

    #[serde(default = "default_p")]
    #[schemars(
        title = "Minkowski power",
        description = "1 is Manhattan, 2 is Euclidean.",
        default = "default_p"
    )]
    pub p: f64,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", default = "default_seed")]
    pub seed: u64,
}
impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            n_clusters: default_n_clusters(),
            halflife: default_halflife(),
            mu: default_mu(),
            sigma: default_sigma(),
            p: default_p(),
            seed: default_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(EstimatorKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum EstimatorChoice {
    #[strum_discriminants(strum(
        message = "Complement Naive Bayes",
        detailed_message = "Naive Bayes scored against the complement of each class."
    ))]
    ComplementNb(ComplementNbParams),
    #[strum_discriminants(strum(
        message = "Logistic Regression",
        detailed_message = "Binary classifier trained with SGD on the log loss."
    ))]
    LogisticRegression(SgdParams),
    #[strum_discriminants(strum(
        message = "Linear Regression",
        detailed_message = "Regressor trained with SGD on the squared loss."
    ))]
    LinearRegression(SgdParams),
    #[strum_discriminants(strum(
        message = "Standard Scaler",
        detailed_message = "Scales every feature to zero mean and unit variance."
    ))]
    StandardScaler(NoParams),
    #[strum_discriminants(strum(
        message = "Incremental KMeans",
        detailed_message = "Online KMeans with randomly seeded centers."
    ))]
    KMeans(KMeansParams),
}

impl Default for EstimatorChoice {
    fn default() -> Self {
        Self::ComplementNb(ComplementNbParams::default())
    }
}

impl EstimatorChoice {
    pub fn kind(&self) -> EstimatorKind {
        self.into()
    }

    /// Instantiates the chosen estimator, validating its parameters.
    pub fn build(&self) -> Result<Box<dyn Estimator>> {
        let estimator: Box<dyn Estimator> = match self {
            EstimatorChoice::ComplementNb(p) => Box::new(ComplementNaiveBayes::new(p.alpha)?),
            EstimatorChoice::LogisticRegression(p) => {
                Box::new(LogisticRegression::new(p.lr, p.intercept_lr, p.l2)?)
            }
            EstimatorChoice::LinearRegression(p) => {
                Box::new(LinearRegression::new(p.lr, p.intercept_lr, p.l2)?)
            }
            EstimatorChoice::StandardScaler(_) => Box::new(StandardScaler::new()),
            EstimatorChoice::KMeans(p) => Box::new(KMeans::new(
                p.n_clusters,
                p.halflife,
                p.mu,
                p.sigma,
                p.p,
                p.seed,
            )?),
        };
        Ok(estimator)
    }
}
