use crate::compat::{AdapterKind, AdapterOptions, LabelCodec, Predictions, validate};
use crate::core::{ClassLabel, ClassTable, Estimator, Features, Table, Target, Targets};
use crate::error::{Error, Result, ValidationError};
use crate::streams::iter_table;
use ndarray::Array2;
use std::borrow::Cow;
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Debug)]
struct FittedState {
    instance: Box<dyn Estimator>,
    n_features: usize,
    classes: Vec<ClassLabel>,
    codec: Option<LabelCodec>,
    labels: Vec<usize>,
}

/// Class set, codec and (possibly encoded) targets for one learning call.
struct Plan<'a> {
    classes: Vec<ClassLabel>,
    codec: Option<LabelCodec>,
    targets: Option<Cow<'a, Targets>>,
}

impl Plan<'_> {
    fn unsupervised() -> Self {
        Self {
            classes: Vec::new(),
            codec: None,
            targets: None,
        }
    }
}

/// Drives an online estimator with whole in-memory batches.
///
/// The estimator given at construction is a template and is never mutated:
/// the first fit clones it and every later call works on that private copy.
/// `fit` starts over from a fresh clone while `partial_fit` keeps learning on
/// the current one. Rows are always replayed one by one, in order, through
/// the estimator's single-sample API.
///
/// For binary-only classifiers the labels are mapped onto `Int(0)`/`Int(1)`
/// before learning and mapped back on the way out.
#[derive(Debug)]
pub struct BatchAdapter {
    estimator: Box<dyn Estimator>,
    kind: AdapterKind,
    options: AdapterOptions,
    state: Option<FittedState>,
}

impl BatchAdapter {
    pub fn new(estimator: Box<dyn Estimator>, kind: AdapterKind) -> Result<Self> {
        Self::with_options(estimator, kind, AdapterOptions::default())
    }

    pub fn with_options(
        estimator: Box<dyn Estimator>,
        kind: AdapterKind,
        options: AdapterOptions,
    ) -> Result<Self> {
        if !kind.supports(estimator.as_ref()) {
            return Err(Error::Configuration(format!(
                "{} is not a {kind}",
                estimator.name()
            )));
        }
        Ok(Self {
            estimator,
            kind,
            options,
            state: None,
        })
    }

    /// Wraps `estimator` with the adapter kind matching its capabilities.
    pub fn wrap(estimator: Box<dyn Estimator>) -> Result<Self> {
        let kind = AdapterKind::detect(estimator.as_ref()).ok_or_else(|| {
            Error::Configuration(format!(
                "couldn't find an appropriate adapter for {}",
                estimator.name()
            ))
        })?;
        Self::new(estimator, kind)
    }

    pub fn kind(&self) -> AdapterKind {
        self.kind
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    /// The untouched template estimator.
    pub fn estimator(&self) -> &dyn Estimator {
        self.estimator.as_ref()
    }

    /// The private, fitted copy of the estimator.
    pub fn instance(&self) -> Option<&dyn Estimator> {
        self.state.as_ref().map(|s| s.instance.as_ref())
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    pub fn n_features_in(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.n_features)
    }

    /// Known classes in ascending order; empty unless a classifier was fitted.
    pub fn classes(&self) -> &[ClassLabel] {
        match &self.state {
            Some(state) => &state.classes,
            None => &[],
        }
    }

    /// Cluster assigned to each row of the last `fit`/`partial_fit` batch.
    pub fn labels(&self) -> &[usize] {
        match &self.state {
            Some(state) => &state.labels,
            None => &[],
        }
    }

    pub fn is_binary_only(&self) -> bool {
        self.estimator
            .as_classifier()
            .is_some_and(|c| c.is_binary_only())
    }

    /// Learns `x` from scratch, discarding anything fitted before.
    pub fn fit(&mut self, x: &Table, y: Option<&Targets>) -> Result<&mut Self> {
        if self.state.take().is_some() {
            debug!(kind = %self.kind, "discarding previously fitted state");
        }
        self.learn_batch(x, y, None)?;
        Ok(self)
    }

    /// Keeps learning from `x`. The first call behaves like `fit`; `classes`
    /// may announce labels that only show up in later batches.
    pub fn partial_fit(
        &mut self,
        x: &Table,
        y: Option<&Targets>,
        classes: Option<&[ClassLabel]>,
    ) -> Result<&mut Self> {
        self.learn_batch(x, y, classes)?;
        Ok(self)
    }

    pub fn fit_predict(&mut self, x: &Table) -> Result<Vec<usize>> {
        self.require(AdapterKind::Clusterer, "fit_predict")?;
        self.fit(x, None)?;
        Ok(self.labels().to_vec())
    }

    pub fn fit_transform(&mut self, x: &Table, y: Option<&Targets>) -> Result<Table> {
        self.require(AdapterKind::Transformer, "fit_transform")?;
        self.fit(x, y)?;
        self.transform(x)
    }

    pub fn predict(&self, x: &Table) -> Result<Predictions> {
        let state = self.check_fitted(x)?;
        let instance = state.instance.as_ref();

        match self.kind {
            AdapterKind::Classifier => {
                let model = instance
                    .as_classifier()
                    .ok_or_else(|| capability_lost(instance, self.kind))?;
                let mut out = Vec::with_capacity(x.n_rows());
                for (xi, _) in iter_table(x, None) {
                    let label = match (&state.codec, model.predict_one(&xi)) {
                        (Some(codec), Some(code)) => Some(codec.decode(&code)?),
                        (_, label) => label,
                    };
                    out.push(label);
                }
                Ok(Predictions::Classes(out))
            }
            AdapterKind::Regressor => {
                let model = instance
                    .as_regressor()
                    .ok_or_else(|| capability_lost(instance, self.kind))?;
                Ok(Predictions::Values(
                    iter_table(x, None)
                        .map(|(xi, _)| model.predict_one(&xi))
                        .collect(),
                ))
            }
            AdapterKind::Clusterer => {
                let model = instance
                    .as_clusterer()
                    .ok_or_else(|| capability_lost(instance, self.kind))?;
                Ok(Predictions::Clusters(
                    iter_table(x, None)
                        .map(|(xi, _)| model.predict_one(&xi))
                        .collect(),
                ))
            }
            AdapterKind::Transformer => Err(Error::Configuration(
                "a transformer has no predict, use transform".into(),
            )),
        }
    }

    /// Dense probabilities, one column per known class in ascending order.
    /// Classes missing from a row's prediction get `0.0`.
    pub fn predict_proba(&self, x: &Table) -> Result<ClassTable> {
        self.require(AdapterKind::Classifier, "predict_proba")?;
        let state = self.check_fitted(x)?;
        let instance = state.instance.as_ref();
        let model = instance
            .as_classifier()
            .ok_or_else(|| capability_lost(instance, self.kind))?;

        let mut values = Array2::zeros((x.n_rows(), state.classes.len()));
        for (i, (xi, _)) in iter_table(x, None).enumerate() {
            for (label, p) in model.predict_proba_one(&xi) {
                let label = match &state.codec {
                    Some(codec) => match codec.decode(&label) {
                        Ok(label) => label,
                        Err(_) => continue,
                    },
                    None => label,
                };
                if let Some(j) = state.classes.iter().position(|c| *c == label) {
                    values[[i, j]] = p;
                }
            }
        }
        Ok(ClassTable::from_parts(state.classes.clone(), values))
    }

    pub fn transform(&self, x: &Table) -> Result<Table> {
        self.require(AdapterKind::Transformer, "transform")?;
        let state = self.check_fitted(x)?;
        let instance = state.instance.as_ref();
        let model = instance
            .as_transformer()
            .ok_or_else(|| capability_lost(instance, self.kind))?;

        let rows: Vec<Features> = iter_table(x, None)
            .map(|(xi, _)| model.transform_one(&xi))
            .collect();
        layout_rows(x.columns(), &rows)
    }

    /// Mean accuracy for classifiers, coefficient of determination for
    /// regressors.
    pub fn score(&self, x: &Table, y: &Targets) -> Result<f64> {
        if y.len() != x.n_rows() {
            return Err(ValidationError::RowMismatch {
                x_rows: x.n_rows(),
                y_rows: y.len(),
            }
            .into());
        }
        match (self.predict(x)?, y) {
            (Predictions::Classes(pred), Targets::Classes(truth)) => {
                let hits = pred
                    .iter()
                    .zip(truth)
                    .filter(|(p, t)| p.as_ref() == Some(*t))
                    .count();
                Ok(hits as f64 / truth.len() as f64)
            }
            (Predictions::Values(pred), Targets::Values(truth)) => Ok(r2_score(truth, &pred)),
            (Predictions::Clusters(_), _) => Err(Error::Configuration(
                "a clusterer has no score".into(),
            )),
            (_, y) => Err(ValidationError::TargetKind {
                expected: if self.kind == AdapterKind::Classifier {
                    "class"
                } else {
                    "numeric"
                },
                found: y.kind_name(),
            }
            .into()),
        }
    }

    fn require(&self, kind: AdapterKind, operation: &str) -> Result<()> {
        if self.kind != kind {
            return Err(Error::Configuration(format!(
                "{operation} is only available on a {kind} adapter, this one is a {}",
                self.kind
            )));
        }
        Ok(())
    }

    fn check_fitted(&self, x: &Table) -> Result<&FittedState> {
        let state = self
            .state
            .as_ref()
            .ok_or(Error::NotFitted(self.kind.into()))?;
        validate(x, None, &self.options.input)?;
        if x.n_columns() != state.n_features {
            return Err(Error::Shape {
                expected: state.n_features,
                found: x.n_columns(),
            });
        }
        Ok(state)
    }

    fn learn_batch(
        &mut self,
        x: &Table,
        y: Option<&Targets>,
        classes: Option<&[ClassLabel]>,
    ) -> Result<()> {
        let y = if self.kind == AdapterKind::Clusterer {
            None
        } else {
            y
        };
        if self.kind.is_supervised() && y.is_none() {
            return Err(ValidationError::MissingTarget(self.kind.into()).into());
        }
        validate(x, y, &self.options.input)?;
        if let Some(state) = &self.state {
            if state.n_features != x.n_columns() {
                return Err(Error::Shape {
                    expected: state.n_features,
                    found: x.n_columns(),
                });
            }
        }
        let plan = self.plan(y, classes)?;

        let fresh = self.state.is_none();
        let mut state = match self.state.take() {
            Some(state) => state,
            None => FittedState {
                instance: self.estimator.clone_estimator(),
                n_features: x.n_columns(),
                classes: Vec::new(),
                codec: None,
                labels: Vec::new(),
            },
        };

        match replay(self.kind, state.instance.as_mut(), x, plan.targets.as_deref()) {
            Ok(labels) => {
                state.classes = plan.classes;
                state.codec = plan.codec;
                state.labels = labels;
                debug!(
                    kind = %self.kind,
                    rows = x.n_rows(),
                    features = x.n_columns(),
                    "replayed batch"
                );
                self.state = Some(state);
                Ok(())
            }
            Err(err) => {
                if !fresh {
                    self.state = Some(state);
                }
                Err(err)
            }
        }
    }

    fn plan<'a>(
        &self,
        y: Option<&'a Targets>,
        classes: Option<&[ClassLabel]>,
    ) -> Result<Plan<'a>> {
        match self.kind {
            AdapterKind::Classifier => self.plan_classification(y, classes),
            AdapterKind::Regressor => {
                let y = y.ok_or(ValidationError::MissingTarget("regressor"))?;
                if !matches!(y, Targets::Values(_)) {
                    return Err(ValidationError::TargetKind {
                        expected: "numeric",
                        found: y.kind_name(),
                    }
                    .into());
                }
                Ok(Plan {
                    targets: Some(Cow::Borrowed(y)),
                    ..Plan::unsupervised()
                })
            }
            AdapterKind::Transformer => Ok(Plan {
                targets: y.map(Cow::Borrowed),
                ..Plan::unsupervised()
            }),
            AdapterKind::Clusterer => Ok(Plan::unsupervised()),
        }
    }

    fn plan_classification<'a>(
        &self,
        y: Option<&'a Targets>,
        classes: Option<&[ClassLabel]>,
    ) -> Result<Plan<'a>> {
        let y = y.ok_or(ValidationError::MissingTarget("classifier"))?;
        let Targets::Classes(labels) = y else {
            return Err(ValidationError::TargetKind {
                expected: "class",
                found: y.kind_name(),
            }
            .into());
        };

        let requested = classes.map(sorted_unique);
        let known = match (&self.state, requested) {
            (Some(state), Some(requested)) if requested != state.classes => {
                return Err(Error::Configuration(format!(
                    "classes {} differ from the classes of the first call {}",
                    join(&requested),
                    join(&state.classes)
                )));
            }
            (Some(state), _) => state.classes.clone(),
            (None, Some(requested)) => requested,
            (None, None) => sorted_unique(labels),
        };

        let known_set: HashSet<&ClassLabel> = known.iter().collect();
        if let Some(unknown) = labels.iter().find(|l| !known_set.contains(l)) {
            return Err(Error::UnknownLabel(unknown.to_string()));
        }

        let binary_only = self.is_binary_only();
        // The codec needs both codes, otherwise the positive code can't be decoded.
        if binary_only && known.len() < 2 {
            return Err(Error::Configuration(format!(
                "{} needs two classes to learn from, got {}",
                self.estimator.name(),
                join(&known)
            )));
        }
        if binary_only && known.len() > 2 {
            if self.options.strict_binary {
                return Err(Error::Configuration(format!(
                    "{} only supports binary classification, got {} classes",
                    self.estimator.name(),
                    known.len()
                )));
            }
            warn!(
                estimator = self.estimator.name(),
                n_classes = known.len(),
                "more than 2 classes were given to a binary-only classifier"
            );
        }

        if !binary_only {
            return Ok(Plan {
                classes: known,
                codec: None,
                targets: Some(Cow::Borrowed(y)),
            });
        }

        let codec = match self.state.as_ref().and_then(|s| s.codec.clone()) {
            Some(codec) => codec,
            None => LabelCodec::fit(&known),
        };
        let encoded = codec.encode_all(labels)?;
        Ok(Plan {
            classes: known,
            codec: Some(codec),
            targets: Some(Cow::Owned(Targets::Classes(encoded))),
        })
    }
}

/// Feeds every row, in order, to the capability selected by `kind`.
/// Clusterers label each row right after learning it.
fn replay(
    kind: AdapterKind,
    instance: &mut dyn Estimator,
    x: &Table,
    y: Option<&Targets>,
) -> Result<Vec<usize>> {
    let name = instance.name();
    let lost = || Error::Configuration(format!("{name} is not a {kind}"));
    let mut labels = Vec::new();

    match kind {
        AdapterKind::Classifier => {
            let model = instance.as_classifier_mut().ok_or_else(lost)?;
            for (xi, yi) in iter_table(x, y) {
                if let Some(Target::Class(label)) = yi {
                    model.learn_one(&xi, &label);
                }
            }
        }
        AdapterKind::Regressor => {
            let model = instance.as_regressor_mut().ok_or_else(lost)?;
            for (xi, yi) in iter_table(x, y) {
                if let Some(Target::Value(v)) = yi {
                    model.learn_one(&xi, v);
                }
            }
        }
        AdapterKind::Transformer => {
            let model = instance.as_transformer_mut().ok_or_else(lost)?;
            for (xi, yi) in iter_table(x, y) {
                model.learn_one(&xi, yi.as_ref());
            }
        }
        AdapterKind::Clusterer => {
            let model = instance.as_clusterer_mut().ok_or_else(lost)?;
            labels.reserve(x.n_rows());
            for (xi, _) in iter_table(x, None) {
                model.learn_one(&xi);
                labels.push(model.predict_one(&xi));
            }
        }
    }
    Ok(labels)
}

fn capability_lost(instance: &dyn Estimator, kind: AdapterKind) -> Error {
    Error::Configuration(format!("{} is not a {kind}", instance.name()))
}

fn sorted_unique(labels: &[ClassLabel]) -> Vec<ClassLabel> {
    let mut out = labels.to_vec();
    out.sort();
    out.dedup();
    out
}

fn join(labels: &[ClassLabel]) -> String {
    let parts: Vec<String> = labels.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

/// Input columns the transformer kept, in input order, then any new ones
/// in ascending order. Gaps are zero-filled.
fn layout_rows(input_columns: &[String], rows: &[Features]) -> Result<Table> {
    let emitted: HashSet<&String> = rows.iter().flat_map(|r| r.keys()).collect();
    let mut columns: Vec<String> = input_columns
        .iter()
        .filter(|c| emitted.contains(c))
        .cloned()
        .collect();
    let mut extra: Vec<&String> = emitted
        .iter()
        .copied()
        .filter(|c| !input_columns.contains(*c))
        .collect();
    extra.sort();
    columns.extend(extra.into_iter().cloned());

    let values = Array2::from_shape_fn((rows.len(), columns.len()), |(i, j)| {
        rows[i].get(&columns[j]).copied().unwrap_or(0.0)
    });
    Table::new(columns, values)
}

fn r2_score(truth: &[f64], pred: &[f64]) -> f64 {
    let n = truth.len() as f64;
    let mean = truth.iter().sum::<f64>() / n;
    let ss_res: f64 = truth.iter().zip(pred).map(|(t, p)| (t - p).powi(2)).sum();
    let ss_tot: f64 = truth.iter().map(|t| (t - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}
