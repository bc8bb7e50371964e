use crate::classifiers::Classifier;
use crate::classifiers::bayes::NaiveBayes;
use crate::core::{ClassLabel, ClassTable, Estimator, Features, Table};
use crate::error::{Error, Result, ValidationError};
use crate::utils::math::softmax;
use ndarray::{Array1, Array2};
use std::any::Any;
use std::collections::HashMap;

/// Complement Naive Bayes for non-negative frequency features (counts, TF-IDF).
///
/// A class is scored by how badly the query fits the *other* classes, which
/// is more robust than multinomial NB on imbalanced class distributions.
/// Statistics only grow: there is no forgetting.
///
/// `learn_one` and `learn_many` maintain the same sufficient statistics, so a
/// batch is equivalent to replaying its rows one at a time. Negative
/// frequencies are not checked and yield meaningless scores.
#[derive(Debug, Clone)]
pub struct ComplementNaiveBayes {
    alpha: f64,
    class_counts: HashMap<ClassLabel, u64>,
    feature_counts: HashMap<String, HashMap<ClassLabel, f64>>,
    feature_totals: HashMap<String, f64>,
    class_totals: HashMap<ClassLabel, f64>,
}

impl Default for ComplementNaiveBayes {
    fn default() -> Self {
        Self::with_alpha(1.0)
    }
}

impl ComplementNaiveBayes {
    /// `alpha` is the additive (Laplace/Lidstone) smoothing strength.
    pub fn new(alpha: f64) -> Result<Self> {
        // alpha = 0 would leave unseen complement rates at 0 and their weights at -ln(0).
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(Error::Configuration(format!(
                "alpha must be a finite value > 0, got {alpha}"
            )));
        }
        Ok(Self::with_alpha(alpha))
    }

    fn with_alpha(alpha: f64) -> Self {
        Self {
            alpha,
            class_counts: HashMap::new(),
            feature_counts: HashMap::new(),
            feature_totals: HashMap::new(),
            class_totals: HashMap::new(),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn class_counts(&self) -> &HashMap<ClassLabel, u64> {
        &self.class_counts
    }

    pub fn feature_counts(&self) -> &HashMap<String, HashMap<ClassLabel, f64>> {
        &self.feature_counts
    }

    pub fn feature_totals(&self) -> &HashMap<String, f64> {
        &self.feature_totals
    }

    pub fn class_totals(&self) -> &HashMap<ClassLabel, f64> {
        &self.class_totals
    }

    /// Number of distinct features observed so far.
    pub fn n_features(&self) -> usize {
        self.feature_counts.len()
    }

    pub fn learn_one(&mut self, x: &Features, y: &ClassLabel) -> &mut Self {
        self.update(x, y);
        self
    }

    /// Learns a whole batch, `y[i]` being the label of row `i`.
    ///
    /// Rows are summed per label first and the sums folded into the counters,
    /// which is the same state `learn_one` reaches row by row.
    pub fn learn_many(&mut self, x: &Table, y: &[ClassLabel]) -> Result<&mut Self> {
        if x.n_rows() != y.len() {
            return Err(ValidationError::RowMismatch {
                x_rows: x.n_rows(),
                y_rows: y.len(),
            }
            .into());
        }

        let mut groups: HashMap<&ClassLabel, (u64, Array1<f64>)> = HashMap::new();
        for (i, label) in y.iter().enumerate() {
            let (n, sums) = groups
                .entry(label)
                .or_insert_with(|| (0, Array1::zeros(x.n_columns())));
            *n += 1;
            *sums += &x.row(i);
        }

        for (label, (n, sums)) in groups {
            *self.class_counts.entry(label.clone()).or_insert(0) += n;
            *self.class_totals.entry(label.clone()).or_insert(0.0) += sums.sum();
            for (f, &s) in x.columns().iter().zip(sums.iter()) {
                *self
                    .feature_counts
                    .entry(f.clone())
                    .or_default()
                    .entry(label.clone())
                    .or_insert(0.0) += s;
            }
        }

        for (f, s) in x.column_sums() {
            *self.feature_totals.entry(f).or_insert(0.0) += s;
        }
        Ok(self)
    }

    /// Maximum-likelihood prior of `c`; `0.0` for a class never seen.
    pub fn p_class(&self, c: &ClassLabel) -> f64 {
        let total: u64 = self.class_counts.values().sum();
        match self.class_counts.get(c) {
            Some(&n) if total > 0 => n as f64 / total as f64,
            _ => 0.0,
        }
    }

    fn update(&mut self, x: &Features, y: &ClassLabel) {
        *self.class_counts.entry(y.clone()).or_insert(0) += 1;

        for (f, &frequency) in x {
            *self
                .feature_counts
                .entry(f.clone())
                .or_default()
                .entry(y.clone())
                .or_insert(0.0) += frequency;
            *self.feature_totals.entry(f.clone()).or_insert(0.0) += frequency;
            *self.class_totals.entry(y.clone()).or_insert(0.0) += frequency;
        }
    }

    fn feature_count(&self, f: &str, c: &ClassLabel) -> f64 {
        self.feature_counts
            .get(f)
            .and_then(|per_class| per_class.get(c))
            .copied()
            .unwrap_or(0.0)
    }

    fn denominator(&self, c: &ClassLabel) -> f64 {
        let total = self.class_totals.get(c).copied().unwrap_or(0.0);
        total + self.alpha * self.n_features() as f64
    }

    /// `-ln` of the smoothed rate of `f` in every class but `c`.
    fn complement_weight(&self, f: &str, c: &ClassLabel, denominator: f64) -> f64 {
        let total = self.feature_totals.get(f).copied().unwrap_or(0.0);
        -((total - self.feature_count(f, c) + self.alpha) / denominator).ln()
    }
}

impl NaiveBayes for ComplementNaiveBayes {
    fn classes(&self) -> Vec<ClassLabel> {
        let mut classes: Vec<ClassLabel> = self.class_counts.keys().cloned().collect();
        classes.sort();
        classes
    }

    fn joint_log_likelihood(&self, x: &Features) -> HashMap<ClassLabel, f64> {
        // Nothing observed yet: the smoothed rates are undefined, score uniformly.
        if self.n_features() == 0 {
            return self.class_counts.keys().map(|c| (c.clone(), 0.0)).collect();
        }

        self.class_counts
            .keys()
            .map(|c| {
                let denominator = self.denominator(c);
                let score = x
                    .iter()
                    .filter(|(_, frequency)| **frequency != 0.0)
                    .map(|(f, frequency)| frequency * self.complement_weight(f, c, denominator))
                    .sum();
                (c.clone(), score)
            })
            .collect()
    }

    fn joint_log_likelihood_many(&self, x: &Table) -> ClassTable {
        let classes = self.classes();
        if self.n_features() == 0 {
            let values = Array2::zeros((x.n_rows(), classes.len()));
            return ClassTable::from_parts(classes, values);
        }

        // Columns unseen in training fall back to zero totals, which still
        // carry the smoothing term.
        let mut weights = Array2::zeros((classes.len(), x.n_columns()));
        for (i, c) in classes.iter().enumerate() {
            let denominator = self.denominator(c);
            for (j, f) in x.columns().iter().enumerate() {
                weights[[i, j]] = self.complement_weight(f, c, denominator);
            }
        }

        ClassTable::from_parts(classes, x.values().dot(&weights.t()))
    }
}

impl Classifier for ComplementNaiveBayes {
    fn learn_one(&mut self, x: &Features, y: &ClassLabel) {
        self.update(x, y);
    }

    fn predict_proba_one(&self, x: &Features) -> HashMap<ClassLabel, f64> {
        softmax(&self.joint_log_likelihood(x))
    }
}

impl Estimator for ComplementNaiveBayes {
    fn clone_estimator(&self) -> Box<dyn Estimator> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "ComplementNaiveBayes"
    }

    fn as_classifier(&self) -> Option<&dyn Classifier> {
        Some(self)
    }

    fn as_classifier_mut(&mut self) -> Option<&mut dyn Classifier> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::{bag_of_words, food_corpus, labels};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn trained_one_by_one() -> ComplementNaiveBayes {
        let mut model = ComplementNaiveBayes::default();
        for (x, y) in food_corpus() {
            model.learn_one(&x, &y);
        }
        model
    }

    fn trained_as_batch() -> ComplementNaiveBayes {
        let (records, labels): (Vec<Features>, Vec<ClassLabel>) =
            food_corpus().into_iter().unzip();
        let mut model = ComplementNaiveBayes::default();
        model
            .learn_many(&Table::from_records(&records), &labels)
            .unwrap();
        model
    }

    fn assert_same_statistics(a: &ComplementNaiveBayes, b: &ComplementNaiveBayes) {
        assert_eq!(a.class_counts(), b.class_counts());
        assert_eq!(a.n_features(), b.n_features());
        for (c, total) in a.class_totals() {
            assert!(approx_eq(*total, b.class_totals()[c], 1e-9));
        }
        for (f, total) in a.feature_totals() {
            assert!(approx_eq(*total, b.feature_totals()[f], 1e-9));
        }
        for (f, per_class) in a.feature_counts() {
            for c in a.class_counts().keys() {
                let lhs = per_class.get(c).copied().unwrap_or(0.0);
                let rhs = b.feature_count(f, c);
                assert!(approx_eq(lhs, rhs, 1e-9), "{f}/{c}: {lhs} != {rhs}");
            }
        }
    }

    fn assert_totals_consistent(model: &ComplementNaiveBayes) {
        for c in model.class_counts().keys() {
            let sum: f64 = model
                .feature_counts()
                .keys()
                .map(|f| model.feature_count(f, c))
                .sum();
            assert!(approx_eq(model.class_totals()[c], sum, 1e-9));
        }
        for (f, per_class) in model.feature_counts() {
            let sum: f64 = per_class.values().sum();
            assert!(approx_eq(model.feature_totals()[f], sum, 1e-9));
        }
    }

    #[test]
    fn priors_match_in_both_learning_modes() {
        for model in [trained_one_by_one(), trained_as_batch()] {
            assert_eq!(model.p_class(&"health".into()), 2.0 / 3.0);
            assert_eq!(model.p_class(&"butcher".into()), 1.0 / 3.0);
        }
    }

    #[test]
    fn batch_and_single_statistics_are_identical() {
        let single = trained_one_by_one();
        let batch = trained_as_batch();
        assert_same_statistics(&single, &batch);
        assert_totals_consistent(&single);
        assert_totals_consistent(&batch);
    }

    #[test]
    fn random_batches_match_row_replay() {
        let mut rng = StdRng::seed_from_u64(42);
        let labels = ["a", "b", "c"];
        let rows: Vec<Vec<f64>> = (0..50)
            .map(|_| (0..6).map(|_| rng.random_range(0..5) as f64).collect())
            .collect();
        let y: Vec<ClassLabel> = (0..50)
            .map(|_| labels[rng.random_range(0..labels.len())].into())
            .collect();
        let table = Table::from_rows(&rows).unwrap();

        let mut single = ComplementNaiveBayes::default();
        for (i, label) in y.iter().enumerate() {
            single.learn_one(&table.row_features(i), label);
        }
        let mut batch = ComplementNaiveBayes::default();
        batch.learn_many(&table, &y[..20]).unwrap_err();
        batch.learn_many(&table, &y).unwrap();

        assert_same_statistics(&single, &batch);
        assert_totals_consistent(&batch);
    }

    #[test]
    fn repeated_batches_accumulate() {
        let mut model = trained_as_batch();
        let (records, labels): (Vec<Features>, Vec<ClassLabel>) =
            food_corpus().into_iter().unzip();
        model
            .learn_many(&Table::from_records(&records), &labels)
            .unwrap();
        assert_eq!(model.class_counts()[&ClassLabel::from("health")], 4);
        assert_eq!(model.class_counts()[&ClassLabel::from("butcher")], 2);
        assert_eq!(model.feature_totals()["food"], 10.0);
    }

    #[test]
    fn predict_proba_one_matches_reference_values() {
        let query = bag_of_words("food job meat");
        for model in [trained_one_by_one(), trained_as_batch()] {
            let proba = model.predict_proba_one(&query);
            assert!(approx_eq(proba[&ClassLabel::from("health")], 0.779191, EPS));
            assert!(approx_eq(proba[&ClassLabel::from("butcher")], 0.220808, EPS));
            assert_eq!(model.predict_one(&query), Some(ClassLabel::from("health")));
        }
    }

    #[test]
    fn joint_log_likelihood_uses_complement_rates() {
        let model = trained_one_by_one();
        let jll = model.joint_log_likelihood(&bag_of_words("food job meat"));
        assert!(approx_eq(jll[&ClassLabel::from("health")], 6.530877627725886, 1e-9));
        assert!(approx_eq(jll[&ClassLabel::from("butcher")], 5.269917892026338, 1e-9));
    }

    #[test]
    fn many_scoring_agrees_with_row_scoring_including_unknown_columns() {
        let model = trained_as_batch();
        let queries = vec![
            bag_of_words("food job meat"),
            bag_of_words("Taiwanese Taipei"),
            bag_of_words("kitchen kitchen brain taipei"),
        ];
        let table = Table::from_records(&queries);
        assert!(table.column_index("taipei").is_some());

        let many = model.joint_log_likelihood_many(&table);
        assert_eq!(many.classes(), labels(&["butcher", "health"]));
        for (i, query) in queries.iter().enumerate() {
            let one = model.joint_log_likelihood(query);
            for c in many.classes() {
                assert!(approx_eq(many.get(i, c).unwrap(), one[c], 1e-9));
            }
        }
        // An unknown-only row is still scored through the smoothing term.
        assert!(many.get(1, &"health".into()).unwrap() > 0.0);
    }

    #[test]
    fn predict_proba_many_rows_are_normalized() {
        let model = trained_as_batch();
        let table = Table::from_records(&[
            bag_of_words("food job meat"),
            bag_of_words("Taiwanese Taipei"),
        ]);
        let proba = model.predict_proba_many(&table);
        for i in 0..proba.n_rows() {
            let sum: f64 = proba.values().row(i).sum();
            assert!(approx_eq(sum, 1.0, 1e-12));
        }
        assert!(approx_eq(proba.get(0, &"health".into()).unwrap(), 0.779191, EPS));
        assert!(approx_eq(proba.get(1, &"butcher".into()).unwrap(), 0.623077, EPS));
        assert_eq!(
            model.predict_many(&table),
            vec![Some(ClassLabel::from("health")), Some(ClassLabel::from("butcher"))]
        );
    }

    #[test]
    fn unseen_class_prior_is_zero() {
        assert_eq!(ComplementNaiveBayes::default().p_class(&"x".into()), 0.0);
        assert_eq!(trained_one_by_one().p_class(&"chef".into()), 0.0);
    }

    #[test]
    fn untrained_model_predicts_nothing() {
        let model = ComplementNaiveBayes::default();
        let query = bag_of_words("food");
        assert!(model.predict_proba_one(&query).is_empty());
        assert_eq!(model.predict_one(&query), None);
        let table = Table::from_records(&[query]);
        assert_eq!(model.predict_proba_many(&table).values().ncols(), 0);
        assert_eq!(model.predict_many(&table), vec![None]);
    }

    #[test]
    fn labels_without_features_score_uniformly() {
        let mut model = ComplementNaiveBayes::default();
        model.learn_one(&Features::new(), &"a".into());
        model.learn_one(&Features::new(), &"b".into());
        let proba = model.predict_proba_one(&bag_of_words("anything"));
        assert!(approx_eq(proba[&ClassLabel::from("a")], 0.5, 1e-12));
    }

    #[test]
    fn alpha_is_wired_into_both_smoothing_terms() {
        let mut model = ComplementNaiveBayes::new(0.5).unwrap();
        for (x, y) in food_corpus() {
            model.learn_one(&x, &y);
        }
        let query = bag_of_words("food job meat");
        let proba = model.predict_proba_one(&query);
        assert!(approx_eq(proba[&ClassLabel::from("health")], 0.855398, EPS));

        // alpha = 1 is the classic add-one formula.
        let reference = trained_one_by_one();
        let v = reference.n_features() as f64;
        let c: ClassLabel = "health".into();
        let expected: f64 = query
            .iter()
            .map(|(f, n)| {
                let rate = (reference.feature_totals()[f] - reference.feature_count(f, &c) + 1.0)
                    / (reference.class_totals()[&c] + v);
                n * -rate.ln()
            })
            .sum();
        assert!(approx_eq(
            reference.joint_log_likelihood(&query)[&c],
            expected,
            1e-12
        ));
    }

    #[test]
    fn rejects_non_positive_alpha() {
        assert!(matches!(
            ComplementNaiveBayes::new(0.0),
            Err(Error::Configuration(_))
        ));
        assert!(ComplementNaiveBayes::new(f64::NAN).is_err());
    }
}
