use crate::core::{ClassLabel, ClassTable, Features, Table};
use crate::utils::math::logsumexp;
use ndarray::Axis;
use std::collections::HashMap;

/// Shared prediction routine of the Naive Bayes family.
///
/// Implementors only provide per-class joint log-likelihoods; probabilities
/// and hard predictions are derived here by log-sum-exp normalization.
pub trait NaiveBayes {
    /// Classes seen so far, ascending.
    fn classes(&self) -> Vec<ClassLabel>;

    fn joint_log_likelihood(&self, x: &Features) -> HashMap<ClassLabel, f64>;

    /// Batched `joint_log_likelihood`, columns ordered as [`NaiveBayes::classes`].
    fn joint_log_likelihood_many(&self, x: &Table) -> ClassTable;

    fn predict_proba_many(&self, x: &Table) -> ClassTable {
        let jll = self.joint_log_likelihood_many(x);
        let mut values = jll.values().clone();
        for mut row in values.axis_iter_mut(Axis(0)) {
            let lse = logsumexp(row.iter().copied());
            row.mapv_inplace(|v| (v - lse).exp());
        }
        ClassTable::from_parts(jll.classes().to_vec(), values)
    }

    /// Most probable class per row, `None` for every row of an untrained model.
    fn predict_many(&self, x: &Table) -> Vec<Option<ClassLabel>> {
        let proba = self.predict_proba_many(x);
        proba
            .values()
            .axis_iter(Axis(0))
            .map(|row| {
                let mut best: Option<(usize, f64)> = None;
                for (j, &p) in row.iter().enumerate() {
                    if best.is_none_or(|(_, bp)| p > bp) {
                        best = Some((j, p));
                    }
                }
                best.map(|(j, _)| proba.classes()[j].clone())
            })
            .collect()
    }
}
