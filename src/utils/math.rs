use crate::core::ClassLabel;
use std::collections::HashMap;

/// `ln(sum(exp(v)))` computed around the maximum to avoid overflow.
pub fn logsumexp<I: IntoIterator<Item = f64> + Clone>(values: I) -> f64 {
    let max = values.clone().into_iter().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    let sum: f64 = values.into_iter().map(|v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Normalizes log-scores into a probability distribution.
pub fn softmax(scores: &HashMap<ClassLabel, f64>) -> HashMap<ClassLabel, f64> {
    if scores.is_empty() {
        return HashMap::new();
    }
    let lse = logsumexp(scores.values().copied());
    scores
        .iter()
        .map(|(c, s)| (c.clone(), (s - lse).exp()))
        .collect()
}

#[inline]
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Label with the highest value; ties go to the smallest label.
pub fn argmax(values: &HashMap<ClassLabel, f64>) -> Option<ClassLabel> {
    let mut best: Option<(&ClassLabel, f64)> = None;
    for (label, &v) in values {
        if v.is_nan() {
            continue;
        }
        best = match best {
            Some((b, bv)) if bv > v || (bv == v && b < label) => Some((b, bv)),
            _ => Some((label, v)),
        };
    }
    best.map(|(label, _)| label.clone())
}
