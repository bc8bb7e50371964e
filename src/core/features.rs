use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result};

/// Sparse sample: feature name mapped to its numeric value.
///
/// Absent keys are treated as "not observed" by the estimators, which is not
/// always the same as an explicit `0.0` (see `ComplementNaiveBayes`).
pub type Features = HashMap<String, f64>;

/// Class label accepted by classifiers.
///
/// Integer labels sort before text labels, so a mixed class set still has a
/// stable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ClassLabel {
    Int(i64),
    Text(String),
}

impl ClassLabel {
    /// Whether this label is the positive class of a binary-only classifier.
    #[inline]
    pub fn is_positive(&self) -> bool {
        matches!(self, ClassLabel::Int(1))
    }
}

impl Display for ClassLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ClassLabel::Int(v) => write!(f, "{v}"),
            ClassLabel::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ClassLabel {
    fn from(value: &str) -> Self {
        ClassLabel::Text(value.to_string())
    }
}

impl From<String> for ClassLabel {
    fn from(value: String) -> Self {
        ClassLabel::Text(value)
    }
}

impl From<i64> for ClassLabel {
    fn from(value: i64) -> Self {
        ClassLabel::Int(value)
    }
}

impl From<i32> for ClassLabel {
    fn from(value: i32) -> Self {
        ClassLabel::Int(value as i64)
    }
}

impl From<usize> for ClassLabel {
    fn from(value: usize) -> Self {
        ClassLabel::Int(value as i64)
    }
}

impl From<bool> for ClassLabel {
    fn from(value: bool) -> Self {
        ClassLabel::Int(value as i64)
    }
}

/// Supervision attached to one streamed row.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Class(ClassLabel),
    Value(f64),
}

impl Target {
    pub fn as_class(&self) -> Option<&ClassLabel> {
        match self {
            Target::Class(c) => Some(c),
            Target::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<f64> {
        match self {
            Target::Value(v) => Some(*v),
            Target::Class(_) => None,
        }
    }
}

/// A target column aligned row-for-row with a `Table`.
#[derive(Debug, Clone, PartialEq)]
pub enum Targets {
    Classes(Vec<ClassLabel>),
    Values(Vec<f64>),
}

impl Targets {
    pub fn len(&self) -> usize {
        match self {
            Targets::Classes(v) => v.len(),
            Targets::Values(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Targets::Classes(_) => "class",
            Targets::Values(_) => "numeric",
        }
    }

    pub fn get(&self, row: usize) -> Option<Target> {
        match self {
            Targets::Classes(v) => v.get(row).cloned().map(Target::Class),
            Targets::Values(v) => v.get(row).copied().map(Target::Value),
        }
    }
}

impl From<Vec<ClassLabel>> for Targets {
    fn from(value: Vec<ClassLabel>) -> Self {
        Targets::Classes(value)
    }
}

impl From<Vec<&str>> for Targets {
    fn from(value: Vec<&str>) -> Self {
        Targets::Classes(value.into_iter().map(ClassLabel::from).collect())
    }
}

impl From<Vec<i64>> for Targets {
    fn from(value: Vec<i64>) -> Self {
        Targets::Classes(value.into_iter().map(ClassLabel::from).collect())
    }
}

impl From<Vec<f64>> for Targets {
    fn from(value: Vec<f64>) -> Self {
        Targets::Values(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_labels_sort_before_text() {
        let mut labels = vec![
            ClassLabel::from("b"),
            ClassLabel::from(3i64),
            ClassLabel::from("a"),
            ClassLabel::from(1i64),
        ];
        labels.sort();
        let shown: Vec<String> = labels.iter().map(ToString::to_string).collect();
        assert_eq!(shown, vec!["1", "3", "a", "b"]);
    }

    #[test]
    fn only_integer_one_is_positive() {
        assert!(ClassLabel::from(true).is_positive());
        assert!(!ClassLabel::from(0i64).is_positive());
        assert!(!ClassLabel::from("1").is_positive());
    }

    #[test]
    fn targets_expose_rows_by_kind() {
        let y: Targets = vec!["yes", "no"].into();
        assert_eq!(y.get(1), Some(Target::Class("no".into())));
        assert_eq!(y.get(2), None);

        let y: Targets = vec![1.5, 2.5].into();
        assert_eq!(y.get(0).and_then(|t| t.as_value()), Some(1.5));
        assert_eq!(y.kind_name(), "numeric");
    }
}
