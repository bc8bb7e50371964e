use crate::core::ClassLabel;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Bijection between external class labels and `Int(0..k)` codes.
///
/// Classes are sorted before indexing, so with two classes the larger label
/// becomes the positive code `Int(1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCodec {
    classes: Vec<ClassLabel>,
    index: HashMap<ClassLabel, usize>,
}

impl LabelCodec {
    pub fn fit(classes: &[ClassLabel]) -> Self {
        let mut classes = classes.to_vec();
        classes.sort();
        classes.dedup();
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { classes, index }
    }

    pub fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    pub fn encode(&self, label: &ClassLabel) -> Result<ClassLabel> {
        self.index
            .get(label)
            .map(|&i| ClassLabel::from(i))
            .ok_or_else(|| Error::UnknownLabel(label.to_string()))
    }

    pub fn encode_all(&self, labels: &[ClassLabel]) -> Result<Vec<ClassLabel>> {
        labels.iter().map(|l| self.encode(l)).collect()
    }

    pub fn decode(&self, code: &ClassLabel) -> Result<ClassLabel> {
        match code {
            ClassLabel::Int(i) if *i >= 0 => self
                .classes
                .get(*i as usize)
                .cloned()
                .ok_or_else(|| Error::UnknownLabel(code.to_string())),
            _ => Err(Error::UnknownLabel(code.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::labels;

    #[test]
    fn encodes_sorted_classes_to_indices() {
        let codec = LabelCodec::fit(&["yes".into(), "no".into(), "yes".into()]);
        assert_eq!(codec.classes(), labels(&["no", "yes"]));
        assert_eq!(
            codec.encode_all(&["yes".into(), "no".into()]).unwrap(),
            vec![ClassLabel::Int(1), ClassLabel::Int(0)]
        );
    }

    #[test]
    fn decode_inverts_encode() {
        let codec = LabelCodec::fit(&["b".into(), "a".into()]);
        for label in codec.classes() {
            let code = codec.encode(label).unwrap();
            assert_eq!(&codec.decode(&code).unwrap(), label);
        }
    }

    #[test]
    fn unknown_values_are_rejected_both_ways() {
        let codec = LabelCodec::fit(&["a".into()]);
        assert!(matches!(
            codec.encode(&"z".into()),
            Err(Error::UnknownLabel(_))
        ));
        assert!(codec.decode(&ClassLabel::Int(1)).is_err());
        assert!(codec.decode(&ClassLabel::Int(-1)).is_err());
        assert!(codec.decode(&"a".into()).is_err());
    }
}
