use crate::core::features::{ClassLabel, Features};
use crate::error::{Error, Result, ValidationError};
use ndarray::{Array2, ArrayView1, Axis};
use std::collections::{BTreeSet, HashSet};

/// Dense in-memory batch: rows are samples, named columns are features.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl Table {
    /// Column names must be unique: rows are read back as feature maps keyed
    /// by name.
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if columns.len() != values.ncols() {
            return Err(Error::Shape {
                expected: values.ncols(),
                found: columns.len(),
            });
        }
        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ValidationError::DuplicateColumn(dup.clone()).into());
        }
        Ok(Self { columns, values })
    }

    /// Wraps a matrix, naming columns by their position (`"0"`, `"1"`, ...).
    pub fn from_array(values: Array2<f64>) -> Self {
        let columns = (0..values.ncols()).map(|j| j.to_string()).collect();
        Self { columns, values }
    }

    /// Builds a positional table from row vectors, rejecting ragged input.
    pub fn from_rows(rows: &[Vec<f64>]) -> std::result::Result<Self, ValidationError> {
        let width = rows.first().map_or(0, Vec::len);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(ValidationError::Ragged {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
        }
        let values = Array2::from_shape_fn((rows.len(), width), |(i, j)| rows[i][j]);
        Ok(Self::from_array(values))
    }

    /// Densifies sparse records. Columns are the union of keys in ascending
    /// order and missing entries are zero-filled.
    pub fn from_records(records: &[Features]) -> Self {
        let columns: Vec<String> = records
            .iter()
            .flat_map(|r| r.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let values = Array2::from_shape_fn((records.len(), columns.len()), |(i, j)| {
            records[i].get(&columns[j]).copied().unwrap_or(0.0)
        });
        Self { columns, values }
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    #[inline]
    pub fn n_columns(&self) -> usize {
        self.values.ncols()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.row(index)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Row `index` as a feature map keyed by column name.
    pub fn row_features(&self, index: usize) -> Features {
        self.columns
            .iter()
            .cloned()
            .zip(self.values.row(index).iter().copied())
            .collect()
    }

    /// Per-column sums over all rows.
    pub fn column_sums(&self) -> Features {
        self.columns
            .iter()
            .cloned()
            .zip(self.values.sum_axis(Axis(0)).iter().copied())
            .collect()
    }
}

/// Rows × classes scores or probabilities, classes in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassTable {
    classes: Vec<ClassLabel>,
    values: Array2<f64>,
}

impl ClassTable {
    pub fn new(classes: Vec<ClassLabel>, values: Array2<f64>) -> Result<Self> {
        if classes.len() != values.ncols() {
            return Err(Error::Shape {
                expected: values.ncols(),
                found: classes.len(),
            });
        }
        Ok(Self { classes, values })
    }

    pub(crate) fn from_parts(classes: Vec<ClassLabel>, values: Array2<f64>) -> Self {
        debug_assert_eq!(classes.len(), values.ncols());
        Self { classes, values }
    }

    pub fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn get(&self, row: usize, class: &ClassLabel) -> Option<f64> {
        let j = self.classes.iter().position(|c| c == class)?;
        self.values.get((row, j)).copied()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn from_rows_names_columns_by_position() {
        let t = Table::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(t.columns(), &["0".to_string(), "1".to_string()]);
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.row_features(1).get("1"), Some(&4.0));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Table::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn from_records_zero_fills_the_union_of_keys() {
        let a: Features = [("b".to_string(), 2.0)].into_iter().collect();
        let b: Features = [("a".to_string(), 1.0), ("c".to_string(), 5.0)]
            .into_iter()
            .collect();
        let t = Table::from_records(&[a, b]);
        assert_eq!(t.columns(), &["a", "b", "c"]);
        assert_eq!(t.values(), &array![[0.0, 2.0, 0.0], [1.0, 0.0, 5.0]]);
        assert_eq!(t.column_sums().get("c"), Some(&5.0));
    }

    #[test]
    fn new_checks_column_names_against_width() {
        let err = Table::new(vec!["a".into()], array![[1.0, 2.0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::Shape {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn new_rejects_duplicate_column_names() {
        let err = Table::new(vec!["a".into(), "a".into()], array![[1.0, 2.0], [3.0, 4.0]])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateColumn(ref c)) if c == "a"
        ));
    }

    #[test]
    fn class_table_lookup_by_label() {
        let t = ClassTable::new(vec!["a".into(), "b".into()], array![[0.25, 0.75]]).unwrap();
        assert_eq!(t.get(0, &"b".into()), Some(0.75));
        assert_eq!(t.get(0, &"z".into()), None);
        assert_eq!(t.n_rows(), 1);
    }
}
