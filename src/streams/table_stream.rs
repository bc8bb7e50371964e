use crate::core::{Features, Table, Target, Targets};

/// Replays a table one row at a time as `(features, target)` pairs.
///
/// Rows come out in their stored order and each feature map is keyed by the
/// table's column names. The target is `None` when no target column was given
/// or when it is shorter than the table.
///
/// The stream is finite: once exhausted it yields `None` until
/// [`TableStream::restart`] rewinds it.
#[derive(Debug, Clone)]
pub struct TableStream<'a> {
    x: &'a Table,
    y: Option<&'a Targets>,
    idx: usize,
}

impl<'a> TableStream<'a> {
    pub fn new(x: &'a Table, y: Option<&'a Targets>) -> Self {
        Self { x, y, idx: 0 }
    }

    pub fn has_more_instances(&self) -> bool {
        self.idx < self.x.n_rows()
    }

    pub fn restart(&mut self) {
        self.idx = 0;
    }
}

impl Iterator for TableStream<'_> {
    type Item = (Features, Option<Target>);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_more_instances() {
            return None;
        }
        let row = self.idx;
        self.idx += 1;
        let target = self.y.and_then(|y| y.get(row));
        Some((self.x.row_features(row), target))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.x.n_rows() - self.idx;
        (left, Some(left))
    }
}

impl ExactSizeIterator for TableStream<'_> {}

/// Shorthand for [`TableStream::new`].
pub fn iter_table<'a>(x: &'a Table, y: Option<&'a Targets>) -> TableStream<'a> {
    TableStream::new(x, y)
}
