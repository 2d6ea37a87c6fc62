//! Row → mark index.

use crate::{Dataset, Mark, MarkCollection};

/// Per-row association of a data row to the mark containing its X value.
///
/// This is a derived view: it is rebuilt in full whenever the marks or the
/// dataset change and is never edited in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowMarkIndex {
    rows: Vec<Option<Mark>>,
}

impl RowMarkIndex {
    /// Builds the index for a sequence of X values.
    pub fn build<I>(x_values: I, marks: &MarkCollection) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut index = Self::default();
        index.rebuild(x_values, marks);
        index
    }

    /// Builds the index for a dataset's X column.
    pub fn for_dataset(dataset: &Dataset, marks: &MarkCollection) -> Self {
        Self::build(dataset.x_values(), marks)
    }

    /// Recomputes every row, reusing the allocation.
    ///
    /// Marks are scanned in collection order and the first containing mark
    /// wins; with non-overlapping marks the only tie is a row sitting exactly
    /// on an endpoint shared by two touching marks.
    pub fn rebuild<I>(&mut self, x_values: I, marks: &MarkCollection)
    where
        I: IntoIterator<Item = f64>,
    {
        self.rows.clear();
        self.rows.extend(
            x_values
                .into_iter()
                .map(|x| marks.iter().find(|mark| mark.contains(x)).copied()),
        );
    }

    /// Drops every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Mark covering `row`, if any.
    pub fn get(&self, row: usize) -> Option<&Mark> {
        self.rows.get(row).and_then(Option::as_ref)
    }

    /// Number of indexed rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Mark>> + '_ {
        self.rows.iter().map(Option::as_ref)
    }

    /// Number of rows covered by some mark.
    pub fn marked_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_some()).count()
    }
}
