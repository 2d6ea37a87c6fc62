//! Ordered, non-overlapping mark collection.

use crate::{Error, Mark, Result};

/// Ordered set of marks with no two marks properly overlapping.
///
/// Insertion order is display order. Every mutating path validates the
/// no-overlap invariant before touching the stored marks, so a failed call
/// leaves the collection unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkCollection {
    marks: Vec<Mark>,
}

impl MarkCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    /// Builds a collection from a list of marks, validating every pair.
    ///
    /// # Errors
    /// Returns [`Error::Collision`] for the first mark that overlaps an
    /// earlier one.
    pub fn from_marks(marks: Vec<Mark>) -> Result<Self> {
        let mut collection = Self::with_capacity(marks.len());
        for mark in marks {
            collection.add(mark)?;
        }
        Ok(collection)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            marks: Vec::with_capacity(capacity),
        }
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns true if there are no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Read view in display order.
    pub fn all(&self) -> &[Mark] {
        &self.marks
    }

    pub fn get(&self, index: usize) -> Option<&Mark> {
        self.marks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mark> {
        self.marks.iter()
    }

    /// Checks `candidate` against every mark except `ignore`.
    ///
    /// # Errors
    /// Returns [`Error::Collision`] naming the first colliding mark.
    pub fn check_collision(&self, candidate: &Mark, ignore: Option<usize>) -> Result<()> {
        let hit = self
            .marks
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != ignore)
            .find(|(_, mark)| mark.overlaps(candidate));

        match hit {
            Some((existing, _)) => Err(Error::Collision {
                existing,
                xmin: candidate.xmin(),
                xmax: candidate.xmax(),
            }),
            None => Ok(()),
        }
    }

    /// Appends a mark and returns its position.
    ///
    /// # Errors
    /// Returns [`Error::Collision`] if the candidate overlaps an existing mark.
    pub fn add(&mut self, candidate: Mark) -> Result<usize> {
        self.check_collision(&candidate, None)?;
        self.marks.push(candidate);
        Ok(self.marks.len() - 1)
    }

    /// Replaces the mark at `index`, returning the previous one.
    ///
    /// The replacement is checked against every other mark.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] or [`Error::Collision`].
    pub fn replace(&mut self, index: usize, mark: Mark) -> Result<Mark> {
        self.ensure_index(index)?;
        self.check_collision(&mark, Some(index))?;
        Ok(std::mem::replace(&mut self.marks[index], mark))
    }

    /// Removes and returns the mark at `index`. Later marks shift down by one.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn delete(&mut self, index: usize) -> Result<Mark> {
        self.ensure_index(index)?;
        Ok(self.marks.remove(index))
    }

    /// Removes every mark.
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    fn ensure_index(&self, index: usize) -> Result<()> {
        if index < self.marks.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.marks.len(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a MarkCollection {
    type Item = &'a Mark;
    type IntoIter = std::slice::Iter<'a, Mark>;

    fn into_iter(self) -> Self::IntoIter {
        self.marks.iter()
    }
}
