//! Session state: dataset, marks, row index and settings.
//!
//! `Session` is the single owner of everything the mark tools mutate. Every
//! successful mutation rebuilds the [`RowMarkIndex`] before returning, and
//! every failed one leaves all state untouched, so callers only need to
//! resync their views after an `Ok`.

use log::{debug, info, warn};

use crate::{
    Dataset, Mark, MarkCollection, Result, RowMarkIndex, Settings, SettingsChange, SpanSelection,
};

/// Loaded dataset plus the marks placed on it.
#[derive(Debug, Default)]
pub struct Session {
    dataset: Option<Dataset>,
    marks: MarkCollection,
    index: RowMarkIndex,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn marks(&self) -> &MarkCollection {
        &self.marks
    }

    pub fn index(&self) -> &RowMarkIndex {
        &self.index
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Mark covering `row` of the loaded dataset.
    pub fn row_mark(&self, row: usize) -> Option<&Mark> {
        self.index.get(row)
    }

    /// Replaces the dataset.
    ///
    /// The new data is rounded to the current precision and all marks are
    /// cleared, since their X positions refer to the previous data.
    pub fn load_dataset(&mut self, mut dataset: Dataset) {
        dataset.round_to(self.settings.precision());
        info!(
            "Loaded dataset: {} rows x {} columns ({} marks cleared)",
            dataset.n_rows(),
            dataset.n_cols(),
            self.marks.len()
        );
        self.dataset = Some(dataset);
        self.marks.clear();
        self.reindex();
    }

    /// Adds a mark.
    ///
    /// # Errors
    /// Returns [`Error::Collision`](crate::Error::Collision) if it overlaps an
    /// existing mark.
    pub fn add_mark(&mut self, mark: Mark) -> Result<usize> {
        let position = self.marks.add(mark).inspect_err(|e| {
            warn!("Rejected mark {mark}: {e}");
        })?;
        debug!("Added mark #{position}: {mark} {}", mark.color());
        self.reindex();
        Ok(position)
    }

    /// Replaces the mark at `index` after checking it against the others.
    ///
    /// # Errors
    /// Index or collision errors; the collection is unchanged on failure.
    pub fn replace_mark(&mut self, index: usize, mark: Mark) -> Result<Mark> {
        let previous = self.marks.replace(index, mark).inspect_err(|e| {
            warn!("Rejected edit of mark #{index}: {e}");
        })?;
        debug!("Edited mark #{index}: {previous} -> {mark}");
        self.reindex();
        Ok(previous)
    }

    /// Deletes the mark at `index`.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange).
    pub fn delete_mark(&mut self, index: usize) -> Result<Mark> {
        let removed = self.marks.delete(index).inspect_err(|e| {
            warn!("Rejected delete: {e}");
        })?;
        debug!("Deleted mark #{index}: {removed}");
        self.reindex();
        Ok(removed)
    }

    pub fn clear_marks(&mut self) {
        self.marks.clear();
        self.reindex();
    }

    /// Commits the candidate held by `selection` as `edited`.
    ///
    /// `edited` is the mark after the user adjusted bounds or color, so it is
    /// collision-checked again. The selection is cleared whether or not the
    /// commit succeeds.
    ///
    /// # Errors
    /// [`Error::NoSelection`](crate::Error::NoSelection) without a candidate,
    /// otherwise the errors of [`Session::add_mark`].
    pub fn commit_selection(
        &mut self,
        selection: &mut SpanSelection,
        edited: Mark,
    ) -> Result<usize> {
        selection.finish()?;
        self.add_mark(edited)
    }

    /// Applies settings text from the settings dialog.
    ///
    /// A precision change re-rounds the loaded dataset.
    ///
    /// # Errors
    /// Returns [`Error::ConfigParse`](crate::Error::ConfigParse); previous
    /// settings are retained.
    pub fn update_settings(&mut self, delimiter: &str, precision: &str) -> Result<SettingsChange> {
        let change = self
            .settings
            .apply_input(delimiter, precision)
            .inspect_err(|e| warn!("Ignored settings input: {e}"))?;
        if change.precision {
            self.apply_precision();
        }
        Ok(change)
    }

    /// Replaces the settings wholesale.
    pub fn set_settings(&mut self, settings: Settings) {
        let precision_changed = settings.precision() != self.settings.precision();
        self.settings = settings;
        if precision_changed {
            self.apply_precision();
        }
    }

    /// Rows of the dataset paired with their resolved mark.
    pub fn export_rows(&self) -> impl Iterator<Item = (&[f64], Option<&Mark>)> + '_ {
        self.dataset
            .iter()
            .flat_map(Dataset::rows)
            .zip(self.index.iter())
    }

    fn apply_precision(&mut self) {
        let precision = self.settings.precision();
        if let Some(dataset) = &mut self.dataset {
            debug!("Rounding dataset to {precision} decimals");
            dataset.round_to(precision);
        }
        self.reindex();
    }

    fn reindex(&mut self) {
        match &self.dataset {
            Some(dataset) => self.index.rebuild(dataset.x_values(), &self.marks),
            None => self.index.clear(),
        }
    }
}
