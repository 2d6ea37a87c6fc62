//! Interactive span selection for mark creation.
//!
//! The chart reports drag gestures here; the resulting span becomes a
//! candidate mark that is collision-checked once when proposed and again
//! when the (possibly edited) mark is committed through
//! [`Session::commit_selection`](crate::Session::commit_selection).

use crate::{Error, Mark, MarkCollection, Result, Rgba};

/// Where the selection gesture currently is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectionState {
    /// No active drag and no captured span.
    #[default]
    Idle,
    /// Pointer held down; `anchor` is where the drag began.
    Selecting { anchor: f64, current: f64 },
    /// Drag released; bounds are normalized.
    Candidate { xmin: f64, xmax: f64 },
}

/// Single-owner state machine for one in-flight selection.
#[derive(Debug, Clone, Default)]
pub struct SpanSelection {
    state: SelectionState,
}

impl SpanSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SelectionState::Idle
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, SelectionState::Selecting { .. })
    }

    /// Starts a drag at `x`, discarding any previous span.
    pub fn begin(&mut self, x: f64) {
        if x.is_finite() {
            self.state = SelectionState::Selecting {
                anchor: x,
                current: x,
            };
        }
    }

    /// Moves the free end of an active drag.
    pub fn update(&mut self, x: f64) {
        if let SelectionState::Selecting { current, .. } = &mut self.state {
            if x.is_finite() {
                *current = x;
            }
        }
    }

    /// Ends the drag. A zero-width span returns to idle.
    ///
    /// Returns the captured `(xmin, xmax)` when a candidate was produced.
    pub fn release(&mut self) -> Option<(f64, f64)> {
        let SelectionState::Selecting { anchor, current } = self.state else {
            return None;
        };
        let (xmin, xmax) = ordered(anchor, current);
        if xmax - xmin <= 0.0 {
            self.state = SelectionState::Idle;
            return None;
        }
        self.state = SelectionState::Candidate { xmin, xmax };
        Some((xmin, xmax))
    }

    /// Normalized span of the active drag or candidate.
    pub fn span(&self) -> Option<(f64, f64)> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Selecting { anchor, current } => Some(ordered(anchor, current)),
            SelectionState::Candidate { xmin, xmax } => Some((xmin, xmax)),
        }
    }

    /// Builds the tentative mark for the captured span and runs the first
    /// collision check.
    ///
    /// The selection stays a candidate on success so the mark can be edited
    /// before [`Session::commit_selection`](crate::Session::commit_selection).
    /// Any failure clears it.
    ///
    /// # Errors
    /// [`Error::NoSelection`] without a candidate, otherwise validation or
    /// [`Error::Collision`].
    pub fn propose(&mut self, color: Rgba, marks: &MarkCollection) -> Result<Mark> {
        let SelectionState::Candidate { xmin, xmax } = self.state else {
            return Err(Error::NoSelection);
        };
        let checked = Mark::new(xmin, xmax, color)
            .and_then(|mark| marks.check_collision(&mark, None).map(|()| mark));
        if checked.is_err() {
            self.cancel();
        }
        checked
    }

    /// Consumes the candidate, returning to idle.
    ///
    /// # Errors
    /// [`Error::NoSelection`] if there is no candidate; the state is reset
    /// regardless.
    pub fn finish(&mut self) -> Result<(f64, f64)> {
        let state = std::mem::take(&mut self.state);
        match state {
            SelectionState::Candidate { xmin, xmax } => Ok((xmin, xmax)),
            _ => Err(Error::NoSelection),
        }
    }

    /// Drops any drag or candidate.
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_produces_normalized_candidate() {
        let mut selection = SpanSelection::new();
        assert!(selection.is_idle());

        selection.begin(5.0);
        selection.update(3.0);
        assert!(selection.is_selecting());
        assert_eq!(selection.span(), Some((3.0, 5.0)));

        assert_eq!(selection.release(), Some((3.0, 5.0)));
        assert_eq!(
            selection.state(),
            SelectionState::Candidate { xmin: 3.0, xmax: 5.0 }
        );
    }

    #[test]
    fn test_click_without_drag_is_discarded() {
        let mut selection = SpanSelection::new();
        selection.begin(1.0);
        assert_eq!(selection.release(), None);
        assert!(selection.is_idle());
    }

    #[test]
    fn test_propose_without_selection() {
        let mut selection = SpanSelection::new();
        let marks = MarkCollection::new();
        assert_eq!(
            selection.propose(Rgba::RED, &marks),
            Err(Error::NoSelection)
        );
    }

    #[test]
    fn test_propose_collision_clears_selection() {
        let mut marks = MarkCollection::new();
        marks.add(Mark::new(1.0, 3.0, Rgba::BLUE).unwrap()).unwrap();

        let mut selection = SpanSelection::new();
        selection.begin(2.0);
        selection.update(4.0);
        selection.release();

        let err = selection.propose(Rgba::RED, &marks).unwrap_err();
        assert!(matches!(err, Error::Collision { existing: 0, .. }));
        assert!(selection.is_idle());
    }

    #[test]
    fn test_propose_keeps_candidate_for_editing() {
        let marks = MarkCollection::new();
        let mut selection = SpanSelection::new();
        selection.begin(0.0);
        selection.update(1.0);
        selection.release();

        let mark = selection.propose(Rgba::GREEN, &marks).unwrap();
        assert_eq!(mark, Mark::new(0.0, 1.0, Rgba::GREEN).unwrap());
        assert!(!selection.is_idle());

        assert_eq!(selection.finish(), Ok((0.0, 1.0)));
        assert!(selection.is_idle());
        assert_eq!(selection.finish(), Err(Error::NoSelection));
    }

    #[test]
    fn test_update_ignored_when_not_dragging() {
        let mut selection = SpanSelection::new();
        selection.update(4.0);
        assert!(selection.is_idle());
        selection.begin(f64::NAN);
        assert!(selection.is_idle());
    }
}
