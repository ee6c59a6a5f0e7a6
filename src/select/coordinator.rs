//! Single owner of the selection shared by both surfaces.

use crate::model::Fragment;

use super::{Selection, DEFAULT_TOLERANCE};

/// Selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing has been clicked yet
    NoSelection,
    /// A fragment is highlighted
    Selected,
}

/// A render pass's view of the selection.
///
/// Surfaces render from a snapshot so a selection change between two of
/// their own operations cannot tear a pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSnapshot {
    /// The highlighted fragment, if any
    pub selection: Option<Selection>,
    /// Number of selection events applied so far
    pub revision: u64,
    /// Bbox tolerance for highlight matching
    pub tolerance: f64,
}

impl SelectionSnapshot {
    /// Snapshot with nothing selected.
    pub fn empty() -> Self {
        Self {
            selection: None,
            revision: 0,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Check if a fragment should render highlighted.
    pub fn is_highlighted(&self, fragment: &Fragment) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|s| s.matches_within(fragment, self.tolerance))
    }
}

/// Holds the selection and applies click events to it.
///
/// Transitions: `NoSelection --click--> Selected(t)`, `Selected(t)
/// --click--> Selected(t')`. Clicking the selected fragment again leaves the
/// triple unchanged; nothing returns to `NoSelection` except [`clear`].
///
/// [`clear`]: HighlightCoordinator::clear
#[derive(Debug, Clone)]
pub struct HighlightCoordinator {
    current: Option<Selection>,
    revision: u64,
    tolerance: f64,
}

impl HighlightCoordinator {
    /// Create a coordinator with the default tolerance.
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }

    /// Create a coordinator with a custom bbox tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            current: None,
            revision: 0,
            tolerance,
        }
    }

    /// Replace the selection with the clicked triple.
    ///
    /// Every click bumps the revision, including a re-click on the current
    /// fragment, so the other surface is scrolled back to it.
    pub fn apply(&mut self, selection: Selection) -> &Selection {
        self.revision += 1;
        if self.current.as_ref() == Some(&selection) {
            log::debug!("Re-selected {:?} on page {}", selection.text, selection.page);
        }
        self.current.insert(selection)
    }

    /// Select a clicked fragment.
    pub fn select(&mut self, fragment: &Fragment) -> &Selection {
        self.apply(Selection::from(fragment))
    }

    /// Drop the selection, e.g. when navigating away from the document.
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            self.revision += 1;
        }
    }

    /// Current selection.
    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// Current state.
    pub fn state(&self) -> SelectionState {
        match self.current {
            Some(_) => SelectionState::Selected,
            None => SelectionState::NoSelection,
        }
    }

    /// Number of selection events applied.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bbox tolerance used for matching.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Check if a fragment matches the current selection.
    pub fn matches(&self, fragment: &Fragment) -> bool {
        self.current
            .as_ref()
            .is_some_and(|s| s.matches_within(fragment, self.tolerance))
    }

    /// Take a snapshot for a render pass.
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            selection: self.current.clone(),
            revision: self.revision,
            tolerance: self.tolerance,
        }
    }
}

impl Default for HighlightCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
