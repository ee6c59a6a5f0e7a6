//! The selected fragment and tolerant matching against it.

use serde::{Deserialize, Serialize};

use crate::model::{BBox, Fragment, FragmentKey};

/// Per-component bbox tolerance, in page units.
///
/// The two surfaces may report the same fragment with coordinates that differ
/// by subpixel rounding.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// The `(text, page, bbox)` triple of the highlighted fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Fragment text
    pub text: String,
    /// Page index (0-indexed)
    pub page: u32,
    /// Fragment bounding box
    pub bbox: BBox,
}

impl Selection {
    /// Create a selection from its parts.
    pub fn new(text: impl Into<String>, page: u32, bbox: impl Into<BBox>) -> Self {
        Self {
            text: text.into(),
            page,
            bbox: bbox.into(),
        }
    }

    /// Identity key of the selected fragment.
    pub fn key(&self) -> FragmentKey {
        FragmentKey::encode(&self.text, &self.bbox, self.page)
    }

    /// Check if a fragment is the selected one, within `tolerance` per bbox component.
    pub fn matches_within(&self, fragment: &Fragment, tolerance: f64) -> bool {
        fragment.text == self.text
            && fragment.page == self.page
            && fragment.bbox.approx_eq(&self.bbox, tolerance)
    }

    /// Check if a fragment is the selected one, within [`DEFAULT_TOLERANCE`].
    pub fn matches(&self, fragment: &Fragment) -> bool {
        self.matches_within(fragment, DEFAULT_TOLERANCE)
    }
}

impl From<&Fragment> for Selection {
    fn from(fragment: &Fragment) -> Self {
        Self::new(fragment.text.clone(), fragment.page, fragment.bbox)
    }
}

/// Selection made by clicking a fragment.
pub fn select(fragment: &Fragment) -> Selection {
    Selection::from(fragment)
}

/// Check a fragment against a selection with the default tolerance.
pub fn matches(fragment: &Fragment, selection: &Selection) -> bool {
    selection.matches(fragment)
}
