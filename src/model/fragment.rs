//! Positioned text fragments and their cross-surface identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::BBox;

/// Sentinel text for an explicit line break.
pub const LINE_BREAK: &str = "\n";

/// Sentinel text for an explicit paragraph break.
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// One positioned unit of extracted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Text content, or one of the break sentinels
    pub text: String,

    /// Page bounding box `[x0, y0, x1, y1]`
    pub bbox: BBox,

    /// Page index (0-indexed)
    pub page: u32,
}

impl Fragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, page: u32, bbox: impl Into<BBox>) -> Self {
        Self {
            text: text.into(),
            bbox: bbox.into(),
            page,
        }
    }

    /// The break this fragment stands for, if it is a sentinel.
    pub fn break_kind(&self) -> Option<BreakKind> {
        BreakKind::from_sentinel(&self.text)
    }

    /// Check if this fragment is a line or paragraph break sentinel.
    pub fn is_break(&self) -> bool {
        self.break_kind().is_some()
    }

    /// Derive the fragment's identity key.
    pub fn key(&self) -> FragmentKey {
        FragmentKey::encode(&self.text, &self.bbox, self.page)
    }
}

/// Kind of explicit break carried by a sentinel fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakKind {
    /// Single newline
    Line,
    /// Double newline
    Paragraph,
}

impl BreakKind {
    /// Recognize a break sentinel.
    pub fn from_sentinel(text: &str) -> Option<Self> {
        match text {
            LINE_BREAK => Some(BreakKind::Line),
            PARAGRAPH_BREAK => Some(BreakKind::Paragraph),
            _ => None,
        }
    }

    /// The sentinel text for this break.
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakKind::Line => LINE_BREAK,
            BreakKind::Paragraph => PARAGRAPH_BREAK,
        }
    }
}

/// Identity of a fragment, shared by every rendering surface.
///
/// A key is a pure function of `(text, bbox, page)`: two fragments are the
/// same fragment exactly when their keys are equal. Bbox components are
/// stored as IEEE-754 bit patterns so the key can be hashed; `-0.0` folds into
/// `0.0` and every NaN folds into one canonical NaN.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentKey {
    page: u32,
    bbox: [u64; 4],
    text: String,
}

impl FragmentKey {
    /// Encode a key from its parts.
    pub fn encode(text: &str, bbox: &BBox, page: u32) -> Self {
        let c = bbox.components();
        Self {
            page,
            bbox: [
                canonical_bits(c[0]),
                canonical_bits(c[1]),
                canonical_bits(c[2]),
                canonical_bits(c[3]),
            ],
            text: text.to_string(),
        }
    }

    /// Page index of the keyed fragment.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Text of the keyed fragment.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bounding box of the keyed fragment.
    pub fn bbox(&self) -> BBox {
        BBox(self.bbox.map(f64::from_bits))
    }
}

/// `<text>-<x0>,<y0>,<x1>,<y1>-page<page>`
///
/// Number formatting never produces `,` or `-page`, so the bbox and page
/// segments can always be recovered from the right.
impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x0, y0, x1, y1] = self.bbox().components();
        write!(
            f,
            "{}-{},{},{},{}-page{}",
            self.text, x0, y0, x1, y1, self.page
        )
    }
}

fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}
