//! Document model types for structured transcripts.
//!
//! This module defines the representation shared by both rendering surfaces:
//! positioned fragments, their identity keys, and the page → node → inline
//! hierarchy built from them.

mod document;
mod fragment;
mod geometry;
mod page;
mod paragraph;

pub use document::Document;
pub use fragment::{BreakKind, Fragment, FragmentKey, LINE_BREAK, PARAGRAPH_BREAK};
pub use geometry::{BBox, Rect};
pub use page::{HeadingLevel, PageSection, StructuralNode};
pub use paragraph::{Inline, Paragraph};
