//! Rendering surfaces and exports.
//!
//! [`PdfOverlay`] and [`TranscriptView`] are the two interactive surfaces;
//! both draw highlight flags from a [`SelectionSnapshot`] and report clicks
//! through the selection channel. The Markdown, text, and JSON functions
//! export the transcript without any selection state.
//!
//! [`SelectionSnapshot`]: crate::select::SelectionSnapshot

mod json;
mod markdown;
mod options;
pub mod overlay;
mod text;
pub mod transcript;

pub use json::{to_json, to_json_with_options, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{PageSelection, RenderOptions};
pub use overlay::{OverlayLayout, OverlayPage, OverlayRegion, PdfOverlay};
pub use text::to_text;
pub use transcript::{TranscriptBlock, TranscriptLayout, TranscriptSpan, TranscriptView};

use crate::model::{Document, PageSection};

/// Sections of `doc` selected by `options.page_selection`.
fn selected_pages<'a>(
    doc: &'a Document,
    options: &'a RenderOptions,
) -> impl Iterator<Item = &'a PageSection> {
    doc.pages
        .iter()
        .filter(move |section| options.includes_page(section.page))
}
