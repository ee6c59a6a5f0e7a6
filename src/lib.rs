//! # pdfscript
//!
//! Structured transcripts for PDF documents, with one selection shared
//! between the page overlay and the transcript panel.
//!
//! The library turns a flat stream of positioned text fragments into a
//! document of pages, headings, and paragraphs, gives every fragment an
//! identity both surfaces can look up, and keeps a single highlighted
//! fragment in sync across them, scrolling the other surface only after it
//! has laid out the new selection.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfscript::{load_file, render};
//!
//! fn main() -> pdfscript::Result<()> {
//!     // Load a saved extraction response
//!     let doc = load_file("lecture.json")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Heading rules**: ordered pattern table for chapter, section, subsection
//! - **Stable identity**: hashable fragment keys shared by both surfaces
//! - **Tolerant matching**: subpixel bbox differences still highlight
//! - **Layout-gated scrolling**: no timers, no stale scroll targets
//! - **Parallel processing**: Uses Rayon for multi-page documents

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod select;
pub mod source;
pub mod sync;
pub mod viewer;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    BBox, BreakKind, Document, Fragment, FragmentKey, HeadingLevel, Inline, PageSection,
    Paragraph, Rect, StructuralNode,
};
pub use parser::{build, classify, BuildOptions, DocumentBuilder, ErrorMode, HeadingRules};
pub use render::{JsonFormat, PageSelection, RenderOptions};
pub use select::{matches, select, HighlightCoordinator, Selection, SurfaceId};
pub use source::{decode_response, FragmentSource, JsonFileSource};
pub use sync::{ScrollAlign, ScrollBehavior, SyncOptions};
pub use viewer::Viewer;

use std::path::Path;

/// Load a saved extraction response and build its document.
///
/// # Arguments
///
/// * `path` - Path to a JSON response `{ "pages": [...], "error": null }`
///
/// # Example
///
/// ```no_run
/// use pdfscript::load_file;
///
/// let doc = load_file("lecture.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_file_with_options(path, BuildOptions::default())
}

/// Load a saved extraction response with custom build options.
///
/// # Example
///
/// ```no_run
/// use pdfscript::{load_file_with_options, BuildOptions};
///
/// let options = BuildOptions::new().lenient().sequential();
/// let doc = load_file_with_options("lecture.json", options).unwrap();
/// ```
pub fn load_file_with_options<P: AsRef<Path>>(path: P, options: BuildOptions) -> Result<Document> {
    let source = JsonFileSource::new().with_error_mode(options.error_mode);
    let locator = path.as_ref().to_string_lossy();
    load_from(&source, &locator, options)
}

/// Fetch fragments from any source and build the document.
pub fn load_from<S>(source: &S, locator: &str, options: BuildOptions) -> Result<Document>
where
    S: FragmentSource + ?Sized,
{
    let fragments = source.fetch(locator)?;
    Ok(DocumentBuilder::with_options(options).build(fragments))
}

/// Build a document from a response body.
///
/// # Example
///
/// ```
/// use pdfscript::load_str;
///
/// let body = r#"{"pages": [{"text": "Chapter 1 Intro", "bbox": [0, 0, 90, 12], "page": 0}]}"#;
/// let doc = load_str(body).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// ```
pub fn load_str(body: &str) -> Result<Document> {
    load_str_with_options(body, BuildOptions::default())
}

/// Build a document from a response body with custom build options.
pub fn load_str_with_options(body: &str, options: BuildOptions) -> Result<Document> {
    let fragments = decode_response(body, options.error_mode)?;
    Ok(DocumentBuilder::with_options(options).build(fragments))
}

/// Convert a saved extraction response to Markdown.
///
/// # Example
///
/// ```no_run
/// use pdfscript::to_markdown;
///
/// let markdown = to_markdown("lecture.json").unwrap();
/// std::fs::write("lecture.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load_file(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a saved extraction response to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = load_file(path)?;
    render::to_text(&doc, options)
}

/// Convert a saved extraction response to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = load_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for loading and converting transcripts.
///
/// # Example
///
/// ```no_run
/// use pdfscript::{PageSelection, Pdfscript};
///
/// let markdown = Pdfscript::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=3))
///     .load("lecture.json")?
///     .to_markdown()?;
/// # Ok::<(), pdfscript::Error>(())
/// ```
pub struct Pdfscript {
    build_options: BuildOptions,
    render_options: RenderOptions,
}

impl Pdfscript {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            build_options: BuildOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Skip malformed fragment records instead of failing.
    pub fn lenient(mut self) -> Self {
        self.build_options = self.build_options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.build_options = self.build_options.sequential();
        self
    }

    /// Set the heading rules.
    pub fn with_heading_rules(mut self, rules: HeadingRules) -> Self {
        self.build_options = self.build_options.with_heading_rules(rules);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Enable or disable page labels in output.
    pub fn with_page_labels(mut self, show: bool) -> Self {
        self.render_options = self.render_options.with_page_labels(show);
        self
    }

    /// Load a saved extraction response.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<Transcript> {
        let document = load_file_with_options(path, self.build_options)?;
        Ok(Transcript {
            document,
            render_options: self.render_options,
        })
    }

    /// Load a response body.
    pub fn load_str(self, body: &str) -> Result<Transcript> {
        let document = load_str_with_options(body, self.build_options)?;
        Ok(Transcript {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Pdfscript {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded transcript.
pub struct Transcript {
    /// The built document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl Transcript {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json_with_options(&self.document, &self.render_options, format)
    }

    /// Get plain text of the whole document.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Open an interactive viewer over the document.
    pub fn into_viewer(self) -> Viewer {
        Viewer::with_options(self.document, self.render_options, SyncOptions::default())
    }
}
