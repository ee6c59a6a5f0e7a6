//! Rendering options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options for rendering the transcript and the page overlay.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page units to pixels on the overlay surface
    pub scale: f32,

    /// Vertical gap between pages or page blocks, in pixels
    pub page_gap: f32,

    /// Page selection (1-indexed, matching the page labels)
    pub page_selection: PageSelection,

    /// Emit a "Page N" label before each page's content
    pub show_page_labels: bool,

    /// Height of one transcript line, in pixels
    pub line_height: f32,

    /// Characters per transcript line before wrapping
    pub chars_per_line: usize,

    /// Width of one character cell, in pixels
    pub char_width: f32,

    /// Vertical gap after each heading or paragraph, in pixels
    pub block_gap: f32,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overlay scale.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the gap between pages.
    pub fn with_page_gap(mut self, gap: f32) -> Self {
        self.page_gap = gap;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }

    /// Set specific pages.
    pub fn with_page_list(mut self, pages: Vec<u32>) -> Self {
        self.page_selection = PageSelection::Pages(pages);
        self
    }

    /// Enable or disable page labels.
    pub fn with_page_labels(mut self, show: bool) -> Self {
        self.show_page_labels = show;
        self
    }

    /// Set the transcript line height.
    pub fn with_line_height(mut self, height: f32) -> Self {
        self.line_height = height;
        self
    }

    /// Set the transcript line width in characters.
    pub fn with_chars_per_line(mut self, chars: usize) -> Self {
        self.chars_per_line = chars.max(1);
        self
    }

    /// Set the gap after each block.
    pub fn with_block_gap(mut self, gap: f32) -> Self {
        self.block_gap = gap;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Check if a page index (0-indexed) is selected.
    pub fn includes_page(&self, page: u32) -> bool {
        self.page_selection.includes(page.saturating_add(1))
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.5,
            page_gap: 16.0,
            page_selection: PageSelection::All,
            show_page_labels: true,
            line_height: 20.0,
            chars_per_line: 80,
            char_width: 8.0,
            block_gap: 12.0,
            escape_special_chars: true,
        }
    }
}

/// Page selection for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PageSelection {
    /// Render all pages
    #[default]
    All,
    /// Render a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Render specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        let invalid = |what: &str| Error::InvalidPageRange(format!("{}: {:?}", what, s));

        // Simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start.trim().parse().map_err(|_| invalid("invalid start page"))?;
                let end: u32 = end.trim().parse().map_err(|_| invalid("invalid end page"))?;
                if start > end {
                    return Err(invalid("start page after end page"));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        // Comma-separated list with possible ranges
        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| invalid("invalid page number"))?;
                let end: u32 = end.trim().parse().map_err(|_| invalid("invalid page number"))?;
                for p in start..=end {
                    if !pages.contains(&p) {
                        pages.push(p);
                    }
                }
            } else {
                let p: u32 = part.parse().map_err(|_| invalid("invalid page number"))?;
                if !pages.contains(&p) {
                    pages.push(p);
                }
            }
        }

        pages.sort();
        Ok(PageSelection::Pages(pages))
    }
}
