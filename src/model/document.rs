//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{Fragment, PageSection};

/// A structured transcript: one section per page that has content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Page sections, ascending by page index
    pub pages: Vec<PageSection>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Get the number of page sections in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a section by page index (0-indexed).
    pub fn get_page(&self, page: u32) -> Option<&PageSection> {
        self.pages
            .binary_search_by_key(&page, |section| section.page)
            .ok()
            .map(|i| &self.pages[i])
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Every fragment in the document, page by page.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.pages.iter().flat_map(|section| section.fragments())
    }

    /// Number of fragments held by the document.
    pub fn fragment_count(&self) -> usize {
        self.fragments().count()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|section| section.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.fragment_count(), 0);
    }

    #[test]
    fn test_get_page_by_index() {
        let doc = Document {
            pages: vec![PageSection::new(0), PageSection::new(4)],
        };
        assert_eq!(doc.get_page(4).map(|s| s.page), Some(4));
        assert!(doc.get_page(2).is_none());
    }
}
