//! Page-level types.

use serde::{Deserialize, Serialize};

use super::{Fragment, Paragraph};

/// The structural content of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    /// Page index (0-indexed)
    pub page: u32,

    /// Structural nodes in source order
    pub nodes: Vec<StructuralNode>,
}

impl PageSection {
    /// Create an empty section for a page.
    pub fn new(page: u32) -> Self {
        Self {
            page,
            nodes: Vec::new(),
        }
    }

    /// Human page label (1-indexed).
    pub fn label(&self) -> u32 {
        self.page + 1
    }

    /// Every fragment on the page, in node order.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.nodes.iter().flat_map(|node| node.fragments())
    }

    /// Headings on the page.
    pub fn headings(&self) -> impl Iterator<Item = (HeadingLevel, &Fragment)> {
        self.nodes.iter().filter_map(|node| match node {
            StructuralNode::Heading { level, fragment } => Some((*level, fragment)),
            StructuralNode::Paragraph(_) => None,
        })
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(|node| node.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the page has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A heading or paragraph produced by classifying a page's fragments.
///
/// Explicit breaks never form a node of their own; they live inside the
/// paragraph they interrupt (see [`crate::model::Inline::Break`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructuralNode {
    /// A heading line
    Heading {
        /// Heading level
        level: HeadingLevel,
        /// The heading fragment
        fragment: Fragment,
    },

    /// A paragraph of body text
    Paragraph(Paragraph),
}

impl StructuralNode {
    /// Create a heading node.
    pub fn heading(level: HeadingLevel, fragment: Fragment) -> Self {
        StructuralNode::Heading { level, fragment }
    }

    /// Check if this node is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, StructuralNode::Heading { .. })
    }

    /// Check if this node is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, StructuralNode::Paragraph(_))
    }

    /// Get the heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match self {
            StructuralNode::Heading { level, .. } => Some(*level),
            StructuralNode::Paragraph(_) => None,
        }
    }

    /// Fragments held by this node, in order.
    pub fn fragments(&self) -> Box<dyn Iterator<Item = &Fragment> + '_> {
        match self {
            StructuralNode::Heading { fragment, .. } => Box::new(std::iter::once(fragment)),
            StructuralNode::Paragraph(p) => Box::new(p.fragments()),
        }
    }

    /// Get plain text content of the node.
    pub fn plain_text(&self) -> String {
        match self {
            StructuralNode::Heading { fragment, .. } => fragment.text.clone(),
            StructuralNode::Paragraph(p) => p.plain_text(),
        }
    }
}

/// Heading level, ordered from largest to smallest scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// "Chapter N" (level 1)
    Chapter,
    /// "D.D Title" (level 2)
    Section,
    /// "D.D.D Title" (level 3)
    Subsection,
}

impl HeadingLevel {
    /// Numeric level (1-3).
    pub fn as_u8(&self) -> u8 {
        match self {
            HeadingLevel::Chapter => 1,
            HeadingLevel::Section => 2,
            HeadingLevel::Subsection => 3,
        }
    }

    /// Level from a number (1-3).
    pub fn from_u8(level: u8) -> Option<Self> {
        match level {
            1 => Some(HeadingLevel::Chapter),
            2 => Some(HeadingLevel::Section),
            3 => Some(HeadingLevel::Subsection),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_section_label() {
        let section = PageSection::new(0);
        assert_eq!(section.label(), 1);
        assert!(section.is_empty());
    }

    #[test]
    fn test_heading_level_numbers() {
        for n in 1..=3 {
            assert_eq!(HeadingLevel::from_u8(n).unwrap().as_u8(), n);
        }
        assert_eq!(HeadingLevel::from_u8(4), None);
        assert!(HeadingLevel::Chapter < HeadingLevel::Subsection);
    }

    #[test]
    fn test_node_fragments() {
        let heading = StructuralNode::heading(
            HeadingLevel::Section,
            Fragment::new("1.1 Background", 0, [0.0; 4]),
        );
        assert!(heading.is_heading());
        assert_eq!(heading.fragments().count(), 1);
        assert_eq!(heading.heading_level(), Some(HeadingLevel::Section));
    }
}
