//! Paragraph and inline-level types.

use serde::{Deserialize, Serialize};

use super::{BreakKind, Fragment};

/// A paragraph: an ordered run of body fragments and the breaks between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline items in source order
    pub content: Vec<Inline>,
}

impl Paragraph {
    /// Create a paragraph starting with one body fragment.
    pub fn with_fragment(fragment: Fragment) -> Self {
        Self {
            content: vec![Inline::Text(fragment)],
        }
    }

    /// Append a body fragment.
    pub fn push_text(&mut self, fragment: Fragment) {
        self.content.push(Inline::Text(fragment));
    }

    /// Append a break sentinel in place.
    pub fn push_break(&mut self, kind: BreakKind, fragment: Fragment) {
        self.content.push(Inline::Break { kind, fragment });
    }

    /// Body fragments, skipping breaks.
    pub fn text_fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.content.iter().filter_map(|item| match item {
            Inline::Text(f) => Some(f),
            Inline::Break { .. } => None,
        })
    }

    /// Every fragment held by the paragraph, breaks included.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.content.iter().map(Inline::fragment)
    }

    /// Plain text with breaks rendered as newlines.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|item| match item {
                Inline::Text(f) => f.text.as_str(),
                Inline::Break { kind, .. } => kind.as_str(),
            })
            .collect()
    }

    /// Check if the paragraph holds no body text.
    pub fn is_empty(&self) -> bool {
        self.text_fragments().next().is_none()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// A body text fragment
    Text(Fragment),

    /// An explicit break, kept in place
    Break {
        /// Line or paragraph break
        kind: BreakKind,
        /// The sentinel fragment that produced the break
        fragment: Fragment,
    },
}

impl Inline {
    /// The fragment behind this item.
    pub fn fragment(&self) -> &Fragment {
        match self {
            Inline::Text(f) => f,
            Inline::Break { fragment, .. } => fragment,
        }
    }

    /// Check if this item is a break.
    pub fn is_break(&self) -> bool {
        matches!(self, Inline::Break { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::with_fragment(Fragment::new("Hello", 0, [0.0; 4]));
        p.push_break(BreakKind::Line, Fragment::new("\n", 0, [0.0, 1.0, 0.0, 1.0]));
        p.push_text(Fragment::new("world", 0, [0.0; 4]));

        assert_eq!(p.plain_text(), "Hello\nworld");
        assert_eq!(p.text_fragments().count(), 2);
        assert_eq!(p.fragments().count(), 3);
        assert!(!p.is_empty());
    }
}
