//! Structural classification of a page's fragments.
//!
//! The classifier makes one forward pass over a page's fragments in arrival
//! order, without lookahead:
//!
//! 1. A fragment matching a heading rule starts a new heading node.
//! 2. Body text opens a paragraph when nothing is open (start of page or
//!    right after a heading), and otherwise joins the open paragraph.
//! 3. A break sentinel is kept in place inside the open paragraph, or
//!    dropped when no paragraph is open.
//!
//! Fragments with non-finite bounding boxes are always body text.

use crate::model::{BreakKind, Fragment, HeadingLevel, Paragraph, StructuralNode};

use super::HeadingRules;

/// Groups one page's fragments into headings and paragraphs.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: HeadingRules,
}

impl Classifier {
    /// Create a classifier with the built-in heading rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom heading rules.
    pub fn with_rules(rules: HeadingRules) -> Self {
        Self { rules }
    }

    /// The heading rules in use.
    pub fn rules(&self) -> &HeadingRules {
        &self.rules
    }

    /// Classify a page's fragments, in order.
    ///
    /// Never fails; holds no state between calls.
    pub fn classify<I>(&self, fragments: I) -> Vec<StructuralNode>
    where
        I: IntoIterator<Item = Fragment>,
    {
        let mut nodes: Vec<StructuralNode> = Vec::new();

        for fragment in fragments {
            match self.kind_of(&fragment) {
                FragmentKind::Heading(level) => {
                    nodes.push(StructuralNode::heading(level, fragment));
                }
                FragmentKind::Break(kind) => match nodes.last_mut() {
                    Some(StructuralNode::Paragraph(paragraph)) => {
                        paragraph.push_break(kind, fragment);
                    }
                    _ => {
                        log::trace!(
                            "Dropping {:?} break on page {} with no open paragraph",
                            kind,
                            fragment.page
                        );
                    }
                },
                FragmentKind::Body => match nodes.last_mut() {
                    Some(StructuralNode::Paragraph(paragraph)) => paragraph.push_text(fragment),
                    _ => nodes.push(StructuralNode::Paragraph(Paragraph::with_fragment(fragment))),
                },
            }
        }

        nodes
    }

    fn kind_of(&self, fragment: &Fragment) -> FragmentKind {
        if !fragment.bbox.is_finite() {
            log::warn!(
                "Fragment {:?} on page {} has a non-finite bbox; treating as body text",
                fragment.text,
                fragment.page
            );
            return FragmentKind::Body;
        }
        if let Some(kind) = fragment.break_kind() {
            return FragmentKind::Break(kind);
        }
        match self.rules.classify(&fragment.text) {
            Some(level) => FragmentKind::Heading(level),
            None => FragmentKind::Body,
        }
    }
}

enum FragmentKind {
    Heading(HeadingLevel),
    Break(BreakKind),
    Body,
}

/// Classify a page's fragments with the built-in heading rules.
pub fn classify(fragments: &[Fragment]) -> Vec<StructuralNode> {
    Classifier::new().classify(fragments.iter().cloned())
}
