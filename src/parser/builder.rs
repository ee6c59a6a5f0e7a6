//! Document assembly from a flat fragment stream.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::model::{Document, Fragment, PageSection};

use super::{BuildOptions, Classifier};

/// Builds a [`Document`] from fragments in any page order.
///
/// Fragments are bucketed by page in first-seen order, each bucket keeps the
/// input order of its fragments, and only the finished sections are sorted
/// by page index.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    options: BuildOptions,
}

impl DocumentBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom options.
    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Get the build options.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the document.
    pub fn build<I>(&self, fragments: I) -> Document
    where
        I: IntoIterator<Item = Fragment>,
    {
        let mut buckets = group_by_page(fragments);
        buckets.sort_by_key(|(page, _)| *page);

        let classifier = Classifier::with_rules(self.options.heading_rules.clone());
        let classify = |(page, fragments): (u32, Vec<Fragment>)| PageSection {
            page,
            nodes: classifier.classify(fragments),
        };

        let pages: Vec<PageSection> = if self.options.parallel && buckets.len() > 1 {
            buckets.into_par_iter().map(classify).collect()
        } else {
            buckets.into_iter().map(classify).collect()
        };

        let doc = Document { pages };
        log::info!(
            "Built document: {} pages, {} fragments",
            doc.page_count(),
            doc.fragment_count()
        );
        doc
    }
}

/// Group fragments by page, preserving first-seen page order and the input
/// order within each page.
fn group_by_page<I>(fragments: I) -> Vec<(u32, Vec<Fragment>)>
where
    I: IntoIterator<Item = Fragment>,
{
    let mut buckets: Vec<(u32, Vec<Fragment>)> = Vec::new();
    let mut index: HashMap<u32, usize> = HashMap::new();

    for fragment in fragments {
        let slot = *index.entry(fragment.page).or_insert_with(|| {
            buckets.push((fragment.page, Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(fragment);
    }

    buckets
}

/// Build a document with default options.
pub fn build(fragments: &[Fragment]) -> Document {
    DocumentBuilder::new().build(fragments.iter().cloned())
}
