//! Per-surface registry of rendered fragment elements.

use std::collections::{BTreeMap, HashMap};

use crate::model::{FragmentKey, Rect};
use crate::select::Selection;

/// Handle of a rendered element, unique within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// A fragment's rendered representation on a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedElement {
    /// Element handle
    pub id: ElementId,
    /// Identity of the rendered fragment
    pub key: FragmentKey,
    /// Bounds in the scroll container's content coordinates
    pub rect: Rect,
}

#[derive(Debug, Clone, Default)]
struct PageEntries {
    elements: Vec<RenderedElement>,
    by_key: HashMap<FragmentKey, usize>,
}

/// Page index → fragment key → rendered element.
///
/// Surfaces fill this during layout. Lookup goes by [`FragmentKey`] value;
/// when a key is registered twice the first element stays authoritative.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    pages: BTreeMap<u32, PageEntries>,
    next_id: usize,
}

impl ElementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rendered element and return its handle.
    pub fn register(&mut self, key: FragmentKey, rect: Rect) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;

        let entries = self.pages.entry(key.page()).or_default();
        let position = entries.elements.len();
        if entries.by_key.contains_key(&key) {
            log::debug!("Duplicate element for {}; keeping the first", key);
        } else {
            entries.by_key.insert(key.clone(), position);
        }
        entries.elements.push(RenderedElement { id, key, rect });
        id
    }

    /// Forget every element of a page (before re-rendering it).
    pub fn clear_page(&mut self, page: u32) {
        self.pages.remove(&page);
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// Exact lookup by key.
    pub fn get(&self, key: &FragmentKey) -> Option<&RenderedElement> {
        let entries = self.pages.get(&key.page())?;
        entries.by_key.get(key).map(|&i| &entries.elements[i])
    }

    /// Look up an element by handle.
    pub fn element(&self, id: ElementId) -> Option<&RenderedElement> {
        self.pages
            .values()
            .flat_map(|entries| entries.elements.iter())
            .find(|element| element.id == id)
    }

    /// Find the element rendering the selected fragment.
    ///
    /// Tries the exact key first, then the first element on the selection's
    /// page whose fragment matches within `tolerance`.
    pub fn find(&self, selection: &Selection, tolerance: f64) -> Option<&RenderedElement> {
        if let Some(element) = self.get(&selection.key()) {
            return Some(element);
        }
        let entries = self.pages.get(&selection.page)?;
        entries.elements.iter().find(|element| {
            element.key.text() == selection.text
                && element.key.bbox().approx_eq(&selection.bbox, tolerance)
        })
    }

    /// Elements of one page, in registration order.
    pub fn page_elements(&self, page: u32) -> &[RenderedElement] {
        self.pages
            .get(&page)
            .map(|entries| entries.elements.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of registered elements.
    pub fn len(&self) -> usize {
        self.pages.values().map(|entries| entries.elements.len()).sum()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.pages.values().all(|entries| entries.elements.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fragment;

    fn key(text: &str, page: u32, x0: f64) -> FragmentKey {
        Fragment::new(text, page, [x0, 0.0, x0 + 10.0, 1.0]).key()
    }

    #[test]
    fn test_exact_lookup() {
        let mut registry = ElementRegistry::new();
        let id = registry.register(key("a", 0, 0.0), Rect::new(0.0, 0.0, 10.0, 1.0));
        registry.register(key("b", 1, 0.0), Rect::new(0.0, 50.0, 10.0, 1.0));

        assert_eq!(registry.get(&key("a", 0, 0.0)).map(|e| e.id), Some(id));
        assert!(registry.get(&key("a", 1, 0.0)).is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_tolerant_find() {
        let mut registry = ElementRegistry::new();
        registry.register(key("a", 0, 10.0), Rect::default());

        let near = Selection::new("a", 0, [10.05, 0.0, 20.0, 1.0]);
        assert!(registry.find(&near, 0.1).is_some());

        let far = Selection::new("a", 0, [10.5, 0.0, 20.0, 1.0]);
        assert!(registry.find(&far, 0.1).is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = ElementRegistry::new();
        let first = registry.register(key("a", 0, 0.0), Rect::new(0.0, 0.0, 1.0, 1.0));
        registry.register(key("a", 0, 0.0), Rect::new(0.0, 99.0, 1.0, 1.0));

        assert_eq!(registry.get(&key("a", 0, 0.0)).map(|e| e.id), Some(first));
        assert_eq!(registry.page_elements(0).len(), 2);
    }

    #[test]
    fn test_clear_page() {
        let mut registry = ElementRegistry::new();
        registry.register(key("a", 0, 0.0), Rect::default());
        registry.register(key("b", 1, 0.0), Rect::default());
        registry.clear_page(0);

        assert!(registry.get(&key("a", 0, 0.0)).is_none());
        assert!(registry.get(&key("b", 1, 0.0)).is_some());
    }
}
