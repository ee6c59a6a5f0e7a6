//! Clickable highlight overlay drawn on top of rendered PDF pages.
//!
//! Each non-sentinel fragment becomes one absolutely positioned region:
//! `pixel = bbox_component * scale`. Pages are stacked vertically in one
//! scroll container, so regions are registered with their page's top offset
//! added.

use std::collections::BTreeMap;

use crate::model::{Document, Fragment, Rect};
use crate::select::{EventSink, Selection, SelectionEvent, SelectionSnapshot, SurfaceId};
use crate::sync::ElementRegistry;

use super::RenderOptions;

/// One clickable fragment region.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRegion {
    /// Fragment drawn by this region
    pub fragment: Fragment,
    /// Bounds in page-local pixels
    pub rect: Rect,
    /// Whether the region matches the selection
    pub highlighted: bool,
}

/// The overlay of one rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPage {
    /// Page index (0-indexed)
    pub page: u32,
    /// Scale the page was rendered at
    pub scale: f32,
    /// Offset of the page's top edge in the scroll container
    pub top: f32,
    /// Page height in pixels
    pub height: f32,
    /// Regions in drawing order
    pub regions: Vec<OverlayRegion>,
}

impl OverlayPage {
    /// Find the region under a page-local pixel position.
    ///
    /// Regions may overlap; the one drawn last is on top.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&OverlayRegion> {
        self.regions.iter().rev().find(|r| r.rect.contains(x, y))
    }

    /// Regions currently highlighted.
    pub fn highlighted(&self) -> impl Iterator<Item = &OverlayRegion> {
        self.regions.iter().filter(|r| r.highlighted)
    }

    /// Bottom edge of the page in the scroll container.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Every rendered page of the overlay, from one render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayLayout {
    /// Rendered pages, ascending by page index
    pub pages: Vec<OverlayPage>,
    /// Total scrollable height
    pub content_height: f32,
    /// Selection revision this pass rendered
    pub revision: u64,
}

impl OverlayLayout {
    /// Get a rendered page by index.
    pub fn page(&self, page: u32) -> Option<&OverlayPage> {
        self.pages.iter().find(|p| p.page == page)
    }
}

/// The page-image surface.
pub struct PdfOverlay {
    pages: BTreeMap<u32, Vec<Fragment>>,
    page_height: Option<f32>,
    sink: EventSink,
    registry: ElementRegistry,
    layout: OverlayLayout,
}

impl PdfOverlay {
    /// Create an overlay over a document's fragments.
    pub fn new(doc: &Document, sink: EventSink) -> Self {
        let pages = doc
            .pages
            .iter()
            .map(|section| {
                let fragments = section
                    .fragments()
                    .filter(|f| !f.is_break())
                    .cloned()
                    .collect();
                (section.page, fragments)
            })
            .collect();

        Self {
            pages,
            page_height: None,
            sink,
            registry: ElementRegistry::new(),
            layout: OverlayLayout::default(),
        }
    }

    /// Use a fixed page height (in page units) instead of the content extent.
    pub fn with_page_height(mut self, height: f32) -> Self {
        self.page_height = Some(height);
        self
    }

    /// Render one page's regions at `scale`, with the page's top edge at `top`.
    pub fn render_page(
        &mut self,
        page: u32,
        scale: f32,
        top: f32,
        snapshot: &SelectionSnapshot,
    ) -> OverlayPage {
        self.registry.clear_page(page);

        let fragments = self.pages.get(&page).map(Vec::as_slice).unwrap_or(&[]);
        let mut regions = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let rect = fragment.bbox.to_pixels(scale);
            self.registry.register(fragment.key(), rect.translate(0.0, top));
            regions.push(OverlayRegion {
                fragment: fragment.clone(),
                rect,
                highlighted: snapshot.is_highlighted(fragment),
            });
        }

        let extent = self.page_height.unwrap_or_else(|| {
            fragments
                .iter()
                .map(|f| f.bbox.y1())
                .filter(|y| y.is_finite())
                .fold(0.0, f64::max) as f32
        });

        OverlayPage {
            page,
            scale,
            top,
            height: extent * scale,
            regions,
        }
    }

    /// Render every selected page, stacked with `page_gap` between them.
    pub fn render(
        &mut self,
        snapshot: &SelectionSnapshot,
        options: &RenderOptions,
    ) -> &OverlayLayout {
        let indices: Vec<u32> = self
            .pages
            .keys()
            .copied()
            .filter(|&page| options.includes_page(page))
            .collect();

        self.registry.clear();
        let mut pages = Vec::with_capacity(indices.len());
        let mut top = 0.0;
        for page in indices {
            let rendered = self.render_page(page, options.scale, top, snapshot);
            top = rendered.bottom() + options.page_gap;
            pages.push(rendered);
        }

        self.layout = OverlayLayout {
            pages,
            content_height: top,
            revision: snapshot.revision,
        };
        &self.layout
    }

    /// Handle a click at a page-local pixel position.
    ///
    /// Reports `(text, page, bbox)` of the region under the pointer through
    /// the event channel and returns the reported selection.
    pub fn click(&self, page: u32, x: f32, y: f32) -> Option<Selection> {
        let region = self.layout.page(page)?.hit_test(x, y)?;
        let fragment = &region.fragment;
        let event = SelectionEvent::new(
            SurfaceId::Pdf,
            fragment.text.clone(),
            fragment.page,
            fragment.bbox,
        );
        let selection = event.selection.clone();
        if !self.sink.emit(event) {
            log::warn!("Selection channel closed; click on page {} dropped", page);
        }
        Some(selection)
    }

    /// The most recent render pass.
    pub fn layout(&self) -> &OverlayLayout {
        &self.layout
    }

    /// Elements registered by the most recent render pass.
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;
    use crate::parser::build;
    use crate::select::{channel, HighlightCoordinator};

    fn doc() -> Document {
        build(&[
            Fragment::new("Hello", 0, [10.0, 20.0, 30.0, 40.0]),
            Fragment::new("\n", 0, [30.0, 20.0, 30.0, 40.0]),
            Fragment::new("world", 0, [15.0, 25.0, 50.0, 45.0]),
            Fragment::new("Next", 1, [0.0, 0.0, 20.0, 10.0]),
        ])
    }

    #[test]
    fn test_region_geometry() {
        let (sink, _events) = channel();
        let mut overlay = PdfOverlay::new(&doc(), sink);
        let page = overlay.render_page(0, 2.0, 0.0, &SelectionSnapshot::empty());

        // Break sentinels get no region.
        assert_eq!(page.regions.len(), 2);
        assert_eq!(page.regions[0].rect, Rect::new(20.0, 40.0, 40.0, 40.0));
        assert_eq!(page.height, 90.0);
    }

    #[test]
    fn test_highlight_flags() {
        let (sink, _events) = channel();
        let mut overlay = PdfOverlay::new(&doc(), sink);
        let mut coordinator = HighlightCoordinator::new();
        coordinator.apply(Selection::new("world", 0, [15.05, 25.0, 50.0, 45.0]));

        let page = overlay.render_page(0, 1.0, 0.0, &coordinator.snapshot());
        let highlighted: Vec<_> = page
            .highlighted()
            .map(|r| r.fragment.text.as_str())
            .collect();
        assert_eq!(highlighted, vec!["world"]);
    }

    #[test]
    fn test_topmost_region_wins() {
        let (sink, events) = channel();
        let mut overlay = PdfOverlay::new(&doc(), sink);
        let options = RenderOptions::new().with_scale(1.0);
        overlay.render(&SelectionSnapshot::empty(), &options);

        // (20, 30) lies inside both "Hello" and "world"; "world" is drawn last.
        let selection = overlay.click(0, 20.0, 30.0).unwrap();
        assert_eq!(selection.text, "world");

        let event = events.try_recv().unwrap();
        assert_eq!(event.origin, SurfaceId::Pdf);
        assert_eq!(event.selection.bbox, BBox::new(15.0, 25.0, 50.0, 45.0));

        assert!(overlay.click(0, 500.0, 500.0).is_none());
    }

    #[test]
    fn test_pages_are_stacked_in_registry() {
        let (sink, _events) = channel();
        let mut overlay = PdfOverlay::new(&doc(), sink);
        let options = RenderOptions::new().with_scale(1.0).with_page_gap(10.0);
        let layout = overlay.render(&SelectionSnapshot::empty(), &options);

        assert_eq!(layout.pages[1].top, 55.0);
        assert_eq!(layout.content_height, 75.0);

        let next = Fragment::new("Next", 1, [0.0, 0.0, 20.0, 10.0]);
        let element = overlay.registry().get(&next.key()).unwrap();
        assert_eq!(element.rect.y, 55.0);
    }
}
