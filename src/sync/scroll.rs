//! Scroll-to-selection, deferred until the target surface has laid out.
//!
//! A click schedules a request on the synchronizer of the surface that did
//! not originate it. Nothing happens until that surface reports a completed
//! layout pass for a selection revision at least as new as the request; only
//! then is element geometry read and, if the element is not fully visible,
//! a scroll issued.

use crate::model::Rect;
use crate::select::{SelectionSnapshot, SurfaceId, DEFAULT_TOLERANCE};

use super::{ElementId, ElementRegistry};

/// Scroll animation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Animated scroll
    #[default]
    Smooth,
    /// Jump immediately
    Instant,
}

/// Where the element lands in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlign {
    /// Vertically centered when possible
    #[default]
    Center,
    /// Minimal scroll that makes it visible
    Nearest,
}

/// Options for scroll synchronization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncOptions {
    /// Bbox tolerance for element lookup
    pub tolerance: f64,
    /// Scroll animation style
    pub behavior: ScrollBehavior,
    /// Target alignment
    pub align: ScrollAlign,
}

impl SyncOptions {
    /// Create new sync options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lookup tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the scroll behavior.
    pub fn with_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Set the alignment.
    pub fn with_align(mut self, align: ScrollAlign) -> Self {
        self.align = align;
        self
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            behavior: ScrollBehavior::Smooth,
            align: ScrollAlign::Center,
        }
    }
}

/// A scroll container the synchronizer can read and move.
pub trait ScrollSurface {
    /// Visible bounds, in the same content coordinates as registered elements.
    fn viewport(&self) -> Rect;

    /// Scroll so the viewport's top edge sits at `top`.
    fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior);
}

/// What a layout signal led to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOutcome {
    /// Nothing was scheduled
    Idle,
    /// The surface has not laid out the requested selection yet
    Deferred,
    /// No selection, or no rendered element for it
    NotFound,
    /// The element was already fully visible
    AlreadyVisible(ElementId),
    /// A scroll was issued
    Scrolled {
        /// Element scrolled to
        element: ElementId,
        /// New viewport top
        top: f32,
    },
}

impl ScrollOutcome {
    /// Check if a scroll was issued.
    pub fn scrolled(&self) -> bool {
        matches!(self, ScrollOutcome::Scrolled { .. })
    }
}

/// Brings the selected fragment into view on one surface.
#[derive(Debug, Clone)]
pub struct ScrollSynchronizer {
    surface: SurfaceId,
    options: SyncOptions,
    pending: Option<u64>,
}

impl ScrollSynchronizer {
    /// Create a synchronizer for a surface.
    pub fn new(surface: SurfaceId, options: SyncOptions) -> Self {
        Self {
            surface,
            options,
            pending: None,
        }
    }

    /// The surface this synchronizer scrolls.
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Get the sync options.
    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Request a scroll once the surface has laid out `revision`.
    ///
    /// A newer request replaces an older one.
    pub fn schedule(&mut self, revision: u64) {
        self.pending = Some(self.pending.map_or(revision, |p| p.max(revision)));
    }

    /// Check if a request is waiting for layout.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle the surface's "layout complete" signal.
    ///
    /// `laid_out` is the selection revision the surface just rendered;
    /// `snapshot` is the selection as it stands now. When the selection moved
    /// on since the request, the request is retargeted to the newest revision
    /// instead of scrolling to a stale fragment.
    pub fn on_layout<S>(
        &mut self,
        laid_out: u64,
        snapshot: &SelectionSnapshot,
        registry: &ElementRegistry,
        scroller: &mut S,
    ) -> ScrollOutcome
    where
        S: ScrollSurface + ?Sized,
    {
        let Some(requested) = self.pending else {
            return ScrollOutcome::Idle;
        };

        let target = requested.max(snapshot.revision);
        if laid_out < target {
            if target != requested {
                log::debug!(
                    "{:?}: retargeting scroll from revision {} to {}",
                    self.surface,
                    requested,
                    target
                );
            }
            self.pending = Some(target);
            return ScrollOutcome::Deferred;
        }
        self.pending = None;

        let Some(selection) = snapshot.selection.as_ref() else {
            return ScrollOutcome::NotFound;
        };

        let Some(element) = registry.find(selection, self.options.tolerance) else {
            log::debug!(
                "{:?}: no rendered element for {:?} on page {}",
                self.surface,
                selection.text,
                selection.page
            );
            return ScrollOutcome::NotFound;
        };

        let viewport = scroller.viewport();
        if viewport.contains_vertically(&element.rect) {
            return ScrollOutcome::AlreadyVisible(element.id);
        }

        let top = self.target_top(&element.rect, &viewport);
        log::debug!(
            "{:?}: scrolling to {} for {:?}",
            self.surface,
            top,
            selection.text
        );
        scroller.scroll_to(top, self.options.behavior);
        ScrollOutcome::Scrolled {
            element: element.id,
            top,
        }
    }

    fn target_top(&self, rect: &Rect, viewport: &Rect) -> f32 {
        let top = match self.options.align {
            ScrollAlign::Center => rect.center_y() - viewport.height / 2.0,
            ScrollAlign::Nearest => {
                if rect.y < viewport.y || rect.height > viewport.height {
                    rect.y
                } else {
                    rect.bottom() - viewport.height
                }
            }
        };
        top.max(0.0)
    }
}
