//! Headless scroll container.

use crate::model::Rect;

use super::{ScrollBehavior, ScrollSurface};

/// A scroll container with no display attached.
///
/// Tracks the scroll position the way a browser element would, clamping to
/// the scrollable range. Used by the CLI and by tests.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollContainer {
    width: f32,
    height: f32,
    content_height: f32,
    scroll_top: f32,
    scroll_count: usize,
    last_behavior: Option<ScrollBehavior>,
}

impl ScrollContainer {
    /// Create a container with the given viewport size and content height.
    pub fn new(width: f32, height: f32, content_height: f32) -> Self {
        Self {
            width,
            height,
            content_height,
            scroll_top: 0.0,
            scroll_count: 0,
            last_behavior: None,
        }
    }

    /// Update the content height after a layout pass.
    pub fn set_content_height(&mut self, content_height: f32) {
        self.content_height = content_height;
        self.scroll_top = self.scroll_top.min(self.max_scroll());
    }

    /// Current scroll offset.
    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    /// Number of scrolls issued to this container.
    pub fn scroll_count(&self) -> usize {
        self.scroll_count
    }

    /// Behavior of the most recent scroll.
    pub fn last_behavior(&self) -> Option<ScrollBehavior> {
        self.last_behavior
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height - self.height).max(0.0)
    }
}

impl ScrollSurface for ScrollContainer {
    fn viewport(&self) -> Rect {
        Rect::new(0.0, self.scroll_top, self.width, self.height)
    }

    fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior) {
        self.scroll_top = top.clamp(0.0, self.max_scroll());
        self.scroll_count += 1;
        self.last_behavior = Some(behavior);
    }
}
