//! Scroll synchronization between the two surfaces.
//!
//! Each surface registers the elements it lays out in an [`ElementRegistry`].
//! A [`ScrollSynchronizer`] waits for the surface's post-layout signal, then
//! looks the selection up and scrolls a [`ScrollSurface`] to it.

mod container;
mod registry;
mod scroll;

pub use container::ScrollContainer;
pub use registry::{ElementId, ElementRegistry, RenderedElement};
pub use scroll::{
    ScrollAlign, ScrollBehavior, ScrollOutcome, ScrollSurface, ScrollSynchronizer, SyncOptions,
};
