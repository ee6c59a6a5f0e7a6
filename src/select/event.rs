//! Selection events flowing from the surfaces up to the owner.

use crossbeam_channel::{Receiver, Sender};

use crate::model::BBox;

use super::Selection;

/// One of the two rendering surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    /// The page-image overlay
    Pdf,
    /// The reflowed transcript panel
    Transcript,
}

impl SurfaceId {
    /// The surface that did not originate an event.
    pub fn other(&self) -> SurfaceId {
        match self {
            SurfaceId::Pdf => SurfaceId::Transcript,
            SurfaceId::Transcript => SurfaceId::Pdf,
        }
    }
}

/// A click on a fragment, reported as `(text, page, bbox)` by its surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEvent {
    /// Surface the click happened on
    pub origin: SurfaceId,
    /// The clicked triple
    pub selection: Selection,
}

impl SelectionEvent {
    /// Create an event from the callback arguments.
    pub fn new(origin: SurfaceId, text: impl Into<String>, page: u32, bbox: BBox) -> Self {
        Self {
            origin,
            selection: Selection::new(text, page, bbox),
        }
    }
}

/// Sending half of the selection channel, handed to each surface.
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: Sender<SelectionEvent>,
}

impl EventSink {
    /// Report a click. Returns `false` if the owner is gone.
    pub fn emit(&self, event: SelectionEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Create the single upward selection channel.
pub fn channel() -> (EventSink, Receiver<SelectionEvent>) {
    let (sender, receiver) = crossbeam_channel::unbounded();
    (EventSink { sender }, receiver)
}
