//! Highlight coordination: the selection, its matching rule, and the event
//! channel through which both surfaces report clicks.

mod coordinator;
mod event;
mod selection;

pub use coordinator::{HighlightCoordinator, SelectionSnapshot, SelectionState};
pub use event::{channel, EventSink, SelectionEvent, SurfaceId};
pub use selection::{matches, select, Selection, DEFAULT_TOLERANCE};
