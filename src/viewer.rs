//! The owner that wires both surfaces to one selection.
//!
//! ```no_run
//! use pdfscript::{build, Fragment, SurfaceId, Viewer};
//! use pdfscript::sync::ScrollContainer;
//!
//! let doc = build(&[Fragment::new("Chapter 1 Intro", 0, [0.0, 0.0, 100.0, 12.0])]);
//! let mut viewer = Viewer::new(doc);
//! let mut transcript_scroll = ScrollContainer::new(400.0, 600.0, 0.0);
//!
//! viewer.render_pdf();
//! viewer.click_pdf(0, 10.0, 5.0);
//! viewer.pump_events();
//!
//! let revision = viewer.render_transcript().revision;
//! viewer.layout_complete(SurfaceId::Transcript, revision, &mut transcript_scroll);
//! ```

use crossbeam_channel::Receiver;

use crate::model::Document;
use crate::render::{OverlayLayout, PdfOverlay, RenderOptions, TranscriptLayout, TranscriptView};
use crate::select::{
    channel, EventSink, HighlightCoordinator, Selection, SelectionEvent, SelectionSnapshot,
    SurfaceId,
};
use crate::sync::{ScrollOutcome, ScrollSurface, ScrollSynchronizer, SyncOptions};

/// Coordinates the document, the selection, and both surfaces.
///
/// Surfaces never mutate the selection; they emit events on the channel and
/// the viewer applies them in [`pump_events`](Viewer::pump_events). Each
/// applied click schedules a scroll on the surface that did not originate it,
/// which runs when that surface reports [`layout_complete`](Viewer::layout_complete).
pub struct Viewer {
    document: Document,
    options: RenderOptions,
    coordinator: HighlightCoordinator,
    sink: EventSink,
    events: Receiver<SelectionEvent>,
    overlay: PdfOverlay,
    transcript: TranscriptView,
    pdf_sync: ScrollSynchronizer,
    transcript_sync: ScrollSynchronizer,
}

impl Viewer {
    /// Create a viewer with default options.
    pub fn new(document: Document) -> Self {
        Self::with_options(document, RenderOptions::default(), SyncOptions::default())
    }

    /// Create a viewer with custom render and sync options.
    pub fn with_options(
        document: Document,
        options: RenderOptions,
        sync_options: SyncOptions,
    ) -> Self {
        let (sink, events) = channel();
        let overlay = PdfOverlay::new(&document, sink.clone());
        let transcript = TranscriptView::new(sink.clone());

        Self {
            document,
            options,
            coordinator: HighlightCoordinator::with_tolerance(sync_options.tolerance),
            sink,
            events,
            overlay,
            transcript,
            pdf_sync: ScrollSynchronizer::new(SurfaceId::Pdf, sync_options),
            transcript_sync: ScrollSynchronizer::new(SurfaceId::Transcript, sync_options),
        }
    }

    /// The document being viewed.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Replace the document, dropping the selection.
    pub fn set_document(&mut self, document: Document) {
        self.coordinator.clear();
        self.overlay = PdfOverlay::new(&document, self.sink.clone());
        self.transcript = TranscriptView::new(self.sink.clone());
        self.document = document;
        // Events from the old surfaces refer to the old document.
        let stale = self.events.try_iter().count();
        if stale > 0 {
            log::debug!("Discarded {} pending events from the previous document", stale);
        }
    }

    /// Render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The selection owner.
    pub fn coordinator(&self) -> &HighlightCoordinator {
        &self.coordinator
    }

    /// Current selection.
    pub fn selection(&self) -> Option<&Selection> {
        self.coordinator.current()
    }

    /// Snapshot of the selection for a render pass.
    pub fn snapshot(&self) -> SelectionSnapshot {
        self.coordinator.snapshot()
    }

    /// A sender for selection events, for surfaces hosted elsewhere.
    pub fn sink(&self) -> EventSink {
        self.sink.clone()
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.coordinator.clear();
    }

    /// Apply every pending selection event. Returns how many were applied.
    pub fn pump_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, event: SelectionEvent) {
        let target = event.origin.other();
        let selection = self.coordinator.apply(event.selection);
        log::debug!(
            "Selected {:?} on page {} from {:?}",
            selection.text,
            selection.page,
            event.origin
        );
        let revision = self.coordinator.revision();
        self.synchronizer_mut(target).schedule(revision);
    }

    /// Render the PDF overlay from the current selection.
    pub fn render_pdf(&mut self) -> &OverlayLayout {
        let snapshot = self.coordinator.snapshot();
        self.overlay.render(&snapshot, &self.options)
    }

    /// Render the transcript from the current selection.
    pub fn render_transcript(&mut self) -> &TranscriptLayout {
        let snapshot = self.coordinator.snapshot();
        self.transcript
            .render(&self.document, &snapshot, &self.options)
    }

    /// Forward a click on the PDF overlay (page-local pixels).
    pub fn click_pdf(&self, page: u32, x: f32, y: f32) -> Option<Selection> {
        self.overlay.click(page, x, y)
    }

    /// Forward a click on the transcript (content coordinates).
    pub fn click_transcript(&self, x: f32, y: f32) -> Option<Selection> {
        self.transcript.click(x, y)
    }

    /// The PDF overlay surface.
    pub fn overlay(&self) -> &PdfOverlay {
        &self.overlay
    }

    /// The transcript surface.
    pub fn transcript(&self) -> &TranscriptView {
        &self.transcript
    }

    /// Signal that `surface` finished laying out selection `revision`.
    ///
    /// Runs the surface's pending scroll, if any, against its scroll container.
    pub fn layout_complete<S>(
        &mut self,
        surface: SurfaceId,
        revision: u64,
        scroller: &mut S,
    ) -> ScrollOutcome
    where
        S: ScrollSurface + ?Sized,
    {
        let snapshot = self.coordinator.snapshot();
        match surface {
            SurfaceId::Pdf => {
                self.pdf_sync
                    .on_layout(revision, &snapshot, self.overlay.registry(), scroller)
            }
            SurfaceId::Transcript => self.transcript_sync.on_layout(
                revision,
                &snapshot,
                self.transcript.registry(),
                scroller,
            ),
        }
    }

    /// Re-render a surface and signal its layout in one step.
    pub fn refresh<S>(&mut self, surface: SurfaceId, scroller: &mut S) -> ScrollOutcome
    where
        S: ScrollSurface + ?Sized,
    {
        let revision = match surface {
            SurfaceId::Pdf => self.render_pdf().revision,
            SurfaceId::Transcript => self.render_transcript().revision,
        };
        self.layout_complete(surface, revision, scroller)
    }

    /// Check if a surface has a scroll waiting for layout.
    pub fn scroll_pending(&self, surface: SurfaceId) -> bool {
        match surface {
            SurfaceId::Pdf => self.pdf_sync.is_pending(),
            SurfaceId::Transcript => self.transcript_sync.is_pending(),
        }
    }

    fn synchronizer_mut(&mut self, surface: SurfaceId) -> &mut ScrollSynchronizer {
        match surface {
            SurfaceId::Pdf => &mut self.pdf_sync,
            SurfaceId::Transcript => &mut self.transcript_sync,
        }
    }
}
