//! Integration tests for cross-surface highlighting and scroll synchronization.

use pdfscript::render::RenderOptions;
use pdfscript::sync::{ScrollContainer, ScrollOutcome, ScrollSurface};
use pdfscript::{build, Document, Fragment, SurfaceId, SyncOptions, Viewer};

/// Ten pages, each with a section heading and a body line near its top.
fn document() -> Document {
    let fragments: Vec<_> = (0..10)
        .flat_map(|page| {
            vec![
                Fragment::new(
                    format!("{}.1 Topic", page + 1),
                    page,
                    [50.0, 50.0, 200.0, 62.0],
                ),
                Fragment::new(
                    format!("Body of page {}", page + 1),
                    page,
                    [50.0, 80.0, 300.0, 92.0],
                ),
            ]
        })
        .collect();
    build(&fragments)
}

fn viewer() -> Viewer {
    let options = RenderOptions::new()
        .with_scale(2.0)
        .with_page_gap(20.0)
        .with_line_height(20.0)
        .with_block_gap(10.0);
    Viewer::with_options(document(), options, SyncOptions::default())
}

fn containers(viewer: &mut Viewer) -> (ScrollContainer, ScrollContainer) {
    let pdf_height = viewer.render_pdf().content_height;
    let transcript_height = viewer.render_transcript().content_height;
    (
        ScrollContainer::new(800.0, 300.0, pdf_height),
        ScrollContainer::new(400.0, 200.0, transcript_height),
    )
}

#[test]
fn test_pdf_click_scrolls_transcript_after_layout() {
    let mut viewer = viewer();
    let (mut pdf, mut transcript) = containers(&mut viewer);

    // Body of page 8: overlay pixels (100..600, 160..184) on page index 7.
    let selection = viewer.click_pdf(7, 120.0, 170.0).unwrap();
    assert_eq!(selection.text, "Body of page 8");
    viewer.pump_events();

    // The transcript has not laid out the new selection yet.
    let stale = viewer.transcript().layout().revision;
    let outcome = viewer.layout_complete(SurfaceId::Transcript, stale, &mut transcript);
    assert_eq!(outcome, ScrollOutcome::Deferred);
    assert_eq!(transcript.scroll_count(), 0);

    let outcome = viewer.refresh(SurfaceId::Transcript, &mut transcript);
    assert!(outcome.scrolled());

    let span = viewer.transcript().layout().highlighted().unwrap();
    assert_eq!(span.fragment.text, "Body of page 8");
    assert!(transcript.viewport().contains_vertically(&span.rect));

    // The originating surface is never scrolled.
    let outcome = viewer.refresh(SurfaceId::Pdf, &mut pdf);
    assert_eq!(outcome, ScrollOutcome::Idle);
    assert_eq!(pdf.scroll_count(), 0);
}

#[test]
fn test_transcript_click_scrolls_pdf() {
    let mut viewer = viewer();
    let (mut pdf, _) = containers(&mut viewer);

    let target = viewer
        .transcript()
        .layout()
        .spans()
        .find(|span| span.fragment.text == "9.1 Topic")
        .map(|span| span.rect)
        .unwrap();
    let selection = viewer
        .click_transcript(target.x + 1.0, target.y + 1.0)
        .unwrap();
    assert_eq!(selection.page, 8);
    viewer.pump_events();

    let outcome = viewer.refresh(SurfaceId::Pdf, &mut pdf);
    assert!(outcome.scrolled());

    let element = viewer
        .overlay()
        .registry()
        .find(&selection, 0.1)
        .unwrap();
    assert!(pdf.viewport().contains_vertically(&element.rect));

    let page = viewer.overlay().layout().page(8).unwrap();
    assert_eq!(page.highlighted().count(), 1);
}

#[test]
fn test_superseded_click_scrolls_to_latest() {
    let mut viewer = viewer();
    let (_, mut transcript) = containers(&mut viewer);

    viewer.click_pdf(2, 120.0, 170.0).unwrap();
    viewer.pump_events();
    let first_revision = viewer.render_transcript().revision;

    // A second click lands before the transcript reports its layout.
    viewer.click_pdf(9, 120.0, 170.0).unwrap();
    viewer.pump_events();

    let outcome = viewer.layout_complete(SurfaceId::Transcript, first_revision, &mut transcript);
    assert_eq!(outcome, ScrollOutcome::Deferred);

    viewer.refresh(SurfaceId::Transcript, &mut transcript);
    let span = viewer.transcript().layout().highlighted().unwrap();
    assert_eq!(span.fragment.text, "Body of page 10");
    assert!(transcript.viewport().contains_vertically(&span.rect));
    assert_eq!(transcript.scroll_count(), 1);
}

#[test]
fn test_visible_target_is_not_scrolled() {
    let mut viewer = viewer();
    let (_, mut transcript) = containers(&mut viewer);

    viewer.click_pdf(0, 120.0, 170.0).unwrap();
    viewer.pump_events();

    let outcome = viewer.refresh(SurfaceId::Transcript, &mut transcript);
    assert!(matches!(outcome, ScrollOutcome::AlreadyVisible(_)));
    assert_eq!(transcript.scroll_top(), 0.0);
}

#[test]
fn test_filtered_page_is_a_logged_no_op() {
    let options = RenderOptions::new().with_page_range(1..=2);
    let mut viewer = Viewer::with_options(document(), options, SyncOptions::default());
    let mut transcript = ScrollContainer::new(400.0, 200.0, 1000.0);

    // A selection arriving from elsewhere for a page the transcript omits.
    let sink = viewer.sink();
    sink.emit(pdfscript::select::SelectionEvent::new(
        SurfaceId::Pdf,
        "Body of page 5",
        4,
        [50.0, 80.0, 300.0, 92.0].into(),
    ));
    viewer.pump_events();

    let outcome = viewer.refresh(SurfaceId::Transcript, &mut transcript);
    assert_eq!(outcome, ScrollOutcome::NotFound);
    assert_eq!(transcript.scroll_count(), 0);
    assert!(viewer.selection().is_some());
}

#[test]
fn test_reclick_scrolls_back() {
    let mut viewer = viewer();
    let (_, mut transcript) = containers(&mut viewer);

    viewer.click_pdf(9, 120.0, 170.0).unwrap();
    viewer.pump_events();
    viewer.refresh(SurfaceId::Transcript, &mut transcript);
    assert_eq!(transcript.scroll_count(), 1);

    // The user scrolls the transcript away, then clicks the same fragment.
    transcript.scroll_to(0.0, pdfscript::ScrollBehavior::Instant);
    viewer.click_pdf(9, 120.0, 170.0).unwrap();
    viewer.pump_events();

    let outcome = viewer.refresh(SurfaceId::Transcript, &mut transcript);
    assert!(outcome.scrolled());
    assert_eq!(
        viewer.selection().map(|s| s.text.as_str()),
        Some("Body of page 10")
    );
}
