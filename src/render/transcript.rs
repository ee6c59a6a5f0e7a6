//! Reflowed transcript panel.
//!
//! The document is laid out as a column of page blocks: an optional
//! "Page N" label, then each heading and paragraph. Every text fragment is a
//! clickable span. Geometry uses a fixed character grid, which is enough for
//! hit testing and scroll targeting without a font engine.

use crate::model::{BreakKind, Document, Fragment, HeadingLevel, Inline, Rect, StructuralNode};
use crate::select::{EventSink, Selection, SelectionEvent, SelectionSnapshot, SurfaceId};
use crate::sync::ElementRegistry;

use super::RenderOptions;

/// A clickable text span.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSpan {
    /// Fragment shown by this span
    pub fragment: Fragment,
    /// Bounds in the transcript's content coordinates
    pub rect: Rect,
    /// One rectangle per line the span occupies; `rect` is their union
    pub lines: Vec<Rect>,
    /// Whether the span matches the selection
    pub highlighted: bool,
}

/// A block of the laid-out transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptBlock {
    /// "Page N" label opening a page
    PageLabel {
        /// Page index (0-indexed)
        page: u32,
        /// Label text
        text: String,
        /// Label bounds
        rect: Rect,
    },
    /// A heading line
    Heading {
        /// Heading level
        level: HeadingLevel,
        /// The heading span
        span: TranscriptSpan,
    },
    /// A paragraph: spans in order, breaks already applied to the layout
    Paragraph {
        /// Text spans
        spans: Vec<TranscriptSpan>,
    },
}

impl TranscriptBlock {
    /// Spans held by the block.
    pub fn spans(&self) -> &[TranscriptSpan] {
        match self {
            TranscriptBlock::PageLabel { .. } => &[],
            TranscriptBlock::Heading { span, .. } => std::slice::from_ref(span),
            TranscriptBlock::Paragraph { spans } => spans,
        }
    }
}

/// One render pass of the transcript.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranscriptLayout {
    /// Blocks in reading order
    pub blocks: Vec<TranscriptBlock>,
    /// Total scrollable height
    pub content_height: f32,
    /// Selection revision this pass rendered
    pub revision: u64,
}

impl TranscriptLayout {
    /// Every span, in reading order.
    pub fn spans(&self) -> impl Iterator<Item = &TranscriptSpan> {
        self.blocks.iter().flat_map(|block| block.spans().iter())
    }

    /// The highlighted span, if the selection is in view.
    pub fn highlighted(&self) -> Option<&TranscriptSpan> {
        self.spans().find(|span| span.highlighted)
    }

    /// Find the span under a content position.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&TranscriptSpan> {
        self.spans().find(|span| span.contains(x, y))
    }
}

impl TranscriptSpan {
    /// Check if a point falls on one of the span's lines.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.lines.iter().any(|line| line.contains(x, y))
    }
}

/// Character-grid cursor.
struct Cursor<'a> {
    options: &'a RenderOptions,
    col: usize,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            col: 0,
            y: 0.0,
        }
    }

    fn newline(&mut self) {
        self.col = 0;
        self.y += self.options.line_height;
    }

    /// Place `len` characters and return the bounds of each line they occupy.
    fn place(&mut self, len: usize) -> Vec<Rect> {
        let per_line = self.options.chars_per_line.max(1);
        let cw = self.options.char_width;
        let lh = self.options.line_height;

        if self.col > 0 && self.col + len > per_line {
            self.newline();
        }

        if self.col + len <= per_line {
            let rect = Rect::new(self.col as f32 * cw, self.y, len as f32 * cw, lh);
            self.col += len;
            return vec![rect];
        }

        // Longer than a line: full lines from the left margin, then the rest.
        let mut lines = Vec::with_capacity(len.div_ceil(per_line));
        let mut remaining = len;
        while remaining > per_line {
            lines.push(Rect::new(0.0, self.y, per_line as f32 * cw, lh));
            self.y += lh;
            remaining -= per_line;
        }
        lines.push(Rect::new(0.0, self.y, remaining as f32 * cw, lh));
        if remaining == per_line {
            self.newline();
        } else {
            self.col = remaining;
        }
        lines
    }

    /// Close the current block.
    fn end_block(&mut self) {
        if self.col > 0 {
            self.newline();
        }
        self.y += self.options.block_gap;
    }
}

/// The transcript surface.
pub struct TranscriptView {
    sink: EventSink,
    registry: ElementRegistry,
    layout: TranscriptLayout,
}

impl TranscriptView {
    /// Create a transcript view reporting clicks to `sink`.
    pub fn new(sink: EventSink) -> Self {
        Self {
            sink,
            registry: ElementRegistry::new(),
            layout: TranscriptLayout::default(),
        }
    }

    /// Lay out the document with highlight flags from `snapshot`.
    pub fn render(
        &mut self,
        doc: &Document,
        snapshot: &SelectionSnapshot,
        options: &RenderOptions,
    ) -> &TranscriptLayout {
        self.registry.clear();
        let mut cursor = Cursor::new(options);
        let mut blocks = Vec::new();

        for (i, section) in super::selected_pages(doc, options).enumerate() {
            if i > 0 {
                cursor.y += options.page_gap;
            }

            if options.show_page_labels {
                let text = format!("Page {}", section.label());
                let rect = union(&cursor.place(text.chars().count()));
                cursor.end_block();
                blocks.push(TranscriptBlock::PageLabel {
                    page: section.page,
                    text,
                    rect,
                });
            }

            for node in &section.nodes {
                match node {
                    StructuralNode::Heading { level, fragment } => {
                        let span = self.place_span(&mut cursor, fragment, snapshot);
                        cursor.end_block();
                        blocks.push(TranscriptBlock::Heading {
                            level: *level,
                            span,
                        });
                    }
                    StructuralNode::Paragraph(p) => {
                        let mut spans = Vec::new();
                        for item in &p.content {
                            match item {
                                Inline::Text(fragment) => {
                                    spans.push(self.place_span(&mut cursor, fragment, snapshot));
                                }
                                Inline::Break {
                                    kind: BreakKind::Line,
                                    ..
                                } => cursor.newline(),
                                Inline::Break {
                                    kind: BreakKind::Paragraph,
                                    ..
                                } => {
                                    cursor.newline();
                                    cursor.newline();
                                }
                            }
                        }
                        cursor.end_block();
                        blocks.push(TranscriptBlock::Paragraph { spans });
                    }
                }
            }
        }

        self.layout = TranscriptLayout {
            blocks,
            content_height: cursor.y,
            revision: snapshot.revision,
        };
        &self.layout
    }

    fn place_span(
        &mut self,
        cursor: &mut Cursor<'_>,
        fragment: &Fragment,
        snapshot: &SelectionSnapshot,
    ) -> TranscriptSpan {
        let lines = cursor.place(fragment.text.chars().count());
        let rect = union(&lines);
        self.registry.register(fragment.key(), rect);
        TranscriptSpan {
            fragment: fragment.clone(),
            rect,
            lines,
            highlighted: snapshot.is_highlighted(fragment),
        }
    }

    /// Handle a click at a content position.
    pub fn click(&self, x: f32, y: f32) -> Option<Selection> {
        let span = self.layout.hit_test(x, y)?;
        let fragment = &span.fragment;
        let event = SelectionEvent::new(
            SurfaceId::Transcript,
            fragment.text.clone(),
            fragment.page,
            fragment.bbox,
        );
        let selection = event.selection.clone();
        if !self.sink.emit(event) {
            log::warn!("Selection channel closed; transcript click dropped");
        }
        Some(selection)
    }

    /// The most recent render pass.
    pub fn layout(&self) -> &TranscriptLayout {
        &self.layout
    }

    /// Elements registered by the most recent render pass.
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }
}

/// Smallest rectangle covering every line.
fn union(lines: &[Rect]) -> Rect {
    let Some(first) = lines.first() else {
        return Rect::default();
    };
    let (mut left, mut top, mut right, mut bottom) =
        (first.x, first.y, first.right(), first.bottom());
    for line in &lines[1..] {
        left = left.min(line.x);
        top = top.min(line.y);
        right = right.max(line.right());
        bottom = bottom.max(line.bottom());
    }
    Rect::new(left, top, right - left, bottom - top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::build;
    use crate::select::{channel, HighlightCoordinator};

    fn options() -> RenderOptions {
        RenderOptions::new()
            .with_chars_per_line(10)
            .with_line_height(10.0)
            .with_block_gap(0.0)
            .with_page_gap(0.0)
    }

    #[test]
    fn test_layout_blocks() {
        let doc = build(&[
            Fragment::new("1.1 Heading", 0, [0.0, 0.0, 1.0, 1.0]),
            Fragment::new("Hello", 0, [0.0, 1.0, 1.0, 2.0]),
            Fragment::new("\n", 0, [0.0, 2.0, 0.0, 2.0]),
            Fragment::new("world", 0, [0.0, 2.0, 1.0, 3.0]),
        ]);
        let (sink, _events) = channel();
        let mut view = TranscriptView::new(sink);
        let layout = view.render(&doc, &SelectionSnapshot::empty(), &options());

        assert_eq!(layout.blocks.len(), 3);
        assert!(matches!(layout.blocks[0], TranscriptBlock::PageLabel { .. }));

        let spans: Vec<_> = layout.spans().collect();
        // "1.1 Heading" is 11 chars on a 10-char line.
        assert_eq!(spans[0].rect, Rect::new(0.0, 10.0, 80.0, 20.0));
        assert_eq!(spans[1].rect, Rect::new(0.0, 30.0, 40.0, 10.0));
        // The line break moves "world" to the next line.
        assert_eq!(spans[2].rect, Rect::new(0.0, 40.0, 40.0, 10.0));
        assert_eq!(layout.content_height, 50.0);
        assert_eq!(view.registry().len(), 3);
    }

    #[test]
    fn test_spans_share_a_line_until_full() {
        let doc = build(&[
            Fragment::new("abc", 0, [0.0, 0.0, 1.0, 1.0]),
            Fragment::new("defg", 0, [1.0, 0.0, 2.0, 1.0]),
            Fragment::new("hijk", 0, [2.0, 0.0, 3.0, 1.0]),
        ]);
        let (sink, _events) = channel();
        let mut view = TranscriptView::new(sink);
        let options = options().with_page_labels(false);
        let layout = view.render(&doc, &SelectionSnapshot::empty(), &options);

        let rects: Vec<_> = layout.spans().map(|s| s.rect).collect();
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 24.0, 10.0));
        assert_eq!(rects[1], Rect::new(24.0, 0.0, 32.0, 10.0));
        assert_eq!(rects[2], Rect::new(0.0, 10.0, 32.0, 10.0));
    }

    #[test]
    fn test_highlight_and_click() {
        let doc = build(&[
            Fragment::new("alpha", 0, [0.0, 0.0, 1.0, 1.0]),
            Fragment::new("beta", 1, [0.0, 0.0, 1.0, 1.0]),
        ]);
        let (sink, events) = channel();
        let mut view = TranscriptView::new(sink);
        let mut coordinator = HighlightCoordinator::new();
        coordinator.apply(Selection::new("beta", 1, [0.0, 0.0, 1.0, 1.0]));

        let options = options().with_page_labels(false);
        let layout = view.render(&doc, &coordinator.snapshot(), &options);
        assert_eq!(layout.revision, 1);
        let highlighted = layout.highlighted().unwrap();
        assert_eq!(highlighted.fragment.text, "beta");

        let selection = view.click(2.0, 2.0).unwrap();
        assert_eq!(selection.text, "alpha");
        let event = events.try_recv().unwrap();
        assert_eq!(event.origin, SurfaceId::Transcript);
        assert!(view.click(500.0, 500.0).is_none());
    }

    #[test]
    fn test_click_after_wrapped_span() {
        let doc = build(&[
            Fragment::new("abcdefghijklm", 0, [0.0, 0.0, 1.0, 1.0]),
            Fragment::new("xyz", 0, [1.0, 0.0, 2.0, 1.0]),
        ]);
        let (sink, _events) = channel();
        let mut view = TranscriptView::new(sink);
        let options = options().with_page_labels(false);
        let layout = view.render(&doc, &SelectionSnapshot::empty(), &options);

        let spans: Vec<_> = layout.spans().collect();
        assert_eq!(
            spans[0].lines,
            vec![Rect::new(0.0, 0.0, 80.0, 10.0), Rect::new(0.0, 10.0, 24.0, 10.0)]
        );
        assert_eq!(spans[0].rect, Rect::new(0.0, 0.0, 80.0, 20.0));
        // "xyz" continues on the wrapped span's last line.
        assert_eq!(spans[1].rect, Rect::new(24.0, 10.0, 24.0, 10.0));

        assert_eq!(view.click(36.0, 15.0).unwrap().text, "xyz");
        assert_eq!(view.click(10.0, 15.0).unwrap().text, "abcdefghijklm");
        assert_eq!(view.click(60.0, 5.0).unwrap().text, "abcdefghijklm");
        assert!(view.click(60.0, 15.0).is_none());
    }

    #[test]
    fn test_span_filling_whole_lines() {
        let doc = build(&[
            Fragment::new("abcdefghijklmnopqrst", 0, [0.0, 0.0, 1.0, 1.0]),
            Fragment::new("xyz", 0, [1.0, 0.0, 2.0, 1.0]),
        ]);
        let (sink, _events) = channel();
        let mut view = TranscriptView::new(sink);
        let options = options().with_page_labels(false);
        let layout = view.render(&doc, &SelectionSnapshot::empty(), &options);

        let spans: Vec<_> = layout.spans().collect();
        assert_eq!(spans[0].lines.len(), 2);
        assert_eq!(spans[0].rect, Rect::new(0.0, 0.0, 80.0, 20.0));
        assert_eq!(spans[1].rect, Rect::new(0.0, 20.0, 24.0, 10.0));
    }
}
