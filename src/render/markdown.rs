//! Markdown rendering for transcripts.

use crate::error::Result;
use crate::model::{BreakKind, Document, Inline, PageSection, Paragraph, StructuralNode};

use super::RenderOptions;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        for section in super::selected_pages(doc, &self.options) {
            self.render_page(&mut output, section);
        }

        Ok(output.trim().to_string())
    }

    fn render_page(&self, output: &mut String, section: &PageSection) {
        if self.options.show_page_labels {
            output.push_str(&format!("*Page {}*\n\n", section.label()));
        }
        for node in &section.nodes {
            self.render_node(output, node);
        }
    }

    fn render_node(&self, output: &mut String, node: &StructuralNode) {
        match node {
            StructuralNode::Heading { level, fragment } => {
                let prefix = "#".repeat(level.as_u8() as usize);
                output.push_str(&prefix);
                output.push(' ');
                output.push_str(&self.escape(fragment.text.trim()));
                output.push_str("\n\n");
            }
            StructuralNode::Paragraph(p) => self.render_paragraph(output, p),
        }
    }

    fn render_paragraph(&self, output: &mut String, para: &Paragraph) {
        if para.is_empty() {
            return;
        }

        let mut text = String::new();
        for item in &para.content {
            match item {
                Inline::Text(fragment) => text.push_str(&self.escape(&fragment.text)),
                Inline::Break {
                    kind: BreakKind::Line,
                    ..
                } => text.push_str("  \n"),
                Inline::Break {
                    kind: BreakKind::Paragraph,
                    ..
                } => text.push_str("\n\n"),
            }
        }

        output.push_str(text.trim_end());
        output.push_str("\n\n");
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fragment;
    use crate::parser::build;

    fn doc() -> Document {
        build(&[
            Fragment::new("Chapter 2: Motion", 0, [0.0, 0.0, 10.0, 1.0]),
            Fragment::new("2.1 Forces", 0, [0.0, 1.0, 10.0, 2.0]),
            Fragment::new("A push", 0, [0.0, 2.0, 10.0, 3.0]),
            Fragment::new("\n", 0, [0.0, 3.0, 0.0, 3.0]),
            Fragment::new("or a pull.", 0, [0.0, 3.0, 10.0, 4.0]),
            Fragment::new("Second page *text*", 1, [0.0, 0.0, 10.0, 1.0]),
        ])
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
    }

    #[test]
    fn test_render_headings_and_breaks() {
        let result = to_markdown(&doc(), &RenderOptions::new()).unwrap();

        assert!(result.starts_with("*Page 1*"));
        assert!(result.contains("# Chapter 2: Motion\n\n## 2.1 Forces"));
        assert!(result.contains("A push  \nor a pull."));
        assert!(result.contains("*Page 2*"));
        assert!(result.contains("Second page \\*text\\*"));
    }

    #[test]
    fn test_render_page_selection() {
        let options = RenderOptions::new()
            .with_page_list(vec![2])
            .with_page_labels(false)
            .with_escaping(false);
        let result = to_markdown(&doc(), &options).unwrap();
        assert_eq!(result, "Second page *text*");
    }
}
