//! Plain text rendering for transcripts.

use crate::error::Result;
use crate::model::Document;

use super::RenderOptions;

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let blocks: Vec<String> = super::selected_pages(doc, options)
        .map(|section| {
            let text = section.plain_text();
            if options.show_page_labels {
                format!("Page {}\n\n{}", section.label(), text)
            } else {
                text
            }
        })
        .collect();

    Ok(blocks.join("\n\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fragment;
    use crate::parser::build;

    #[test]
    fn test_to_text() {
        let doc = build(&[
            Fragment::new("1.1 Scope", 0, [0.0; 4]),
            Fragment::new("Hello, world!", 0, [0.0, 1.0, 1.0, 2.0]),
            Fragment::new("Second page.", 1, [0.0; 4]),
        ]);

        let result = to_text(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(
            result,
            "Page 1\n\n1.1 Scope\n\nHello, world!\n\nPage 2\n\nSecond page."
        );

        let options = RenderOptions::default()
            .with_page_labels(false)
            .with_page_range(1..=1);
        assert_eq!(
            to_text(&doc, &options).unwrap(),
            "1.1 Scope\n\nHello, world!"
        );
    }
}
