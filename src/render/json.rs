//! JSON rendering for transcripts.

use crate::error::{Error, Result};
use crate::model::Document;

use super::RenderOptions;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert the selected pages of a document to JSON.
pub fn to_json_with_options(
    doc: &Document,
    options: &RenderOptions,
    format: JsonFormat,
) -> Result<String> {
    let selected = Document {
        pages: super::selected_pages(doc, options).cloned().collect(),
    };
    to_json(&selected, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fragment;
    use crate::parser::build;

    fn doc() -> Document {
        build(&[
            Fragment::new("Chapter 1 Intro", 0, [0.0, 0.0, 10.0, 1.0]),
            Fragment::new("Body", 2, [0.0, 0.0, 10.0, 1.0]),
        ])
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&doc(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"heading\""));
        assert!(json.contains("Chapter 1 Intro"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&doc(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc());
    }

    #[test]
    fn test_to_json_selected_pages() {
        let options = RenderOptions::new().with_page_list(vec![3]);
        let json = to_json_with_options(&doc(), &options, JsonFormat::Compact).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back.page_count(), 1);
        assert_eq!(back.pages[0].page, 2);
    }
}
