//! The extraction service's JSON response.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::Fragment;
use crate::parser::ErrorMode;

/// One fragment as sent over the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireFragment {
    /// Fragment text
    pub text: String,
    /// Bounding box; must hold exactly four numbers
    pub bbox: Vec<f64>,
    /// Page index; negative values are malformed
    pub page: i64,
}

/// The response object `{ "pages": [...], "error": string | null }`.
///
/// Service-level failures may instead arrive as `{ "detail": string }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractResponse {
    /// Fragments of the whole document, in extraction order
    #[serde(default)]
    pub pages: Vec<WireFragment>,
    /// Failure message, if extraction failed
    #[serde(default)]
    pub error: Option<String>,
    /// Failure message in the service's error envelope
    #[serde(default)]
    pub detail: Option<String>,
}

impl ExtractResponse {
    /// The failure message carried by the response, if any.
    pub fn failure(&self) -> Option<&str> {
        self.error.as_deref().or(self.detail.as_deref())
    }

    /// Convert wire records into fragments.
    ///
    /// Strict mode rejects the first malformed record; lenient mode skips
    /// malformed records with a warning.
    pub fn into_fragments(self, mode: ErrorMode) -> Result<Vec<Fragment>> {
        if let Some(message) = self.failure() {
            return Err(Error::Source(message.to_string()));
        }

        let mut fragments = Vec::with_capacity(self.pages.len());
        for (index, record) in self.pages.into_iter().enumerate() {
            match convert(record) {
                Ok(fragment) => fragments.push(fragment),
                Err(reason) => match mode {
                    ErrorMode::Strict => {
                        return Err(Error::InvalidFragment(format!(
                            "record {}: {}",
                            index, reason
                        )));
                    }
                    ErrorMode::Lenient => {
                        log::warn!("Skipping fragment record {}: {}", index, reason);
                    }
                },
            }
        }
        Ok(fragments)
    }
}

fn convert(record: WireFragment) -> std::result::Result<Fragment, String> {
    let page = u32::try_from(record.page)
        .map_err(|_| format!("page {} is out of range", record.page))?;
    let bbox: [f64; 4] = record
        .bbox
        .as_slice()
        .try_into()
        .map_err(|_| format!("bbox has {} components, expected 4", record.bbox.len()))?;
    Ok(Fragment::new(record.text, page, bbox))
}

/// Decode a response body into fragments.
pub fn decode_response(body: &str, mode: ErrorMode) -> Result<Vec<Fragment>> {
    let response: ExtractResponse = serde_json::from_str(body)?;
    response.into_fragments(mode)
}
