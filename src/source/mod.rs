//! Upstream fragment sources.
//!
//! A source delivers the whole document's fragments at once. Its only
//! failure is "document unreachable or unparsable", reported as
//! [`Error::Source`](crate::Error::Source) with one human-readable message.

mod file;
mod wire;

pub use file::JsonFileSource;
pub use wire::{decode_response, ExtractResponse, WireFragment};

use crate::error::Result;
use crate::model::Fragment;

/// Something that can produce a document's fragments.
pub trait FragmentSource {
    /// Fetch every fragment of the document at `locator`.
    fn fetch(&self, locator: &str) -> Result<Vec<Fragment>>;
}
