//! Fragment source backed by saved extraction responses.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Fragment;
use crate::parser::ErrorMode;

use super::{decode_response, FragmentSource};

/// Reads extraction responses saved as JSON files.
///
/// Locators are file paths, resolved against an optional root directory.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    root: Option<PathBuf>,
    mode: ErrorMode,
}

impl JsonFileSource {
    /// Create a source resolving locators as given.
    pub fn new() -> Self {
        Self {
            root: None,
            mode: ErrorMode::Strict,
        }
    }

    /// Resolve relative locators against `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Set the error mode for malformed records.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.mode = mode;
        self
    }

    fn resolve(&self, locator: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(locator),
            None => Path::new(locator).to_path_buf(),
        }
    }
}

impl Default for JsonFileSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentSource for JsonFileSource {
    fn fetch(&self, locator: &str) -> Result<Vec<Fragment>> {
        let path = self.resolve(locator);
        log::debug!("Reading fragments from {}", path.display());

        let body = fs::read_to_string(&path).map_err(|e| {
            Error::Source(format!("Failed to read {}: {}", path.display(), e))
        })?;

        decode_response(&body, self.mode).map_err(|e| match e {
            Error::Json(e) => {
                Error::Source(format!("Failed to parse {}: {}", path.display(), e))
            }
            other => other,
        })
    }
}
