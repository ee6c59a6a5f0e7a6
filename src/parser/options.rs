//! Build options and heading rules.

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::HeadingLevel;

/// Options for building a document from fragments.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Error handling mode for fragment records
    pub error_mode: ErrorMode,

    /// Whether to classify pages on the rayon pool
    pub parallel: bool,

    /// Ordered heading rules
    pub heading_rules: HeadingRules,
}

impl BuildOptions {
    /// Create new build options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip invalid records).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Replace the heading rules.
    pub fn with_heading_rules(mut self, rules: HeadingRules) -> Self {
        self.heading_rules = rules;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            parallel: true,
            heading_rules: HeadingRules::default(),
        }
    }
}

/// Error handling mode for malformed fragment records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any invalid record
    #[default]
    Strict,
    /// Skip invalid records and continue
    Lenient,
}

/// One heading pattern and the level it assigns.
#[derive(Debug, Clone)]
pub struct HeadingRule {
    /// Short rule name, used in logs
    pub name: String,
    /// Level assigned on match
    pub level: HeadingLevel,
    pattern: Regex,
}

impl HeadingRule {
    /// Create a rule from a regular expression.
    pub fn new(name: impl Into<String>, level: HeadingLevel, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::Other(format!("Invalid heading pattern: {}", e)))?;
        Ok(Self {
            name: name.into(),
            level,
            pattern,
        })
    }

    /// Check if the text matches this rule.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// The rule's pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Heading rules, tested in table order; the first match wins.
///
/// | priority | rule         | pattern                      | level |
/// |----------|--------------|------------------------------|-------|
/// | 1        | `chapter`    | `Chapter N…`                 | 1     |
/// | 2        | `section`    | `D.D <Capital>…`             | 2     |
/// | 3        | `subsection` | `D.D.D <Capital>…`           | 3     |
///
/// The built-in rows always come first. Extra rules can be appended with
/// [`HeadingRules::with_rule`] and only apply to text none of the built-ins
/// recognize.
#[derive(Debug, Clone)]
pub struct HeadingRules {
    rules: Vec<HeadingRule>,
}

const CHAPTER_PATTERN: &str = r"^Chapter\s+\d+";
const SECTION_PATTERN: &str = r"^\d+\.\d+\s+[A-Z]";
const SUBSECTION_PATTERN: &str = r"^\d+\.\d+\.\d+\s+[A-Z]";

/// Numbered titles of any depth, as the first transcript panel detected them.
pub const NUMBERED_TITLE_PATTERN: &str = r"^\d+(\.\d+)*\s+[A-Z]";

impl HeadingRules {
    /// The built-in chapter/section/subsection table.
    pub fn builtin() -> Self {
        let rules = vec![
            HeadingRule::new("chapter", HeadingLevel::Chapter, CHAPTER_PATTERN),
            HeadingRule::new("section", HeadingLevel::Section, SECTION_PATTERN),
            HeadingRule::new("subsection", HeadingLevel::Subsection, SUBSECTION_PATTERN),
        ]
        .into_iter()
        .collect::<Result<Vec<_>>>()
        .expect("built-in heading patterns are valid");
        Self { rules }
    }

    /// Append a lower-priority rule.
    pub fn with_rule(
        mut self,
        name: impl Into<String>,
        level: HeadingLevel,
        pattern: &str,
    ) -> Result<Self> {
        self.rules.push(HeadingRule::new(name, level, pattern)?);
        Ok(self)
    }

    /// Find the first rule matching the text.
    pub fn find(&self, text: &str) -> Option<&HeadingRule> {
        self.rules.iter().find(|rule| rule.is_match(text))
    }

    /// Heading level for the text, or `None` for body text.
    pub fn classify(&self, text: &str) -> Option<HeadingLevel> {
        self.find(text).map(|rule| rule.level)
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[HeadingRule] {
        &self.rules
    }
}

impl Default for HeadingRules {
    fn default() -> Self {
        Self::builtin()
    }
}
