//! Fragment stream parsing: heading rules, classification, and document assembly.

mod builder;
mod classifier;
mod options;

pub use builder::{build, DocumentBuilder};
pub use classifier::{classify, Classifier};
pub use options::{
    BuildOptions, ErrorMode, HeadingRule, HeadingRules, NUMBERED_TITLE_PATTERN,
};
