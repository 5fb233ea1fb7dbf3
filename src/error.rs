//! Error types for sanitization passes

use thiserror::Error;

/// Result type for sanitizer operations.
pub type Result<T> = std::result::Result<T, SanitizeError>;

/// Errors that can occur while parsing, cleaning or rendering a document.
///
/// Whitelist misses (unknown tags, attributes, style properties, class tokens)
/// are routine outcomes and never surface here.
#[derive(Error, Debug)]
pub enum SanitizeError {
    /// The markup could not be turned into a document tree
    #[error("parse error: {0}")]
    Parse(String),

    /// A detach or replace failed because the parent/child links disagree.
    /// This is a contract violation of the tree, not bad input.
    #[error("structural invariant violated: {0}")]
    Structure(String),

    /// The tree is nested deeper than the policy allows
    #[error("nesting depth {depth} exceeds maximum allowed depth {max}")]
    DepthLimit { depth: usize, max: usize },

    /// A value-filter pattern failed to compile
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Writing the serialized tree failed
    #[error("serialization error: {0}")]
    Serialize(#[from] std::io::Error),
}

impl SanitizeError {
    /// Get numeric error code for embedding callers
    pub fn code(&self) -> u32 {
        match self {
            SanitizeError::Parse(_) => 1,
            SanitizeError::Structure(_) => 2,
            SanitizeError::DepthLimit { .. } => 3,
            SanitizeError::Pattern(_) => 4,
            SanitizeError::Serialize(_) => 5,
        }
    }

    /// Whether the error signals a broken tree rather than a property of the input
    pub fn is_fatal(&self) -> bool {
        matches!(self, SanitizeError::Structure(_))
    }
}
