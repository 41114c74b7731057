//! Error types for the rich text parser.
//!
//! Malformed markup never produces an error: unknown or broken tags are left
//! in the output as literal text. The only fallible surface is converting a
//! raw name into a [`Tag`](crate::Tag).

use thiserror::Error;

/// Errors produced by the tag catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// The name is not present in the tag catalog.
    #[error("unknown tag: {0}")]
    UnknownTag(String),
}
