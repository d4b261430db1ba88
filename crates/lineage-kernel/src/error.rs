//! Error types for Lineage kernel operations.

use crate::family::PersonId;

/// Errors surfaced to the caller of the kernel.
///
/// Configuration and resolution errors abort a request before (or instead
/// of) producing a labeling. Partial data such as an unresolvable spouse is
/// never reported here; it shows up as a synthetic entry in the result.
#[derive(Debug, thiserror::Error)]
pub enum LineageError {
    /// No style is registered under this identifier.
    #[error("unknown numbering style: {0}")]
    UnknownStyle(String),

    /// The style does not declare a parameter with this key.
    #[error("invalid parameter name: {key} (style `{style}`)")]
    InvalidParameterName { style: String, key: String },

    /// A raw value failed validation against its descriptor.
    #[error("invalid value for parameter `{key}`: {reason}")]
    InvalidParameterValue { key: String, reason: String },

    /// A descriptor declares a validation pattern that does not compile.
    #[error("invalid validation pattern for parameter `{key}`: {reason}")]
    InvalidPattern { key: String, reason: String },

    /// The style source location cannot be used.
    #[error("style source error: {0}")]
    Source(String),

    /// The external store failed to resolve a referenced entity.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A style could not render a label.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// The descendant walk reached a person already on the current line.
    #[error("cycle detected: {0} is their own ancestor")]
    Cycle(PersonId),
}

/// Failures of the external family store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key does not identify an individual.
    #[error("individual not found: {0}")]
    IndividualNotFound(String),

    /// The key does not identify a family.
    #[error("family not found: {0}")]
    FamilyNotFound(String),
}

/// Programmer errors inside a style implementation.
///
/// A numbering system is only worth its correctness, so a style that is
/// asked for something it cannot render fails instead of guessing.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// The ordinal cannot be rendered by this style.
    #[error("{style}: cannot render ordinal {ordinal}")]
    OrdinalOutOfRange { style: &'static str, ordinal: u32 },

    /// A non-root label was requested without a parent label.
    #[error("{style}: missing parent label")]
    MissingParentLabel { style: &'static str },

    /// The style declares a parameter it has no setter for.
    #[error("{style}: no setter for parameter `{key}`")]
    NoSetter { style: &'static str, key: String },

    /// A validated value of the wrong kind reached a typed setter.
    #[error("{style}: parameter `{key}` expects {expected}")]
    KindMismatch {
        style: &'static str,
        key: String,
        expected: &'static str,
    },
}
