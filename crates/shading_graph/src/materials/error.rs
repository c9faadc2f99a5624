//! Material error types

use thiserror::Error;

use super::input::{InputKind, InputKinds};

/// Material input errors
///
/// Every variant is a broken call-site contract. Nothing here is transient,
/// so callers fix the call instead of retrying it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterialError {
    /// The named input was never declared on this material
    #[error("Unknown input: {name}")]
    UnknownInput {
        /// Input name used by the caller
        name: String,
    },

    /// The value kind is not accepted by the named input
    #[error("Input {name} does not accept {} (supported: {supported})", display_kind(.kind))]
    UnsupportedKind {
        /// Input name used by the caller
        name: String,
        /// Kind of the rejected value, `None` for an undefined value
        kind: Option<InputKind>,
        /// Kinds the input was declared with
        supported: InputKinds,
    },

    /// Binding the material reference would make a material reach itself
    #[error("Binding input {name} would create a material reference cycle")]
    CycleDetected {
        /// Input name used by the caller
        name: String,
    },

    /// The handle does not name a live material
    #[error("Invalid material handle")]
    InvalidHandle,
}

fn display_kind(kind: &Option<InputKind>) -> String {
    kind.map_or_else(|| "an undefined value".to_string(), |k| k.to_string())
}

/// Result type for material operations
pub type MaterialResult<T> = Result<T, MaterialError>;
