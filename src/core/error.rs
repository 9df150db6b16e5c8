//! Typed errors for link augmentation
//!
//! Every failure the engine can hit is surfaced as an [`AugmentError`] so the
//! resource layer can decide on a response policy by matching on the kind
//! rather than inspecting strings.
//!
//! # Error Categories
//!
//! - [`AugmentError`]: what the engine returns to its caller
//! - [`ConstructionError`]: raised by an entity constructor fed placeholder arguments
//! - [`FieldAccessError`]: raised by an entity when a field cannot be read or written
//! - [`LinkError`]: raised when building a malformed link
//!
//! # Example
//!
//! ```rust,ignore
//! match engine.augment(&book, &producer, Verbosity::Minimum) {
//!     Ok(augmented) => serde_json::to_value(&augmented)?,
//!     Err(AugmentError::MissingRelation { attributes }) => {
//!         tracing::warn!(?attributes, "link producer emitted a link without rel");
//!         return Err(internal_error());
//!     }
//!     Err(e) => return Err(internal_error_from(e)),
//! }
//! ```

use crate::core::link::Attributes;
use thiserror::Error;

/// The error returned by every augmentation entry point
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AugmentError {
    /// The entity type declares no constructor the engine may call
    #[error("No usable constructor for type '{type_name}'")]
    NoUsableConstructor { type_name: String },

    /// The selected constructor rejected the placeholder arguments
    #[error("Could not create instance of '{type_name}' via {constructor}: {reason}")]
    ConstructionFailure {
        type_name: String,
        constructor: String,
        reason: ConstructionError,
    },

    /// A field could not be transferred from the original to the new instance
    #[error("Could not copy field '{field}' of '{type_name}': {reason}")]
    CopyFailure {
        type_name: String,
        field: String,
        reason: FieldAccessError,
    },

    /// A non-empty link projection had no `rel` entry while assembling a map
    #[error("Invalid link properties {attributes:?}: link properties require a rel entry")]
    MissingRelation { attributes: Attributes },

    /// The entity declares a field the augmented payload already uses
    #[error("Type '{type_name}' declares reserved field '{field}'")]
    ReservedField { type_name: String, field: String },
}

impl AugmentError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AugmentError::NoUsableConstructor { .. } => "NO_USABLE_CONSTRUCTOR",
            AugmentError::ConstructionFailure { .. } => "CONSTRUCTION_FAILURE",
            AugmentError::CopyFailure { .. } => "COPY_FAILURE",
            AugmentError::MissingRelation { .. } => "MISSING_RELATION",
            AugmentError::ReservedField { .. } => "RESERVED_FIELD",
        }
    }

    /// Whether the same failure will recur for every entity of this type.
    ///
    /// Constructor problems are properties of the type; copy and relation
    /// failures depend on the instance or on the producer output.
    pub fn is_deterministic(&self) -> bool {
        matches!(
            self,
            AugmentError::NoUsableConstructor { .. }
                | AugmentError::ConstructionFailure { .. }
                | AugmentError::ReservedField { .. }
        )
    }
}

/// Errors raised by an entity constructor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// A required argument received the null placeholder
    #[error("argument {index} is null")]
    NullArgument { index: usize },

    /// An argument had the wrong kind, or was missing entirely
    #[error("argument {index} is invalid: {message}")]
    InvalidArgument { index: usize, message: String },

    /// The constructor failed for another reason (including a panic)
    #[error("{0}")]
    Failed(String),
}

/// Errors raised when reading or writing an entity field by name
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldAccessError {
    /// The entity has no field with this name
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// The value cannot be stored in this field
    #[error("field '{field}' expects {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Errors raised when building a link
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinkError {
    /// Links must carry a non-empty relation
    #[error("link relation must not be empty (href: {href})")]
    EmptyRelation { href: String },
}
