//! Entity augmentation
//!
//! The [`AugmentationEngine`] resolves a cached [`TypeDescriptor`] for the
//! entity's type, builds a fresh instance, copies the original's fields into
//! it with the [`FieldCopier`], and attaches the assembled links.

pub mod cache;
pub mod copier;
pub mod engine;

pub use cache::{LINKS_FIELD, TypeCache, TypeDescriptor};
pub use copier::FieldCopier;
pub use engine::{AugmentationEngine, Augmented};
