//! # This-HATEOAS
//!
//! Hypermedia link augmentation for response entities.
//!
//! Entities do not declare a links field. The engine builds a fresh copy of
//! the entity, copies every field across (including those of a composed base
//! entity), asks a [`LinkProducer`](links::LinkProducer) for the applicable
//! links and attaches them either as a list or as a map keyed by relation.
//! The result serializes with serde like the original, plus `links`.
//!
//! ## Features
//!
//! - **No entity changes**: implement `Entity` with one macro call
//! - **List or map storage**: fixed per engine
//! - **Verbosity levels**: MINIMUM, BASIC, GENERIC, FULL
//! - **Shared type cache**: one descriptor per type, safe under concurrent use
//! - **Typed errors**: every failure surfaces as an `AugmentError`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hateoas::prelude::*;
//!
//! #[derive(Debug, Clone, Serialize)]
//! pub struct Book {
//!     id: i64,
//!     author: String,
//!     title: String,
//! }
//!
//! impl_entity!(Book, "Book", { id: i64, author: String, title: String });
//!
//! let engine = AugmentationEngine::new(StorageMode::Map);
//! let ctx = RequestContext::new("http://localhost/api");
//! let producer = |book: &Book| {
//!     vec![HateoasLink::new("self", LinkTarget::get(ctx.resolve(&format!("library/books/{}", book.id)))).unwrap()]
//! };
//!
//! let augmented = engine.augment(&book, &producer, Verbosity::Minimum)?;
//! let json = serde_json::to_string(&augmented)?;
//! // {"id":1,"author":"...","title":"...","links":{"self":{"href":"...","method":"GET"}}}
//! ```

pub mod augment;
pub mod config;
pub mod core;
pub mod entities;
pub mod links;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        context::{HATEOAS_OPTIONS_HEADER, RequestContext},
        entity::{Constructor, ConstructorArgs, Entity, FieldDescriptor, ParamKind, TypeShape, Visibility},
        error::{AugmentError, ConstructionError, FieldAccessError, LinkError},
        field::{FieldValue, FromFieldValue},
        link::{Attributes, HateoasLink, LinkTarget, ToAttributes},
        verbosity::{LinkOption, Verbosity},
    };

    // === Macros ===
    pub use crate::impl_entity;

    // === Links ===
    pub use crate::links::{
        FixedLinkProducer, LinkAssembler, LinkProducer, LinksPayload, NoLinks, StorageMode,
    };

    // === Augmentation ===
    pub use crate::augment::{AugmentationEngine, Augmented, FieldCopier, TypeCache, TypeDescriptor};

    // === Config ===
    pub use crate::config::HateoasConfig;

    // === External dependencies ===
    pub use serde::{Deserialize, Serialize};
}
