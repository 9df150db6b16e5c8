//! Link production and assembly
//!
//! Producers decide which links apply to an entity; the assembler shapes
//! their output into the payload attached to the augmented entity.

pub mod assembler;
pub mod producer;

pub use assembler::{LinkAssembler, LinksPayload, StorageMode};
pub use producer::{FixedLinkProducer, LinkProducer, NoLinks};
