//! Core module containing fundamental traits and types for the framework

pub mod context;
pub mod entity;
pub mod error;
pub mod field;
pub mod link;
pub mod verbosity;

pub use context::{HATEOAS_OPTIONS_HEADER, RequestContext};
pub use entity::{Constructor, ConstructorArgs, Entity, FieldDescriptor, ParamKind, TypeShape, Visibility};
pub use error::{AugmentError, ConstructionError, FieldAccessError, LinkError};
pub use field::{FieldValue, FromFieldValue};
pub use link::{Attributes, HateoasLink, LinkTarget, ToAttributes};
pub use verbosity::{LinkOption, Verbosity};
