//! The augmentation engine and the augmented entity it returns

use crate::augment::cache::TypeCache;
use crate::augment::copier::FieldCopier;
use crate::config::HateoasConfig;
use crate::core::entity::Entity;
use crate::core::error::AugmentError;
use crate::core::verbosity::Verbosity;
use crate::links::assembler::{LinkAssembler, LinksPayload, StorageMode};
use crate::links::producer::LinkProducer;
use serde::Serialize;
use std::ops::Deref;
use std::sync::Arc;

/// An entity copy carrying a links payload
///
/// Serializes as the entity's own fields plus one `links` member, so any
/// serde serializer can emit it without knowing the entity type. Entities
/// declaring a `links` field of their own are refused when their descriptor
/// is built, see [`LINKS_FIELD`](crate::augment::cache::LINKS_FIELD).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Augmented<T> {
    #[serde(flatten)]
    entity: T,
    links: LinksPayload,
}

impl<T> Augmented<T> {
    /// The populated copy of the original entity
    pub fn entity(&self) -> &T {
        &self.entity
    }

    /// The attached links, shaped by the engine's storage mode
    pub fn links(&self) -> &LinksPayload {
        &self.links
    }

    pub fn into_parts(self) -> (T, LinksPayload) {
        (self.entity, self.links)
    }
}

impl<T> Deref for Augmented<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.entity
    }
}

/// Attaches hypermedia links to entities of any [`Entity`] type
///
/// The storage mode is fixed at construction. Engines are cheap to clone and
/// share their [`TypeCache`].
#[derive(Debug, Clone)]
pub struct AugmentationEngine {
    mode: StorageMode,
    cache: Arc<TypeCache>,
}

impl AugmentationEngine {
    /// Create an engine backed by the process-wide cache
    pub fn new(mode: StorageMode) -> Self {
        Self::with_cache(mode, TypeCache::global())
    }

    pub fn with_cache(mode: StorageMode, cache: Arc<TypeCache>) -> Self {
        Self { mode, cache }
    }

    pub fn from_config(config: &HateoasConfig) -> Self {
        Self::new(config.storage)
    }

    pub fn mode(&self) -> StorageMode {
        self.mode
    }

    pub fn cache(&self) -> &Arc<TypeCache> {
        &self.cache
    }

    /// Produce a new instance equal to `entity` with links attached.
    ///
    /// `entity` is never modified. Any failure aborts the call without a
    /// partial result.
    pub fn augment<T, P>(
        &self,
        entity: &T,
        producer: &P,
        verbosity: Verbosity,
    ) -> Result<Augmented<T>, AugmentError>
    where
        T: Entity,
        P: LinkProducer<T> + ?Sized,
    {
        let descriptor = self.cache.resolve::<T>(self.mode)?;
        let type_name = descriptor.type_name();
        tracing::trace!(type_name, mode = %self.mode, "descriptor resolved");

        let mut instance = descriptor.instantiate()?;
        tracing::trace!(type_name, "instance constructed");

        FieldCopier::copy_fields(entity, &mut instance, type_name, descriptor.fields())?;
        tracing::trace!(type_name, fields = descriptor.fields().len(), "fields copied");

        let links = producer.links(entity);
        let payload = LinkAssembler::assemble(&links, verbosity, descriptor.mode())?;
        tracing::debug!(
            type_name,
            mode = %self.mode,
            %verbosity,
            links = payload.len(),
            "entity augmented"
        );

        Ok(Augmented {
            entity: instance,
            links: payload,
        })
    }

    /// Like [`augment`](Self::augment), passing an absent entity through
    /// untouched
    pub fn augment_optional<T, P>(
        &self,
        entity: Option<&T>,
        producer: &P,
        verbosity: Verbosity,
    ) -> Result<Option<Augmented<T>>, AugmentError>
    where
        T: Entity,
        P: LinkProducer<T> + ?Sized,
    {
        entity
            .map(|entity| self.augment(entity, producer, verbosity))
            .transpose()
    }

    /// Augment every entity of a collection, stopping at the first failure
    pub fn augment_all<T, P>(
        &self,
        entities: &[T],
        producer: &P,
        verbosity: Verbosity,
    ) -> Result<Vec<Augmented<T>>, AugmentError>
    where
        T: Entity,
        P: LinkProducer<T> + ?Sized,
    {
        entities
            .iter()
            .map(|entity| self.augment(entity, producer, verbosity))
            .collect()
    }
}
