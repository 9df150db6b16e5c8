//! Link producers decide which links apply to an entity
//!
//! The augmentation engine only consumes producer output. Building hrefs,
//! checking permissions or looking at request state is entirely up to the
//! producer supplied by the resource layer.

use crate::core::link::ToAttributes;

/// Supplies the ordered links for an entity
///
/// Implementations must not mutate the entity and should depend only on the
/// entity and on request context held by the producer itself.
pub trait LinkProducer<E: ?Sized> {
    type Link: ToAttributes;

    fn links(&self, entity: &E) -> Vec<Self::Link>;
}

impl<E, L, F> LinkProducer<E> for F
where
    E: ?Sized,
    L: ToAttributes,
    F: Fn(&E) -> Vec<L>,
{
    type Link = L;

    fn links(&self, entity: &E) -> Vec<L> {
        self(entity)
    }
}

/// Returns the same links for every entity
#[derive(Debug, Clone)]
pub struct FixedLinkProducer<L> {
    links: Vec<L>,
}

impl<L: ToAttributes + Clone> FixedLinkProducer<L> {
    pub fn new(links: Vec<L>) -> Self {
        Self { links }
    }

    pub fn single(link: L) -> Self {
        Self { links: vec![link] }
    }
}

impl<E: ?Sized, L: ToAttributes + Clone> LinkProducer<E> for FixedLinkProducer<L> {
    type Link = L;

    fn links(&self, _entity: &E) -> Vec<L> {
        self.links.clone()
    }
}

/// Produces no links at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLinks;

impl<E: ?Sized> LinkProducer<E> for NoLinks {
    type Link = crate::core::link::HateoasLink;

    fn links(&self, _entity: &E) -> Vec<Self::Link> {
        Vec::new()
    }
}
