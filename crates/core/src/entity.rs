//! Entity trait: things with an identity that outlives their state.

/// Marker interface for domain entities.
///
/// An entity is identified by its id, not by its current attribute
/// values; a repriced product is still the same product. Ids are the
/// typed UUID newtypes from [`crate::id`].
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Display;

    fn id(&self) -> &Self::Id;
}
