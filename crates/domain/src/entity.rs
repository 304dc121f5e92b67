//! Entity trait shared by every persisted domain object.

use common::EntityId;

/// An object with a stable identity.
///
/// Generic repository implementations rely on this trait to key stored
/// entities and to name them in error messages.
pub trait Entity: Send + Sync {
    /// Human-readable entity name, used in "not found" errors.
    const ENTITY_NAME: &'static str;

    /// Returns the entity's identifier.
    fn id(&self) -> &EntityId;
}
