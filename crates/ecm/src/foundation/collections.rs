//! Key types for stable, non-owning references

use slotmap::new_key_type;

new_key_type! {
    /// Generational handle to an entity owned by an [`EntityManager`](crate::ecs::EntityManager).
    ///
    /// Holding an `EntityId` never keeps the entity alive. Once the manager
    /// reaps the entity, lookups with a stale id return `None`.
    pub struct EntityId;
}
