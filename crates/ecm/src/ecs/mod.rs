//! Entity/component ownership and lifecycle
//!
//! Entities privately own their components and forward update/render to
//! them; an [`EntityManager`] owns the entities. Deletion on both tiers is a
//! flag plus a reap performed by the owner (see [`reap`]).

pub mod reap;
pub mod component;
pub mod entity;
pub mod query;
pub mod manager;

pub use component::{Capabilities, Component, ComponentCore, ComponentHandle};
pub use entity::{Entity, EntityContext, EntityFlags, EntityState};
pub use manager::{EntityManager, EntityRef};
pub use reap::{DeletionFlag, Reapable};
pub use crate::foundation::collections::EntityId;
