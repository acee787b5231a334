//! # Entity Manager
//!
//! Canonical owner of every live entity in a scene. Drives the per-frame
//! update/render pass, reaps entities flagged for deletion once the update
//! pass is over, and answers tag queries.
//!
//! Entities are shared as [`EntityRef`] so other subsystems can hold on to
//! them; the manager's share is dropped when it reaps the entity. Code that
//! only needs to refer to an entity should keep its [`EntityId`] instead:
//! ids of reaped entities no longer resolve.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};
use slotmap::SlotMap;

use super::entity::Entity;
use super::reap::{self, Reapable};
use crate::foundation::collections::EntityId;
use crate::scene::SceneId;

/// Shared handle to a managed entity
pub type EntityRef = Rc<RefCell<Entity>>;

impl Reapable for EntityRef {
    fn is_for_deletion(&self) -> bool {
        self.borrow().is_for_deletion()
    }
}

/// Owns the set of live entities, in insertion order
#[derive(Default)]
pub struct EntityManager {
    /// Iteration order
    list: Vec<EntityRef>,
    /// Identity allocator and id lookup; a key lives exactly as long as its
    /// entity is managed
    index: SlotMap<EntityId, EntityRef>,
}

impl EntityManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity owned by this manager and return a shared handle
    pub fn spawn(&mut self, scene: SceneId) -> EntityRef {
        let id = self
            .index
            .insert_with_key(|id| Rc::new(RefCell::new(Entity::new(id, scene))));
        let entity = Rc::clone(&self.index[id]);
        self.list.push(Rc::clone(&entity));
        trace!("Spawned entity {id:?} in scene {scene:?} ({} live)", self.list.len());
        entity
    }

    /// Forward `update(dt)` to every entity in insertion order, then drop
    /// every entity flagged for deletion
    ///
    /// Entities already flagged when the pass reaches them are skipped.
    pub fn update(&mut self, dt: f64) {
        for entity in &self.list {
            let mut entity = entity.borrow_mut();
            if !entity.is_for_deletion() {
                entity.update(dt);
            }
        }

        self.reap();
    }

    /// Forward `render()` to every entity not waiting to be reaped
    pub fn render(&self) {
        for entity in &self.list {
            let entity = entity.borrow();
            if !entity.is_for_deletion() {
                entity.render();
            }
        }
    }

    fn reap(&mut self) {
        let released = reap::reap(&mut self.list);
        if released.is_empty() {
            return;
        }

        for entity in &released {
            self.index.remove(entity.borrow().id());
        }
        debug!("Reaped {} entities, {} remaining", released.len(), self.list.len());
    }

    /// Entities carrying `tag`, in manager order
    pub fn find(&self, tag: &str) -> Vec<EntityRef> {
        self.list
            .iter()
            .filter(|entity| entity.borrow().has_tag(tag))
            .cloned()
            .collect()
    }

    /// Entities carrying every tag in `tags`, in manager order
    ///
    /// An empty tag list matches nothing.
    pub fn find_all<S: AsRef<str>>(&self, tags: &[S]) -> Vec<EntityRef> {
        if tags.is_empty() {
            return Vec::new();
        }

        self.list
            .iter()
            .filter(|entity| {
                let entity = entity.borrow();
                tags.iter().all(|tag| entity.has_tag(tag.as_ref()))
            })
            .cloned()
            .collect()
    }

    /// Look up a managed entity; `None` once it has been reaped
    pub fn get(&self, id: EntityId) -> Option<EntityRef> {
        self.index.get(id).cloned()
    }

    /// Whether `id` refers to a managed entity
    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(id)
    }

    /// Managed entities in iteration order
    pub fn iter(&self) -> impl Iterator<Item = &EntityRef> {
        self.list.iter()
    }

    /// Number of managed entities
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether the manager holds no entities
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Release every entity immediately
    ///
    /// Meant for scene teardown, outside the frame loop.
    pub fn clear(&mut self) {
        debug!("Clearing {} entities", self.list.len());
        self.list.clear();
        self.index.clear();
    }
}
