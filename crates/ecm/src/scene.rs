//! Scenes
//!
//! A scene is the world context an entity belongs to. Entities keep only the
//! scene's [`SceneId`], never a reference to the scene itself.

use std::sync::atomic::{AtomicU32, Ordering};

use log::info;

use crate::ecs::{EntityManager, EntityRef};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Opaque scene identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u32);

impl SceneId {
    /// Wrap a raw id
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw id value
    pub const fn raw(self) -> u32 {
        self.0
    }

    fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A named collection of entities driven as one unit
pub struct Scene {
    id: SceneId,
    name: String,
    entities: EntityManager,
}

impl Scene {
    /// Create an empty scene with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        let scene = Self {
            id: SceneId::next(),
            name: name.into(),
            entities: EntityManager::new(),
        };
        info!("Created scene '{}' ({:?})", scene.name, scene.id);
        scene
    }

    /// Scene identifier
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spawn an entity belonging to this scene
    pub fn spawn(&mut self) -> EntityRef {
        self.entities.spawn(self.id)
    }

    /// Update every entity and reap the dead ones
    pub fn update(&mut self, dt: f64) {
        self.entities.update(dt);
    }

    /// Render every entity
    pub fn render(&self) {
        self.entities.render();
    }

    /// The scene's entities
    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    /// Mutable access to the scene's entities
    pub fn entities_mut(&mut self) -> &mut EntityManager {
        &mut self.entities
    }

    /// Drop every entity
    pub fn unload(&mut self) {
        info!("Unloading scene '{}' ({} entities)", self.name, self.entities.len());
        self.entities.clear();
    }
}
