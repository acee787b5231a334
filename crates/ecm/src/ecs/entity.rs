//! Entity implementation
//!
//! An entity owns an ordered list of components and the spatial/identity
//! state those components act on. The state lives in [`EntityState`] so the
//! entity can lend it mutably to each component in turn while it walks the
//! component list.

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use bitflags::bitflags;
use log::{debug, trace};

use super::component::{Capabilities, Component, ComponentCore, ComponentHandle};
use super::reap::{self, Reapable};
use crate::foundation::collections::EntityId;
use crate::foundation::math::Vec2;
use crate::scene::SceneId;

bitflags! {
    /// Per-entity lifecycle flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EntityFlags: u8 {
        /// Receives `update`
        const ALIVE = 1 << 0;
        /// Receives `render`
        const VISIBLE = 1 << 1;
        /// Waiting for the manager to reap it; never cleared
        const FOR_DELETION = 1 << 2;
    }
}

impl Default for EntityFlags {
    fn default() -> Self {
        Self::ALIVE | Self::VISIBLE
    }
}

/// Spatial, flag and tag state of an entity
///
/// This is what components see of their owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityState {
    position: Vec2,
    rotation: f32,
    flags: EntityFlags,
    tags: BTreeSet<String>,
}

impl EntityState {
    /// Current position
    pub fn position(&self) -> &Vec2 {
        &self.position
    }

    /// Move to `position`
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Current rotation; not normalized to any range
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set rotation
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    /// Raw lifecycle flags
    pub fn flags(&self) -> EntityFlags {
        self.flags
    }

    /// Whether update is forwarded to components
    pub fn is_alive(&self) -> bool {
        self.flags.contains(EntityFlags::ALIVE)
    }

    /// Enable or disable update forwarding
    pub fn set_alive(&mut self, alive: bool) {
        self.flags.set(EntityFlags::ALIVE, alive);
    }

    /// Whether render is forwarded to components
    pub fn is_visible(&self) -> bool {
        self.flags.contains(EntityFlags::VISIBLE)
    }

    /// Enable or disable render forwarding
    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(EntityFlags::VISIBLE, visible);
    }

    /// Flag the entity for removal at the manager's next reap. Idempotent
    /// and irreversible.
    pub fn set_for_delete(&mut self) {
        self.flags.insert(EntityFlags::FOR_DELETION);
    }

    /// Whether the entity is waiting to be reaped
    pub fn is_for_deletion(&self) -> bool {
        self.flags.contains(EntityFlags::FOR_DELETION)
    }

    /// Add a tag; adding an existing tag does nothing
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    /// Remove a tag, returning whether it was present
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Whether the entity carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// All tags
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

/// A registered component plus the views used by typed queries
pub(super) struct ComponentSlot {
    pub(super) component: ComponentHandle<dyn Component>,
    pub(super) concrete: Rc<dyn Any>,
    pub(super) capabilities: Capabilities,
}

impl ComponentSlot {
    /// Handle to the component if its concrete type is exactly `T`
    pub(super) fn exact<T: Component>(&self) -> Option<ComponentHandle<T>> {
        Rc::downcast::<RefCell<T>>(Rc::clone(&self.concrete)).ok()
    }

    /// Handle to the component viewed as `C`, if it declared `C`
    pub(super) fn compatible<C: ?Sized + 'static>(&self) -> Option<ComponentHandle<C>> {
        self.capabilities.view::<C>()
    }
}

impl Reapable for ComponentSlot {
    fn is_for_deletion(&self) -> bool {
        self.component.borrow().is_for_deletion()
    }
}

/// What a component sees of its owner during `update`
///
/// Derefs to the owner's [`EntityState`]. The typed queries (see
/// [`query`](super::query)) reach the owner's *other* components: the
/// component being updated is mutably borrowed for the whole call and is
/// never part of the results.
///
/// Borrowing the owning [`EntityRef`](super::EntityRef) from inside `update`
/// panics, since the manager already holds it mutably. Go through the
/// context instead.
pub struct EntityContext<'a> {
    id: EntityId,
    state: &'a mut EntityState,
    components: &'a [ComponentSlot],
    current: usize,
}

impl<'a> EntityContext<'a> {
    fn new(
        id: EntityId,
        state: &'a mut EntityState,
        components: &'a [ComponentSlot],
        current: usize,
    ) -> Self {
        Self { id, state, components, current }
    }

    /// Owning entity
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(super) fn siblings(&self) -> impl Iterator<Item = &ComponentSlot> + '_ {
        self.components
            .iter()
            .enumerate()
            .filter(move |(index, _)| *index != self.current)
            .map(|(_, slot)| slot)
    }
}

impl Deref for EntityContext<'_> {
    type Target = EntityState;

    fn deref(&self) -> &EntityState {
        &*self.state
    }
}

impl DerefMut for EntityContext<'_> {
    fn deref_mut(&mut self) -> &mut EntityState {
        &mut *self.state
    }
}

/// A simulation object: components plus the state they drive
pub struct Entity {
    id: EntityId,
    scene: SceneId,
    state: EntityState,
    pub(super) components: Vec<ComponentSlot>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, scene: SceneId) -> Self {
        Self {
            id,
            scene,
            state: EntityState::default(),
            components: Vec::new(),
        }
    }

    /// Identity within the owning manager
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Scene this entity was spawned into
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    /// Read-only view of the entity's state
    pub fn state(&self) -> &EntityState {
        &self.state
    }

    /// Mutable view of the entity's state
    pub fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    /// Number of components currently owned
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Forward `update(dt)` to every component, then drop the ones flagged
    /// for deletion
    ///
    /// Does nothing while the entity is not alive.
    pub fn update(&mut self, dt: f64) {
        if !self.state.is_alive() {
            return;
        }

        for (index, slot) in self.components.iter().enumerate() {
            let mut context = EntityContext::new(self.id, &mut self.state, &self.components, index);
            slot.component.borrow_mut().update(&mut context, dt);
        }

        let released = reap::reap(&mut self.components);
        if !released.is_empty() {
            debug!(
                "Entity {:?} released {} component(s), {} remaining",
                self.id,
                released.len(),
                self.components.len()
            );
        }
    }

    /// Forward `render()` to every component; does nothing while the entity
    /// is not visible
    pub fn render(&self) {
        if !self.state.is_visible() {
            return;
        }

        for slot in &self.components {
            slot.component.borrow().render(&self.state);
        }
    }

    /// Construct a component owned by this entity and append it
    ///
    /// `build` receives the [`ComponentCore`] binding the new component to
    /// this entity. The returned handle shares the component; the entity
    /// still decides when it is released.
    pub fn add_component<T, F>(&mut self, build: F) -> ComponentHandle<T>
    where
        T: Component,
        F: FnOnce(ComponentCore) -> T,
    {
        let handle = Rc::new(RefCell::new(build(ComponentCore::new(self.id))));

        let mut capabilities = Capabilities::new();
        capabilities.provide::<T>(handle.clone());
        capabilities.provide::<dyn Component>(handle.clone());
        T::capabilities(&handle, &mut capabilities);

        trace!(
            "Entity {:?} added {} ({} capability views)",
            self.id,
            std::any::type_name::<T>(),
            capabilities.len()
        );

        self.components.push(ComponentSlot {
            component: handle.clone(),
            concrete: handle.clone(),
            capabilities,
        });
        handle
    }

    /// Current position
    pub fn position(&self) -> &Vec2 {
        self.state.position()
    }

    /// Move to `position`
    pub fn set_position(&mut self, position: Vec2) {
        self.state.set_position(position);
    }

    /// Current rotation
    pub fn rotation(&self) -> f32 {
        self.state.rotation()
    }

    /// Set rotation
    pub fn set_rotation(&mut self, rotation: f32) {
        self.state.set_rotation(rotation);
    }

    /// Whether update is forwarded
    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// Enable or disable update forwarding
    pub fn set_alive(&mut self, alive: bool) {
        self.state.set_alive(alive);
    }

    /// Whether render is forwarded
    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// Enable or disable render forwarding
    pub fn set_visible(&mut self, visible: bool) {
        self.state.set_visible(visible);
    }

    /// Flag for removal at the manager's next update
    pub fn set_for_delete(&mut self) {
        self.state.set_for_delete();
    }

    /// Whether the entity is waiting to be reaped
    pub fn is_for_deletion(&self) -> bool {
        self.state.is_for_deletion()
    }

    /// Add a tag (idempotent)
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.state.add_tag(tag);
    }

    /// All tags
    pub fn tags(&self) -> &BTreeSet<String> {
        self.state.tags()
    }

    /// Whether the entity carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.state.has_tag(tag)
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("scene", &self.scene)
            .field("state", &self.state)
            .field("components", &self.components.len())
            .finish()
    }
}
