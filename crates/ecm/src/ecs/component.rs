//! Component trait and the per-component bookkeeping the entity relies on
//!
//! A component is a behavior unit owned by exactly one [`Entity`](super::Entity).
//! During `update` it gets an [`EntityContext`]: its owner's state, mutably,
//! plus typed queries over the owner's other components. During `render` it
//! gets a read-only [`EntityState`]. It never holds a counted reference to the
//! owner, only its [`EntityId`].

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::entity::{EntityContext, EntityState};
use super::reap::DeletionFlag;
use crate::foundation::collections::EntityId;

/// Shared handle to a component, as returned by
/// [`Entity::add_component`](super::Entity::add_component)
///
/// The owning entity stays the lifetime authority: once it reaps the
/// component, a retained handle is inert.
pub type ComponentHandle<T> = Rc<RefCell<T>>;

/// Owner back-reference and deletion flag embedded in every component
///
/// Only an entity can create one, so a component cannot exist without an
/// owner. The owner id never changes.
pub struct ComponentCore {
    owner: EntityId,
    deletion: DeletionFlag,
}

impl ComponentCore {
    pub(crate) fn new(owner: EntityId) -> Self {
        Self {
            owner,
            deletion: DeletionFlag::new(),
        }
    }

    /// Entity this component belongs to
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Ask the owning entity to drop this component after its current
    /// (or next) update pass
    pub fn mark_for_deletion(&self) {
        self.deletion.mark();
    }

    /// Whether the component is waiting to be reaped
    pub fn is_for_deletion(&self) -> bool {
        self.deletion.is_set()
    }
}

impl fmt::Debug for ComponentCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentCore")
            .field("owner", &self.owner)
            .field("for_deletion", &self.is_for_deletion())
            .finish()
    }
}

/// Per-entity behavior unit
///
/// Implementors embed the [`ComponentCore`] they are handed at construction
/// and expose it through [`core`](Component::core).
pub trait Component: Any {
    /// Owner and deletion bookkeeping
    fn core(&self) -> &ComponentCore;

    /// Advance behavior by `dt`
    ///
    /// May move or re-tag the owner, toggle its flags, query its other
    /// components, or mark this component for deletion. The entity finishes
    /// forwarding to every component before it reaps any of them.
    ///
    /// The component's own handle is mutably borrowed for the duration of
    /// the call, and so is the owning entity; neither may be borrowed again
    /// from here.
    fn update(&mut self, entity: &mut EntityContext<'_>, dt: f64);

    /// Produce visual output for the current frame
    fn render(&self, entity: &EntityState);

    /// Whether the owner should drop this component at its next reap
    fn is_for_deletion(&self) -> bool {
        self.core().is_for_deletion()
    }

    /// Entity this component belongs to
    fn owner(&self) -> EntityId {
        self.core().owner()
    }

    /// Declare the capability traits this type can be retrieved as
    ///
    /// Called once when the component is registered. The concrete type and
    /// `dyn Component` are always provided; override this to add traits:
    ///
    /// ```ignore
    /// fn capabilities(this: &ComponentHandle<Self>, caps: &mut Capabilities) {
    ///     caps.provide::<dyn Steering>(this.clone());
    /// }
    /// ```
    fn capabilities(_this: &ComponentHandle<Self>, _caps: &mut Capabilities)
    where
        Self: Sized,
    {
    }
}

/// Type-erased views of one component, keyed by the type they expose
///
/// Each view is the same allocation as the component, unsized to a
/// capability (`ComponentHandle<dyn Steering>`) or kept concrete. Lookups use
/// `downcast_ref` on the stored handle, so a view can only come back out as
/// the exact type it was stored under.
pub struct Capabilities {
    views: Vec<(TypeId, Box<dyn Any>)>,
}

impl Capabilities {
    pub(crate) fn new() -> Self {
        Self { views: Vec::new() }
    }

    /// Make the component retrievable as `C`
    ///
    /// Providing the same `C` twice keeps the first view.
    pub fn provide<C: ?Sized + 'static>(&mut self, view: ComponentHandle<C>) {
        let key = TypeId::of::<C>();
        if self.views.iter().any(|(id, _)| *id == key) {
            return;
        }
        self.views.push((key, Box::new(view)));
    }

    /// Whether a view for `C` was provided
    pub fn provides<C: ?Sized + 'static>(&self) -> bool {
        let key = TypeId::of::<C>();
        self.views.iter().any(|(id, _)| *id == key)
    }

    /// Number of views, including the implicit ones
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether no views were provided
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub(crate) fn view<C: ?Sized + 'static>(&self) -> Option<ComponentHandle<C>> {
        let key = TypeId::of::<C>();
        self.views
            .iter()
            .find(|(id, _)| *id == key)
            .and_then(|(_, view)| view.downcast_ref::<ComponentHandle<C>>())
            .cloned()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("views", &self.views.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    trait Glow {
        fn brightness(&self) -> f32;
    }

    struct Lamp {
        core: ComponentCore,
        brightness: f32,
    }

    impl Glow for Lamp {
        fn brightness(&self) -> f32 {
            self.brightness
        }
    }

    impl Component for Lamp {
        fn core(&self) -> &ComponentCore {
            &self.core
        }

        fn update(&mut self, _entity: &mut EntityContext<'_>, _dt: f64) {}

        fn render(&self, _entity: &EntityState) {}
    }

    fn owner() -> EntityId {
        EntityId::from(KeyData::from_ffi(7))
    }

    #[test]
    fn test_core_starts_live() {
        let core = ComponentCore::new(owner());
        assert_eq!(core.owner(), owner());
        assert!(!core.is_for_deletion());

        core.mark_for_deletion();
        core.mark_for_deletion();
        assert!(core.is_for_deletion());
    }

    #[test]
    fn test_views_round_trip_through_any() {
        let lamp = Rc::new(RefCell::new(Lamp { core: ComponentCore::new(owner()), brightness: 0.5 }));
        let mut caps = Capabilities::new();
        caps.provide::<dyn Glow>(lamp.clone());
        caps.provide::<Lamp>(lamp.clone());

        assert!(caps.provides::<dyn Glow>());
        assert!(!caps.provides::<dyn Component>());
        assert_eq!(caps.len(), 2);

        let glow = caps.view::<dyn Glow>().unwrap();
        assert!((glow.borrow().brightness() - 0.5).abs() < f32::EPSILON);
        assert!(Rc::ptr_eq(&caps.view::<Lamp>().unwrap(), &lamp));
        assert!(caps.view::<dyn Component>().is_none());
    }

    #[test]
    fn test_duplicate_provide_is_ignored() {
        let lamp = Rc::new(RefCell::new(Lamp { core: ComponentCore::new(owner()), brightness: 1.0 }));
        let mut caps = Capabilities::new();
        caps.provide::<dyn Glow>(lamp.clone());
        caps.provide::<dyn Glow>(lamp.clone());
        assert_eq!(caps.len(), 1);
    }
}
