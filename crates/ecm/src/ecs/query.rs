//! Typed component retrieval
//!
//! Two filters over an entity's components, both returning handles in
//! registration order:
//!
//! - [`Entity::get_components`]: the concrete type is exactly `T`.
//! - [`Entity::get_compatible_components`]: the component declared it can be
//!   used as `C`, where `C` is usually a capability trait object
//!   (`dyn Steering`). Every component is compatible with its own concrete
//!   type and with `dyn Component`.
//!
//! The same queries are available to behavior code through the
//! [`EntityContext`] handed to [`Component::update`], where they cover the
//! owner's other components.

use super::component::{Component, ComponentHandle};
use super::entity::{Entity, EntityContext};

impl Entity {
    /// Components whose concrete type is exactly `T`
    pub fn get_components<T: Component>(&self) -> Vec<ComponentHandle<T>> {
        self.components.iter().filter_map(|slot| slot.exact::<T>()).collect()
    }

    /// First component whose concrete type is exactly `T`
    pub fn get_component<T: Component>(&self) -> Option<ComponentHandle<T>> {
        self.components.iter().find_map(|slot| slot.exact::<T>())
    }

    /// Components usable as `C`
    pub fn get_compatible_components<C: ?Sized + 'static>(&self) -> Vec<ComponentHandle<C>> {
        self.components
            .iter()
            .filter_map(|slot| slot.compatible::<C>())
            .collect()
    }

    /// Whether any component is usable as `C`
    pub fn has_compatible_component<C: ?Sized + 'static>(&self) -> bool {
        self.components
            .iter()
            .any(|slot| slot.capabilities.provides::<C>())
    }
}

impl EntityContext<'_> {
    /// Other components on the owner whose concrete type is exactly `T`
    pub fn get_components<T: Component>(&self) -> Vec<ComponentHandle<T>> {
        self.siblings().filter_map(|slot| slot.exact::<T>()).collect()
    }

    /// First other component whose concrete type is exactly `T`
    pub fn get_component<T: Component>(&self) -> Option<ComponentHandle<T>> {
        self.siblings().find_map(|slot| slot.exact::<T>())
    }

    /// Other components on the owner usable as `C`
    pub fn get_compatible_components<C: ?Sized + 'static>(&self) -> Vec<ComponentHandle<C>> {
        self.siblings().filter_map(|slot| slot.compatible::<C>()).collect()
    }

    /// Whether any other component is usable as `C`
    pub fn has_compatible_component<C: ?Sized + 'static>(&self) -> bool {
        self.siblings().any(|slot| slot.capabilities.provides::<C>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::ecs::component::ComponentCore;
    use crate::ecs::entity::EntityState;
    use crate::foundation::collections::EntityId;
    use crate::scene::SceneId;
    use crate::testing::{BasePulse, DoublePulse, Probe, Pulse};
    use slotmap::KeyData;

    /// Sums the pulse strength of its siblings every update
    struct PulseMeter {
        core: ComponentCore,
        reading: Rc<Cell<f32>>,
        saw_itself: Rc<Cell<bool>>,
    }

    impl Component for PulseMeter {
        fn core(&self) -> &ComponentCore {
            &self.core
        }

        fn update(&mut self, entity: &mut EntityContext<'_>, _dt: f64) {
            let total: f32 = entity
                .get_compatible_components::<dyn Pulse>()
                .iter()
                .map(|pulse| pulse.borrow().strength())
                .sum();
            self.reading.set(total);
            self.saw_itself.set(entity.get_component::<Self>().is_some());
        }

        fn render(&self, _entity: &EntityState) {}
    }

    fn entity() -> Entity {
        Entity::new(EntityId::from(KeyData::from_ffi(3)), SceneId::new(0))
    }

    #[test]
    fn test_exact_query_ignores_compatible_variants() {
        let mut entity = entity();
        let base = entity.add_component(|core| BasePulse::new(core, 1.0));
        entity.add_component(|core| DoublePulse::new(core, 1.0));
        entity.add_component(Probe::new);

        let found = entity.get_components::<BasePulse>();
        assert_eq!(found.len(), 1);
        assert!(Rc::ptr_eq(&found[0], &base));
        assert_eq!(entity.get_components::<DoublePulse>().len(), 1);
    }

    #[test]
    fn test_compatible_query_returns_every_variant_in_order() {
        let mut entity = entity();
        entity.add_component(|core| DoublePulse::new(core, 1.5));
        entity.add_component(Probe::new);
        entity.add_component(|core| BasePulse::new(core, 1.0));

        let strengths: Vec<f32> = entity
            .get_compatible_components::<dyn Pulse>()
            .iter()
            .map(|pulse| pulse.borrow().strength())
            .collect();
        assert_eq!(strengths, [3.0, 1.0]);
        assert!(entity.has_compatible_component::<dyn Pulse>());
    }

    #[test]
    fn test_every_component_is_compatible_with_itself_and_component() {
        let mut entity = entity();
        entity.add_component(|core| BasePulse::new(core, 1.0));
        entity.add_component(Probe::new);

        assert_eq!(entity.get_compatible_components::<dyn Component>().len(), 2);
        assert_eq!(entity.get_compatible_components::<Probe>().len(), 1);
        assert!(entity.get_component::<Probe>().is_some());
    }

    #[test]
    fn test_queries_on_empty_entity() {
        let entity = entity();
        assert!(entity.get_components::<Probe>().is_empty());
        assert!(entity.get_component::<Probe>().is_none());
        assert!(entity.get_compatible_components::<dyn Pulse>().is_empty());
        assert!(!entity.has_compatible_component::<dyn Component>());
    }

    #[test]
    fn test_reaped_components_leave_queries() {
        let mut entity = entity();
        let pulse = entity.add_component(|core| BasePulse::new(core, 1.0));
        pulse.borrow().core().mark_for_deletion();

        entity.update(0.016);

        assert!(entity.get_components::<BasePulse>().is_empty());
        assert!(entity.get_compatible_components::<dyn Pulse>().is_empty());
    }

    #[test]
    fn test_component_queries_its_siblings_during_update() {
        let mut entity = entity();
        let (reading, saw_itself) = (Rc::new(Cell::new(0.0)), Rc::new(Cell::new(true)));
        entity.add_component(|core| BasePulse::new(core, 1.0));
        entity.add_component(|core| PulseMeter {
            core,
            reading: Rc::clone(&reading),
            saw_itself: Rc::clone(&saw_itself),
        });
        entity.add_component(|core| DoublePulse::new(core, 1.5));

        entity.update(0.016);

        assert!((reading.get() - 4.0).abs() < f32::EPSILON);
        assert!(!saw_itself.get());
    }

    #[test]
    fn test_sibling_queries_see_pending_deletions_until_reap() {
        let mut entity = entity();
        let reading = Rc::new(Cell::new(0.0));
        let pulse = entity.add_component(|core| BasePulse::new(core, 2.0));
        entity.add_component(|core| PulseMeter {
            core,
            reading: Rc::clone(&reading),
            saw_itself: Rc::new(Cell::new(false)),
        });

        pulse.borrow().core().mark_for_deletion();
        entity.update(0.016);
        assert!((reading.get() - 2.0).abs() < f32::EPSILON);

        entity.update(0.016);
        assert!(reading.get().abs() < f32::EPSILON);
    }
}
