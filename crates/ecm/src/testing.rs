//! Stub components shared by the unit tests

use std::cell::RefCell;
use std::rc::Rc;

use crate::ecs::{
    Capabilities, Component, ComponentCore, ComponentHandle, EntityContext, EntityState,
};
use crate::foundation::math::Vec2;

#[derive(Default)]
struct Counts {
    updates: usize,
    renders: usize,
    log: Vec<String>,
}

/// Shared record of forwarded calls
#[derive(Clone, Default)]
pub struct Counter(Rc<RefCell<Counts>>);

impl Counter {
    pub fn updates(&self) -> usize {
        self.0.borrow().updates
    }

    pub fn renders(&self) -> usize {
        self.0.borrow().renders
    }

    pub fn log(&self) -> Vec<String> {
        self.0.borrow().log.clone()
    }

    fn record_update(&self, name: &str) {
        let mut counts = self.0.borrow_mut();
        counts.updates += 1;
        counts.log.push(format!("update {name}"));
    }

    fn record_render(&self, name: &str) {
        let mut counts = self.0.borrow_mut();
        counts.renders += 1;
        counts.log.push(format!("render {name}"));
    }
}

/// Counts calls and optionally moves or kills its owner
pub struct Probe {
    core: ComponentCore,
    name: &'static str,
    counter: Option<Counter>,
    velocity: Option<Vec2>,
    kill_owner: bool,
}

impl Probe {
    pub fn new(core: ComponentCore) -> Self {
        Self {
            core,
            name: "probe",
            counter: None,
            velocity: None,
            kill_owner: false,
        }
    }

    pub fn with_counter(core: ComponentCore, counter: Counter, name: &'static str) -> Self {
        Self {
            name,
            counter: Some(counter),
            ..Self::new(core)
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn killing_owner(mut self) -> Self {
        self.kill_owner = true;
        self
    }
}

impl Component for Probe {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    #[allow(clippy::cast_possible_truncation)]
    fn update(&mut self, entity: &mut EntityContext<'_>, dt: f64) {
        if let Some(counter) = &self.counter {
            counter.record_update(self.name);
        }
        if let Some(velocity) = self.velocity {
            let position = *entity.position() + velocity * (dt as f32);
            entity.set_position(position);
        }
        if self.kill_owner {
            entity.set_for_delete();
        }
    }

    fn render(&self, _entity: &EntityState) {
        if let Some(counter) = &self.counter {
            counter.record_render(self.name);
        }
    }
}

/// Marks itself for deletion during its first update
pub struct SelfDestruct {
    core: ComponentCore,
    counter: Counter,
}

impl SelfDestruct {
    pub fn new(core: ComponentCore, counter: Counter) -> Self {
        Self { core, counter }
    }
}

impl Component for SelfDestruct {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn update(&mut self, _entity: &mut EntityContext<'_>, _dt: f64) {
        self.counter.record_update("self-destruct");
        self.core.mark_for_deletion();
    }

    fn render(&self, _entity: &EntityState) {
        self.counter.record_render("self-destruct");
    }
}

/// Capability shared by [`BasePulse`] and [`DoublePulse`]
pub trait Pulse {
    fn strength(&self) -> f32;
}

pub struct BasePulse {
    core: ComponentCore,
    strength: f32,
}

impl BasePulse {
    pub fn new(core: ComponentCore, strength: f32) -> Self {
        Self { core, strength }
    }
}

impl Pulse for BasePulse {
    fn strength(&self) -> f32 {
        self.strength
    }
}

impl Component for BasePulse {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn update(&mut self, _entity: &mut EntityContext<'_>, _dt: f64) {}

    fn render(&self, _entity: &EntityState) {}

    fn capabilities(this: &ComponentHandle<Self>, caps: &mut Capabilities) {
        caps.provide::<dyn Pulse>(this.clone());
    }
}

/// A pulse variant that reports twice its base strength
pub struct DoublePulse {
    base: BasePulse,
}

impl DoublePulse {
    pub fn new(core: ComponentCore, strength: f32) -> Self {
        Self { base: BasePulse::new(core, strength) }
    }
}

impl Pulse for DoublePulse {
    fn strength(&self) -> f32 {
        self.base.strength() * 2.0
    }
}

impl Component for DoublePulse {
    fn core(&self) -> &ComponentCore {
        self.base.core()
    }

    fn update(&mut self, entity: &mut EntityContext<'_>, dt: f64) {
        self.base.update(entity, dt);
    }

    fn render(&self, entity: &EntityState) {
        self.base.render(entity);
    }

    fn capabilities(this: &ComponentHandle<Self>, caps: &mut Capabilities) {
        caps.provide::<dyn Pulse>(this.clone());
    }
}
