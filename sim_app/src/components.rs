//! Demo components for the asteroid field

use ecm::foundation::math::utils;
use ecm::prelude::*;
use rand::Rng;

/// Anything that hurts the ship on contact
pub trait Hazard {
    /// Damage dealt on contact
    fn damage(&self) -> u32;
}

/// Moves the owner along a fixed velocity and spins it
pub struct Drift {
    core: ComponentCore,
    velocity: Vec2,
    spin: f32,
}

impl Drift {
    pub fn new(core: ComponentCore, velocity: Vec2, spin: f32) -> Self {
        Self { core, velocity, spin }
    }

    pub fn random(core: ComponentCore, rng: &mut impl Rng) -> Self {
        let heading = utils::heading(rng.gen_range(0.0..360.0));
        Self::new(core, heading * rng.gen_range(5.0_f32..20.0), rng.gen_range(-90.0..90.0))
    }
}

impl Component for Drift {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    #[allow(clippy::cast_possible_truncation)]
    fn update(&mut self, entity: &mut EntityContext<'_>, dt: f64) {
        let dt = dt as f32;
        let position = *entity.position() + self.velocity * dt;
        let rotation = entity.rotation() + self.spin * dt;
        entity.set_position(position);
        entity.set_rotation(rotation);
    }

    fn render(&self, _entity: &EntityState) {}
}

/// Rock that breaks apart after a while, taking its owner with it
pub struct Rock {
    core: ComponentCore,
    size: u32,
    remaining: f64,
}

impl Rock {
    pub fn new(core: ComponentCore, size: u32, lifetime: f64) -> Self {
        Self { core, size, remaining: lifetime }
    }
}

impl Hazard for Rock {
    fn damage(&self) -> u32 {
        self.size * 10
    }
}

impl Component for Rock {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn update(&mut self, entity: &mut EntityContext<'_>, dt: f64) {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            log::debug!("Rock {:?} broke apart at {:?}", self.owner(), entity.position());
            entity.set_for_delete();
        }
    }

    fn render(&self, entity: &EntityState) {
        log::trace!(
            "rock size {} at ({:.1}, {:.1}) rot {:.0}",
            self.size,
            entity.position().x,
            entity.position().y,
            entity.rotation()
        );
    }

    fn capabilities(this: &ComponentHandle<Self>, caps: &mut Capabilities) {
        caps.provide::<dyn Hazard>(this.clone());
    }
}

/// Stationary mine; a hazard that never expires
pub struct Mine {
    core: ComponentCore,
}

impl Mine {
    pub fn new(core: ComponentCore) -> Self {
        Self { core }
    }
}

impl Hazard for Mine {
    fn damage(&self) -> u32 {
        50
    }
}

impl Component for Mine {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn update(&mut self, _entity: &mut EntityContext<'_>, _dt: f64) {}

    fn render(&self, entity: &EntityState) {
        log::trace!("mine at ({:.1}, {:.1})", entity.position().x, entity.position().y);
    }

    fn capabilities(this: &ComponentHandle<Self>, caps: &mut Capabilities) {
        caps.provide::<dyn Hazard>(this.clone());
    }
}

/// Shield that blinks its owner while active, then removes itself
pub struct SpawnShield {
    core: ComponentCore,
    remaining: f64,
    blink: f64,
}

impl SpawnShield {
    pub fn new(core: ComponentCore, duration: f64) -> Self {
        Self { core, remaining: duration, blink: 0.0 }
    }
}

impl Component for SpawnShield {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn update(&mut self, entity: &mut EntityContext<'_>, dt: f64) {
        self.remaining -= dt;
        self.blink += dt;
        if self.blink >= 0.1 {
            self.blink = 0.0;
            let visible = entity.is_visible();
            entity.set_visible(!visible);
        }

        if self.remaining <= 0.0 {
            entity.set_visible(true);
            self.core.mark_for_deletion();
            log::info!("Spawn shield on {:?} expired", self.owner());
        }
    }

    fn render(&self, _entity: &EntityState) {}
}
