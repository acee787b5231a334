//! # ECM
//!
//! Entity/component ownership and lifecycle engine for real-time
//! simulation loops.
//!
//! ## Features
//!
//! - **Owned components**: each entity privately owns an ordered list of
//!   behavior units and forwards update/render to them
//! - **Deferred deletion**: entities and components are flagged, then reaped
//!   by their owner at a fixed point in the frame
//! - **Typed queries**: retrieve components by exact type or by capability
//! - **Tag queries**: find entities carrying one or several tags
//!
//! ## Quick Start
//!
//! ```rust
//! use ecm::prelude::*;
//!
//! struct Spin {
//!     core: ComponentCore,
//!     speed: f32,
//! }
//!
//! impl Component for Spin {
//!     fn core(&self) -> &ComponentCore {
//!         &self.core
//!     }
//!
//!     fn update(&mut self, entity: &mut EntityContext<'_>, dt: f64) {
//!         let rotation = entity.rotation() + self.speed * dt as f32;
//!         entity.set_rotation(rotation);
//!     }
//!
//!     fn render(&self, _entity: &EntityState) {}
//! }
//!
//! let mut scene = Scene::new("demo");
//! let entity = scene.spawn();
//! entity.borrow_mut().add_tag("spinner");
//! entity.borrow_mut().add_component(|core| Spin { core, speed: 90.0 });
//!
//! scene.update(0.5);
//! scene.render();
//!
//! assert_eq!(scene.entities().find("spinner").len(), 1);
//! assert!((entity.borrow().rotation() - 45.0).abs() < 1e-4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod config;
pub mod foundation;
pub mod ecs;
pub mod scene;

mod engine;

#[cfg(test)]
mod testing;

pub use engine::{FrameLoop, FrameReport, RunSummary};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        FrameLoop, FrameReport, RunSummary,
        foundation::math::Vec2,
        ecs::{
            Capabilities, Component, ComponentCore, ComponentHandle, Entity, EntityContext,
            EntityFlags, EntityId, EntityManager, EntityRef, EntityState,
        },
        scene::{Scene, SceneId},
        core::config::{Config, ConfigError, SimulationConfig},
    };
}
