//! Asteroid field demo
//!
//! Builds a scene with a ship, drifting rocks and a few mines, then runs it
//! through the frame loop. Pass a `.toml` or `.ron` config path as the first
//! argument to override the defaults.

mod components;

use components::{Drift, Hazard, Mine, Rock, SpawnShield};
use ecm::foundation::logging;
use ecm::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;

const ROCKS: usize = 12;
const MINES: usize = 3;
/// Mines never expire, so the field never empties on its own
const DEFAULT_FRAMES: u64 = 600;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

fn load_config(path: Option<&str>) -> Result<SimulationConfig, AppError> {
    let mut config = match path {
        Some(path) => SimulationConfig::load_from_file(path)?,
        None => SimulationConfig::new(),
    };
    if config.frame_limit.is_none() {
        log::debug!("No frame limit configured, stopping after {DEFAULT_FRAMES} frames");
        config.frame_limit = Some(DEFAULT_FRAMES);
    }
    config.validate()?;
    Ok(config)
}

fn populate(scene: &mut Scene, rng: &mut StdRng) {
    let ship = scene.spawn();
    {
        let mut ship = ship.borrow_mut();
        ship.add_tag("player");
        ship.add_tag("ship");
        ship.add_component(|core| Drift::new(core, Vec2::new(0.0, 2.0), 0.0));
        ship.add_component(|core| SpawnShield::new(core, 2.0));
    }

    for _ in 0..ROCKS {
        let rock = scene.spawn();
        let mut rock = rock.borrow_mut();
        rock.add_tag("asteroid");
        rock.add_tag("hazard");
        rock.set_position(Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)));
        rock.add_component(|core| Drift::random(core, rng));
        let size = rng.gen_range(1..4);
        let lifetime = rng.gen_range(1.0..8.0);
        rock.add_component(|core| Rock::new(core, size, lifetime));
    }

    for _ in 0..MINES {
        let mine = scene.spawn();
        let mut mine = mine.borrow_mut();
        mine.add_tag("hazard");
        mine.set_position(Vec2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)));
        mine.add_component(Mine::new);
    }
}

fn total_hazard(scene: &Scene) -> u32 {
    scene
        .entities()
        .find("hazard")
        .iter()
        .flat_map(|entity| entity.borrow().get_compatible_components::<dyn Hazard>())
        .map(|hazard| hazard.borrow().damage())
        .sum()
}

fn main() -> Result<(), AppError> {
    let config = load_config(std::env::args().nth(1).as_deref())?;
    logging::init_with_level(&config.log_level);

    let mut rng = StdRng::seed_from_u64(0x00a5_7e01);
    let mut scene = Scene::new("asteroid field");
    populate(&mut scene, &mut rng);

    log::info!(
        "{} entities, {} asteroids, hazard total {}",
        scene.entities().len(),
        scene.entities().find("asteroid").len(),
        total_hazard(&scene)
    );

    let mut driver = FrameLoop::new(config);
    let summary = driver.run(&mut scene);

    for ship in scene.entities().find_all(&["player", "ship"]) {
        let ship = ship.borrow();
        log::info!(
            "Ship at ({:.1}, {:.1}) with {} component(s)",
            ship.position().x,
            ship.position().y,
            ship.component_count()
        );
    }
    log::info!(
        "{} asteroids left, hazard total {}, {:.1} fps average",
        scene.entities().find("asteroid").len(),
        total_hazard(&scene),
        driver.timer().average_fps()
    );
    log::info!("Done: {summary:?}");

    scene.unload();
    Ok(())
}
