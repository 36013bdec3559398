//! Ambient debris scatter: the post-pass that litters the finished city.
//!
//! Pure rejection sampling with a fixed trial budget. Trials landing too
//! close to a building produce nothing, so the final count is
//! probabilistic and at most the trial count.

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng};

use crate::procgen::FactoryOutcome;
use crate::world::entities::{AmbientKind, AmbientObject, CityWorld};

/// Tuning for the debris pass.
#[derive(Clone, Debug)]
pub struct AmbientConfig {
    /// Independent placement trials per run.
    pub trials: usize,
    /// Scatter field half-extent as a multiple of the world size.
    pub spread: f32,
    /// Minimum distance kept from every building center.
    pub building_clearance: f32,
    pub scale_min: f32,
    pub scale_max: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            trials: 300,
            spread: 0.75,
            building_clearance: 6.0,
            scale_min: 0.3,
            scale_max: 1.0,
        }
    }
}

pub fn scatter(
    world: &mut CityWorld,
    config: &AmbientConfig,
    world_size: f32,
    rng: &mut StdRng,
) -> FactoryOutcome {
    let half_extent = world_size * config.spread;
    let mut placed = 0;

    for _ in 0..config.trials {
        let position = Vec2::new(
            (rng.gen::<f32>() - 0.5) * 2.0 * half_extent,
            (rng.gen::<f32>() - 0.5) * 2.0 * half_extent,
        );

        let too_close = world
            .buildings
            .iter()
            .any(|b| position.distance(b.position) < config.building_clearance);
        if too_close {
            continue;
        }

        world.ambient_objects.push(AmbientObject {
            position,
            rotation: rng.gen::<f32>() * 360.0,
            kind: pick_kind(rng),
            scale: rng.gen_range(config.scale_min..config.scale_max),
        });
        placed += 1;
    }

    FactoryOutcome {
        requested: config.trials,
        placed,
    }
}

fn pick_kind(rng: &mut StdRng) -> AmbientKind {
    match rng.gen_range(0..4) {
        0 => AmbientKind::TrashPile,
        1 => AmbientKind::Barrel,
        2 => AmbientKind::Tire,
        _ => AmbientKind::Crate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::entities::{Building, BuildingStyle};
    use rand::SeedableRng;

    fn world_with_buildings() -> CityWorld {
        let mut world = CityWorld::default();
        for (x, y) in [(0.0, 0.0), (50.0, -30.0), (-80.0, 120.0)] {
            world.push_building(Building {
                position: Vec2::new(x, y),
                width: 4.0,
                depth: 3.0,
                height: 20.0,
                rotation: 0.0,
                color: Vec3::splat(0.2),
                style: BuildingStyle::Tower,
                has_windows: true,
                window_pattern: 0,
            });
        }
        world
    }

    #[test]
    fn debris_keeps_minimum_clearance_from_buildings() {
        let config = AmbientConfig::default();
        for seed in 0..10 {
            let mut world = world_with_buildings();
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = scatter(&mut world, &config, 360.0, &mut rng);
            assert_eq!(outcome.placed, world.ambient_objects.len());
            assert!(outcome.placed <= outcome.requested);
            for object in &world.ambient_objects {
                for building in &world.buildings {
                    assert!(
                        object.position.distance(building.position)
                            >= config.building_clearance
                    );
                }
            }
        }
    }

    #[test]
    fn debris_stays_inside_the_scatter_field() {
        let config = AmbientConfig::default();
        let mut world = CityWorld::default();
        let mut rng = StdRng::seed_from_u64(4);
        scatter(&mut world, &config, 360.0, &mut rng);
        let bound = 360.0 * config.spread;
        for object in &world.ambient_objects {
            assert!(object.position.x.abs() <= bound);
            assert!(object.position.y.abs() <= bound);
        }
    }
}
