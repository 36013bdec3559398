//! Industrial factory: boxy warehouses, radial smokestacks, a chain-link
//! fence ring, and two barely working corner lamps.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng};

use crate::procgen::layout::BlockFootprint;
use crate::procgen::perimeter;
use crate::procgen::FactoryOutcome;
use crate::world::entities::{
    Building, BuildingStyle, CityBlock, CityWorld, Smokestack, StreetLamp,
};

/// Tuning for industrial yards.
#[derive(Clone, Debug)]
pub struct IndustrialConfig {
    /// Warehouse half-extent range.
    pub warehouse_half_extent_min: f32,
    pub warehouse_half_extent_max: f32,
    pub warehouse_height_min: f32,
    pub warehouse_height_max: f32,
    pub warehouse_windows_probability: f64,
    /// Inclusive smokestack count range.
    pub smokestack_min: usize,
    pub smokestack_max: usize,
    /// Smokestack ring radius as a fraction of block size.
    pub smokestack_ring_fraction: f32,
    /// Fence inset as a fraction of block size.
    pub fence_margin_fraction: f32,
    pub fence_height: f32,
    /// Industrial yards are mostly dark.
    pub lamp_working_probability: f64,
}

impl Default for IndustrialConfig {
    fn default() -> Self {
        Self {
            warehouse_half_extent_min: 6.0,
            warehouse_half_extent_max: 12.0,
            warehouse_height_min: 10.0,
            warehouse_height_max: 18.0,
            warehouse_windows_probability: 0.6,
            smokestack_min: 2,
            smokestack_max: 4,
            smokestack_ring_fraction: 0.3,
            fence_margin_fraction: 0.1,
            fence_height: 3.0,
            lamp_working_probability: 0.4,
        }
    }
}

pub fn generate(
    world: &mut CityWorld,
    block: &mut CityBlock,
    footprint: &BlockFootprint,
    config: &IndustrialConfig,
    rng: &mut StdRng,
) -> FactoryOutcome {
    let center = footprint.center();
    let num_warehouses = rng.gen_range(1..=2usize);

    for i in 0..num_warehouses {
        // One warehouse sits dead center; two split the block along X.
        let position = if num_warehouses == 1 {
            center
        } else if i == 0 {
            Vec2::new(
                footprint.origin.x + footprint.size * 0.35,
                center.y,
            )
        } else {
            Vec2::new(
                footprint.origin.x + footprint.size * 0.65,
                center.y,
            )
        };

        let index = world.push_building(Building {
            position,
            width: rng.gen_range(config.warehouse_half_extent_min..config.warehouse_half_extent_max),
            depth: rng.gen_range(config.warehouse_half_extent_min..config.warehouse_half_extent_max),
            height: rng.gen_range(config.warehouse_height_min..config.warehouse_height_max),
            rotation: (rng.gen_range(0..4) * 90) as f32,
            color: rusted_color(rng),
            style: BuildingStyle::Warehouse,
            has_windows: rng.gen_bool(config.warehouse_windows_probability),
            window_pattern: 0,
        });
        block.building_indices.push(index);
    }

    let num_stacks = rng.gen_range(config.smokestack_min..=config.smokestack_max);
    for i in 0..num_stacks {
        let angle = i as f32 / num_stacks as f32 * TAU;
        let distance = footprint.size * config.smokestack_ring_fraction;
        world.smokestacks.push(Smokestack {
            position: center + Vec2::new(angle.cos(), angle.sin()) * distance,
            height: 15.0 + rng.gen::<f32>() * 10.0,
            radius: 0.8 + rng.gen::<f32>() * 0.6,
        });
    }

    world.fences.extend(perimeter::fence_ring(
        footprint,
        config.fence_margin_fraction,
        config.fence_height,
    ));

    // Two lamps at opposite corners of the yard.
    for corner in [0.2f32, 0.8] {
        let index = world.push_lamp(StreetLamp {
            position: footprint.origin + Vec2::splat(footprint.size * corner),
            height: 6.0 + rng.gen::<f32>() * 2.0,
            flicker_phase: rng.gen::<f32>() * TAU,
            is_working: rng.gen_bool(config.lamp_working_probability),
        });
        block.lamp_indices.push(index);
    }

    // Fixed positions always succeed, but the outcome keeps the report's
    // building totals consistent across factories.
    FactoryOutcome {
        requested: num_warehouses,
        placed: num_warehouses,
    }
}

/// Dark grays shading into rusted brown.
fn rusted_color(rng: &mut StdRng) -> Vec3 {
    let base = 0.12 + rng.gen::<f32>() * 0.08;
    Vec3::new(
        base + rng.gen::<f32>() * 0.03,
        base - 0.02 + rng.gen::<f32>() * 0.02,
        base - 0.03 + rng.gen::<f32>() * 0.02,
    )
}
