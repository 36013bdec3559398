//! Building-block factory: dense clusters of dark tenements and towers.

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng};

use crate::procgen::layout::BlockFootprint;
use crate::procgen::placement::{place_non_overlapping, PlacementParams};
use crate::procgen::FactoryOutcome;
use crate::world::entities::{Building, BuildingStyle, CityBlock, CityWorld};

/// Tuning for downtown building blocks.
#[derive(Clone, Debug)]
pub struct BuildingFactoryConfig {
    /// Inclusive range of buildings requested per block.
    pub count_min: usize,
    pub count_max: usize,
    /// Half-extent range shared by width and depth.
    pub half_extent_min: f32,
    pub half_extent_max: f32,
    pub height_min: f32,
    pub height_max: f32,
    /// Probability that a building gets lit windows.
    pub windows_probability: f64,
    pub placement: PlacementParams,
}

impl Default for BuildingFactoryConfig {
    fn default() -> Self {
        Self {
            count_min: 3,
            count_max: 6,
            half_extent_min: 2.0,
            half_extent_max: 5.0,
            height_min: 8.0,
            height_max: 36.0,
            windows_probability: 0.95,
            placement: PlacementParams::default(),
        }
    }
}

/// Everything about a candidate except its position, which the placement
/// engine resolves.
struct BuildingSeed {
    width: f32,
    depth: f32,
    height: f32,
    rotation: f32,
    color: Vec3,
    style: BuildingStyle,
    has_windows: bool,
    window_pattern: u8,
}

pub fn generate(
    world: &mut CityWorld,
    block: &mut CityBlock,
    footprint: &BlockFootprint,
    config: &BuildingFactoryConfig,
    rng: &mut StdRng,
) -> FactoryOutcome {
    let requested = rng.gen_range(config.count_min..=config.count_max);

    let placed = place_non_overlapping(footprint, requested, &config.placement, rng, |rng| {
        let width = rng.gen_range(config.half_extent_min..config.half_extent_max);
        let depth = rng.gen_range(config.half_extent_min..config.half_extent_max);
        let seed = BuildingSeed {
            width,
            depth,
            height: rng.gen_range(config.height_min..config.height_max),
            rotation: near_cardinal_rotation(rng),
            color: facade_color(rng),
            style: pick_style(rng),
            has_windows: rng.gen_bool(config.windows_probability),
            window_pattern: rng.gen_range(0..4),
        };
        let radius = width.max(depth);
        (seed, radius)
    });

    let outcome = FactoryOutcome {
        requested,
        placed: placed.len(),
    };

    for p in placed {
        let seed = p.item;
        let index = world.push_building(Building {
            position: p.position,
            width: seed.width,
            depth: seed.depth,
            height: seed.height,
            rotation: seed.rotation,
            color: seed.color,
            style: seed.style,
            has_windows: seed.has_windows,
            window_pattern: seed.window_pattern,
        });
        block.building_indices.push(index);
    }

    outcome
}

/// Near-cardinal yaw with a little drift, so facades read as a grid city
/// without looking stamped.
fn near_cardinal_rotation(rng: &mut StdRng) -> f32 {
    (rng.gen_range(0..4) * 90) as f32 + (rng.gen::<f32>() - 0.5) * 10.0
}

/// Desaturated, dark facade colors with a faint blue cast.
fn facade_color(rng: &mut StdRng) -> Vec3 {
    let base = 0.15 + rng.gen::<f32>() * 0.15;
    Vec3::new(
        base + rng.gen::<f32>() * 0.05,
        base + rng.gen::<f32>() * 0.05,
        base + rng.gen::<f32>() * 0.08,
    )
}

fn pick_style(rng: &mut StdRng) -> BuildingStyle {
    match rng.gen_range(0..3) {
        0 => BuildingStyle::Slab,
        1 => BuildingStyle::Tower,
        _ => BuildingStyle::Tenement,
    }
}
