//! Perimeter infrastructure: sidewalk lamps and edge planting.
//!
//! Walks the four edges of a block at a fixed step. Each slot flips a coin
//! between a sidewalk lamp just outside the block and a tree just inside
//! it. Trees give way to buildings already accepted in the block, so edge
//! planting thins out exactly where the block is built up.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng};

use crate::procgen::layout::BlockFootprint;
use crate::procgen::vegetation::{self, TreeKindWeights};
use crate::world::entities::{CityBlock, CityWorld, Fence, StreetLamp, Tree};

/// Tuning for per-edge lamps and planting.
#[derive(Clone, Debug)]
pub struct PerimeterConfig {
    /// Step interval along each edge.
    pub step: f32,
    /// How far outside the block edge lamps stand, toward the road.
    pub lamp_offset: f32,
    pub lamp_height_min: f32,
    pub lamp_height_max: f32,
    /// Street lamps work about two thirds of the time.
    pub lamp_working_probability: f64,
    /// How far inside the block edge trees are planted.
    pub tree_inset: f32,
    /// Extra gap required between an edge tree and a building footprint.
    pub building_clearance: f32,
    pub tree_kinds: TreeKindWeights,
}

impl Default for PerimeterConfig {
    fn default() -> Self {
        Self {
            step: 12.0,
            lamp_offset: 1.5,
            lamp_height_min: 5.0,
            lamp_height_max: 6.5,
            lamp_working_probability: 0.65,
            tree_inset: 2.5,
            building_clearance: 1.5,
            tree_kinds: TreeKindWeights::default(),
        }
    }
}

pub fn generate(
    world: &mut CityWorld,
    block: &mut CityBlock,
    footprint: &BlockFootprint,
    config: &PerimeterConfig,
    rng: &mut StdRng,
) {
    let min = footprint.origin;
    let max = footprint.max();

    // (edge start, direction along the edge, outward normal)
    let edges = [
        (Vec2::new(min.x, min.y), Vec2::X, Vec2::NEG_Y),
        (Vec2::new(min.x, max.y), Vec2::X, Vec2::Y),
        (Vec2::new(min.x, min.y), Vec2::Y, Vec2::NEG_X),
        (Vec2::new(max.x, min.y), Vec2::Y, Vec2::X),
    ];

    for (start, along, outward) in edges {
        let mut distance = config.step * 0.5;
        while distance < footprint.size {
            let slot = start + along * (distance + (rng.gen::<f32>() - 0.5) * 2.0);
            distance += config.step;

            if rng.gen_bool(0.5) {
                let index = world.push_lamp(StreetLamp {
                    position: slot + outward * config.lamp_offset,
                    height: rng.gen_range(config.lamp_height_min..config.lamp_height_max),
                    flicker_phase: rng.gen::<f32>() * TAU,
                    is_working: rng.gen_bool(config.lamp_working_probability),
                });
                block.lamp_indices.push(index);
            } else {
                let position = slot - outward * config.tree_inset;
                // No retry: a blocked slot is simply left bare.
                let blocked = block.building_indices.iter().any(|&i| {
                    let building = &world.buildings[i as usize];
                    position.distance(building.position)
                        < building.footprint_radius() + config.building_clearance
                });
                if blocked {
                    continue;
                }
                let (trunk_color, foliage_color) = vegetation::park_tree_colors(rng);
                world.trees.push(Tree {
                    position,
                    height: 4.0 + rng.gen::<f32>() * 5.0,
                    trunk_color,
                    foliage_color,
                    scale: 0.8 + rng.gen::<f32>() * 0.6,
                    kind: vegetation::roll_tree_kind(&config.tree_kinds, rng),
                });
            }
        }
    }
}

/// Four fence segments inset from the block edges by a fraction of the
/// block size. Shared by the industrial and graveyard factories.
pub fn fence_ring(footprint: &BlockFootprint, margin_fraction: f32, height: f32) -> [Fence; 4] {
    let min = footprint.origin + Vec2::splat(footprint.size * margin_fraction);
    let max = footprint.origin + Vec2::splat(footprint.size * (1.0 - margin_fraction));
    [
        Fence {
            start: Vec2::new(min.x, min.y),
            end: Vec2::new(max.x, min.y),
            height,
        },
        Fence {
            start: Vec2::new(min.x, max.y),
            end: Vec2::new(max.x, max.y),
            height,
        },
        Fence {
            start: Vec2::new(max.x, min.y),
            end: Vec2::new(max.x, max.y),
            height,
        },
        Fence {
            start: Vec2::new(min.x, min.y),
            end: Vec2::new(min.x, max.y),
            height,
        },
    ]
}
