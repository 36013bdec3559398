//! Park factory: corner specimen trees, inward-facing benches, and a ring
//! of atmospheric lamps.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng};

use crate::procgen::layout::BlockFootprint;
use crate::procgen::vegetation::{self, TreeKindWeights};
use crate::world::entities::{Bench, CityBlock, CityWorld, StreetLamp, Tree};

/// Tuning for park blocks.
#[derive(Clone, Debug)]
pub struct ParkConfig {
    /// Corner tree offset from the block center, as a fraction of block size.
    pub corner_offset_fraction: f32,
    /// Minimum distance trees keep from the block edge.
    pub tree_margin: f32,
    /// Inclusive bench count range.
    pub bench_min: usize,
    pub bench_max: usize,
    /// Lamps in the central ring.
    pub lamp_ring_count: usize,
    /// Ring radius as a fraction of block size.
    pub lamp_ring_radius_fraction: f32,
    /// Parks feel safer, so most of their lamps work.
    pub lamp_working_probability: f64,
    pub tree_kinds: TreeKindWeights,
}

impl Default for ParkConfig {
    fn default() -> Self {
        Self {
            corner_offset_fraction: 0.35,
            tree_margin: 4.0,
            bench_min: 6,
            bench_max: 8,
            lamp_ring_count: 6,
            lamp_ring_radius_fraction: 0.28,
            lamp_working_probability: 0.75,
            tree_kinds: TreeKindWeights::default(),
        }
    }
}

pub fn generate(
    world: &mut CityWorld,
    block: &mut CityBlock,
    footprint: &BlockFootprint,
    config: &ParkConfig,
    rng: &mut StdRng,
) {
    let center = footprint.center();
    let offset = footprint.size * config.corner_offset_fraction;

    // One large specimen tree per corner quadrant.
    for corner in [
        Vec2::new(1.0, -1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, 1.0),
        Vec2::new(-1.0, -1.0),
    ] {
        let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * 2.0;
        let position = footprint.clamp_inside(center + corner * offset + jitter, config.tree_margin);
        let (trunk_color, foliage_color) = vegetation::park_tree_colors(rng);
        world.trees.push(Tree {
            position,
            height: 6.0 + rng.gen::<f32>() * 6.0,
            trunk_color,
            foliage_color,
            scale: 1.2 + rng.gen::<f32>() * 0.8,
            kind: vegetation::roll_tree_kind(&config.tree_kinds, rng),
        });
    }

    let num_benches = rng.gen_range(config.bench_min..=config.bench_max);
    for _ in 0..num_benches {
        world.benches.push(sample_edge_bench(footprint, rng));
    }

    // Lamp ring around the center, jittered so it doesn't read as geometry.
    for i in 0..config.lamp_ring_count {
        let angle = i as f32 / config.lamp_ring_count as f32 * TAU;
        let radius = footprint.size * config.lamp_ring_radius_fraction;
        let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * 2.0;
        let position = center + Vec2::new(angle.cos(), angle.sin()) * radius + jitter;
        let index = world.push_lamp(StreetLamp {
            position,
            height: 3.0 + rng.gen::<f32>(),
            flicker_phase: rng.gen::<f32>() * TAU,
            is_working: rng.gen_bool(config.lamp_working_probability),
        });
        block.lamp_indices.push(index);
    }
}

/// A bench hugging one of the four edges, rotated to face the park center.
fn sample_edge_bench(footprint: &BlockFootprint, rng: &mut StdRng) -> Bench {
    let close = footprint.size * 0.12;
    let along = footprint.size * 0.2 + rng.gen::<f32>() * footprint.size * 0.6;
    let min = footprint.origin;
    let max = footprint.max();

    match rng.gen_range(0..4) {
        // North edge, facing south.
        0 => Bench {
            position: Vec2::new(min.x + along, min.y + close),
            rotation: 0.0,
        },
        // South edge, facing north.
        1 => Bench {
            position: Vec2::new(min.x + along, max.y - close),
            rotation: 180.0,
        },
        // East edge, facing west.
        2 => Bench {
            position: Vec2::new(max.x - close, min.y + along),
            rotation: 270.0,
        },
        // West edge, facing east.
        _ => Bench {
            position: Vec2::new(min.x + close, min.y + along),
            rotation: 90.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::entities::BlockType;
    use rand::SeedableRng;

    fn run_factory(seed: u64) -> (CityWorld, CityBlock, BlockFootprint) {
        let mut world = CityWorld::default();
        let footprint = BlockFootprint::new(Vec2::new(80.0, 80.0), 30.0);
        let mut block = CityBlock::new(IVec2::new(2, 2), footprint.origin, BlockType::Park);
        let mut rng = StdRng::seed_from_u64(seed);
        generate(
            &mut world,
            &mut block,
            &footprint,
            &ParkConfig::default(),
            &mut rng,
        );
        (world, block, footprint)
    }

    #[test]
    fn park_gets_exactly_four_corner_trees() {
        let (world, _, footprint) = run_factory(2);
        assert_eq!(world.trees.len(), 4);
        for tree in &world.trees {
            assert!(footprint.contains_with_radius(tree.position, 0.0));
        }
    }

    #[test]
    fn bench_count_and_rotations_match_the_edges() {
        for seed in 0..8 {
            let (world, _, _) = run_factory(seed);
            assert!(world.benches.len() >= 6 && world.benches.len() <= 8);
            for bench in &world.benches {
                assert!([0.0, 90.0, 180.0, 270.0].contains(&bench.rotation));
            }
        }
    }

    #[test]
    fn lamp_ring_is_recorded_on_the_block() {
        let (world, block, _) = run_factory(6);
        assert_eq!(world.lamps.len(), 6);
        assert_eq!(block.lamp_indices.len(), 6);
    }
}
