//! Graveyard factory: mausoleums, ranked gravestones, dead trees, a
//! wrought-iron fence ring, and one dying entrance lamp.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng};

use crate::procgen::layout::BlockFootprint;
use crate::procgen::perimeter;
use crate::procgen::vegetation;
use crate::world::entities::{
    CityBlock, CityWorld, Gravestone, GravestoneStyle, Mausoleum, StreetLamp, Tree, TreeKind,
};

/// Tuning for graveyard blocks.
#[derive(Clone, Debug)]
pub struct GraveyardConfig {
    /// Inclusive gravestone grid dimensions.
    pub row_min: usize,
    pub row_max: usize,
    pub column_min: usize,
    pub column_max: usize,
    /// Fraction of the block covered by the gravestone grid.
    pub grid_fraction: f32,
    /// Per-stone positional jitter.
    pub stone_jitter: f32,
    /// Stones this close to a mausoleum are skipped.
    pub mausoleum_clearance: f32,
    /// Inclusive dead-tree count range.
    pub tree_min: usize,
    pub tree_max: usize,
    /// Minimum distance trees keep from the block edge.
    pub tree_margin: f32,
    /// Fence inset as a fraction of block size.
    pub fence_margin_fraction: f32,
    pub fence_height: f32,
    /// The entrance lamp almost never works.
    pub lamp_working_probability: f64,
}

impl Default for GraveyardConfig {
    fn default() -> Self {
        Self {
            row_min: 5,
            row_max: 7,
            column_min: 4,
            column_max: 6,
            grid_fraction: 0.7,
            stone_jitter: 0.8,
            mausoleum_clearance: 4.0,
            tree_min: 3,
            tree_max: 5,
            tree_margin: 3.0,
            fence_margin_fraction: 0.08,
            fence_height: 2.5,
            lamp_working_probability: 0.3,
        }
    }
}

pub fn generate(
    world: &mut CityWorld,
    block: &mut CityBlock,
    footprint: &BlockFootprint,
    config: &GraveyardConfig,
    rng: &mut StdRng,
) {
    let center = footprint.center();

    // Mausoleums first; the gravestone grid flows around them.
    let num_mausoleums = rng.gen_range(1..=2usize);
    let mut mausoleum_positions = Vec::with_capacity(num_mausoleums);
    for i in 0..num_mausoleums {
        let position = if num_mausoleums == 1 {
            center
        } else if i == 0 {
            center - Vec2::new(footprint.size * 0.2, 0.0)
        } else {
            center + Vec2::new(footprint.size * 0.2, 0.0)
        };
        mausoleum_positions.push(position);
        world.mausoleums.push(Mausoleum {
            position,
            width: 3.0 + rng.gen::<f32>() * 2.0,
            depth: 3.0 + rng.gen::<f32>() * 2.0,
            height: 4.0 + rng.gen::<f32>() * 3.0,
            rotation: (rng.gen_range(0..4) * 90) as f32,
        });
    }

    // Classic ranked cemetery rows with per-stone jitter.
    let rows = rng.gen_range(config.row_min..=config.row_max);
    let columns = rng.gen_range(config.column_min..=config.column_max);
    let row_spacing = footprint.size * config.grid_fraction / rows as f32;
    let column_spacing = footprint.size * config.grid_fraction / columns as f32;
    let start = footprint.origin + Vec2::splat(footprint.size * (1.0 - config.grid_fraction) * 0.5);

    for row in 0..rows {
        for column in 0..columns {
            let jitter =
                Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * config.stone_jitter;
            let position = start
                + Vec2::new(column as f32 * column_spacing, row as f32 * row_spacing)
                + jitter;

            let too_close = mausoleum_positions
                .iter()
                .any(|m| position.distance(*m) < config.mausoleum_clearance);
            if too_close {
                continue;
            }

            world.gravestones.push(Gravestone {
                position,
                width: 0.4 + rng.gen::<f32>() * 0.3,
                depth: 0.15 + rng.gen::<f32>() * 0.1,
                height: 1.0 + rng.gen::<f32>() * 1.5,
                rotation: (rng.gen::<f32>() - 0.5) * 30.0,
                style: pick_stone_style(rng),
            });
        }
    }

    // Dead trees scattered radially toward the edges.
    let num_trees = rng.gen_range(config.tree_min..=config.tree_max);
    for i in 0..num_trees {
        let angle = i as f32 / num_trees as f32 * TAU + rng.gen::<f32>() * 0.5;
        let distance = footprint.size * (0.3 + rng.gen::<f32>() * 0.15);
        let position = footprint.clamp_inside(
            center + Vec2::new(angle.cos(), angle.sin()) * distance,
            config.tree_margin,
        );
        let (trunk_color, foliage_color) = vegetation::graveyard_tree_colors(rng);
        world.trees.push(Tree {
            position,
            height: 7.0 + rng.gen::<f32>() * 5.0,
            trunk_color,
            foliage_color,
            scale: 1.0 + rng.gen::<f32>() * 0.5,
            kind: TreeKind::Dead,
        });
    }

    world.fences.extend(perimeter::fence_ring(
        footprint,
        config.fence_margin_fraction,
        config.fence_height,
    ));

    // A single lamp by the front gate.
    let index = world.push_lamp(StreetLamp {
        position: Vec2::new(center.x, footprint.origin.y + footprint.size * 0.1),
        height: 4.0 + rng.gen::<f32>(),
        flicker_phase: rng.gen::<f32>() * TAU,
        is_working: rng.gen_bool(config.lamp_working_probability),
    });
    block.lamp_indices.push(index);
}

fn pick_stone_style(rng: &mut StdRng) -> GravestoneStyle {
    match rng.gen_range(0..4) {
        0 => GravestoneStyle::Slab,
        1 => GravestoneStyle::Cross,
        2 => GravestoneStyle::Obelisk,
        _ => GravestoneStyle::Rounded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::entities::BlockType;
    use rand::SeedableRng;

    fn run_factory(seed: u64) -> (CityWorld, CityBlock) {
        let mut world = CityWorld::default();
        let footprint = BlockFootprint::new(Vec2::new(160.0, -40.0), 30.0);
        let mut block = CityBlock::new(IVec2::new(4, -1), footprint.origin, BlockType::Graveyard);
        let mut rng = StdRng::seed_from_u64(seed);
        generate(
            &mut world,
            &mut block,
            &footprint,
            &GraveyardConfig::default(),
            &mut rng,
        );
        (world, block)
    }

    #[test]
    fn every_graveyard_tree_is_dead() {
        for seed in 0..10 {
            let (world, _) = run_factory(seed);
            assert!(!world.trees.is_empty());
            assert!(world.trees.iter().all(|t| t.kind == TreeKind::Dead));
        }
    }

    #[test]
    fn gravestones_keep_clear_of_mausoleums() {
        let config = GraveyardConfig::default();
        for seed in 0..10 {
            let (world, _) = run_factory(seed);
            for stone in &world.gravestones {
                for mausoleum in &world.mausoleums {
                    assert!(
                        stone.position.distance(mausoleum.position) >= config.mausoleum_clearance
                    );
                }
            }
        }
    }

    #[test]
    fn graveyard_has_fence_ring_and_one_entrance_lamp() {
        let (world, block) = run_factory(3);
        assert_eq!(world.fences.len(), 4);
        assert_eq!(world.lamps.len(), 1);
        assert_eq!(block.lamp_indices.len(), 1);
        assert!(world.mausoleums.len() >= 1 && world.mausoleums.len() <= 2);
    }
}
