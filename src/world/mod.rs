//! World data: layout configuration plus the generated entity collections.
//!
//! Positions are 2D ground-plane coordinates: `Vec2::x` is world X and
//! `Vec2::y` is world Z. Heights are stored per entity.

use bevy::prelude::*;

pub mod entities;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CityConfig>()
            .init_resource::<entities::CityWorld>();
    }
}

/// Global city layout configuration, read-only during a generation run.
#[derive(Resource, Clone, Debug)]
pub struct CityConfig {
    /// Footprint side length of one city block.
    pub block_size: f32,
    /// Gap between adjacent blocks.
    pub road_width: f32,
    /// Blocks per axis; the grid spans `-city_grid_size/2 ..= +city_grid_size/2`.
    pub city_grid_size: i32,
    /// Outer bound used when scattering ambient debris.
    pub world_size: f32,
    /// Seed for every randomized choice made during generation.
    pub seed: u64,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            block_size: 30.0,
            road_width: 10.0,
            city_grid_size: 8,
            world_size: 360.0,
            seed: 1987,
        }
    }
}
