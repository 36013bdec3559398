//! Grid-to-world coordinate mapping and block footprint geometry.

use bevy::prelude::*;

/// Convert grid cell indices to the world-space origin of that block.
///
/// The stride is uniform: one block plus one road gap. Pure and total;
/// every other generation component builds on this mapping.
pub fn grid_to_world(grid: IVec2, block_size: f32, road_width: f32) -> Vec2 {
    let stride = block_size + road_width;
    Vec2::new(grid.x as f32 * stride, grid.y as f32 * stride)
}

/// World-space footprint of one block: the axis-aligned square spanning
/// `origin ..= origin + size` on both ground axes.
#[derive(Clone, Copy, Debug)]
pub struct BlockFootprint {
    pub origin: Vec2,
    pub size: f32,
}

impl BlockFootprint {
    pub fn new(origin: Vec2, size: f32) -> Self {
        Self { origin, size }
    }

    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::splat(self.size * 0.5)
    }

    pub fn max(&self) -> Vec2 {
        self.origin + Vec2::splat(self.size)
    }

    /// Whether a point with the given footprint radius stays fully inside
    /// the block.
    pub fn contains_with_radius(&self, point: Vec2, radius: f32) -> bool {
        point.x - radius >= self.origin.x
            && point.x + radius <= self.origin.x + self.size
            && point.y - radius >= self.origin.y
            && point.y + radius <= self.origin.y + self.size
    }

    /// Clamp a point so it sits at least `margin` inside every edge.
    pub fn clamp_inside(&self, point: Vec2, margin: f32) -> Vec2 {
        point.clamp(
            self.origin + Vec2::splat(margin),
            self.origin + Vec2::splat(self.size - margin),
        )
    }
}
