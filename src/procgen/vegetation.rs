//! Tree typing rolls and foliage palettes shared by the planted factories.

use bevy::prelude::*;
use rand::Rng;

use crate::world::entities::TreeKind;

/// Weighted distribution over tree kinds, in relative parts.
#[derive(Clone, Copy, Debug)]
pub struct TreeKindWeights {
    pub layered: u32,
    pub dead: u32,
    pub twisted: u32,
}

impl Default for TreeKindWeights {
    fn default() -> Self {
        Self {
            layered: 30,
            dead: 45,
            twisted: 25,
        }
    }
}

pub fn roll_tree_kind<R: Rng>(weights: &TreeKindWeights, rng: &mut R) -> TreeKind {
    let total = weights.layered + weights.dead + weights.twisted;
    if total == 0 {
        return TreeKind::Dead;
    }
    let roll = rng.gen_range(0..total);
    if roll < weights.layered {
        TreeKind::Layered
    } else if roll < weights.layered + weights.dead {
        TreeKind::Dead
    } else {
        TreeKind::Twisted
    }
}

/// Foliage condition used by the forest factory. Rolled independently of
/// the geometric kind so color and silhouette vary separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthTier {
    Healthy,
    Sickly,
    Dead,
}

pub fn roll_health_tier<R: Rng>(rng: &mut R) -> HealthTier {
    let roll = rng.gen::<f32>();
    if roll < 0.25 {
        HealthTier::Healthy
    } else if roll < 0.65 {
        HealthTier::Sickly
    } else {
        HealthTier::Dead
    }
}

/// Dark specimen palette for park trees: (trunk, foliage).
pub fn park_tree_colors<R: Rng>(rng: &mut R) -> (Vec3, Vec3) {
    let trunk = Vec3::new(
        0.12 + rng.gen::<f32>() * 0.05,
        0.10 + rng.gen::<f32>() * 0.05,
        0.08 + rng.gen::<f32>() * 0.03,
    );
    let foliage = Vec3::new(
        0.08 + rng.gen::<f32>() * 0.05,
        0.12 + rng.gen::<f32>() * 0.08,
        0.06 + rng.gen::<f32>() * 0.04,
    );
    (trunk, foliage)
}

/// Near-black palette for graveyard trees.
pub fn graveyard_tree_colors<R: Rng>(rng: &mut R) -> (Vec3, Vec3) {
    let trunk = Vec3::new(
        0.08 + rng.gen::<f32>() * 0.04,
        0.06 + rng.gen::<f32>() * 0.03,
        0.05 + rng.gen::<f32>() * 0.02,
    );
    (trunk, Vec3::splat(0.05))
}

/// Forest palette keyed by health tier: (trunk, foliage).
pub fn forest_tree_colors<R: Rng>(tier: HealthTier, rng: &mut R) -> (Vec3, Vec3) {
    let trunk = Vec3::new(
        0.10 + rng.gen::<f32>() * 0.05,
        0.08 + rng.gen::<f32>() * 0.04,
        0.06 + rng.gen::<f32>() * 0.03,
    );
    let foliage = match tier {
        HealthTier::Healthy => Vec3::new(
            0.08 + rng.gen::<f32>() * 0.04,
            0.16 + rng.gen::<f32>() * 0.08,
            0.07 + rng.gen::<f32>() * 0.03,
        ),
        HealthTier::Sickly => Vec3::new(
            0.13 + rng.gen::<f32>() * 0.05,
            0.12 + rng.gen::<f32>() * 0.04,
            0.04 + rng.gen::<f32>() * 0.02,
        ),
        HealthTier::Dead => Vec3::splat(0.05 + rng.gen::<f32>() * 0.03),
    };
    (trunk, foliage)
}
