//! Shared non-overlapping placement primitive.
//!
//! Every factory that needs several randomly sized objects inside a block
//! funnels through [`place_non_overlapping`]: candidates are rejected when
//! they would cross the block boundary or crowd a previously accepted
//! candidate, with a hard attempt cap per object. Exhausting the cap drops
//! that one object; an under-populated block is acceptable, a stalled
//! generation pass is not.

use bevy::prelude::*;
use rand::Rng;

use crate::procgen::layout::BlockFootprint;

/// Margin and separation policy for one placement pass.
#[derive(Clone, Copy, Debug)]
pub struct PlacementParams {
    /// Fraction of the block size kept clear along every edge, on top of
    /// the candidate's own footprint radius.
    pub margin_fraction: f32,
    /// Extra center-to-center gap required between accepted candidates.
    pub min_separation: f32,
    /// Attempt cap per requested object.
    pub max_attempts: u32,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            margin_fraction: 0.15,
            min_separation: 1.0,
            max_attempts: 50,
        }
    }
}

/// One accepted candidate and where it ended up.
#[derive(Clone, Debug)]
pub struct Placed<C> {
    pub item: C,
    pub position: Vec2,
    /// Footprint radius the candidate was accepted with.
    pub radius: f32,
}

/// Place up to `count` sampled candidates inside `block` so that no two
/// footprints overlap and none crosses the block edge.
///
/// `sample` produces a fresh candidate payload plus its footprint radius on
/// every attempt. Best effort: the result may hold fewer than `count`
/// entries. A candidate whose radius leaves no usable interior is abandoned
/// without further retries for that slot.
pub fn place_non_overlapping<C, R, F>(
    block: &BlockFootprint,
    count: usize,
    params: &PlacementParams,
    rng: &mut R,
    mut sample: F,
) -> Vec<Placed<C>>
where
    R: Rng,
    F: FnMut(&mut R) -> (C, f32),
{
    let mut accepted: Vec<Placed<C>> = Vec::with_capacity(count);

    for _ in 0..count {
        let mut attempts = 0;
        while attempts < params.max_attempts {
            attempts += 1;

            let (item, radius) = sample(rng);
            let margin = block.size * params.margin_fraction + radius;
            let usable = block.size - 2.0 * margin;
            // Too large for this block; no amount of retrying will fit it.
            if usable <= 0.0 {
                break;
            }

            let position = block.origin
                + Vec2::new(
                    margin + rng.gen::<f32>() * usable,
                    margin + rng.gen::<f32>() * usable,
                );
            if !block.contains_with_radius(position, radius) {
                continue;
            }

            let crowded = accepted.iter().any(|existing| {
                position.distance(existing.position)
                    < radius + existing.radius + params.min_separation
            });
            if crowded {
                continue;
            }

            accepted.push(Placed {
                item,
                position,
                radius,
            });
            break;
        }
    }

    accepted
}
