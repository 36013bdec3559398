//! Entity records produced by generation and consumed by rendering.
//!
//! All collections are flat, insertion-ordered, and append-only while a
//! generation run is in progress; a regeneration clears and rebuilds them
//! as one unit. Blocks reference their buildings and lamps by index into
//! the flat vectors so per-block grouping (e.g. visibility culling) stays
//! O(1) per append with no copies.

#![allow(dead_code)]

use bevy::prelude::*;
use smallvec::SmallVec;

/// Thematic type of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockType {
    Empty,
    Building,
    Park,
    Industrial,
    Graveyard,
    Forest,
}

/// Geometric tree style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeKind {
    Layered,
    Dead,
    Twisted,
}

/// Silhouette hints the renderer can map onto building meshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildingStyle {
    Slab,
    Tower,
    Tenement,
    Warehouse,
}

/// Gravestone shape variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GravestoneStyle {
    Slab,
    Cross,
    Obelisk,
    Rounded,
}

/// Street debris variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmbientKind {
    TrashPile,
    Barrel,
    Tire,
    Crate,
}

/// One cell of the city grid.
#[derive(Clone, Debug)]
pub struct CityBlock {
    pub grid: IVec2,
    /// World-space origin (minimum corner) of the block footprint.
    pub origin: Vec2,
    pub block_type: BlockType,
    /// Indices into [`CityWorld::buildings`] for buildings placed in this block.
    pub building_indices: SmallVec<[u32; 8]>,
    /// Indices into [`CityWorld::lamps`]; also covers this block's
    /// perimeter infrastructure lamps.
    pub lamp_indices: SmallVec<[u32; 8]>,
}

impl CityBlock {
    pub fn new(grid: IVec2, origin: Vec2, block_type: BlockType) -> Self {
        Self {
            grid,
            origin,
            block_type,
            building_indices: SmallVec::new(),
            lamp_indices: SmallVec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Building {
    pub position: Vec2,
    /// Half-extent along local X.
    pub width: f32,
    /// Half-extent along local Z.
    pub depth: f32,
    pub height: f32,
    /// Yaw in degrees.
    pub rotation: f32,
    /// Linear RGB facade color.
    pub color: Vec3,
    pub style: BuildingStyle,
    pub has_windows: bool,
    /// Which of the window layouts (0..4) the renderer should tile.
    pub window_pattern: u8,
}

impl Building {
    /// Conservative footprint radius used for overlap, containment, and
    /// clearance checks regardless of yaw.
    pub fn footprint_radius(&self) -> f32 {
        self.width.max(self.depth)
    }
}

#[derive(Clone, Debug)]
pub struct StreetLamp {
    pub position: Vec2,
    pub height: f32,
    /// Phase offset in radians so lamps don't flicker in lockstep.
    pub flicker_phase: f32,
    pub is_working: bool,
}

#[derive(Clone, Debug)]
pub struct Tree {
    pub position: Vec2,
    pub height: f32,
    pub trunk_color: Vec3,
    pub foliage_color: Vec3,
    pub scale: f32,
    pub kind: TreeKind,
}

#[derive(Clone, Debug)]
pub struct Bench {
    pub position: Vec2,
    /// Yaw in degrees; benches face away from their edge.
    pub rotation: f32,
}

#[derive(Clone, Debug)]
pub struct Smokestack {
    pub position: Vec2,
    pub height: f32,
    pub radius: f32,
}

/// A straight fence run between two ground points.
#[derive(Clone, Debug)]
pub struct Fence {
    pub start: Vec2,
    pub end: Vec2,
    pub height: f32,
}

#[derive(Clone, Debug)]
pub struct Gravestone {
    pub position: Vec2,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    /// Yaw in degrees; stones lean slightly off-axis.
    pub rotation: f32,
    pub style: GravestoneStyle,
}

#[derive(Clone, Debug)]
pub struct Mausoleum {
    pub position: Vec2,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub rotation: f32,
}

#[derive(Clone, Debug)]
pub struct AmbientObject {
    pub position: Vec2,
    /// Yaw in degrees.
    pub rotation: f32,
    pub kind: AmbientKind,
    pub scale: f32,
}

/// Every entity produced by a generation run.
///
/// Exclusively owned and written by the generation pass, then read-only
/// for any consumer until the next full regeneration.
#[derive(Resource, Default, Clone, Debug)]
pub struct CityWorld {
    pub blocks: Vec<CityBlock>,
    pub buildings: Vec<Building>,
    pub lamps: Vec<StreetLamp>,
    pub trees: Vec<Tree>,
    pub benches: Vec<Bench>,
    pub smokestacks: Vec<Smokestack>,
    pub fences: Vec<Fence>,
    pub gravestones: Vec<Gravestone>,
    pub mausoleums: Vec<Mausoleum>,
    pub ambient_objects: Vec<AmbientObject>,
}

impl CityWorld {
    /// Empties every collection ahead of a regeneration run.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.buildings.clear();
        self.lamps.clear();
        self.trees.clear();
        self.benches.clear();
        self.smokestacks.clear();
        self.fences.clear();
        self.gravestones.clear();
        self.mausoleums.clear();
        self.ambient_objects.clear();
    }

    /// Append a building and return its index for block bookkeeping.
    pub fn push_building(&mut self, building: Building) -> u32 {
        let index = self.buildings.len() as u32;
        self.buildings.push(building);
        index
    }

    /// Append a street lamp and return its index for block bookkeeping.
    pub fn push_lamp(&mut self, lamp: StreetLamp) -> u32 {
        let index = self.lamps.len() as u32;
        self.lamps.push(lamp);
        index
    }
}
