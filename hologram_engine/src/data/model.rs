// Engine-side value types. Everything here crosses the scan-thread boundary,
// so it is plain data: no handles, no world references.

use std::time::Instant;

use bevy::math::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Identity of the entity a hologram is rendered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// Surface material reported by the world for a scanned column.
///
/// The set covers what commonly tops a column: terrain, plants, tree canopies,
/// exposed ores, and the player-made blocks worth distinguishing on a map.
/// Anything without a palette entry renders in the neutral fallback color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    // Natural terrain
    GrassBlock,
    Dirt,
    Stone,
    Cobblestone,
    Sand,
    Gravel,
    Clay,
    Water,
    Sandstone,
    RedSand,
    RedSandstone,
    Snow,
    Ice,
    PackedIce,
    BlueIce,
    Mud,
    // Vegetation
    TallGrass,
    Fern,
    LargeFern,
    Poppy,
    Dandelion,
    BlueOrchid,
    Cornflower,
    OxeyeDaisy,
    Sunflower,
    Lilac,
    RoseBush,
    Peony,
    LilyPad,
    SugarCane,
    Kelp,
    Seagrass,
    Bamboo,
    MossBlock,
    Vine,
    SweetBerryBush,
    // Trees
    OakLog,
    SpruceLog,
    BirchLog,
    JungleLog,
    AcaciaLog,
    DarkOakLog,
    MangroveLog,
    CherryLog,
    OakLeaves,
    SpruceLeaves,
    BirchLeaves,
    JungleLeaves,
    AcaciaLeaves,
    DarkOakLeaves,
    MangroveLeaves,
    CherryLeaves,
    // Ores exposed at the surface
    CoalOre,
    IronOre,
    GoldOre,
    RedstoneOre,
    LapisOre,
    DiamondOre,
    EmeraldOre,
    CopperOre,
    // Mushrooms
    BrownMushroom,
    RedMushroom,
    // Player-made
    OakPlanks,
    SprucePlanks,
    BirchPlanks,
    JunglePlanks,
    AcaciaPlanks,
    DarkOakPlanks,
    StoneBricks,
    Bricks,
    // Generated structures
    Cobweb,
    BeeNest,
    // No palette entry; these fall through to the neutral color
    Bedrock,
    Obsidian,
    Andesite,
    Diorite,
    Granite,
    Deepslate,
    Basalt,
    Terracotta,
    Glass,
}

/// One scanned surface point: offset relative to the scan center
/// (`x`, `height - center.y`, `z`) and the material found there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sample {
    pub offset: IVec3,
    pub material: Material,
}

/// Axis-aligned bounds over a scan's sample offsets, grown one sample at a
/// time during the scan pass. `min <= max` on every axis once at least one
/// sample has been folded in; a degenerate axis (`min == max`) is legal and
/// projects to the volume midpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for ScanBounds {
    fn default() -> Self {
        Self {
            min: Vec3::INFINITY,
            max: Vec3::NEG_INFINITY,
        }
    }
}

impl ScanBounds {
    /// Grow the bounds to contain `offset`.
    pub fn update(&mut self, offset: IVec3) {
        let point = offset.as_vec3();
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// True until the first `update`.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn range(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Immutable result of one terrain scan. Published behind an `Arc` and read
/// concurrently by the foreground emission pass; never mutated afterwards.
#[derive(Clone, Debug)]
pub struct ScanSnapshot {
    pub samples: Vec<Sample>,
    pub bounds: ScanBounds,
    /// Columns whose height the world could not resolve; their samples carry
    /// the scan center's height instead.
    pub unresolved: u32,
    pub captured_at: Instant,
}

/// Fixed-size region the scanned terrain is squeezed into for viewing:
/// `width`/`depth` centered on the display anchor, `height` rising from it.
#[derive(Clone, Copy, Debug)]
pub struct DisplayVolume {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for DisplayVolume {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 5.0,
            depth: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_start_empty_and_grow() {
        let mut bounds = ScanBounds::default();
        assert!(bounds.is_empty());

        bounds.update(IVec3::new(2, -3, 1));
        assert!(!bounds.is_empty());
        assert_eq!(bounds.min, Vec3::new(2.0, -3.0, 1.0));
        assert_eq!(bounds.max, Vec3::new(2.0, -3.0, 1.0));

        bounds.update(IVec3::new(-1, 5, 1));
        assert_eq!(bounds.min, Vec3::new(-1.0, -3.0, 1.0));
        assert_eq!(bounds.max, Vec3::new(2.0, 5.0, 1.0));
        assert_eq!(bounds.range(), Vec3::new(3.0, 8.0, 0.0));
    }

    #[test]
    fn single_sample_bounds_are_degenerate_not_invalid() {
        let mut bounds = ScanBounds::default();
        bounds.update(IVec3::new(0, 7, 0));
        assert!(bounds.min.cmple(bounds.max).all());
        assert_eq!(bounds.range(), Vec3::ZERO);
    }
}
