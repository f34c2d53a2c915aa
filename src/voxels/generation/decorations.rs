//! # Decorations
//!
//! Non-block props placed on top of generated terrain. Decorations are not
//! written into the block array: they ride along with the chunk and are
//! handed to the render root with every rebuilt mesh.

use cgmath::Point3;

use crate::voxels::chunk::{ChunkPos, CHUNK_DIMENSION};

use super::terrain::{Biome, DecorationKind, TerrainGenerator};

/// First local sample coordinate on each horizontal axis.
const SAMPLE_START: i32 = 4;
/// Spacing between sample coordinates.
const SAMPLE_STEP: usize = 8;
/// Chance that a tree-suitable sample actually grows one.
const TREE_CHANCE: f64 = 0.2;

/// A prop standing on the terrain of one chunk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decoration {
    /// A tree standing one cell above the surface.
    Tree {
        /// Chunk-local cell of the lowest trunk segment.
        base: Point3<i32>,
        /// Number of trunk segments, 5 to 7.
        trunk_height: u8,
        /// Radius of the foliage ball, in `[2, 3)`.
        foliage_radius: f32,
    },
}

impl Decoration {
    /// Chunk-local position of the decoration's base.
    pub fn base(&self) -> Point3<i32> {
        match self {
            Decoration::Tree { base, .. } => *base,
        }
    }
}

/// Chooses the decorations for the chunk at `position`.
///
/// A coarse grid of columns is sampled; a column grows a tree when the
/// terrain suggests one, the biome is not desert, and a roll on `rng`
/// succeeds. Rolls are only drawn for suitable columns.
pub fn place_decorations(
    position: ChunkPos,
    terrain: &TerrainGenerator,
    rng: &mut fastrand::Rng,
) -> Vec<Decoration> {
    let origin = position.origin();
    let mut decorations = Vec::new();

    for x in (SAMPLE_START..CHUNK_DIMENSION - SAMPLE_START).step_by(SAMPLE_STEP) {
        for z in (SAMPLE_START..CHUNK_DIMENSION - SAMPLE_START).step_by(SAMPLE_STEP) {
            let world_x = origin.x + x;
            let world_z = origin.z + z;

            if terrain.decoration(world_x, world_z) != DecorationKind::Tree
                || terrain.biome(world_x, world_z) == Biome::Desert
            {
                continue;
            }
            if rng.f64() >= TREE_CHANCE {
                continue;
            }

            let height = terrain.height(world_x, world_z);
            decorations.push(Decoration::Tree {
                base: Point3::new(x, height + 1, z),
                trunk_height: rng.u8(5..=7),
                foliage_radius: 2.0 + rng.f32(),
            });
        }
    }

    decorations
}
