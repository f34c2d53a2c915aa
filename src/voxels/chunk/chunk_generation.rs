//! # Chunk Generation Module
//!
//! This module fills a chunk from the terrain functions. Generation runs in
//! three passes over a chunk that is exclusively owned by the caller:
//!
//! 1. **Terrain fill** - every cell is written in index order from the
//!    column's height and biome
//! 2. **Decorations** - trees are chosen for the chunk's sample columns
//! 3. **Ores** - veins replace fill material below the surface
//!
//! The two random passes draw from one `fastrand::Rng` seeded from the world
//! seed and the chunk position, so a chunk regenerates identically.

use log::trace;

use crate::config::OreConfig;
use crate::voxels::block::{BlockId, AIR, BEDROCK, FILL};
use crate::voxels::block::block_type::BlockType;
use crate::voxels::generation::{
    decorations::place_decorations,
    ores::{scatter_ores, OreCatalog},
    terrain::{Biome, TerrainGenerator},
};

use super::{Chunk, ChunkPos, CHUNK_DIMENSION, CHUNK_HEIGHT, CHUNK_PLANE_SIZE, CHUNK_SIZE};

/// Everything a chunk needs to generate itself, borrowed from the world.
#[derive(Clone, Copy)]
pub struct ChunkGenerator<'a> {
    /// Shared terrain functions.
    pub terrain: &'a TerrainGenerator,
    /// Ores available to the scattering pass. Empty before world init.
    pub ores: &'a OreCatalog,
    /// Vein constants.
    pub ore_config: &'a OreConfig,
}

impl<'a> ChunkGenerator<'a> {
    /// Bundles the generation inputs.
    pub fn new(terrain: &'a TerrainGenerator, ores: &'a OreCatalog, ore_config: &'a OreConfig) -> Self {
        ChunkGenerator {
            terrain,
            ores,
            ore_config,
        }
    }

    /// Creates and generates a new chunk at `position`.
    pub fn generate(&self, position: ChunkPos) -> Chunk {
        let mut chunk = Chunk::empty(position);
        chunk.generate(self);
        chunk
    }
}

/// Derives the per-chunk random seed from the world seed and chunk position.
pub fn chunk_seed(world_seed: u32, position: ChunkPos) -> u64 {
    let mut h = world_seed as u64;
    h ^= (position.x as u32 as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    h = h.rotate_left(31) ^ (position.z as u32 as u64).wrapping_mul(0xc2b2_ae3d_27d4_eb4f);
    h ^ (h >> 29)
}

/// Height and biome of one column, sampled once per generation.
#[derive(Clone, Copy)]
struct Column {
    height: i32,
    surface: BlockId,
}

impl Chunk {
    /// Overwrites this chunk with freshly generated content.
    ///
    /// The block array is replaced wholesale; previous decorations are
    /// discarded. The mesh is left untouched and must be rebuilt by the caller.
    ///
    /// # Arguments
    /// * `generator` - The shared terrain functions and ore registry
    pub fn generate(&mut self, generator: &ChunkGenerator) {
        let terrain = generator.terrain;
        let fill_top = terrain.config().fill_top;
        let origin = self.position.origin();

        let columns: Vec<Column> = (0..CHUNK_PLANE_SIZE)
            .map(|i| {
                let world_x = origin.x + i % CHUNK_DIMENSION;
                let world_z = origin.z + i / CHUNK_DIMENSION;
                let biome: Biome = terrain.biome(world_x, world_z);
                Column {
                    height: terrain.height(world_x, world_z),
                    surface: biome.surface_block(),
                }
            })
            .collect();

        // Pushed in index order: x fastest, then z, then y.
        let mut blocks = Vec::with_capacity(CHUNK_SIZE);
        for y in 0..CHUNK_HEIGHT {
            for column in &columns {
                let block = if y == 0 {
                    BEDROCK
                } else if y < column.height {
                    if y < fill_top {
                        FILL
                    } else {
                        BlockType::DIRT.id()
                    }
                } else if y == column.height {
                    column.surface
                } else {
                    // Nothing above the surface, even below `fill_top`: ores
                    // only replace fill, so no fill may sit above a surface.
                    AIR
                };
                blocks.push(block);
            }
        }
        self.blocks = blocks.into_boxed_slice();

        let mut rng = fastrand::Rng::with_seed(chunk_seed(terrain.seed(), self.position));
        self.decorations = place_decorations(self.position, terrain, &mut rng);
        let ore_cells = scatter_ores(self, generator.ores, generator.ore_config, &mut rng);

        trace!(
            "Generated chunk ({}, {}): {} decorations, {} ore cells",
            self.position.x,
            self.position.z,
            self.decorations.len(),
            ore_cells
        );
    }
}
