//! Padded occupancy mask used for face culling.
//!
//! The mask stores one bit per cell for the chunk plus a one-cell border on
//! every side (`18 x 258 x 18`), so the six neighbours of any block can be
//! read without bounds checks or map lookups. The border is filled once per
//! rebuild from the loaded neighbour chunks.

use bitvec::vec::BitVec;

use crate::voxels::block::AIR;
use crate::voxels::chunk::{Chunk, ChunkPos, CHUNK_DIMENSION, CHUNK_HEIGHT};

use super::ChunkNeighborhood;

/// Width and depth of the mask including the border.
pub const DIMENSION_WRAPPED: usize = CHUNK_DIMENSION as usize + 2;
/// Height of the mask including the border.
pub const HEIGHT_WRAPPED: usize = CHUNK_HEIGHT as usize + 2;
/// Cells per horizontal plane of the mask.
pub const PLANE_SIZE_WRAPPED: usize = DIMENSION_WRAPPED * DIMENSION_WRAPPED;
/// Total cells in the mask.
pub const SIZE_WRAPPED: usize = PLANE_SIZE_WRAPPED * HEIGHT_WRAPPED;

/// Bit-per-cell solidity of a chunk and its one-cell border.
pub struct OccupancyMask {
    solid_array: BitVec,
}

impl OccupancyMask {
    /// Builds the mask for `chunk`.
    ///
    /// # Arguments
    /// * `chunk` - The chunk being meshed
    /// * `neighbors` - Source of the chunks across each horizontal edge
    ///
    /// Border cells take their solidity from the neighbouring chunk when it is
    /// loaded. An unloaded neighbour counts as solid at `y <= 0` and air above.
    /// The plane below the world is solid, the plane above it is air.
    pub fn build<N: ChunkNeighborhood + ?Sized>(chunk: &Chunk, neighbors: &N) -> Self {
        let mut mask = OccupancyMask {
            solid_array: BitVec::repeat(false, SIZE_WRAPPED),
        };

        for z in -1..=CHUNK_DIMENSION {
            for x in -1..=CHUNK_DIMENSION {
                mask.set(x, -1, z, true);
            }
        }

        for (position, _) in chunk.iter_blocks() {
            mask.set(position.x, position.y, position.z, true);
        }

        let position = chunk.position;
        let edges = [
            (ChunkPos::new(position.x - 1, position.z), -1, CHUNK_DIMENSION - 1, true),
            (ChunkPos::new(position.x + 1, position.z), CHUNK_DIMENSION, 0, true),
            (ChunkPos::new(position.x, position.z - 1), -1, CHUNK_DIMENSION - 1, false),
            (ChunkPos::new(position.x, position.z + 1), CHUNK_DIMENSION, 0, false),
        ];

        for (neighbor_position, border, source, along_x_edge) in edges {
            let neighbor = neighbors.chunk_at(neighbor_position);
            for y in 0..CHUNK_HEIGHT {
                for i in 0..CHUNK_DIMENSION {
                    let solid = match neighbor {
                        Some(neighbor) if along_x_edge => neighbor.get_block(source, y, i) != AIR,
                        Some(neighbor) => neighbor.get_block(i, y, source) != AIR,
                        None => y <= 0,
                    };
                    if along_x_edge {
                        mask.set(border, y, i, solid);
                    } else {
                        mask.set(i, y, border, solid);
                    }
                }
            }
        }

        mask
    }

    #[inline]
    fn index(x: i32, y: i32, z: i32) -> usize {
        (x + 1) as usize + (z + 1) as usize * DIMENSION_WRAPPED + (y + 1) as usize * PLANE_SIZE_WRAPPED
    }

    #[inline]
    fn set(&mut self, x: i32, y: i32, z: i32, solid: bool) {
        let index = Self::index(x, y, z);
        self.solid_array.set(index, solid);
    }

    /// Whether the cell at chunk-local `(x, y, z)` is occupied. Valid for
    /// `-1..=16` horizontally and `-1..=256` vertically.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.solid_array[Self::index(x, y, z)]
    }

    /// Whether any of the six neighbours of the in-chunk cell `(x, y, z)` is air.
    #[inline]
    pub fn is_exposed(&self, x: i32, y: i32, z: i32) -> bool {
        !self.is_solid(x + 1, y, z)
            || !self.is_solid(x - 1, y, z)
            || !self.is_solid(x, y + 1, z)
            || !self.is_solid(x, y - 1, z)
            || !self.is_solid(x, y, z + 1)
            || !self.is_solid(x, y, z - 1)
    }
}
