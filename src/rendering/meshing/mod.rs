//! Mesh generation for voxel chunks.
//!
//! This module converts a chunk's block array into a [`ChunkMesh`]: one
//! instanced batch per block id plus individually placed shaped blocks.
//!
//! # Architecture
//! - `ChunkMesher`: Main interface; borrows the shared material cache and catalogs
//! - `OccupancyMask`: Padded solidity bits for the chunk and its one-cell border
//! - `mesh/`: The plain-data mesh types handed to the render root
//!
//! # Face Culling
//! A block is drawn when at least one of its six neighbours is air. Across
//! chunk edges the neighbour is read from the loaded chunk next door through
//! [`ChunkNeighborhood`]; an unloaded neighbour is treated as air above the
//! floor, so boundary blocks are conservatively drawn until it loads.

use std::collections::{BTreeMap, HashMap};

use cgmath::Point3;
use log::trace;

mod mesh;
mod occupancy;

pub use mesh::*;
pub use occupancy::OccupancyMask;

use crate::rendering::materials::{GeometryKind, MaterialCache, TextureCatalog};
use crate::voxels::block::{is_shaped, BlockId};
use crate::voxels::chunk::{Chunk, ChunkPos};
use crate::voxels::generation::ores::OreCatalog;

/// Read access to loaded chunks, used to cull faces across chunk edges.
pub trait ChunkNeighborhood {
    /// The loaded chunk at `position`, if any.
    fn chunk_at(&self, position: ChunkPos) -> Option<&Chunk>;
}

impl ChunkNeighborhood for HashMap<ChunkPos, Chunk> {
    fn chunk_at(&self, position: ChunkPos) -> Option<&Chunk> {
        self.get(&position)
    }
}

/// A neighbourhood with nothing loaded.
#[derive(Clone, Copy, Debug, Default)]
pub struct Isolated;

impl ChunkNeighborhood for Isolated {
    fn chunk_at(&self, _position: ChunkPos) -> Option<&Chunk> {
        None
    }
}

/// Builds chunk meshes against a shared material cache.
pub struct ChunkMesher<'a> {
    materials: &'a mut MaterialCache,
    catalog: &'a dyn TextureCatalog,
    ores: &'a OreCatalog,
}

impl<'a> ChunkMesher<'a> {
    /// Creates a mesher.
    ///
    /// # Arguments
    /// * `materials` - Append-only cache every produced batch draws its material from
    /// * `catalog` - Appearance source for new materials
    /// * `ores` - Fallback appearance source for ore ids
    pub fn new(
        materials: &'a mut MaterialCache,
        catalog: &'a dyn TextureCatalog,
        ores: &'a OreCatalog,
    ) -> Self {
        ChunkMesher {
            materials,
            catalog,
            ores,
        }
    }

    /// Builds the mesh for `chunk` from its current blocks.
    ///
    /// # Arguments
    /// * `chunk` - The chunk to mesh
    /// * `neighbors` - Loaded chunks consulted for boundary faces
    ///
    /// # Returns
    /// A complete mesh. Batches are sorted by block id; the chunk's
    /// decorations are copied in unchanged.
    pub fn build<N: ChunkNeighborhood + ?Sized>(&mut self, chunk: &Chunk, neighbors: &N) -> ChunkMesh {
        let mask = OccupancyMask::build(chunk, neighbors);

        let mut grouped: BTreeMap<BlockId, Vec<Point3<i32>>> = BTreeMap::new();
        let mut shaped = Vec::new();
        let origin = chunk.position.origin();

        for (position, block) in chunk.iter_blocks() {
            if !mask.is_exposed(position.x, position.y, position.z) {
                continue;
            }

            if is_shaped(block) {
                let geometry = GeometryKind::for_block(block);
                let world = Point3::new(origin.x + position.x, position.y, origin.z + position.z);
                shaped.push(ShapedBlock {
                    block,
                    material: self.materials.material_for(block, self.catalog, self.ores),
                    geometry,
                    position,
                    transform: InstanceTransform::for_cell(world, geometry),
                });
            } else {
                grouped.entry(block).or_default().push(position);
            }
        }

        let batches: Vec<RenderBatch> = grouped
            .into_iter()
            .map(|(block, positions)| RenderBatch {
                block,
                material: self.materials.material_for(block, self.catalog, self.ores),
                positions,
            })
            .collect();

        let mesh = ChunkMesh {
            position: chunk.position,
            batches,
            shaped,
            decorations: chunk.decorations().to_vec(),
        };

        trace!(
            "Meshed chunk ({}, {}): {} batches, {} instances",
            chunk.position.x,
            chunk.position.z,
            mesh.batches.len(),
            mesh.instance_count()
        );

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::materials::PaletteCatalog;
    use crate::voxels::block::block_type::BlockType;

    fn mesh_isolated(chunk: &Chunk) -> ChunkMesh {
        let mut materials = MaterialCache::new();
        let ores = OreCatalog::empty();
        ChunkMesher::new(&mut materials, &PaletteCatalog, &ores).build(chunk, &Isolated)
    }

    #[test]
    fn single_block_is_one_batch() {
        let mut chunk = Chunk::empty(ChunkPos::new(0, 0));
        chunk.set_block(4, 10, 4, BlockType::STONE.id());
        let mesh = mesh_isolated(&chunk);
        assert_eq!(mesh.batches.len(), 1);
        assert_eq!(mesh.batches[0].positions, vec![Point3::new(4, 10, 4)]);
    }

    #[test]
    fn enclosed_blocks_are_culled() {
        let mut chunk = Chunk::empty(ChunkPos::new(0, 0));
        for x in 3..6 {
            for y in 3..6 {
                for z in 3..6 {
                    chunk.set_block(x, y, z, BlockType::DIRT.id());
                }
            }
        }
        let mesh = mesh_isolated(&chunk);
        assert_eq!(mesh.instance_count(), 26);
        assert!(!mesh.contains(Point3::new(4, 4, 4)));
    }

    #[test]
    fn batches_are_sorted_by_block_id() {
        let mut chunk = Chunk::empty(ChunkPos::new(0, 0));
        chunk.set_block(1, 5, 1, 120);
        chunk.set_block(3, 5, 1, BlockType::SAND.id());
        chunk.set_block(5, 5, 1, BlockType::GRASS.id());
        let mesh = mesh_isolated(&chunk);
        let ids: Vec<BlockId> = mesh.batches.iter().map(|b| b.block).collect();
        assert_eq!(ids, vec![1, 6, 120]);
    }

    #[test]
    fn beds_and_chests_are_shaped() {
        let mut chunk = Chunk::empty(ChunkPos::new(0, 0));
        chunk.set_block(2, 65, 2, BlockType::BED.id());
        chunk.set_block(6, 65, 2, BlockType::CHEST.id());
        let mesh = mesh_isolated(&chunk);
        assert!(mesh.batches.is_empty());
        assert_eq!(mesh.shaped.len(), 2);
        assert_eq!(mesh.shaped[0].geometry, GeometryKind::Bed);
        assert_eq!(mesh.shaped[1].geometry, GeometryKind::Chest);
    }

    #[test]
    fn materials_are_shared_across_chunks() {
        let mut materials = MaterialCache::new();
        let ores = OreCatalog::empty();
        let mut a = Chunk::empty(ChunkPos::new(0, 0));
        let mut b = Chunk::empty(ChunkPos::new(3, 3));
        a.set_block(0, 1, 0, BlockType::WOOD.id());
        b.set_block(9, 9, 9, BlockType::WOOD.id());

        let mut mesher = ChunkMesher::new(&mut materials, &PaletteCatalog, &ores);
        let mesh_a = mesher.build(&a, &Isolated);
        let mesh_b = mesher.build(&b, &Isolated);
        assert_eq!(mesh_a.batches[0].material, mesh_b.batches[0].material);
        assert_eq!(materials.len(), 1);
    }
}
