//! Mesh data produced for a chunk.
//!
//! A [`ChunkMesh`] is plain data: one [`RenderBatch`] per block id with at
//! least one exposed block, one [`ShapedBlock`] per exposed bed or chest,
//! and the chunk's decorations. Meshes are rebuilt wholesale and never
//! patched.

use cgmath::{Point3, Vector3};

use crate::voxels::block::BlockId;
use crate::voxels::chunk::ChunkPos;
use crate::voxels::generation::decorations::Decoration;
use crate::rendering::materials::{GeometryKind, MaterialId};

/// Per-instance transform uploaded for every drawn box.
///
/// # Memory Layout
/// - Translation: [f32; 3] (12 bytes)
/// - Scale: [f32; 3] (12 bytes)
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceTransform {
    /// Box centre in world space
    pub translation: [f32; 3],
    /// Box extents
    pub scale: [f32; 3],
}

impl InstanceTransform {
    /// The transform of `geometry` placed in the cell at world block `cell`.
    pub fn for_cell(cell: Point3<i32>, geometry: GeometryKind) -> Self {
        let offset: Vector3<f32> = geometry.offset();
        let size = geometry.size();
        InstanceTransform {
            translation: [
                cell.x as f32 + offset.x,
                cell.y as f32 + offset.y,
                cell.z as f32 + offset.z,
            ],
            scale: [size.x, size.y, size.z],
        }
    }
}

/// All exposed unit-cube blocks of one id within a chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderBatch {
    /// The block id every instance shares.
    pub block: BlockId,
    /// Material shared with every other batch of the same id.
    pub material: MaterialId,
    /// Chunk-local block positions, in storage order.
    pub positions: Vec<Point3<i32>>,
}

impl RenderBatch {
    /// Number of instances in the batch.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the batch holds no instances.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// World-space instance transforms, relative to the chunk at `chunk`.
    pub fn instances(&self, chunk: ChunkPos) -> Vec<InstanceTransform> {
        let origin = chunk.origin();
        self.positions
            .iter()
            .map(|p| {
                InstanceTransform::for_cell(
                    Point3::new(origin.x + p.x, p.y, origin.z + p.z),
                    GeometryKind::UnitCube,
                )
            })
            .collect()
    }
}

/// A block drawn individually with its own geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedBlock {
    /// The block id.
    pub block: BlockId,
    /// Its material.
    pub material: MaterialId,
    /// Its geometry.
    pub geometry: GeometryKind,
    /// Chunk-local cell.
    pub position: Point3<i32>,
    /// World-space transform.
    pub transform: InstanceTransform,
}

/// The renderable form of one chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    /// The chunk this mesh was built for.
    pub position: ChunkPos,
    /// One batch per block id, sorted by id.
    pub batches: Vec<RenderBatch>,
    /// Individually drawn beds and chests.
    pub shaped: Vec<ShapedBlock>,
    /// Props carried over from the chunk.
    pub decorations: Vec<Decoration>,
}

impl ChunkMesh {
    /// A mesh that draws nothing.
    pub fn empty(position: ChunkPos) -> Self {
        ChunkMesh {
            position,
            batches: Vec::new(),
            shaped: Vec::new(),
            decorations: Vec::new(),
        }
    }

    /// Whether nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty() && self.shaped.is_empty() && self.decorations.is_empty()
    }

    /// The batch for `block`, if any block of that id is exposed.
    pub fn batch(&self, block: BlockId) -> Option<&RenderBatch> {
        self.batches
            .binary_search_by_key(&block, |batch| batch.block)
            .ok()
            .map(|index| &self.batches[index])
    }

    /// Whether the block at chunk-local `position` is drawn by this mesh.
    pub fn contains(&self, position: Point3<i32>) -> bool {
        self.batches.iter().any(|batch| batch.positions.contains(&position))
            || self.shaped.iter().any(|shaped| shaped.position == position)
    }

    /// Total number of drawn boxes across batches and shaped blocks.
    pub fn instance_count(&self) -> usize {
        self.batches.iter().map(RenderBatch::len).sum::<usize>() + self.shaped.len()
    }

    /// Number of separate render primitives: batches, shaped blocks and decorations.
    pub fn primitive_count(&self) -> usize {
        self.batches.len() + self.shaped.len() + self.decorations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_transform_is_pod() {
        let transform = InstanceTransform::for_cell(Point3::new(1, 2, 3), GeometryKind::UnitCube);
        let bytes: &[u8] = bytemuck::bytes_of(&transform);
        assert_eq!(bytes.len(), 24);
        assert_eq!(transform.translation, [1.5, 2.5, 3.5]);
    }

    #[test]
    fn shaped_transforms_match_their_geometry() {
        let bed = InstanceTransform::for_cell(Point3::new(0, 0, 0), GeometryKind::Bed);
        assert_eq!(bed.translation, [0.5, 0.175, 0.0]);
        assert_eq!(bed.scale, [1.0, 0.35, 2.0]);
        let chest = InstanceTransform::for_cell(Point3::new(0, 10, 0), GeometryKind::Chest);
        assert_eq!(chest.translation, [0.5, 10.375, 0.5]);
    }

    #[test]
    fn batch_instances_are_offset_by_chunk() {
        let batch = RenderBatch {
            block: 3,
            material: 0,
            positions: vec![Point3::new(0, 5, 15)],
        };
        let instances = batch.instances(ChunkPos::new(-1, 2));
        assert_eq!(instances[0].translation, [-15.5, 5.5, 47.5]);
    }
}
