//! Render-root bookkeeping for chunk meshes.
//!
//! The world hands every built mesh to a [`RenderRoot`] and takes it back
//! when the chunk is rebuilt or unloaded. [`SceneGraph`] is the in-memory
//! root: it hands out primitive handles from a free list, one per batch,
//! shaped block or decoration, and tracks the instance bytes they hold. A
//! chunk that is detached returns all of its handles, so repeated rebuilds
//! and unloads leave the counters where they started.

use std::collections::{HashMap, VecDeque};

use crate::voxels::chunk::ChunkPos;
use crate::voxels::generation::decorations::Decoration;
use crate::voxels::block::BlockId;

use super::materials::MaterialId;
use super::meshing::{ChunkMesh, InstanceTransform};

/// Receives chunk meshes for drawing.
pub trait RenderRoot {
    /// Shows `mesh` for the chunk at `position`, replacing anything shown
    /// there before.
    fn attach(&mut self, position: ChunkPos, mesh: &ChunkMesh);

    /// Removes and releases whatever is shown for `position`. Detaching a
    /// chunk that is not attached does nothing.
    fn detach(&mut self, position: ChunkPos);
}

/// Handle of a live primitive in a [`SceneGraph`].
pub type PrimitiveHandle = u32;

/// What a primitive draws.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveKind {
    /// An instanced batch of unit cubes.
    Batch {
        /// Block id of every instance.
        block: BlockId,
        /// Shared material.
        material: MaterialId,
    },
    /// A single bed or chest.
    Shaped {
        /// Block id.
        block: BlockId,
        /// Material.
        material: MaterialId,
    },
    /// A tree or other prop.
    Decoration(Decoration),
}

/// A live primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    /// Handle, unique among live primitives.
    pub handle: PrimitiveHandle,
    /// What it draws.
    pub kind: PrimitiveKind,
    /// Instance data owned by the primitive.
    pub instances: Vec<InstanceTransform>,
}

impl Primitive {
    /// Bytes of instance data held.
    pub fn byte_size(&self) -> usize {
        self.instances.len() * std::mem::size_of::<InstanceTransform>()
    }
}

/// In-memory render root.
#[derive(Debug, Default)]
pub struct SceneGraph {
    available_handles: VecDeque<PrimitiveHandle>,
    next_handle: PrimitiveHandle,
    chunk_position_to_primitives: HashMap<ChunkPos, Vec<Primitive>>,
    allocated_bytes: usize,
}

impl SceneGraph {
    /// Creates an empty scene.
    pub fn new() -> Self {
        SceneGraph::default()
    }

    fn allocate_handle(&mut self) -> PrimitiveHandle {
        self.available_handles.pop_front().unwrap_or_else(|| {
            let handle = self.next_handle;
            self.next_handle += 1;
            handle
        })
    }

    /// Number of chunks currently attached.
    pub fn attached_chunk_count(&self) -> usize {
        self.chunk_position_to_primitives.len()
    }

    /// Number of live primitives across all chunks.
    pub fn live_primitive_count(&self) -> usize {
        self.chunk_position_to_primitives.values().map(Vec::len).sum()
    }

    /// Bytes of instance data held by live primitives.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes
    }

    /// Whether `position` is attached.
    pub fn is_attached(&self, position: ChunkPos) -> bool {
        self.chunk_position_to_primitives.contains_key(&position)
    }

    /// The primitives attached for `position`.
    pub fn primitives(&self, position: ChunkPos) -> Option<&[Primitive]> {
        self.chunk_position_to_primitives
            .get(&position)
            .map(Vec::as_slice)
    }
}

impl RenderRoot for SceneGraph {
    fn attach(&mut self, position: ChunkPos, mesh: &ChunkMesh) {
        self.detach(position);

        let mut primitives = Vec::with_capacity(mesh.primitive_count());

        for batch in &mesh.batches {
            primitives.push(Primitive {
                handle: self.allocate_handle(),
                kind: PrimitiveKind::Batch {
                    block: batch.block,
                    material: batch.material,
                },
                instances: batch.instances(position),
            });
        }

        for shaped in &mesh.shaped {
            primitives.push(Primitive {
                handle: self.allocate_handle(),
                kind: PrimitiveKind::Shaped {
                    block: shaped.block,
                    material: shaped.material,
                },
                instances: vec![shaped.transform],
            });
        }

        for decoration in &mesh.decorations {
            primitives.push(Primitive {
                handle: self.allocate_handle(),
                kind: PrimitiveKind::Decoration(*decoration),
                instances: Vec::new(),
            });
        }

        self.allocated_bytes += primitives.iter().map(Primitive::byte_size).sum::<usize>();
        self.chunk_position_to_primitives.insert(position, primitives);
    }

    fn detach(&mut self, position: ChunkPos) {
        if let Some(primitives) = self.chunk_position_to_primitives.remove(&position) {
            for primitive in primitives {
                self.allocated_bytes -= primitive.byte_size();
                self.available_handles.push_back(primitive.handle);
            }
        }
    }
}
