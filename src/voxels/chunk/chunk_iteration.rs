//! # Chunk Iteration Module
//!
//! This module provides an iterator over all non-air blocks in a chunk, in
//! storage order (x fastest, then z, then y). The mesher and the tests walk
//! chunks through it instead of scanning coordinates by hand.

use cgmath::Point3;

use crate::voxels::block::{BlockId, AIR};

use super::{Chunk, CHUNK_DIMENSION, CHUNK_PLANE_SIZE};

/// An iterator over all non-air blocks in a chunk.
///
/// Yields the chunk-local position and id of each block. Air cells are
/// skipped without being reported.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next flat index to inspect
    current_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first block.
    ///
    /// # Arguments
    /// * `chunk_ref` - A reference to the chunk to iterate over
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_offset: 0,
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        let blocks = self.chunk_ref.blocks();
        while self.current_offset < blocks.len() {
            let offset = self.current_offset;
            self.current_offset += 1;

            let block = blocks[offset];
            if block == AIR {
                continue;
            }

            let offset = offset as i32;
            let position = Point3::new(
                offset % CHUNK_DIMENSION,
                offset / CHUNK_PLANE_SIZE,
                (offset % CHUNK_PLANE_SIZE) / CHUNK_DIMENSION,
            );
            return Some((position, block));
        }
        None
    }
}

impl Chunk {
    /// Iterates over every non-air block with its local position.
    pub fn iter_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }
}
