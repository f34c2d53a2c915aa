//! # Block Side Module
//!
//! This module defines the six axis-aligned faces of a voxel block. The mesher
//! uses them to walk a block's neighbours and the raycast uses them to report
//! which face was struck.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The unit offset from a block to the neighbour sharing this face.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// The face whose outward normal lies on `axis` (0 = X, 1 = Y, 2 = Z)
    /// pointing towards positive when `positive` is set.
    ///
    /// # Returns
    /// `None` when `axis` is not 0, 1 or 2.
    pub fn from_axis(axis: usize, positive: bool) -> Option<BlockSide> {
        match (axis, positive) {
            (0, true) => Some(BlockSide::RIGHT),
            (0, false) => Some(BlockSide::LEFT),
            (1, true) => Some(BlockSide::TOP),
            (1, false) => Some(BlockSide::BOTTOM),
            (2, true) => Some(BlockSide::FRONT),
            (2, false) => Some(BlockSide::BACK),
            _ => None,
        }
    }
}
