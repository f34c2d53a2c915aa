//! # Block Type Module
//!
//! This module defines the built-in block kinds of the voxel world.
//! Ore ids live in a separate numeric range owned by the
//! [`OreCatalog`](crate::voxels::generation::ores::OreCatalog) and have no
//! variant here; the world stores both as plain [`BlockId`]s.

use num_derive::FromPrimitive;

use super::BlockId;

/// Enumerates the built-in block kinds.
///
/// The discriminants are the on-disk and in-memory block ids, so
/// `BlockType::STONE as BlockId` is the id the terrain generator writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space. Never meshed, never collides.
    AIR = 0,
    /// Surface block outside deserts.
    GRASS = 1,
    /// Subsurface layer between the stone fill and the surface.
    DIRT = 2,
    /// Generic fill material. The only block ore veins may replace.
    STONE = 3,
    /// Tree trunks and player-built logs.
    WOOD = 4,
    /// Tree foliage.
    LEAVES = 5,
    /// Desert surface block.
    SAND = 6,
    /// Still water.
    WATER = 7,
    /// Rendered as a half-height, two-long shaped mesh.
    BED = 8,
    /// Rendered as a slightly inset shaped mesh.
    CHEST = 9,
    /// Growth potion block.
    POTION = 10,
    /// Nether stone.
    NETHERRACK = 11,
    /// Lava.
    LAVA = 12,
    /// Wood planks.
    PLANKS = 13,
    /// Indestructible floor at `y = 0`.
    BEDROCK = 14,
}

impl BlockType {
    /// Every built-in kind except air, in id order.
    pub const SOLID_KINDS: [BlockType; 14] = [
        BlockType::GRASS,
        BlockType::DIRT,
        BlockType::STONE,
        BlockType::WOOD,
        BlockType::LEAVES,
        BlockType::SAND,
        BlockType::WATER,
        BlockType::BED,
        BlockType::CHEST,
        BlockType::POTION,
        BlockType::NETHERRACK,
        BlockType::LAVA,
        BlockType::PLANKS,
        BlockType::BEDROCK,
    ];

    /// Converts a raw id to a built-in kind.
    ///
    /// # Returns
    /// `None` for ids outside the built-in range (ores, tools, unknown ids).
    pub fn from_id(id: BlockId) -> Option<Self> {
        num::FromPrimitive::from_u16(id)
    }

    /// The raw id of this kind.
    #[inline]
    pub fn id(self) -> BlockId {
        self as BlockId
    }

    /// Whether blocks of this kind are drawn as an individual non-cubic mesh.
    pub fn is_shaped(self) -> bool {
        matches!(self, BlockType::BED | BlockType::CHEST)
    }
}
