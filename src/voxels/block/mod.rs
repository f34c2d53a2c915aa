//! # Block Module
//!
//! Block ids, built-in block kinds and block faces.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The integer type used to store block ids.
///
/// `0` is air. Built-in kinds use `1..=14` (see [`BlockType`]); the ore
/// catalog hands out ids from [`ORE_ID_START`] upwards, which is why this is
/// wider than a byte.
pub type BlockId = u16;

/// Id of empty space.
pub const AIR: BlockId = BlockType::AIR as BlockId;

/// Id written at `y = 0` and reported there by the world for every column.
pub const BEDROCK: BlockId = BlockType::BEDROCK as BlockId;

/// Id of the generic fill material that ore veins replace.
pub const FILL: BlockId = BlockType::STONE as BlockId;

/// First id owned by the ore catalog.
pub const ORE_ID_START: BlockId = 100;

/// Whether `id` is drawn as an individual non-cubic mesh rather than batched.
#[inline]
pub fn is_shaped(id: BlockId) -> bool {
    BlockType::from_id(id).is_some_and(BlockType::is_shaped)
}
