//! # Materials
//!
//! Maps block ids to render materials. The [`MaterialCache`] is shared by
//! every chunk of a world and only ever grows: once a block id has a
//! material, every later mesh reuses it.
//!
//! Appearances come from a [`TextureCatalog`]. The default [`PaletteCatalog`]
//! knows the built-in kinds; ore ids fall through to the ore catalog's
//! generated colours.

use std::collections::HashMap;

use cgmath::Vector3;
use log::debug;
use phf::phf_map;

use crate::voxels::block::{block_type::BlockType, BlockId};
use crate::voxels::generation::ores::OreCatalog;

/// Index of a material inside a [`MaterialCache`].
pub type MaterialId = u32;

/// How a block should look.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Appearance {
    /// Human-readable name of the texture.
    pub name: String,
    /// Base sRGB colour.
    pub color: [u8; 3],
}

impl Appearance {
    /// Creates an appearance.
    pub fn new(name: impl Into<String>, color: [u8; 3]) -> Self {
        Appearance {
            name: name.into(),
            color,
        }
    }

    /// Shown for ids nothing knows about.
    pub fn missing() -> Self {
        Appearance::new("missing", [255, 0, 255])
    }
}

/// Resolves block ids to appearances.
pub trait TextureCatalog {
    /// The appearance of `block`, or `None` when this catalog does not know it.
    fn appearance(&self, block: BlockId) -> Option<Appearance>;
}

/// Built-in block colours, keyed by block id.
static PALETTE: phf::Map<u16, (&'static str, [u8; 3])> = phf_map! {
    1u16 => ("grass", [60, 179, 113]),
    2u16 => ("dirt", [134, 96, 67]),
    3u16 => ("stone", [128, 128, 128]),
    4u16 => ("wood", [139, 90, 43]),
    5u16 => ("leaves", [34, 139, 34]),
    6u16 => ("sand", [238, 214, 175]),
    7u16 => ("water", [74, 144, 226]),
    8u16 => ("red_wool", [180, 30, 30]),
    9u16 => ("chest", [160, 100, 40]),
    10u16 => ("potion", [180, 50, 200]),
    11u16 => ("netherrack", [100, 30, 30]),
    12u16 => ("lava", [220, 100, 20]),
    13u16 => ("planks", [190, 150, 90]),
    14u16 => ("bedrock", [40, 40, 40]),
};

/// The default catalog: a static palette for the built-in kinds.
#[derive(Clone, Copy, Debug, Default)]
pub struct PaletteCatalog;

impl TextureCatalog for PaletteCatalog {
    fn appearance(&self, block: BlockId) -> Option<Appearance> {
        PALETTE
            .get(&block)
            .map(|(name, color)| Appearance::new(*name, *color))
    }
}

/// The mesh shape a block is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// The shared 1x1x1 cube used by every batched block.
    UnitCube,
    /// Half-height, two blocks long.
    Bed,
    /// Slightly inset box resting on the floor of its cell.
    Chest,
}

impl GeometryKind {
    /// The geometry used for `block`.
    pub fn for_block(block: BlockId) -> Self {
        match BlockType::from_id(block) {
            Some(BlockType::BED) => GeometryKind::Bed,
            Some(BlockType::CHEST) => GeometryKind::Chest,
            _ => GeometryKind::UnitCube,
        }
    }

    /// Box extents.
    pub fn size(self) -> Vector3<f32> {
        match self {
            GeometryKind::UnitCube => Vector3::new(1.0, 1.0, 1.0),
            GeometryKind::Bed => Vector3::new(1.0, 0.35, 2.0),
            GeometryKind::Chest => Vector3::new(0.85, 0.75, 0.85),
        }
    }

    /// Offset of the box centre from the cell's minimum corner.
    pub fn offset(self) -> Vector3<f32> {
        match self {
            GeometryKind::UnitCube => Vector3::new(0.5, 0.5, 0.5),
            GeometryKind::Bed => Vector3::new(0.5, 0.175, 0.0),
            GeometryKind::Chest => Vector3::new(0.5, 0.375, 0.5),
        }
    }
}

/// A cached material.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Index in the owning cache.
    pub id: MaterialId,
    /// The block id this material was created for.
    pub block: BlockId,
    /// Resolved appearance.
    pub appearance: Appearance,
    /// Shape the block is drawn with.
    pub geometry: GeometryKind,
}

/// Append-only map from block id to material.
#[derive(Debug, Default)]
pub struct MaterialCache {
    materials: Vec<Material>,
    by_block: HashMap<BlockId, MaterialId>,
}

impl MaterialCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        MaterialCache::default()
    }

    /// Returns the material for `block`, creating it on first use.
    ///
    /// # Arguments
    /// * `block` - The block id to resolve
    /// * `catalog` - Consulted first for the appearance
    /// * `ores` - Consulted when the catalog does not know the id
    ///
    /// # Returns
    /// The id of the material. Repeated calls for the same block return the
    /// same id regardless of the catalogs passed later.
    pub fn material_for(
        &mut self,
        block: BlockId,
        catalog: &dyn TextureCatalog,
        ores: &OreCatalog,
    ) -> MaterialId {
        if let Some(id) = self.by_block.get(&block) {
            return *id;
        }

        let appearance = catalog
            .appearance(block)
            .or_else(|| ores.ore(block).map(|ore| Appearance::new(ore.name.clone(), ore.color)))
            .unwrap_or_else(Appearance::missing);

        let id = self.materials.len() as MaterialId;
        debug!("Created material {} for block {} ({})", id, block, appearance.name);
        self.materials.push(Material {
            id,
            block,
            appearance,
            geometry: GeometryKind::for_block(block),
        });
        self.by_block.insert(block, id);
        id
    }

    /// Looks up a material by id.
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id as usize)
    }

    /// The material already created for `block`, if any.
    pub fn for_block(&self, block: BlockId) -> Option<&Material> {
        self.by_block.get(&block).and_then(|id| self.get(*id))
    }

    /// Number of materials created so far.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether no material has been created yet.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
