//! # Ores
//!
//! The ore catalog and the vein scattering pass.
//!
//! The catalog assigns every metal an id from [`ORE_ID_START`] upwards, a
//! rarity from 1 (common) to 9 (rare) and a colour. The scattering pass runs
//! after terrain fill and swaps clusters of stone for ore ids, preferring
//! common ores and giving rare ores smaller veins.

use cgmath::Point3;

use crate::config::OreConfig;
use crate::voxels::block::{BlockId, FILL, ORE_ID_START};
use crate::voxels::chunk::{Chunk, CHUNK_DIMENSION};

const BASE_METALS: [&str; 20] = [
    "Iron", "Copper", "Gold", "Silver", "Platinum", "Titanium", "Aluminum", "Zinc", "Tin", "Lead",
    "Nickel", "Cobalt", "Chromium", "Manganese", "Tungsten", "Molybdenum", "Vanadium", "Uranium",
    "Thorium", "Plutonium",
];

const PREFIXES: [&str; 30] = [
    "Ancient", "Mystic", "Dark", "Light", "Pure", "Raw", "Refined", "Celestial", "Infernal",
    "Frozen", "Blazing", "Crystalline", "Prismatic", "Ethereal", "Corrupted", "Blessed", "Cursed",
    "Radiant", "Shadow", "Lunar", "Solar", "Volcanic", "Oceanic", "Void", "Astral", "Cosmic",
    "Quantum", "Plasma", "Neon", "Spectral",
];

const SUFFIXES: [&str; 14] = [
    "Ore", "Crystal", "Shard", "Ingot", "Nugget", "Dust", "Chunk", "Vein", "Deposit", "Cluster",
    "Fragment", "Essence", "Core", "Bead",
];

/// One entry of the ore catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct OreInfo {
    /// Block id of the ore.
    pub id: BlockId,
    /// Display name.
    pub name: String,
    /// sRGB colour used by the default texture catalog.
    pub color: [u8; 3],
    /// 1 (common) to 9 (rare).
    pub rarity: u8,
    /// 1 to 100.
    pub hardness: u8,
    /// `rarity * hardness`.
    pub value: u32,
}

impl OreInfo {
    fn new(id: BlockId, name: String) -> Self {
        let rarity = rarity_for(id);
        let hardness = hardness_for(id);
        OreInfo {
            id,
            name,
            color: color_for(id),
            rarity,
            hardness,
            value: rarity as u32 * hardness as u32,
        }
    }

    /// Radius of the veins this ore forms: rarer ores form smaller veins.
    pub fn vein_radius(&self) -> i32 {
        (3 / self.rarity.max(1) as i32).clamp(1, 2)
    }
}

/// Rarity band by id: base metals are common, later combinations rare.
fn rarity_for(id: BlockId) -> u8 {
    let id = id as u32;
    let rarity = if id < 120 {
        1 + id % 3
    } else if id < 200 {
        3 + id % 4
    } else if id < 400 {
        5 + id % 4
    } else {
        7 + id % 3
    };
    rarity as u8
}

fn hardness_for(id: BlockId) -> u8 {
    let mut h = (id as u32).wrapping_mul(0x9e37_79b9);
    h ^= h >> 15;
    (h % 100 + 1) as u8
}

/// Golden-angle hue spread so neighbouring ids get distinct colours.
fn color_for(id: BlockId) -> [u8; 3] {
    let id = id as f64;
    let hue = (id * 137.508) % 360.0;
    let saturation = (50.0 + id % 50.0) / 100.0;
    let lightness = (40.0 + id % 40.0) / 100.0;
    hsl_to_rgb(hue, saturation, lightness)
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [u8; 3] {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let to_byte = |c: f64| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

/// Registry of every ore the world can scatter.
///
/// Entries are kept in id order; `by_rarity` holds the same ids sorted by
/// rarity so a weighted pick is a prefix lookup.
#[derive(Clone, Debug, Default)]
pub struct OreCatalog {
    ores: Vec<OreInfo>,
    by_rarity: Vec<BlockId>,
}

impl OreCatalog {
    /// An empty catalog. Scattering with it places nothing.
    pub fn empty() -> Self {
        OreCatalog::default()
    }

    /// Builds the full catalog: base metals, prefixed and suffixed
    /// variants, then a band of prefix + base + suffix combinations.
    pub fn generate() -> Self {
        let mut names: Vec<String> = BASE_METALS.iter().map(|base| base.to_string()).collect();

        for prefix in PREFIXES {
            for base in BASE_METALS {
                names.push(format!("{prefix} {base}"));
            }
        }

        for base in BASE_METALS {
            for suffix in SUFFIXES {
                names.push(format!("{base} {suffix}"));
            }
        }

        for prefix in PREFIXES.iter().take(5) {
            for (j, base) in BASE_METALS.iter().take(10).enumerate() {
                let suffix = SUFFIXES[j % SUFFIXES.len()];
                names.push(format!("{prefix} {base} {suffix}"));
            }
        }

        let ores: Vec<OreInfo> = names
            .into_iter()
            .zip(ORE_ID_START..)
            .map(|(name, id)| OreInfo::new(id, name))
            .collect();

        let mut by_rarity: Vec<BlockId> = ores.iter().map(|ore| ore.id).collect();
        by_rarity.sort_by_key(|id| (rarity_for(*id), *id));

        OreCatalog { ores, by_rarity }
    }

    /// Number of ores in the catalog.
    pub fn len(&self) -> usize {
        self.ores.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.ores.is_empty()
    }

    /// Looks up an ore by block id.
    pub fn ore(&self, id: BlockId) -> Option<&OreInfo> {
        let index = id.checked_sub(ORE_ID_START)? as usize;
        self.ores.get(index)
    }

    /// Whether `id` belongs to the catalog.
    pub fn is_ore(&self, id: BlockId) -> bool {
        self.ore(id).is_some()
    }

    /// Iterates over every ore in id order.
    pub fn iter(&self) -> impl Iterator<Item = &OreInfo> {
        self.ores.iter()
    }

    /// Picks an ore weighted towards common entries.
    ///
    /// A roll in `[0, 100)` admits every ore whose `(rarity - 1) * 10` does not
    /// exceed it; one of the admitted ores is chosen uniformly.
    pub fn pick(&self, rng: &mut fastrand::Rng) -> Option<&OreInfo> {
        let first = self.ores.first()?;
        let roll = rng.f64() * 100.0;
        let admitted = self
            .by_rarity
            .partition_point(|id| (rarity_for(*id) as f64 - 1.0) * 10.0 <= roll);

        if admitted == 0 {
            return Some(first);
        }

        let id = self.by_rarity[rng.usize(..admitted)];
        self.ore(id)
    }
}

/// Scatters ore veins through a freshly generated chunk.
///
/// Each attempt picks an ore, a centre in the chunk's horizontal extent and
/// the configured vertical band, and converts cells of its sphere that still
/// hold stone (subject to `fill_chance`). Air, bedrock and surface blocks are
/// never touched, so veins stay embedded in rock.
///
/// # Returns
/// The number of cells converted.
pub fn scatter_ores(
    chunk: &mut Chunk,
    catalog: &OreCatalog,
    config: &OreConfig,
    rng: &mut fastrand::Rng,
) -> usize {
    let mut placed = 0;

    for _ in 0..config.vein_attempts {
        let Some(ore) = catalog.pick(rng) else {
            continue;
        };

        let center = Point3::new(
            rng.i32(0..CHUNK_DIMENSION),
            rng.i32(config.min_y..config.min_y + config.band_height),
            rng.i32(0..CHUNK_DIMENSION),
        );
        let radius = ore.vein_radius();

        for dx in -radius..=radius {
            for dy in -radius..=radius {
                for dz in -radius..=radius {
                    if dx * dx + dy * dy + dz * dz > radius * radius {
                        continue;
                    }
                    if rng.f64() >= config.fill_chance {
                        continue;
                    }

                    let (x, y, z) = (center.x + dx, center.y + dy, center.z + dz);
                    if chunk.get_block(x, y, z) == FILL {
                        chunk.set_block(x, y, z, ore.id);
                        placed += 1;
                    }
                }
            }
        }
    }

    placed
}
