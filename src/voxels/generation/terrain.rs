//! # Terrain Generator
//!
//! Pure functions from a world column `(x, z)` to a surface height, a biome
//! and a decoration kind. One generator is shared by every chunk, which is
//! what keeps the seams between neighbouring chunks in agreement.

use serde::{Deserialize, Serialize};

use crate::config::TerrainConfig;
use crate::voxels::block::{block_type::BlockType, BlockId};

use super::noise_field::ValueNoise;

/// Climate classification of a column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Biome {
    /// Temperate grassland. The fallback classification.
    Plains,
    /// Humid, wooded land.
    Forest,
    /// Hot land with a sand surface.
    Desert,
    /// Cold highland.
    Mountains,
}

impl Biome {
    /// The block written at the surface of a column in this biome.
    pub fn surface_block(self) -> BlockId {
        match self {
            Biome::Desert => BlockType::SAND.id(),
            _ => BlockType::GRASS.id(),
        }
    }
}

/// Decoration suggested for a column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationKind {
    /// A tree.
    Tree,
    /// A boulder.
    Rock,
    /// Tall grass.
    Grass,
    /// A flower.
    Flower,
    /// Bare ground.
    None,
}

/// Maps world columns to terrain features. Stateless apart from its seed
/// and constants, so two generators built from the same inputs agree
/// everywhere.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    noise: ValueNoise,
    config: TerrainConfig,
}

impl TerrainGenerator {
    /// Creates a generator with the default terrain constants.
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, TerrainConfig::default())
    }

    /// Creates a generator with explicit terrain constants.
    pub fn with_config(seed: u32, config: TerrainConfig) -> Self {
        TerrainGenerator {
            noise: ValueNoise::new(seed),
            config,
        }
    }

    /// The seed this generator was built with.
    pub fn seed(&self) -> u32 {
        use noise::Seedable;
        self.noise.seed()
    }

    /// The terrain constants in use.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Surface height of the column at `(x, z)`.
    ///
    /// Inside the flat spawn radius this is the plateau height. Beyond it the
    /// summed noise octaves fade in linearly over `transition_width` blocks,
    /// and the result is clamped to `[min_height, max_height]`.
    pub fn height(&self, x: i32, z: i32) -> i32 {
        let config = &self.config;
        let (xf, zf) = (x as f64, z as f64);
        let distance_from_spawn = (xf * xf + zf * zf).sqrt();

        if distance_from_spawn < config.flat_radius {
            return config.plateau_height;
        }

        let transition =
            ((distance_from_spawn - config.flat_radius) / config.transition_width).min(1.0);

        let relief: f64 = config
            .octaves
            .iter()
            .map(|octave| {
                self.noise
                    .sample(xf * octave.frequency, zf * octave.frequency)
                    * octave.amplitude
            })
            .sum();

        let height = config.plateau_height as f64 + relief * transition;
        height
            .clamp(config.min_height as f64, config.max_height as f64)
            .floor() as i32
    }

    /// Biome of the column at `(x, z)`, from a temperature and a humidity channel.
    pub fn biome(&self, x: i32, z: i32) -> Biome {
        let config = &self.config;
        let (xf, zf) = (
            x as f64 * config.biome_frequency,
            z as f64 * config.biome_frequency,
        );
        let temperature = self.noise.sample(xf, zf);
        let humidity = self
            .noise
            .sample(xf + config.humidity_offset, zf + config.humidity_offset);

        if temperature > 0.5 {
            Biome::Desert
        } else if humidity > 0.3 {
            Biome::Forest
        } else if temperature < -0.3 {
            Biome::Mountains
        } else {
            Biome::Plains
        }
    }

    /// Decoration suggested for the column at `(x, z)`.
    ///
    /// Sampled at a coarser frequency than the height, so decorations come in
    /// patches rather than uniform scatter.
    pub fn decoration(&self, x: i32, z: i32) -> DecorationKind {
        let config = &self.config;
        let value = self.noise.sample(
            x as f64 * config.decoration_frequency,
            z as f64 * config.decoration_frequency + config.decoration_offset,
        );

        if value > 0.6 {
            DecorationKind::Tree
        } else if value > 0.3 {
            DecorationKind::Rock
        } else if value > 0.0 {
            DecorationKind::Grass
        } else if value > -0.3 {
            DecorationKind::Flower
        } else {
            DecorationKind::None
        }
    }
}
