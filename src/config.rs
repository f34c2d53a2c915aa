//! # World Configuration
//!
//! Tunable constants for terrain generation, ore scattering and streaming.
//! Every field has a default matching the shipped game, so an empty JSON
//! object (`{}`) is a complete configuration.
//!
//! ```json
//! {
//!     "seed": 1234,
//!     "render_distance": 4,
//!     "terrain": { "flat_radius": 32.0 }
//! }
//! ```

use std::{fs, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};

/// Largest accepted render distance, in chunks.
pub const MAX_RENDER_DISTANCE: i32 = 32;

/// Smallest accepted raycast step, in world units.
pub const MIN_RAYCAST_STEP: f32 = 0.001;

/// One octave of height noise: the sampling frequency and the amplitude in blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseOctave {
    /// Multiplier applied to world coordinates before sampling.
    pub frequency: f64,
    /// Height contribution at full strength, in blocks.
    pub amplitude: f64,
}

/// Constants for the height, biome and decoration functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Radius around the origin that is kept perfectly flat.
    pub flat_radius: f64,
    /// Height of the flat spawn plateau.
    pub plateau_height: i32,
    /// Distance over which terrain blends from the plateau to full noise.
    pub transition_width: f64,
    /// Lowest surface height noise may produce.
    pub min_height: i32,
    /// Highest surface height noise may produce.
    pub max_height: i32,
    /// Fill material (stone) occupies `1..fill_top`.
    pub fill_top: i32,
    /// Octaves summed for the height function.
    pub octaves: Vec<NoiseOctave>,
    /// Frequency of the temperature and humidity channels.
    pub biome_frequency: f64,
    /// Coordinate offset that decorrelates humidity from temperature.
    pub humidity_offset: f64,
    /// Frequency of the decoration channel.
    pub decoration_frequency: f64,
    /// Z offset of the decoration channel.
    pub decoration_offset: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            flat_radius: 48.0,
            plateau_height: 64,
            transition_width: 64.0,
            min_height: 60,
            max_height: 80,
            fill_top: 63,
            octaves: vec![
                NoiseOctave {
                    frequency: 0.015,
                    amplitude: 6.0,
                },
                NoiseOctave {
                    frequency: 0.04,
                    amplitude: 3.0,
                },
            ],
            biome_frequency: 0.001,
            humidity_offset: 1000.0,
            decoration_frequency: 0.1,
            decoration_offset: 5000.0,
        }
    }
}

/// Constants for the ore scattering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OreConfig {
    /// Number of veins attempted per chunk.
    pub vein_attempts: u32,
    /// Lowest vein centre height.
    pub min_y: i32,
    /// Vein centres fall in `min_y..min_y + band_height`.
    pub band_height: i32,
    /// Probability that a cell inside a vein's sphere is converted.
    pub fill_chance: f64,
}

impl Default for OreConfig {
    fn default() -> Self {
        OreConfig {
            vein_attempts: 5,
            min_y: 10,
            band_height: 50,
            fill_chance: 0.5,
        }
    }
}

/// Top-level configuration for a [`crate::World`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Terrain seed. A random seed is drawn when absent.
    pub seed: Option<u32>,
    /// Chebyshev radius, in chunks, kept loaded around the player. At most
    /// [`MAX_RENDER_DISTANCE`].
    pub render_distance: i32,
    /// Distance advanced per raycast sample. At least [`MIN_RAYCAST_STEP`].
    pub raycast_step: f32,
    /// Rebuild loaded neighbours whose boundary faces a load or edit may change.
    pub rebuild_neighbors: bool,
    /// Terrain function constants.
    pub terrain: TerrainConfig,
    /// Ore scattering constants.
    pub ores: OreConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: None,
            render_distance: 2,
            raycast_step: 0.1,
            rebuild_neighbors: true,
            terrain: TerrainConfig::default(),
            ores: OreConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> WorldResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&data)?;
        info!("Loaded world config from {:?}", path);
        Ok(config)
    }

    /// Parses and validates a JSON configuration string.
    pub fn from_json_str(data: &str) -> WorldResult<Self> {
        let config: WorldConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would break streaming, meshing or the raycast.
    pub fn validate(&self) -> WorldResult<()> {
        if !(0..=MAX_RENDER_DISTANCE).contains(&self.render_distance) {
            return Err(WorldError::InvalidConfig(format!(
                "render_distance must lie in 0..={}, got {}",
                MAX_RENDER_DISTANCE, self.render_distance
            )));
        }
        if !(self.raycast_step >= MIN_RAYCAST_STEP && self.raycast_step <= 1.0) {
            return Err(WorldError::InvalidConfig(format!(
                "raycast_step must be in [{}, 1], got {}",
                MIN_RAYCAST_STEP, self.raycast_step
            )));
        }

        let terrain = &self.terrain;
        if terrain.min_height > terrain.max_height {
            return Err(WorldError::InvalidConfig(format!(
                "terrain.min_height ({}) exceeds terrain.max_height ({})",
                terrain.min_height, terrain.max_height
            )));
        }
        if terrain.min_height < 1 || terrain.max_height > 255 {
            return Err(WorldError::InvalidConfig(format!(
                "terrain heights must lie in 1..=255, got {}..={}",
                terrain.min_height, terrain.max_height
            )));
        }
        if !(1..=255).contains(&terrain.plateau_height) {
            return Err(WorldError::InvalidConfig(format!(
                "terrain.plateau_height must lie in 1..=255, got {}",
                terrain.plateau_height
            )));
        }
        if terrain.transition_width <= 0.0 {
            return Err(WorldError::InvalidConfig(
                "terrain.transition_width must be positive".to_string(),
            ));
        }

        let ores = &self.ores;
        let band_top = ores.min_y.checked_add(ores.band_height);
        let band_fits = matches!(band_top, Some(top) if top <= 255);
        if ores.band_height <= 0 || ores.min_y < 1 || !band_fits {
            return Err(WorldError::InvalidConfig(format!(
                "ore band starting at {} with height {} must lie inside 1..255",
                ores.min_y, ores.band_height
            )));
        }
        if !(0.0..=1.0).contains(&ores.fill_chance) {
            return Err(WorldError::InvalidConfig(format!(
                "ores.fill_chance must be a probability, got {}",
                ores.fill_chance
            )));
        }

        Ok(())
    }
}
