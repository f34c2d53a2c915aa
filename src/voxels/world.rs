//! # World Module
//!
//! This module provides the `World` struct, which owns every loaded chunk and
//! is the single entry point gameplay uses to read, write and ray-test blocks.
//!
//! ## Architecture
//!
//! The world uses sparse storage: only chunks near the player are kept in a
//! `HashMap` keyed by [`ChunkPos`]. Chunks are generated on approach and
//! disposed on recede, with a one-chunk hysteresis band so a player standing
//! on a boundary does not make chunks load and unload every frame.
//!
//! ## Collaborators
//!
//! - [`TerrainGenerator`]: shared by every chunk so seams agree
//! - [`OreCatalog`]: built by [`World::init`]; empty until then
//! - [`MaterialCache`] + [`TextureCatalog`]: resolve block ids to materials
//! - [`RenderRoot`]: receives every rebuilt mesh
//!
//! ## Consistency
//!
//! Every mutation rebuilds the affected chunk's mesh before returning, and
//! loaded neighbours whose boundary faces may have changed are rebuilt too
//! (see [`WorldConfig::rebuild_neighbors`]).

use std::collections::{HashMap, HashSet};

use cgmath::Point3;
use log::{debug, info};
use web_time::Instant;

use crate::config::{WorldConfig, MAX_RENDER_DISTANCE};
use crate::error::WorldResult;
use crate::rendering::materials::{MaterialCache, PaletteCatalog, TextureCatalog};
use crate::rendering::meshing::ChunkMesher;
use crate::rendering::scene::{RenderRoot, SceneGraph};

use super::block::{BlockId, AIR, BEDROCK};
use super::chunk::{
    chunk_generation::ChunkGenerator, to_local, Chunk, ChunkPos, CHUNK_DIMENSION,
};
use super::collision::{self, Aabb, CollisionResult};
use super::generation::{ores::OreCatalog, terrain::TerrainGenerator};
use super::raycast::{self, Ray, RaycastHit};

/// The loaded part of a voxel world and everything needed to extend it.
pub struct World<R: RenderRoot = SceneGraph> {
    /// Loaded chunks keyed by chunk coordinate.
    chunks: HashMap<ChunkPos, Chunk>,
    terrain: TerrainGenerator,
    ores: OreCatalog,
    materials: MaterialCache,
    catalog: Box<dyn TextureCatalog>,
    root: R,
    config: WorldConfig,
    render_distance: i32,
    initialized: bool,
}

impl World<SceneGraph> {
    /// Creates a world with the default palette and an in-memory scene.
    ///
    /// # Errors
    /// Returns [`crate::WorldError::InvalidConfig`] when `config` fails validation.
    pub fn new(config: WorldConfig) -> WorldResult<Self> {
        config.validate()?;
        Ok(Self::with_root(config, SceneGraph::new(), Box::new(PaletteCatalog)))
    }

    /// Creates a world with default settings and a fixed seed.
    pub fn with_seed(seed: u32) -> Self {
        let config = WorldConfig {
            seed: Some(seed),
            ..WorldConfig::default()
        };
        Self::with_root(config, SceneGraph::new(), Box::new(PaletteCatalog))
    }
}

impl<R: RenderRoot> World<R> {
    /// Creates a world drawing into `root` with appearances from `catalog`.
    ///
    /// The configuration is used as given; call [`WorldConfig::validate`]
    /// first when it comes from user input.
    pub fn with_root(config: WorldConfig, root: R, catalog: Box<dyn TextureCatalog>) -> Self {
        let seed = config.seed.unwrap_or_else(|| fastrand::u32(..));
        info!("Using seed {}", seed);

        World {
            chunks: HashMap::new(),
            terrain: TerrainGenerator::with_config(seed, config.terrain.clone()),
            ores: OreCatalog::empty(),
            materials: MaterialCache::new(),
            catalog,
            root,
            render_distance: config.render_distance.clamp(0, MAX_RENDER_DISTANCE),
            config,
            initialized: false,
        }
    }

    /// Builds the ore catalog. Chunks generated before this carry no ores.
    /// Calling it again does nothing.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.ores = OreCatalog::generate();
        self.initialized = true;
        info!("World initialized with {} ores", self.ores.len());
    }

    /// Whether [`World::init`] has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The terrain seed.
    pub fn seed(&self) -> u32 {
        self.terrain.seed()
    }

    /// The configuration the world was created with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The shared terrain functions.
    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    /// The ore catalog (empty before [`World::init`]).
    pub fn ores(&self) -> &OreCatalog {
        &self.ores
    }

    /// The shared material cache.
    pub fn materials(&self) -> &MaterialCache {
        &self.materials
    }

    /// The render root meshes are attached to.
    pub fn root(&self) -> &R {
        &self.root
    }

    /// Current render distance in chunks.
    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    /// Sets the render distance, clamped to `0..=MAX_RENDER_DISTANCE`. Takes
    /// effect on the next [`World::update_chunks`].
    pub fn set_render_distance(&mut self, distance: i32) {
        self.render_distance = distance.clamp(0, MAX_RENDER_DISTANCE);
    }

    /// Number of loaded chunks.
    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The loaded chunk at `position`.
    pub fn chunk(&self, position: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Positions of every loaded chunk, in no particular order.
    pub fn chunk_positions(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.chunks.keys().copied()
    }

    /// Surface height of the column at `(x, z)`, whether or not it is loaded.
    pub fn terrain_height(&self, x: i32, z: i32) -> i32 {
        self.terrain.height(x, z)
    }

    /// Generates, meshes and attaches the chunk at chunk coordinates `(x, z)`.
    /// Does nothing if it is already loaded.
    pub fn generate_chunk(&mut self, x: i32, z: i32) {
        let position = ChunkPos::new(x, z);
        if self.chunks.contains_key(&position) {
            return;
        }

        let start = Instant::now();
        self.insert_generated(position);
        self.rebuild_chunk(position);

        if self.config.rebuild_neighbors {
            for neighbor in position.neighbors() {
                if self.chunks.contains_key(&neighbor) {
                    self.rebuild_chunk(neighbor);
                }
            }
        }

        debug!("Generated chunk ({}, {}) in {:?}", x, z, start.elapsed());
    }

    /// Streams chunks around `player_position`.
    ///
    /// Every chunk within the render distance (Chebyshev, in chunks) of the
    /// player's chunk is loaded, nearest first, and every chunk more than one
    /// chunk beyond it is unloaded. New chunks are all generated before any
    /// is meshed, so each new chunk and each loaded neighbour is meshed once.
    pub fn update_chunks(&mut self, player_position: Point3<f32>) {
        let center = ChunkPos::from_world(player_position.x, player_position.z);
        let distance = self.render_distance;

        let mut missing: Vec<ChunkPos> = (-distance..=distance)
            .flat_map(|dx| (-distance..=distance).map(move |dz| (dx, dz)))
            .map(|(dx, dz)| ChunkPos::new(center.x + dx, center.z + dz))
            .filter(|position| !self.chunks.contains_key(position))
            .collect();
        missing.sort_by_key(|position| {
            let (dx, dz) = (position.x - center.x, position.z - center.z);
            (position.chebyshev_distance(center), dx * dx + dz * dz)
        });

        let start = Instant::now();
        for position in &missing {
            self.insert_generated(*position);
        }

        let far: Vec<ChunkPos> = self
            .chunks
            .keys()
            .filter(|position| position.chebyshev_distance(center) > distance + 1)
            .copied()
            .collect();
        for position in &far {
            self.unload_chunk(*position);
        }

        let mut queued: HashSet<ChunkPos> = missing.iter().copied().collect();
        let mut dirty = missing.clone();
        if self.config.rebuild_neighbors {
            for position in &missing {
                for neighbor in position.neighbors() {
                    if self.chunks.contains_key(&neighbor) && queued.insert(neighbor) {
                        dirty.push(neighbor);
                    }
                }
            }
        }
        for position in dirty {
            self.rebuild_chunk(position);
        }

        if !missing.is_empty() || !far.is_empty() {
            debug!(
                "Streamed around ({}, {}): {} loaded, {} unloaded, {} resident in {:?}",
                center.x,
                center.z,
                missing.len(),
                far.len(),
                self.chunks.len(),
                start.elapsed()
            );
        }
    }

    /// The block at world coordinates `(x, y, z)`.
    ///
    /// The floor `y = 0` always reads as bedrock. Anywhere else in an
    /// unloaded chunk, or outside the vertical range, reads as air.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockId {
        if y == 0 {
            return BEDROCK;
        }
        self.chunks
            .get(&ChunkPos::from_block(x, z))
            .map_or(AIR, |chunk| chunk.get_block(to_local(x), y, to_local(z)))
    }

    /// Writes `block` at world coordinates `(x, y, z)` and rebuilds the mesh.
    ///
    /// The owning chunk is generated first if it is not loaded. A write on a
    /// chunk edge also rebuilds the loaded chunk across that edge. Writes
    /// outside the vertical range are ignored.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockId) {
        let position = ChunkPos::from_block(x, z);
        if !self.chunks.contains_key(&position) {
            self.generate_chunk(position.x, position.z);
        }

        let (local_x, local_z) = (to_local(x), to_local(z));
        if !Chunk::in_bounds(local_x, y, local_z) {
            return;
        }
        match self.chunks.get_mut(&position) {
            Some(chunk) => chunk.set_block(local_x, y, local_z, block),
            None => return,
        }
        self.rebuild_chunk(position);

        if self.config.rebuild_neighbors {
            let edge = CHUNK_DIMENSION - 1;
            let mut neighbors = Vec::new();
            if local_x == 0 {
                neighbors.push(ChunkPos::new(position.x - 1, position.z));
            } else if local_x == edge {
                neighbors.push(ChunkPos::new(position.x + 1, position.z));
            }
            if local_z == 0 {
                neighbors.push(ChunkPos::new(position.x, position.z - 1));
            } else if local_z == edge {
                neighbors.push(ChunkPos::new(position.x, position.z + 1));
            }
            for neighbor in neighbors {
                if self.chunks.contains_key(&neighbor) {
                    self.rebuild_chunk(neighbor);
                }
            }
        }
    }

    /// Replaces the block at `(x, y, z)` with air.
    pub fn remove_block(&mut self, x: i32, y: i32, z: i32) {
        self.set_block(x, y, z, AIR);
    }

    /// Finds the first non-air block along `ray` within `max_distance`.
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RaycastHit> {
        raycast::march(
            |x, y, z| self.get_block(x, y, z),
            ray,
            max_distance,
            self.config.raycast_step,
        )
    }

    /// Resolves a body with box `bounds` at `position` against loaded blocks.
    pub fn check_collision(&self, position: Point3<f32>, bounds: &Aabb) -> CollisionResult {
        collision::resolve(|x, y, z| self.get_block(x, y, z), position, bounds)
    }

    /// Generates the chunk at `position` and stores it without meshing.
    fn insert_generated(&mut self, position: ChunkPos) {
        let generator = ChunkGenerator::new(&self.terrain, &self.ores, &self.config.ores);
        let chunk = generator.generate(position);
        self.chunks.insert(position, chunk);
    }

    /// Rebuilds the mesh of the loaded chunk at `position` and re-attaches it.
    fn rebuild_chunk(&mut self, position: ChunkPos) {
        let Some(chunk) = self.chunks.get(&position) else {
            return;
        };

        let mut mesher = ChunkMesher::new(&mut self.materials, self.catalog.as_ref(), &self.ores);
        let mesh = mesher.build(chunk, &self.chunks);

        self.root.attach(position, &mesh);
        if let Some(chunk) = self.chunks.get_mut(&position) {
            chunk.replace_mesh(mesh);
        }
    }

    /// Detaches, disposes and forgets the chunk at `position`.
    fn unload_chunk(&mut self, position: ChunkPos) {
        self.root.detach(position);
        if let Some(mut chunk) = self.chunks.remove(&position) {
            chunk.dispose();
            debug!("Unloaded chunk ({}, {})", position.x, position.z);
        }
    }
}
