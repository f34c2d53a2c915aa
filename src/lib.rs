#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! The world layer of a voxel sandbox: chunked block storage, deterministic
//! procedural terrain, ore veins, face-culled mesh batching, chunk streaming
//! around the player, and the block read/write/raycast API gameplay is
//! built on.
//!
//! ## Key Modules
//!
//! * `voxels` - Blocks, chunks, terrain generation, the `World` and its queries
//! * `rendering` - Mesh batching, materials and the render-root interface
//! * `config` - JSON-loadable world settings
//! * `error` - Errors raised while loading configuration
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_world::World;
//!
//! let mut world = World::with_seed(1234);
//! world.init();
//! world.update_chunks(Point3::new(0.0, 70.0, 0.0));
//!
//! assert_eq!(world.get_block(0, 0, 0), voxel_world::voxels::block::BEDROCK);
//! world.set_block(2, 65, 2, 9);
//! assert_eq!(world.get_block(2, 65, 2), 9);
//! ```
//!
//! Native binaries call [`run`]; web builds call `run_web()` from JavaScript.
//!
//! ## Performance Considerations
//!
//! * Chunks are flat arrays, so block access is a single index computation
//! * Faces are culled with a padded bit mask built once per rebuild
//! * Exposed blocks are grouped into one instanced batch per block id
//! * Streaming generates a whole ring of chunks before meshing any of them

use cgmath::{Point3, Vector3};
use log::{info, warn};
#[cfg(target_family = "wasm")]
use wasm_bindgen::prelude::wasm_bindgen;

pub mod config;
pub mod error;
pub mod rendering;
pub mod voxels;

pub use config::WorldConfig;
pub use error::{WorldError, WorldResult};
pub use rendering::scene::{RenderRoot, SceneGraph};
pub use voxels::chunk::{Chunk, ChunkPos};
pub use voxels::raycast::{Ray, RaycastHit};
pub use voxels::world::World;

use voxels::block::block_type::BlockType;

/// Environment variable naming a JSON world configuration file.
pub const CONFIG_ENV_VAR: &str = "VOXEL_WORLD_CONFIG";

/// Number of chunk-sized strides the demo walk takes.
const DEMO_WALK_STEPS: i32 = 6;

#[cfg(not(target_family = "wasm"))]
/// Native entry point: installs the logger, loads the configuration named by
/// [`CONFIG_ENV_VAR`] (or the defaults) and runs a short streaming walk.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => match WorldConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Failed to load world config: {}", err);
                return;
            }
        },
        Err(_) => WorldConfig::default(),
    };

    match World::new(config) {
        Ok(mut world) => explore(&mut world),
        Err(err) => log::error!("Invalid world config: {}", err),
    }
}

#[cfg(target_family = "wasm")]
#[wasm_bindgen]
/// Web entry point: installs the console logger and panic hook, then runs
/// the streaming walk with default settings.
pub fn run_web() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }

    let mut world = World::with_seed(fastrand::u32(..));
    explore(&mut world);
}

/// Walks a player across the world, streaming chunks and editing a block
/// where they look, and logs what the world and scene hold afterwards.
fn explore(world: &mut World) {
    world.init();

    let mut player = Point3::new(0.5, 0.0, 0.5);
    for step in 0..DEMO_WALK_STEPS {
        player.x = 0.5 + (step * 16) as f32;
        player.y = world.terrain_height(player.x as i32, player.z as i32) as f32 + 1.0;
        world.update_chunks(player);

        let eye = Ray::new(
            Point3::new(player.x, player.y + 1.6, player.z),
            Vector3::new(1.0, -1.0, 0.0),
        );
        match world.raycast(&eye, 8.0) {
            Some(hit) => {
                let target = hit.adjacent();
                world.set_block(target.x, target.y, target.z, BlockType::PLANKS.id());
                info!(
                    "Step {}: placed planks at ({}, {}, {}) against {:?} face",
                    step, target.x, target.y, target.z, hit.face
                );
            }
            None => warn!("Step {}: nothing in reach", step),
        }
    }

    let scene = world.root();
    info!(
        "{} chunks loaded, {} attached, {} primitives, {} instance bytes, {} materials",
        world.loaded_chunk_count(),
        scene.attached_chunk_count(),
        scene.live_primitive_count(),
        scene.allocated_bytes(),
        world.materials().len()
    );
}
