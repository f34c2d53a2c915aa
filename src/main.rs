//! # Voxel World Entry Point
//!
//! Native entry point. Calls into the library's `run()` function, which sets
//! up logging and drives a short streaming walk through a generated world.
//!
//! For web builds, see the `run_web()` function in the library.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug VOXEL_WORLD_CONFIG=world.json cargo run --release
//! ```

fn main() {
    #[cfg(not(target_family = "wasm"))]
    voxel_world::run();
}
