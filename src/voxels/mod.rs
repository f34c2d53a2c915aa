//! # Voxel World Core
//!
//! This module contains everything that represents and manipulates the
//! block grid.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Block ids, the built-in kinds and block faces
//! * **Chunk**: Dense 16x256x16 columns of blocks and their generation
//! * **Generation**: Noise, terrain functions, decorations and ore veins
//! * **World**: Streams chunks around the player and exposes block access
//! * **Raycast / Collision**: Geometric queries against the block grid
//!
//! ## Data Flow
//!
//! 1. World receives requests for block access or modification
//! 2. World delegates to the owning chunk (generating it if necessary)
//! 3. Changes trigger a synchronous mesh rebuild
//! 4. Rebuilt meshes are attached to the render root
//!
//! Everything runs on the caller's thread; a call returns only once the
//! affected meshes are up to date.

pub mod block;
pub mod chunk;
pub mod collision;
pub mod generation;
pub mod raycast;
pub mod world;
