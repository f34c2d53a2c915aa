//! # Generation Module
//!
//! Procedural content for chunks: the seeded noise field, the terrain
//! functions built on it, decoration placement and ore scattering.

pub mod decorations;
pub mod noise_field;
pub mod ores;
pub mod terrain;
