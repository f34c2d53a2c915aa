//! Rendering-side data for the voxel world.
//!
//! Nothing here talks to a GPU. Chunks are turned into plain mesh data by
//! [`meshing`], materials are resolved through [`materials`], and the
//! result is handed to a [`scene::RenderRoot`].

pub mod materials;
pub mod meshing;
pub mod scene;
