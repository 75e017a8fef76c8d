//! Rendering: framebuffer, textures, ray caster and projectors.
//!
//! - `renderer`: drawing surface trait
//! - `framebuffer`: CPU double buffer implementing it
//! - `textures`: texture repository with procedural fallbacks
//! - `casters`: grid-line ray caster
//! - `render3d`: walls, floor, ceiling and sky columns
//! - `sprites`: billboard projection

pub mod casters;
pub mod framebuffer;
pub mod render3d;
pub mod renderer;
pub mod sprites;
pub mod textures;
