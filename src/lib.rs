//! First-person raycaster over a tile map, rendered on the CPU.

pub mod config;
pub mod core;
pub mod render;
pub mod scene;

pub use crate::config::RenderConfig;
pub use crate::core::map::{Direction, Map, Tile};
pub use crate::core::player::Player;
pub use crate::core::ray::Ray;
pub use crate::render::casters::RayCaster;
pub use crate::render::framebuffer::Framebuffer;
pub use crate::render::renderer::Renderer;
pub use crate::render::textures::{Texture, TextureId, TextureManager};
