//! Animated billboard sprites placed in the world.
use raylib::prelude::Vector2;

use crate::render::textures::Texture;

#[derive(Debug)]
pub struct Sprite {
    pub name: String,
    pub position: Vector2,
    frames: Vec<Texture>,
    current_frame: usize,
}

impl Sprite {
    pub fn new(name: &str, position: Vector2, frames: Vec<Texture>) -> Self {
        Self {
            name: name.to_string(),
            position,
            frames,
            current_frame: 0,
        }
    }

    /// Cuts a horizontal strip into `frames` textures of `frame_w × frame_h`.
    pub fn from_strip(
        name: &str,
        position: Vector2,
        strip: &Texture,
        frame_w: u32,
        frame_h: u32,
        frames: u32,
    ) -> Self {
        let frames = (0..frames)
            .map(|i| strip.sub_texture(&format!("{name}-{i}"), i * frame_w, 0, frame_w, frame_h))
            .collect();
        Self::new(name, position, frames)
    }

    pub fn current_frame(&self) -> Option<&Texture> {
        self.frames.get(self.current_frame)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Next animation frame, wrapping to the first.
    pub fn update(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        self.current_frame = (self.current_frame + 1) % self.frames.len();
    }
}
