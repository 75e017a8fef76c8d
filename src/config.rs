//! Render and simulation tuning.
use raylib::prelude::Color;
use std::f32::consts::FRAC_PI_3;

/// Internal resolution; the window scales it up.
pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;
pub const WINDOW_SCALE: f32 = 1.25;

/// World units per tile.
pub const TILE_SIZE: f32 = 32.0;

/// Horizontal field of view (60°).
pub const FOV: f32 = FRAC_PI_3;

/// World units per tick.
pub const PLAYER_VELOCITY: f32 = 4.0;
/// Radians per tick at full turn input.
pub const PLAYER_ROTATION: f32 = 0.15;
/// Mouse pixels to turn input.
pub const MOUSE_SENSITIVITY: f32 = 0.02;

/// Simulation ticks per second.
pub const TICK_RATE: f32 = 60.0;
/// Ticks between sprite animation frames.
pub const SPRITE_FRAME_TICKS: u64 = 8;

#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub fov: f32,
    pub clear_color: Color,
    /// Multiplier for East/West faces.
    pub directional_shade: f32,
    /// Darkest distance shade.
    pub min_shade: f32,
    /// Sprites closer than this are not drawn.
    pub sprite_min_distance: f32,
    /// Sprites projected larger than this are not drawn.
    pub sprite_max_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            fov: FOV,
            clear_color: Color::new(24, 24, 32, 255),
            directional_shade: 0.6,
            min_shade: 0.2,
            sprite_min_distance: 16.0,
            sprite_max_scale: 32.0,
        }
    }
}

impl RenderConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[inline]
    pub fn half_height(&self) -> u32 {
        self.height / 2
    }

    /// One ray per screen column.
    #[inline]
    pub fn total_rays(&self) -> usize {
        self.width as usize
    }

    /// Distance from the eye to the projection plane in pixels.
    #[inline]
    pub fn screen_distance(&self) -> f32 {
        (self.width as f32 / 2.0) / (self.fov / 2.0).tan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let cfg = RenderConfig::default();
        assert_eq!(cfg.total_rays(), 640);
        assert_eq!(cfg.half_height(), 240);
        assert!((cfg.screen_distance() - 320.0 / (FOV / 2.0).tan()).abs() < 1e-3);
    }
}
