use raylib::prelude::Vector2;

use crate::config::{PLAYER_ROTATION, PLAYER_VELOCITY};
use crate::core::map::SpawnLocation;
use crate::core::math::fix_angle;

/// The viewpoint: where the camera stands and which way it faces.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vector2,
    /// Facing angle in `[0, 2π)`.
    pub a: f32,
    pub move_speed: f32,
    pub rot_speed: f32,
    /// Collision radius in world units.
    pub radius: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            pos: Vector2::new(x, y),
            a: fix_angle(angle),
            move_speed: PLAYER_VELOCITY,
            rot_speed: PLAYER_ROTATION,
            radius: 0.0,
        }
    }

    pub fn from_spawn(spawn: SpawnLocation) -> Self {
        Self::new(spawn.x, spawn.y, spawn.a)
    }

    #[inline]
    pub fn set_angle(&mut self, angle: f32) {
        self.a = fix_angle(angle);
    }
}
