use raylib::prelude::Vector2;

use crate::core::map::{Direction, TileIndex};

/// Result of casting one screen column.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub index: usize,
    /// Absolute world angle, normalized.
    pub angle: f32,
    /// Angle relative to the view center, normalized.
    pub angle_fish_eye_fix: f32,
    pub source: Vector2,
    /// First wall boundary hit, `None` when nothing was found.
    pub destination: Option<Vector2>,
    /// Euclidean distance from `source` to `destination`.
    pub size: f32,
    pub collision_direction: Option<Direction>,
    pub collided_tile: Option<TileIndex>,
}

impl Ray {
    /// Distance reported for rays that hit nothing.
    pub const NO_HIT: f32 = f32::INFINITY;

    pub fn new(index: usize) -> Self {
        Self {
            index,
            angle: 0.0,
            angle_fish_eye_fix: 0.0,
            source: Vector2::new(0.0, 0.0),
            destination: None,
            size: Self::NO_HIT,
            collision_direction: None,
            collided_tile: None,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.collided_tile.is_some() && self.destination.is_some()
    }

    /// Perpendicular (view-plane) distance, removing the fish-eye bulge.
    #[inline]
    pub fn corrected_distance(&self) -> f32 {
        self.size * self.angle_fish_eye_fix.cos()
    }

    pub(crate) fn clear_hit(&mut self) {
        self.destination = None;
        self.size = Self::NO_HIT;
        self.collision_direction = None;
        self.collided_tile = None;
    }
}
