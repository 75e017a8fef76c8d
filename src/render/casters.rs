//! Grid-line ray caster: one ray per screen column.
//!
//! World convention: `x` grows east, `y` grows south, angles grow
//! counter-clockwise so a ray travels along `(cos a, -sin a)`.
use raylib::prelude::Vector2;

use crate::core::map::{Direction, Map, Tile};
use crate::core::math::{RAD_90, RAD_180, RAD_270, distance, fix_angle};
use crate::core::ray::Ray;

/// Nudge past a grid line so the lookup lands inside the next tile.
pub const STEP_EPSILON: f32 = 0.01;

pub struct RayCaster {
    rays: Vec<Ray>,
    fov: f32,
    angle_step: f32,
}

impl RayCaster {
    pub fn new(total_rays: usize, fov: f32) -> Self {
        let total_rays = total_rays.max(1);
        let angle_step = if total_rays > 1 {
            fov / (total_rays - 1) as f32
        } else {
            0.0
        };
        Self {
            rays: (0..total_rays).map(Ray::new).collect(),
            fov,
            angle_step,
        }
    }

    #[inline]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Recomputes every ray in place for a viewer at `source` facing `view_angle`.
    pub fn cast(&mut self, map: &Map, source: Vector2, view_angle: f32) {
        // a lone ray looks straight ahead
        let half_fov = if self.rays.len() > 1 { self.fov / 2.0 } else { 0.0 };
        let mut misses = 0usize;

        for ray in self.rays.iter_mut() {
            let offset = half_fov - ray.index as f32 * self.angle_step;
            ray.angle = fix_angle(view_angle + offset);
            ray.angle_fish_eye_fix = fix_angle(offset);
            ray.source = source;
            ray.clear_hit();

            let Some(source_tile) = map.tile_from_position(source) else {
                misses += 1;
                continue;
            };

            let horizontal = check_horizontal(map, source, ray.angle, source_tile);
            let vertical = check_vertical(map, source, ray.angle, source_tile);

            let h_dist = horizontal.map_or(Ray::NO_HIT, |p| distance(source.x, source.y, p.x, p.y));
            let v_dist = vertical.map_or(Ray::NO_HIT, |p| distance(source.x, source.y, p.x, p.y));

            let (point, size, dir) = match (horizontal, vertical) {
                (None, None) => {
                    misses += 1;
                    continue;
                }
                (Some(h), _) if h_dist <= v_dist => (h, h_dist, horizontal_face(ray.angle)),
                (_, Some(v)) => (v, v_dist, vertical_face(ray.angle)),
                (Some(h), None) => (h, h_dist, horizontal_face(ray.angle)),
            };

            ray.destination = Some(point);
            ray.size = size;
            ray.collision_direction = Some(dir);
            ray.collided_tile = map.tile_from_position(point).map(|t| t.index);
        }

        if misses > 0 {
            log::trace!("cast: {misses} of {} rays hit nothing", self.rays.len());
        }
    }
}

/// Face struck when the horizontal-line search wins.
#[inline]
pub fn horizontal_face(angle: f32) -> Direction {
    if angle > 0.0 && angle < RAD_180 {
        Direction::South
    } else {
        Direction::North
    }
}

/// Face struck when the vertical-line search wins.
#[inline]
pub fn vertical_face(angle: f32) -> Direction {
    if angle < RAD_90 || angle > RAD_270 {
        Direction::West
    } else {
        Direction::East
    }
}

/// Walks successive horizontal grid lines (`y` a multiple of the tile size).
fn check_horizontal(map: &Map, source: Vector2, angle: f32, source_tile: &Tile) -> Option<Vector2> {
    let ts = map.tile_size;
    // dx/dy along the ray
    let a_tan = -1.0 / angle.tan();

    let (start_y, step_y) = if angle > 0.0 && angle < RAD_180 {
        (source_tile.position.y - STEP_EPSILON, -ts)
    } else if angle > RAD_180 {
        (source_tile.position.y + ts + STEP_EPSILON, ts)
    } else {
        // parallel to horizontal lines
        return None;
    };

    let start = Vector2::new(source.x + (start_y - source.y) * a_tan, start_y);
    walk(map, start, Vector2::new(step_y * a_tan, step_y), map.height)
}

/// Walks successive vertical grid lines (`x` a multiple of the tile size).
fn check_vertical(map: &Map, source: Vector2, angle: f32, source_tile: &Tile) -> Option<Vector2> {
    let ts = map.tile_size;
    // dy/dx along the ray
    let n_tan = -angle.tan();

    let (start_x, step_x) = if angle > RAD_90 && angle < RAD_270 {
        (source_tile.position.x - STEP_EPSILON, -ts)
    } else if angle < RAD_90 || angle > RAD_270 {
        (source_tile.position.x + ts + STEP_EPSILON, ts)
    } else {
        // parallel to vertical lines
        return None;
    };

    let start = Vector2::new(start_x, source.y + (start_x - source.x) * n_tan);
    walk(map, start, Vector2::new(step_x, step_x * n_tan), map.width)
}

/// Steps from `start` by `step` until a colliding tile is found.
///
/// Both coordinates move monotonically, so once the point leaves the map it
/// never comes back and the walk stops. `lines` (grid lines crossed along the
/// stepping axis) caps it regardless.
fn walk(map: &Map, start: Vector2, step: Vector2, lines: usize) -> Option<Vector2> {
    let mut p = start;
    for _ in 0..=lines {
        match map.tile_from_position(p) {
            Some(tile) if tile.collision => return Some(p),
            Some(_) => {
                p.x += step.x;
                p.y += step.y;
            }
            None => return None,
        }
    }
    None
}
