//! Angle helpers shared by the caster and the projectors.
use std::f32::consts::{FRAC_PI_2, PI, TAU};

pub const RAD_90: f32 = FRAC_PI_2;
pub const RAD_180: f32 = PI;
pub const RAD_270: f32 = PI + FRAC_PI_2;
pub const RAD_360: f32 = TAU;

/// Maps any angle into `[0, 2π)`.
#[inline]
pub fn fix_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let a = angle.rem_euclid(RAD_360);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if a >= RAD_360 { 0.0 } else { a }
}

#[inline]
pub fn radians_to_degrees(angle: f32) -> f32 {
    angle * 180.0 / PI
}

#[inline]
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ((bx - ax) * (bx - ax) + (by - ay) * (by - ay)).sqrt()
}
