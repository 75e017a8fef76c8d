//! Screen projector: turns the ray array into sky, floor, ceiling and
//! textured wall columns.
use raylib::prelude::Color;

use crate::config::RenderConfig;
use crate::core::map::{Direction, Map};
use crate::core::math::{RAD_90, RAD_180, RAD_270, radians_to_degrees};
use crate::core::player::Player;
use crate::core::ray::Ray;
use crate::render::casters::RayCaster;
use crate::render::renderer::Renderer;
use crate::render::sprites::draw_sprites;
use crate::render::textures::{Texture, TextureManager, shade};

/// Vertical extent of one wall column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallStrip {
    /// Projected height before clamping to the screen.
    pub height: i32,
    /// Height actually drawn, at most the screen height.
    pub draw_height: i32,
    /// First screen row of the strip.
    pub start_y: i32,
}

/// Projected wall height for a perpendicular distance.
#[inline]
pub fn wall_height(tile_size: f32, screen_height: u32, corrected_distance: f32) -> i32 {
    (tile_size * screen_height as f32 / corrected_distance).floor() as i32
}

/// Linear falloff from full brightness at distance 0 down to `min_shade`
/// at `half_height` and beyond.
#[inline]
pub fn distance_shade(distance: f32, half_height: f32, min_shade: f32) -> f32 {
    (min_shade + (1.0 - min_shade) * (1.0 - distance / half_height)).clamp(min_shade, 1.0)
}

/// Strip geometry for a ray, `None` if it hit nothing usable.
pub fn wall_strip(ray: &Ray, tile_size: f32, screen_height: u32) -> Option<WallStrip> {
    if !ray.is_hit() {
        return None;
    }
    let dist = ray.corrected_distance();
    if !dist.is_finite() || dist <= 0.0 {
        return None;
    }
    let height = wall_height(tile_size, screen_height, dist).max(0);
    let draw_height = height.min(screen_height as i32);
    let start_y = (screen_height as f32 / 2.0 - draw_height as f32 / 2.0).floor() as i32;
    Some(WallStrip { height, draw_height, start_y })
}

/// Texture column for the hit point, mirrored so a face reads the same way
/// from either side.
pub fn texture_x(ray: &Ray, tile_size: f32, texture_width: u32) -> u32 {
    let (Some(dest), Some(dir)) = (ray.destination, ray.collision_direction) else {
        return 0;
    };
    let tw = texture_width as f32;
    let (coord, mirror) = if dir.is_vertical() {
        (dest.y, ray.angle > RAD_90 && ray.angle < RAD_270)
    } else {
        (dest.x, ray.angle > RAD_180)
    };
    let mut tx = (coord * tw / tile_size).rem_euclid(tw);
    if mirror {
        tx = tw - tx;
    }
    (tx.floor() as u32).min(texture_width.saturating_sub(1))
}

/// Texel index for the fractional part of a tile coordinate.
#[inline]
fn surface_texel(v: f32, size: u32) -> u32 {
    let span = size.saturating_sub(1).max(1) as f32;
    let t = (v.rem_euclid(1.0) * span).floor() as i64;
    t.rem_euclid(size.max(1) as i64) as u32
}

/// Casts from the player, then draws the whole frame and presents it.
pub fn render_frame<R: Renderer>(
    r: &mut R,
    caster: &mut RayCaster,
    map: &Map,
    player: &Player,
    textures: &TextureManager,
    cfg: &RenderConfig,
) {
    // the target decides the screen size
    let cfg = &RenderConfig {
        width: r.width(),
        height: r.height(),
        ..*cfg
    };
    caster.cast(map, player.pos, player.a);
    r.clear(cfg.clear_color);
    render_3d(r, map, player, caster.rays(), textures, cfg);
    draw_sprites(r, &map.sprites, player, caster.rays(), cfg);
    r.swap_buffer();
}

/// One column per ray: sky, floor and ceiling, then the wall strip.
pub fn render_3d<R: Renderer>(
    r: &mut R,
    map: &Map,
    player: &Player,
    rays: &[Ray],
    textures: &TextureManager,
    cfg: &RenderConfig,
) {
    if rays.is_empty() {
        return;
    }
    let line_width = (r.width() as usize / rays.len()).max(1) as i32;
    let half = cfg.half_height() as i32;

    for ray in rays {
        let x = ray.index as i32 * line_width;
        let strip = wall_strip(ray, map.tile_size, r.height());
        let (start_y, draw_height) = strip.map_or((half, 0), |s| (s.start_y, s.draw_height));

        draw_skybox(r, map, textures, ray, x, line_width, start_y);
        draw_floor_ceiling(r, map, textures, player, ray, x, line_width, start_y, draw_height, cfg);

        if let Some(strip) = strip {
            draw_wall(r, map, textures, ray, x, line_width, strip, cfg);
        }
    }
}

fn draw_skybox<R: Renderer>(
    r: &mut R,
    map: &Map,
    textures: &TextureManager,
    ray: &Ray,
    x: i32,
    line_width: i32,
    wall_start_y: i32,
) {
    let Some(sky) = map.skybox_texture.and_then(|id| textures.get(id)) else {
        return;
    };
    let half = r.height() / 2;
    if half == 0 || sky.width == 0 || sky.height == 0 {
        return;
    }
    let degrees = radians_to_degrees(ray.angle).floor() as u32 % 360;
    let tx = degrees * sky.width / 360;
    let y_scale = sky.height as f32 / half as f32;
    let last_y = wall_start_y.min(half as i32);

    for y in 0..last_y {
        let ty = (y as f32 * y_scale).floor() as u32;
        let color = sky.pixel_color(tx, ty.min(sky.height - 1));
        r.draw_horizontal_line(x, x + line_width - 1, y, color);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_floor_ceiling<R: Renderer>(
    r: &mut R,
    map: &Map,
    textures: &TextureManager,
    player: &Player,
    ray: &Ray,
    x: i32,
    line_width: i32,
    wall_start_y: i32,
    wall_height: i32,
    cfg: &RenderConfig,
) {
    let screen_h = r.height() as i32;
    let half = screen_h / 2;
    if half == 0 {
        return;
    }
    let halff = half as f32;
    let (sin, cos) = ray.angle.sin_cos();
    let cos_fish = ray.angle_fish_eye_fix.cos();
    if cos_fish <= 0.0 {
        return;
    }
    let (map_w, map_h) = (map.width as f32, map.height as f32);
    let px = player.pos.x / map.tile_size;
    let py = player.pos.y / map.tile_size;

    for j in 0..half {
        let n = (halff / (halff - j as f32)) / cos_fish;
        let wx = px + cos * n;
        let wy = py - sin * n;
        // rows near the horizon land far outside the map
        if !(0.0..=map_w).contains(&wx) || !(0.0..=map_h).contains(&wy) {
            continue;
        }
        let Some(tile) = map.tile(wx.floor() as i32, wy.floor() as i32) else {
            continue;
        };

        let pixel_y = half * 2 - j - 1;
        let k = distance_shade(j as f32, halff, cfg.min_shade);

        if tile.floor_texture.is_some() && pixel_y >= wall_start_y + wall_height {
            let tex = textures.get_or_debug(tile.floor_texture);
            let color = sample_surface(tex, wx, wy);
            r.draw_horizontal_line(x, x + line_width - 1, pixel_y, shade(color, k));
        }

        let ceiling_y = screen_h - pixel_y;
        if tile.ceiling_texture.is_some() && ceiling_y < wall_start_y {
            let tex = textures.get_or_debug(tile.ceiling_texture);
            let color = sample_surface(tex, wx, wy);
            r.draw_horizontal_line(x, x + line_width - 1, ceiling_y, shade(color, k));
        }
    }
}

#[inline]
fn sample_surface(tex: &Texture, wx: f32, wy: f32) -> Color {
    tex.pixel_color(surface_texel(wx, tex.width), surface_texel(wy, tex.height))
}

#[allow(clippy::too_many_arguments)]
fn draw_wall<R: Renderer>(
    r: &mut R,
    map: &Map,
    textures: &TextureManager,
    ray: &Ray,
    x: i32,
    line_width: i32,
    strip: WallStrip,
    cfg: &RenderConfig,
) {
    let (Some(index), Some(dir)) = (ray.collided_tile, ray.collision_direction) else {
        return;
    };
    let Some(tile) = map.tile_at(index) else {
        return;
    };
    if strip.height <= 0 {
        return;
    }

    let texture = textures.get_or_debug(tile.wall_texture(dir));
    let detail = tile.wall_detail_texture(dir).and_then(|id| textures.get(id));

    let screen_h = r.height() as i32;
    let skip_rows = if strip.height > screen_h {
        (strip.height - screen_h) as f32 / 2.0
    } else {
        0.0
    };

    let mut base = WallSampler::new(ray, texture, strip.height, skip_rows, map.tile_size);
    let mut over = detail.map(|t| WallSampler::new(ray, t, strip.height, skip_rows, map.tile_size));

    let dir_shade = face_shade(dir, cfg.directional_shade);
    let dist_shade = distance_shade(ray.corrected_distance(), cfg.half_height() as f32, cfg.min_shade);
    let k = dir_shade * dist_shade;

    for y in strip.start_y..strip.start_y + strip.draw_height {
        let mut color = base.next();
        if let Some(over) = over.as_mut() {
            let c = over.next();
            if c.a != 0 {
                color = c;
            }
        }
        r.draw_horizontal_line(x, x + line_width - 1, y, shade(color, k));
    }
}

/// Directional lighting: East/West faces are darkened.
#[inline]
pub fn face_shade(dir: Direction, directional_shade: f32) -> f32 {
    if dir.is_vertical() { directional_shade } else { 1.0 }
}

/// Walks one texture column top to bottom.
struct WallSampler<'a> {
    texture: &'a Texture,
    tx: u32,
    ty: f32,
    step: f32,
}

impl<'a> WallSampler<'a> {
    fn new(ray: &Ray, texture: &'a Texture, wall_height: i32, skip_rows: f32, tile_size: f32) -> Self {
        let step = texture.height as f32 / wall_height as f32;
        Self {
            texture,
            tx: texture_x(ray, tile_size, texture.width),
            ty: skip_rows * step,
            step,
        }
    }

    #[inline]
    fn next(&mut self) -> Color {
        let row = (self.ty.floor() as u32).min(self.texture.height.saturating_sub(1));
        self.ty += self.step;
        self.texture.pixel_color(self.tx, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::map::TileIndex;
    use crate::render::framebuffer::Framebuffer;
    use crate::render::textures::TextureId;
    use raylib::prelude::Vector2;

    fn hit_ray(size: f32, fish: f32, angle: f32, dest: Vector2, dir: Direction) -> Ray {
        let mut ray = Ray::new(0);
        ray.size = size;
        ray.angle = angle;
        ray.angle_fish_eye_fix = fish;
        ray.destination = Some(dest);
        ray.collision_direction = Some(dir);
        ray.collided_tile = Some(TileIndex { x: 0, y: 0 });
        ray
    }

    #[test]
    fn doubling_distance_halves_wall_height() {
        for d in [10.0f32, 25.0, 40.0, 77.0, 128.0] {
            let near = wall_height(32.0, 480, d);
            let far = wall_height(32.0, 480, 2.0 * d);
            assert!((near as f32 / 2.0 - far as f32).abs() <= 1.0, "{near} vs {far}");
        }
    }

    #[test]
    fn tall_walls_are_clamped_but_keep_height() {
        let ray = hit_ray(4.0, 0.0, 0.0, Vector2::new(64.0, 10.0), Direction::West);
        let strip = wall_strip(&ray, 32.0, 480).unwrap();
        assert_eq!(strip.height, 3840);
        assert_eq!(strip.draw_height, 480);
        assert_eq!(strip.start_y, 0);
    }

    #[test]
    fn short_walls_are_centered() {
        let ray = hit_ray(160.0, 0.0, 0.0, Vector2::new(64.0, 10.0), Direction::West);
        let strip = wall_strip(&ray, 32.0, 480).unwrap();
        assert_eq!(strip.height, 96);
        assert_eq!(strip.start_y, 240 - 48);
    }

    #[test]
    fn missed_ray_has_no_strip() {
        assert!(wall_strip(&Ray::new(3), 32.0, 480).is_none());
    }

    #[test]
    fn shade_bounds() {
        assert!((distance_shade(0.0, 240.0, 0.2) - 1.0).abs() < 1e-6);
        assert!((distance_shade(240.0, 240.0, 0.2) - 0.2).abs() < 1e-6);
        assert!((distance_shade(10_000.0, 240.0, 0.2) - 0.2).abs() < 1e-6);
        assert!((distance_shade(-5.0, 240.0, 0.2) - 1.0).abs() < 1e-6);
        let mid = distance_shade(120.0, 240.0, 0.2);
        assert!((mid - 0.6).abs() < 1e-6);
    }

    #[test]
    fn vertical_faces_are_darker() {
        assert_eq!(face_shade(Direction::East, 0.6), 0.6);
        assert_eq!(face_shade(Direction::West, 0.6), 0.6);
        assert_eq!(face_shade(Direction::North, 0.6), 1.0);
        assert_eq!(face_shade(Direction::South, 0.6), 1.0);
    }

    #[test]
    fn texture_x_follows_hit_position() {
        // horizontal face, looking up: no mirroring
        let ray = hit_ray(10.0, 0.0, 1.0, Vector2::new(40.0, 31.99), Direction::South);
        assert_eq!(texture_x(&ray, 32.0, 64), 16);
        // same point looking down is mirrored
        let ray = hit_ray(10.0, 0.0, 4.0, Vector2::new(40.0, 32.01), Direction::North);
        assert_eq!(texture_x(&ray, 32.0, 64), 48);
        // vertical face, looking right
        let ray = hit_ray(10.0, 0.0, 0.2, Vector2::new(64.01, 72.0), Direction::West);
        assert_eq!(texture_x(&ray, 32.0, 64), 16);
        // vertical face, looking left is mirrored
        let ray = hit_ray(10.0, 0.0, 3.0, Vector2::new(63.99, 72.0), Direction::East);
        assert_eq!(texture_x(&ray, 32.0, 64), 48);
    }

    #[test]
    fn texture_x_stays_in_range_on_tile_edge() {
        let ray = hit_ray(10.0, 0.0, 4.0, Vector2::new(64.0, 32.01), Direction::North);
        assert_eq!(texture_x(&ray, 32.0, 64), 63);
    }

    #[test]
    fn surface_texel_wraps_negative_fractions() {
        assert_eq!(surface_texel(2.5, 33), 16);
        assert_eq!(surface_texel(-0.5, 33), 16);
        assert!(surface_texel(0.999, 8) < 8);
    }

    #[test]
    fn zero_height_sky_is_skipped() {
        let mut textures = TextureManager::new();
        let sky = textures.insert(Texture::filled("sky", 360, 0, Color::BLUE));
        let mut map = Map::enclosed(5, 5, 20.0, TextureId(0));
        map.skybox_texture = Some(sky);

        let cfg = RenderConfig::new(40, 30);
        let mut fb = Framebuffer::new(40, 30);
        let mut caster = RayCaster::new(cfg.total_rays(), cfg.fov);
        render_frame(&mut fb, &mut caster, &map, &Player::new(50.0, 50.0, 0.0), &textures, &cfg);
        assert_eq!(fb.front()[0], cfg.clear_color);
    }
}
