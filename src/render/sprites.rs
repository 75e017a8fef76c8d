//! Billboard sprites, occluded per screen column by the ray distances.
use raylib::prelude::Vector2;

use crate::config::RenderConfig;
use crate::core::math::{RAD_180, RAD_360, distance, fix_angle};
use crate::core::player::Player;
use crate::core::ray::Ray;
use crate::core::sprite::Sprite;
use crate::render::renderer::Renderer;
use crate::render::textures::Texture;

/// Where and how large a sprite lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteProjection {
    /// Screen-space center.
    pub screen_x: f32,
    pub screen_y: f32,
    /// Texels to pixels.
    pub scale: f32,
    /// Euclidean distance to the viewer.
    pub distance: f32,
}

/// Projects a world point, `None` if it falls outside the drawable window
/// (too close, behind the viewer, or absurdly large).
pub fn project_sprite(pos: Vector2, player: &Player, cfg: &RenderConfig) -> Option<SpriteProjection> {
    let dist = distance(player.pos.x, player.pos.y, pos.x, pos.y);
    let dx = pos.x - player.pos.x;
    let dy = pos.y - player.pos.y;

    let theta = fix_angle((-dy).atan2(dx));
    let mut leftmost = fix_angle(player.a + cfg.fov / 2.0 - theta);
    // just past the left edge is a small negative angle, not nearly a full turn
    if leftmost > RAD_180 {
        leftmost -= RAD_360;
    }
    let delta = theta - player.a;

    let norm_dist = dist * delta.cos();
    let scale = cfg.screen_distance() / norm_dist;

    if !(dist > cfg.sprite_min_distance && scale > 0.0 && scale < cfg.sprite_max_scale) {
        return None;
    }

    Some(SpriteProjection {
        screen_x: (leftmost * (cfg.width as f32 / cfg.fov)).floor(),
        screen_y: (cfg.height as f32 / 2.0).floor(),
        scale,
        distance: dist,
    })
}

/// Draws every sprite, farthest first.
pub fn draw_sprites<R: Renderer>(
    r: &mut R,
    sprites: &[Sprite],
    player: &Player,
    rays: &[Ray],
    cfg: &RenderConfig,
) {
    let mut visible: Vec<(SpriteProjection, &Texture)> = sprites
        .iter()
        .filter_map(|s| {
            let frame = s.current_frame()?;
            let proj = project_sprite(s.position, player, cfg)?;
            Some((proj, frame))
        })
        .collect();

    visible.sort_by(|a, b| b.0.distance.total_cmp(&a.0.distance));

    for (proj, frame) in visible {
        draw_sprite(r, frame, proj, rays);
    }
}

/// Blits one scaled frame centered on the projection. A texel is dropped where
/// the wall recorded for its column is nearer than the sprite.
pub fn draw_sprite<R: Renderer>(r: &mut R, frame: &Texture, proj: SpriteProjection, rays: &[Ray]) {
    if rays.is_empty() {
        return;
    }
    let width = r.width() as i32;
    let line_width = (width as usize / rays.len()).max(1) as i32;
    let scale = proj.scale;
    let block = scale.ceil().max(1.0) as i32;

    let left = (proj.screen_x - frame.width as f32 / 2.0 * scale).floor();
    let top = (proj.screen_y - frame.height as f32 / 2.0 * scale).floor();

    for ty in 0..frame.height {
        for tx in 0..frame.width {
            let color = frame.pixel_color(tx, ty);
            if color.a == 0 {
                continue;
            }
            let dx = (left + tx as f32 * scale).floor() as i32;
            let dy = (top + ty as f32 * scale).floor() as i32;

            for ox in 0..block {
                let col = dx + ox;
                if col < 0 || col >= width {
                    continue;
                }
                let occluded = rays
                    .get((col / line_width) as usize)
                    .is_some_and(|ray| ray.size < proj.distance);
                if occluded {
                    continue;
                }
                for oy in 0..block {
                    r.draw_pixel(col, dy + oy, color);
                }
            }
        }
    }
}
