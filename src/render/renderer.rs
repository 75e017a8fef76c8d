use raylib::prelude::Color;

use crate::render::textures::Texture;

/// Drawing surface the projectors write into. Colors with alpha 0 are skipped.
pub trait Renderer {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn clear(&mut self, color: Color);

    fn draw_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Inclusive span `x1..=x2` on row `y`.
    fn draw_horizontal_line(&mut self, x1: i32, x2: i32, y: i32, color: Color) {
        for x in x1..=x2 {
            self.draw_pixel(x, y, color);
        }
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for py in y..y + h {
            self.draw_horizontal_line(x, x + w - 1, py, color);
        }
    }

    /// Blits `texture` with its top-left corner at `(x, y)`, each texel
    /// covering a `scale × scale` block.
    fn draw_texture(&mut self, x: i32, y: i32, texture: &Texture, scale: f32) {
        let block = scale.ceil().max(1.0) as i32;
        for ty in 0..texture.height {
            for tx in 0..texture.width {
                let color = texture.pixel_color(tx, ty);
                if color.a == 0 {
                    continue;
                }
                let dx = (x as f32 + tx as f32 * scale).floor() as i32;
                let dy = (y as f32 + ty as f32 * scale).floor() as i32;
                for oy in 0..block {
                    for ox in 0..block {
                        self.draw_pixel(dx + ox, dy + oy, color);
                    }
                }
            }
        }
    }

    /// Presents the finished frame.
    fn swap_buffer(&mut self);
}
