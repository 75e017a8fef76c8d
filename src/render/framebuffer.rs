use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::{Color, Texture2D};

use crate::render::renderer::Renderer;

/// CPU double buffer. Projectors draw into the back buffer; `swap_buffer`
/// makes it the visible front buffer.
pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    front_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            front_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
        }
    }

    /// Back-buffer pixel; background outside the buffer.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    /// Last presented frame.
    pub fn front(&self) -> &[Color] {
        &self.front_buffer
    }

    /// Front buffer as RGBA8 bytes, without copying.
    pub fn front_bytes(&self) -> &[u8] {
        let byte_len = self.front_buffer.len() * std::mem::size_of::<Color>();
        unsafe { std::slice::from_raw_parts(self.front_buffer.as_ptr() as *const u8, byte_len) }
    }

    /// Copies the front buffer into a persistent GPU texture of the same size.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        if let Err(e) = tex.update_texture(self.front_bytes()) {
            log::warn!("framebuffer upload ({}x{}) failed: {e:?}", self.width, self.height);
        }
    }
}

impl Renderer for Framebuffer {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn clear(&mut self, color: Color) {
        self.color_buffer.fill(color);
    }

    #[inline]
    fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        if color.a == 0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    fn draw_horizontal_line(&mut self, x1: i32, x2: i32, y: i32, color: Color) {
        if color.a == 0 || y < 0 || y as u32 >= self.height {
            return;
        }
        let lo = x1.max(0);
        let hi = x2.min(self.width as i32 - 1);
        if lo > hi {
            return;
        }
        let row = (y as u32 * self.width) as usize;
        self.color_buffer[row + lo as usize..=row + hi as usize].fill(color);
    }

    fn swap_buffer(&mut self) {
        self.front_buffer.copy_from_slice(&self.color_buffer);
    }
}
