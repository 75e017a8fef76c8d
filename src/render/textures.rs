//! Texture repository: CPU pixmaps addressed by id, with a debug fallback.
use std::collections::HashMap;
use std::fmt;

use raylib::prelude::{Color, Image};

/// Handle into a [`TextureManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

#[derive(Debug)]
pub enum TextureError {
    Load { path: String, reason: String },
    Empty { name: String },
    Unknown(String),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Load { path, reason } => write!(f, "failed to load texture {path}: {reason}"),
            TextureError::Empty { name } => write!(f, "texture {name} has no pixels"),
            TextureError::Unknown(name) => write!(f, "unknown texture: {name}"),
        }
    }
}

impl std::error::Error for TextureError {}

/// Immutable pixmap sampled per pixel.
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl Texture {
    pub fn new(name: &str, width: u32, height: u32, pixels: Vec<Color>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self { name: name.to_string(), width, height, pixels }
    }

    pub fn filled(name: &str, width: u32, height: u32, color: Color) -> Self {
        Self::new(name, width, height, vec![color; (width * height) as usize])
    }

    /// Pixel at `(x, y)`; coordinates wrap so sampling never panics.
    #[inline]
    pub fn pixel_color(&self, x: u32, y: u32) -> Color {
        if self.pixels.is_empty() {
            return Color::BLANK;
        }
        let xi = (x % self.width) as usize;
        let yi = (y % self.height) as usize;
        self.pixels[yi * self.width as usize + xi]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Copies the `w × h` block at `(x0, y0)` into a new texture.
    pub fn sub_texture(&self, name: &str, x0: u32, y0: u32, w: u32, h: u32) -> Texture {
        let mut px = Vec::with_capacity((w * h) as usize);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                px.push(self.pixel_color(x, y));
            }
        }
        Texture::new(name, w, h, px)
    }

    /// Decodes an image file (PNG, JPG, BMP...) through raylib.
    pub fn load(path: &str) -> Result<Texture, TextureError> {
        let img = Image::load_image(path).map_err(|e| TextureError::Load {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let (w, h) = (img.width(), img.height());
        if w <= 0 || h <= 0 {
            return Err(TextureError::Empty { name: path.to_string() });
        }
        let data = img.get_image_data().to_vec();
        let name = std::path::Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(path);
        Ok(Texture::new(name, w as u32, h as u32, data))
    }

    // ---- procedural builders ----

    /// Checker of `base` and a lighter tint.
    pub fn checker(name: &str, w: u32, h: u32, base: Color, cell: u32) -> Texture {
        let cell = cell.max(1);
        let mut tex = Texture::filled(name, w, h, base);
        for y in 0..h {
            for x in 0..w {
                if ((x / cell) + (y / cell)) % 2 == 0 {
                    tex.set_pixel(x, y, mix(base, Color::WHITE, 48));
                }
            }
        }
        tex
    }

    /// Magenta/black checker shown where a face has no texture.
    pub fn debug(size: u32) -> Texture {
        let mut tex = Texture::filled("debug", size, size, Color::BLACK);
        let cell = (size / 4).max(1);
        for y in 0..size {
            for x in 0..size {
                if ((x / cell) + (y / cell)) % 2 == 0 {
                    tex.set_pixel(x, y, Color::MAGENTA);
                }
            }
        }
        tex
    }

    /// Running-bond brick wall with mortar lines.
    pub fn bricks(name: &str, w: u32, h: u32, brick: Color, mortar: Color) -> Texture {
        let mut tex = Texture::filled(name, w, h, brick);
        let row_h = (h / 4).max(2);
        let brick_w = (w / 2).max(2);
        for y in 0..h {
            let row = y / row_h;
            let shift = if row % 2 == 0 { 0 } else { brick_w / 2 };
            for x in 0..w {
                let mortar_row = y % row_h == 0;
                let mortar_col = (x + shift) % brick_w == 0;
                if mortar_row || mortar_col {
                    tex.set_pixel(x, y, mortar);
                } else if (x * 7 + y * 13) % 11 == 0 {
                    tex.set_pixel(x, y, mix(brick, Color::BLACK, 40));
                }
            }
        }
        tex
    }

    /// 360-wide cylindrical sky: one column per degree.
    pub fn skybox(name: &str, h: u32) -> Texture {
        let w = 360u32;
        let mut tex = Texture::filled(name, w, h, Color::BLACK);
        for y in 0..h {
            let b = (y * 255 / h) as u8;
            for x in 0..w {
                let d = if x < 180 { x } else { 360 - x };
                let r = (d * 255 / w) as u8;
                tex.set_pixel(x, y, Color::new(r, 0, b, 255));
            }
        }
        tex
    }

    /// Transparent overlay with a diagonal crack, for wall detail layers.
    pub fn cracks(name: &str, w: u32, h: u32) -> Texture {
        let mut tex = Texture::filled(name, w, h, Color::BLANK);
        let dark = Color::new(20, 16, 12, 255);
        for y in 0..h {
            let x = (y * w / h.max(1) + (y / 3) % 3) % w;
            tex.set_pixel(x, y, dark);
            if x + 1 < w {
                tex.set_pixel(x + 1, y, dark);
            }
        }
        tex
    }

    /// Soft glowing orb on a transparent background, tiled `frames` times
    /// horizontally with growing radius.
    pub fn orb_strip(name: &str, size: u32, frames: u32, color: Color) -> Texture {
        let frames = frames.max(1);
        let mut tex = Texture::filled(name, size * frames, size, Color::BLANK);
        let c = size as f32 * 0.5;
        for f in 0..frames {
            let r = size as f32 * (0.25 + 0.05 * f as f32);
            for y in 0..size {
                for x in 0..size {
                    let dx = x as f32 - c;
                    let dy = y as f32 - c;
                    let d = (dx * dx + dy * dy).sqrt();
                    if d <= r {
                        let t = (1.0 - d / r).clamp(0.0, 1.0);
                        tex.set_pixel(f * size + x, y, mix(color, Color::WHITE, (t * 200.0) as u8));
                    }
                }
            }
        }
        tex
    }
}

/// Linear blend of `a` toward `b` by `t/255`.
#[inline]
pub fn mix(a: Color, b: Color, t: u8) -> Color {
    let ta = t as u16;
    let na = 255u16 - ta;
    let m = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
    Color::new(m(a.r, b.r), m(a.g, b.g), m(a.b, b.b), m(a.a, b.a))
}

/// Multiplies RGB by `k` (clamped to `[0, 1]`), keeping alpha.
#[inline]
pub fn shade(c: Color, k: f32) -> Color {
    let k = k.clamp(0.0, 1.0);
    let mul = |v: u8| -> u8 { (v as f32 * k) as u8 };
    Color::new(mul(c.r), mul(c.g), mul(c.b), c.a)
}

/// Owns every texture a level needs. Always holds the debug texture.
pub struct TextureManager {
    textures: Vec<Texture>,
    by_name: HashMap<String, TextureId>,
    debug: TextureId,
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        let mut tm = Self {
            textures: Vec::new(),
            by_name: HashMap::new(),
            debug: TextureId(0),
        };
        tm.debug = tm.insert(Texture::debug(32));
        tm
    }

    /// Adds a texture, replacing any previous one with the same name.
    pub fn insert(&mut self, texture: Texture) -> TextureId {
        if let Some(&id) = self.by_name.get(&texture.name) {
            self.textures[id.0] = texture;
            return id;
        }
        let id = TextureId(self.textures.len());
        self.by_name.insert(texture.name.clone(), id);
        self.textures.push(texture);
        id
    }

    /// Loads an image file from disk.
    pub fn load(&mut self, path: &str) -> Result<TextureId, TextureError> {
        let tex = Texture::load(path)?;
        log::info!("loaded texture {} ({}x{}) from {path}", tex.name, tex.width, tex.height);
        Ok(self.insert(tex))
    }

    /// Loads `path` if it decodes, otherwise registers `fallback` in its place.
    pub fn load_or(&mut self, path: &str, fallback: Texture) -> TextureId {
        match self.load(path) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("{e}; using procedural {}", fallback.name);
                self.insert(fallback)
            }
        }
    }

    pub fn id(&self, name: &str) -> Result<TextureId, TextureError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| TextureError::Unknown(name.to_string()))
    }

    #[inline]
    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.0)
    }

    #[inline]
    pub fn debug(&self) -> &Texture {
        &self.textures[self.debug.0]
    }

    /// Texture for `id`, or the debug texture when missing.
    #[inline]
    pub fn get_or_debug(&self, id: Option<TextureId>) -> &Texture {
        id.and_then(|id| self.get(id)).unwrap_or_else(|| self.debug())
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
