//! Text map loading.
//!
//! One character per tile, one line per row:
//!
//! | char        | tile                                   |
//! |-------------|----------------------------------------|
//! | `#`         | wall, first palette texture            |
//! | `1`..`9`    | wall, palette texture `n - 1`          |
//! | `c`         | wall with the detail overlay           |
//! | space, `.`  | open floor                             |
//! | `P`         | open floor, player spawn facing east   |
//! | `s`         | open floor, sprite anchor              |
//!
//! Anything else is treated as a solid wall. Short rows are padded with walls.
use std::fmt;
use std::fs;
use std::path::Path;

use raylib::prelude::Vector2;

use crate::core::map::{Map, SpawnLocation, Tile};
use crate::core::sprite::Sprite;
use crate::render::textures::{Texture, TextureId};

#[derive(Debug)]
pub enum MapError {
    IoError(std::io::Error),
    Empty,
    NoOpenTile,
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::IoError(e)
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::IoError(e) => write!(f, "IO error: {}", e),
            MapError::Empty => write!(f, "map has no rows"),
            MapError::NoOpenTile => write!(f, "map has no open tile to spawn on"),
        }
    }
}

impl std::error::Error for MapError {}

/// Textures applied while parsing.
#[derive(Debug, Clone, Default)]
pub struct MapPalette {
    pub walls: Vec<TextureId>,
    pub detail: Option<TextureId>,
    pub floor: Option<TextureId>,
    pub ceiling: Option<TextureId>,
    pub skybox: Option<TextureId>,
    /// Animation strip shared by every `s` anchor.
    pub sprite_strip: Option<SpriteStrip>,
}

/// Horizontal strip of equally sized animation frames.
#[derive(Debug, Clone)]
pub struct SpriteStrip {
    pub texture: Texture,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: u32,
}

impl MapPalette {
    fn wall(&self, slot: usize) -> Option<TextureId> {
        self.walls.get(slot).or_else(|| self.walls.first()).copied()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Cell {
    Wall(usize),
    Cracked,
    Open,
    Spawn,
    SpriteAnchor,
}

fn classify(ch: char) -> Cell {
    match ch {
        ' ' | '.' | '\t' => Cell::Open,
        'P' => Cell::Spawn,
        's' => Cell::SpriteAnchor,
        'c' => Cell::Cracked,
        '1'..='9' => Cell::Wall(ch as usize - '1' as usize),
        _ => Cell::Wall(0),
    }
}

/// Reads and parses a map file.
pub fn load_map<P: AsRef<Path>>(path: P, tile_size: f32, palette: &MapPalette) -> Result<Map, MapError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let mut map = parse_map(&contents, tile_size, palette)?;
    if let Some(stem) = path.as_ref().file_stem().and_then(|s| s.to_str()) {
        map.name = stem.to_string();
    }
    Ok(map)
}

/// Parses a map from text.
pub fn parse_map(text: &str, tile_size: f32, palette: &MapPalette) -> Result<Map, MapError> {
    let mut grid: Vec<Vec<Cell>> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().map(classify).collect())
        .collect();

    if grid.is_empty() {
        return Err(MapError::Empty);
    }

    // equalize rows
    let width = grid.iter().map(|r| r.len()).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(width, Cell::Wall(0));
    }
    let height = grid.len();

    let mut map = Map::from_fn("untitled", width, height, tile_size, |x, y| {
        let mut tile = Tile::new(x, y, tile_size);
        match grid[y][x] {
            Cell::Wall(slot) => {
                tile.collision = true;
                tile.wall_texture = [palette.wall(slot); 4];
            }
            Cell::Cracked => {
                tile.collision = true;
                tile.wall_texture = [palette.wall(0); 4];
                tile.wall_detail_texture = [palette.detail; 4];
            }
            Cell::Open | Cell::Spawn | Cell::SpriteAnchor => {
                tile.floor_texture = palette.floor;
                tile.ceiling_texture = palette.ceiling;
            }
        }
        tile
    });
    map.skybox_texture = palette.skybox;

    let center = |x: usize, y: usize| ((x as f32 + 0.5) * tile_size, (y as f32 + 0.5) * tile_size);

    for (y, row) in grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let (cx, cy) = center(x, y);
            match cell {
                Cell::Spawn => map.spawn_locations.push(SpawnLocation { x: cx, y: cy, a: 0.0 }),
                Cell::SpriteAnchor => {
                    if let Some(strip) = &palette.sprite_strip {
                        let name = format!("sprite-{}", map.sprites.len());
                        map.sprites.push(Sprite::from_strip(
                            &name,
                            Vector2::new(cx, cy),
                            &strip.texture,
                            strip.frame_width,
                            strip.frame_height,
                            strip.frames,
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    if map.spawn_locations.is_empty() {
        let open = grid.iter().enumerate().find_map(|(y, row)| {
            row.iter()
                .position(|c| matches!(c, Cell::Open | Cell::SpriteAnchor))
                .map(|x| (x, y))
        });
        let (x, y) = open.ok_or(MapError::NoOpenTile)?;
        log::warn!("map has no spawn point; using tile ({x}, {y})");
        let (cx, cy) = center(x, y);
        map.spawn_locations.push(SpawnLocation { x: cx, y: cy, a: 0.0 });
    }

    log::info!(
        "parsed map {}x{} with {} spawn point(s) and {} sprite(s)",
        width,
        height,
        map.spawn_locations.len(),
        map.sprites.len()
    );
    Ok(map)
}
