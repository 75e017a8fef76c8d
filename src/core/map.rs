//! Tile grid: collision flags and per-face textures for one level.
use rand::Rng;
use rand::seq::SliceRandom;
use raylib::prelude::Vector2;

use crate::core::sprite::Sprite;
use crate::render::textures::TextureId;

/// Tile face struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Slot in the per-face texture arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// East/West faces lie on vertical grid lines.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub collision: bool,
    pub wall_texture: [Option<TextureId>; 4],
    pub wall_detail_texture: [Option<TextureId>; 4],
    pub floor_texture: Option<TextureId>,
    pub ceiling_texture: Option<TextureId>,
    pub index: TileIndex,
    pub position: Vector2,
}

impl Tile {
    pub fn new(x: usize, y: usize, tile_size: f32) -> Self {
        Self {
            collision: false,
            wall_texture: [None; 4],
            wall_detail_texture: [None; 4],
            floor_texture: None,
            ceiling_texture: None,
            index: TileIndex { x, y },
            position: Vector2::new(x as f32 * tile_size, y as f32 * tile_size),
        }
    }

    pub fn wall(mut self, texture: TextureId) -> Self {
        self.collision = true;
        self.wall_texture = [Some(texture); 4];
        self
    }

    #[inline]
    pub fn wall_texture(&self, dir: Direction) -> Option<TextureId> {
        self.wall_texture[dir.index()]
    }

    #[inline]
    pub fn wall_detail_texture(&self, dir: Direction) -> Option<TextureId> {
        self.wall_detail_texture[dir.index()]
    }
}

/// Where the player may start: world position plus facing angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnLocation {
    pub x: f32,
    pub y: f32,
    pub a: f32,
}

#[derive(Debug)]
pub struct Map {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub world_size: Vector2,
    pub skybox_texture: Option<TextureId>,
    pub spawn_locations: Vec<SpawnLocation>,
    pub sprites: Vec<Sprite>,
    tiles: Vec<Tile>,
}

impl Map {
    /// Builds a `width × height` grid, asking `make` for the tile at each `(x, y)`.
    /// The returned tile's `index` and `position` are overwritten to match the slot.
    pub fn from_fn<F>(name: &str, width: usize, height: usize, tile_size: f32, mut make: F) -> Self
    where
        F: FnMut(usize, usize) -> Tile,
    {
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let mut tile = make(x, y);
                tile.index = TileIndex { x, y };
                tile.position = Vector2::new(x as f32 * tile_size, y as f32 * tile_size);
                tiles.push(tile);
            }
        }
        Self {
            name: name.to_string(),
            width,
            height,
            tile_size,
            world_size: Vector2::new(width as f32 * tile_size, height as f32 * tile_size),
            skybox_texture: None,
            spawn_locations: Vec::new(),
            sprites: Vec::new(),
            tiles,
        }
    }

    /// Map with walls on the outer ring only.
    pub fn enclosed(width: usize, height: usize, tile_size: f32, wall: TextureId) -> Self {
        Self::from_fn("enclosed", width, height, tile_size, |x, y| {
            let tile = Tile::new(x, y, tile_size);
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                tile.wall(wall)
            } else {
                tile
            }
        })
    }

    /// Tile at grid coordinates, `None` outside the grid.
    #[inline]
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get(y * self.width + x)
    }

    #[inline]
    pub fn tile_at(&self, index: TileIndex) -> Option<&Tile> {
        self.tile(index.x as i32, index.y as i32)
    }

    /// Tile containing a world position.
    #[inline]
    pub fn tile_from_position(&self, pos: Vector2) -> Option<&Tile> {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return None;
        }
        let x = (pos.x / self.tile_size).floor();
        let y = (pos.y / self.tile_size).floor();
        if x < 0.0 || y < 0.0 || x > i32::MAX as f32 || y > i32::MAX as f32 {
            return None;
        }
        self.tile(x as i32, y as i32)
    }

    /// Solid if the tile collides or lies outside the map.
    pub fn is_solid(&self, pos: Vector2) -> bool {
        self.tile_from_position(pos).is_none_or(|t| t.collision)
    }

    pub fn random_spawn_location<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<SpawnLocation> {
        self.spawn_locations.choose(rng).copied()
    }

    /// Advances every sprite animation by one frame.
    pub fn update_sprites(&mut self) {
        for sprite in &mut self.sprites {
            sprite.update();
        }
    }

    /// The 20×20 test level: outer ring with a doorway on the east side and a
    /// handful of inner walls and pillars.
    pub fn test_map(
        tile_size: f32,
        wall_a: TextureId,
        wall_b: TextureId,
        floor: Option<TextureId>,
        ceiling: Option<TextureId>,
    ) -> Self {
        let (width, height) = (20usize, 20usize);
        let mut map = Self::from_fn("Test Map", width, height, tile_size, |x, y| {
            let is_wall = x == 0
                || y == 0
                || (x == width - 1 && y < 4)
                || (x == width - 1 && y > 6)
                || y == height - 1
                || (x == 1 && y == 1)
                || (x == 4 && y > 3 && y < 15)
                || (x == 16 && y > 8 && y < 15)
                || (x > 5 && x < 15 && y == 12)
                || ((16..=17).contains(&x) && (2..=3).contains(&y))
                || ((10..=11).contains(&x) && (5..=6).contains(&y));

            let mut tile = Tile::new(x, y, tile_size);
            tile.collision = is_wall;
            tile.wall_texture = [Some(wall_a), Some(wall_b), Some(wall_a), Some(wall_b)];
            tile.floor_texture = floor;
            if x % 2 == y % 2 {
                tile.ceiling_texture = ceiling;
            }
            tile
        });
        map.spawn_locations.push(SpawnLocation {
            x: 3.5 * tile_size,
            y: 2.1 * tile_size,
            a: 2.7,
        });
        map
    }
}
