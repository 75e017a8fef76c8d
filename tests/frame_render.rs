use raylib::prelude::{Color, Vector2};

use tilecaster::core::map::{Direction, Map, Tile, TileIndex};
use tilecaster::core::math::radians_to_degrees;
use tilecaster::core::player::Player;
use tilecaster::core::sprite::Sprite;
use tilecaster::render::render3d::{distance_shade, face_shade, render_frame, wall_strip};
use tilecaster::render::textures::shade;
use tilecaster::{Framebuffer, RayCaster, RenderConfig, Texture, TextureId, TextureManager};

const W: u32 = 60;
const H: u32 = 40;
const TS: f32 = 20.0;

struct Fixture {
    map: Map,
    textures: TextureManager,
    cfg: RenderConfig,
    caster: RayCaster,
    fb: Framebuffer,
}

impl Fixture {
    fn room(wall: Option<TextureId>) -> (Map, TextureManager) {
        Self::room_with_ceiling(wall, None)
    }

    fn room_with_ceiling(wall: Option<TextureId>, ceiling: Option<Color>) -> (Map, TextureManager) {
        let mut textures = TextureManager::new();
        let ceiling = ceiling.map(|c| textures.insert(Texture::filled("ceiling", 8, 8, c)));
        let floor = textures.insert(Texture::filled("floor", 8, 8, Color::GREEN));
        let sky = textures.insert(Texture::filled("sky", 360, 20, Color::BLUE));
        let white = textures.insert(Texture::filled("white", 8, 8, Color::WHITE));
        let wall = wall.or(Some(white));
        let mut map = Map::from_fn("room", 5, 5, TS, |x, y| {
            let mut tile = Tile::new(x, y, TS);
            if x == 0 || y == 0 || x == 4 || y == 4 {
                tile.collision = true;
                tile.wall_texture = [wall; 4];
            } else {
                tile.floor_texture = Some(floor);
                tile.ceiling_texture = ceiling;
            }
            tile
        });
        map.skybox_texture = Some(sky);
        (map, textures)
    }

    fn new(map: Map, textures: TextureManager) -> Self {
        let cfg = RenderConfig::new(W, H);
        Self {
            map,
            textures,
            caster: RayCaster::new(cfg.total_rays(), cfg.fov),
            fb: Framebuffer::new(W, H),
            cfg,
        }
    }

    fn render(&mut self, player: &Player) {
        render_frame(&mut self.fb, &mut self.caster, &self.map, player, &self.textures, &self.cfg);
    }

    fn pixel(&self, x: u32, y: u32) -> Color {
        self.fb.front()[(y * W + x) as usize]
    }

    fn expected_wall(&self, column: usize, base: Color) -> Color {
        let ray = &self.caster.rays()[column];
        let k = face_shade(ray.collision_direction.unwrap(), self.cfg.directional_shade)
            * distance_shade(ray.corrected_distance(), (H / 2) as f32, self.cfg.min_shade);
        shade(base, k)
    }
}

fn center_player() -> Player {
    Player::new(50.0, 50.0, 0.0)
}

#[test]
fn room_scenario_hits_east_wall() {
    let (map, textures) = Fixture::room(None);
    let mut fx = Fixture::new(map, textures);
    let mut caster = RayCaster::new(1, 0.0);
    caster.cast(&fx.map, Vector2::new(50.0, 50.0), 0.0);
    let ray = caster.rays()[0];
    let dest = ray.destination.unwrap();
    assert!((dest.x - 80.0).abs() < 0.05);
    assert!((dest.y - 50.0).abs() < 1e-3);
    assert!((ray.size - 1.5 * TS).abs() < 0.05);
    assert_eq!(ray.collided_tile, Some(TileIndex { x: 4, y: 2 }));

    fx.render(&center_player());
    assert!(fx.caster.rays().iter().all(|r| r.is_hit()));
}

#[test]
fn column_has_sky_wall_and_floor() {
    let (map, textures) = Fixture::room(None);
    let mut fx = Fixture::new(map, textures);
    fx.render(&center_player());

    let col = (W / 2) as usize;
    assert_eq!(fx.pixel(col as u32, 0), Color::BLUE);
    assert_eq!(fx.pixel(col as u32, H / 2), fx.expected_wall(col, Color::WHITE));
    assert_eq!(fx.pixel(col as u32, H - 1), Color::GREEN);
}

#[test]
fn east_west_faces_are_darker_than_north_south() {
    let (map, textures) = Fixture::room(None);
    let mut fx = Fixture::new(map, textures);
    let col = (W / 2) as usize;

    // looking east hits a West face
    fx.render(&center_player());
    assert_eq!(fx.caster.rays()[col].collision_direction, Some(Direction::West));
    let ew = fx.pixel(col as u32, H / 2);

    // looking north hits a South face at the same distance
    fx.render(&Player::new(50.0, 50.0, std::f32::consts::FRAC_PI_2));
    assert_eq!(fx.caster.rays()[col].collision_direction, Some(Direction::South));
    let ns = fx.pixel(col as u32, H / 2);

    assert!(ew.r < ns.r, "{ew:?} vs {ns:?}");
}

#[test]
fn missing_wall_texture_uses_debug_texture() {
    let (map, textures) = Fixture::room(Some(TextureId(usize::MAX)));
    let mut fx = Fixture::new(map, textures);
    fx.render(&center_player());

    let col = (W / 2) as usize;
    let got = fx.pixel(col as u32, H / 2);
    let magenta = fx.expected_wall(col, Color::MAGENTA);
    let black = fx.expected_wall(col, Color::BLACK);
    assert!(got == magenta || got == black, "{got:?}");
}

#[test]
fn detail_overlay_covers_base_unless_transparent() {
    for (detail_color, visible) in [(Color::YELLOW, Color::YELLOW), (Color::BLANK, Color::RED)] {
        let mut textures = TextureManager::new();
        let red = textures.insert(Texture::filled("red", 8, 8, Color::RED));
        let detail = textures.insert(Texture::filled("detail", 8, 8, detail_color));
        let map = Map::from_fn("detail", 5, 5, TS, |x, y| {
            let mut tile = Tile::new(x, y, TS);
            if x == 0 || y == 0 || x == 4 || y == 4 {
                tile.collision = true;
                tile.wall_texture = [Some(red); 4];
                tile.wall_detail_texture = [Some(detail); 4];
            }
            tile
        });
        let mut fx = Fixture::new(map, textures);
        fx.render(&center_player());
        let col = (W / 2) as usize;
        assert_eq!(fx.pixel(col as u32, H / 2), fx.expected_wall(col, visible));
    }
}

#[test]
fn open_map_skips_walls_but_draws_floor() {
    let mut textures = TextureManager::new();
    let floor = textures.insert(Texture::filled("floor", 8, 8, Color::GREEN));
    let map = Map::from_fn("open", 6, 6, TS, |x, y| {
        let mut tile = Tile::new(x, y, TS);
        tile.floor_texture = Some(floor);
        tile
    });
    let mut fx = Fixture::new(map, textures);
    fx.render(&Player::new(60.0, 60.0, 0.0));

    assert!(fx.caster.rays().iter().all(|r| !r.is_hit()));
    assert_eq!(fx.pixel(W / 2, H - 1), Color::GREEN);
    assert_eq!(fx.pixel(W / 2, H / 2 - 1), fx.cfg.clear_color);
}

#[test]
fn sprite_in_front_of_wall_is_drawn_and_behind_is_not() {
    let orange = Texture::filled("orange", 4, 4, Color::ORANGE);

    let (mut map, textures) = Fixture::room(None);
    map.sprites.push(Sprite::new("near", Vector2::new(70.0, 50.0), vec![orange.clone()]));
    let mut fx = Fixture::new(map, textures);
    fx.render(&center_player());
    assert_eq!(fx.pixel(W / 2, H / 2), Color::ORANGE);

    let (mut map, textures) = Fixture::room(None);
    map.sprites.push(Sprite::new("hidden", Vector2::new(150.0, 50.0), vec![orange]));
    let mut fx = Fixture::new(map, textures);
    fx.render(&center_player());
    assert!(!fx.fb.front().contains(&Color::ORANGE));
}

/// Sky texture whose columns are all distinct.
fn column_sky() -> Texture {
    let (w, h) = (360u32, 10u32);
    let mut pixels = Vec::with_capacity((w * h) as usize);
    for _ in 0..h {
        for x in 0..w {
            pixels.push(Color::new((x % 256) as u8, (x / 256) as u8, 7, 255));
        }
    }
    Texture::new("sky", w, h, pixels)
}

#[test]
fn sky_column_follows_ray_angle() {
    let (mut map, mut textures) = Fixture::room(None);
    map.skybox_texture = Some(textures.insert(column_sky()));
    let mut fx = Fixture::new(map, textures);
    let col = (W / 2) as usize;
    let sky = fx.textures.get(fx.map.skybox_texture.unwrap()).unwrap().clone();

    let mut seen = Vec::new();
    for view in [0.0, 1.0] {
        fx.render(&Player::new(50.0, 50.0, view));
        let deg = radians_to_degrees(fx.caster.rays()[col].angle).floor() as u32 % 360;
        let expected = sky.pixel_color(deg, 0);
        assert_eq!(fx.pixel(col as u32, 0), expected);
        seen.push(expected);
    }
    assert_ne!(seen[0], seen[1]);
}

#[test]
fn ceiling_is_drawn_above_the_wall_only() {
    let ceiling = Color::new(200, 0, 0, 255);
    let (map, textures) = Fixture::room_with_ceiling(None, Some(ceiling));
    let mut fx = Fixture::new(map, textures);
    fx.render(&center_player());

    let col = (W / 2) as usize;
    let strip = wall_strip(&fx.caster.rays()[col], TS, H).unwrap();
    let half = (H / 2) as f32;

    // row 0 is never reached by a ceiling row, the sky shows there
    assert_eq!(fx.pixel(col as u32, 0), Color::BLUE);
    for y in 1..strip.start_y as u32 {
        let k = distance_shade((y - 1) as f32, half, fx.cfg.min_shade);
        assert_eq!(fx.pixel(col as u32, y), shade(ceiling, k), "row {y}");
    }
    for y in strip.start_y as u32..(strip.start_y + strip.draw_height) as u32 {
        assert_eq!(fx.pixel(col as u32, y), fx.expected_wall(col, Color::WHITE), "row {y}");
    }
}

#[test]
fn floor_samples_the_tile_under_each_column() {
    let mut textures = TextureManager::new();
    let wall = textures.insert(Texture::filled("white", 8, 8, Color::WHITE));
    let green = textures.insert(Texture::filled("green", 8, 8, Color::GREEN));
    let gray = textures.insert(Texture::filled("gray", 8, 8, Color::GRAY));
    let map = Map::from_fn("split", 5, 5, TS, |x, y| {
        let mut tile = Tile::new(x, y, TS);
        if x == 0 || y == 0 || x == 4 || y == 4 {
            return tile.wall(wall);
        }
        tile.floor_texture = Some(if (x, y) == (3, 2) { green } else { gray });
        tile
    });
    let mut fx = Fixture::new(map, textures);
    fx.render(&center_player());

    // straight ahead the nearest floor row lands one tile east, on (3, 2)
    assert_eq!(fx.pixel(W / 2, H - 1), Color::GREEN);
    // the leftmost column looks 30 degrees north of east and lands on (3, 1)
    assert_eq!(fx.pixel(0, H - 1), Color::GRAY);
}

#[test]
fn sprites_follow_the_target_size_not_the_config() {
    let (mut map, textures) = Fixture::room(None);
    map.sprites.push(Sprite::new(
        "near",
        Vector2::new(70.0, 50.0),
        vec![Texture::filled("orange", 4, 4, Color::ORANGE)],
    ));
    let cfg = RenderConfig::new(4 * W, 4 * H);
    let mut caster = RayCaster::new(W as usize, cfg.fov);
    let mut fb = Framebuffer::new(W, H);
    render_frame(&mut fb, &mut caster, &map, &center_player(), &textures, &cfg);
    assert_eq!(fb.front()[(H / 2 * W + W / 2) as usize], Color::ORANGE);
}
