use raylib::prelude::*;

use tilecaster::config::{
    MOUSE_SENSITIVITY, SCREEN_HEIGHT, SCREEN_WIDTH, TICK_RATE, TILE_SIZE, WINDOW_SCALE,
};
use tilecaster::core::map::Map;
use tilecaster::core::maze::{MapPalette, SpriteStrip, load_map};
use tilecaster::core::process_events::Command;
use tilecaster::render::framebuffer::Framebuffer;
use tilecaster::render::textures::{Texture as CpuTexture, TextureManager};
use tilecaster::scene::{Scene, SceneState};
use tilecaster::RenderConfig;

/// Registers wall/floor/sky textures, preferring files under `assets/`.
fn load_textures(tm: &mut TextureManager) -> MapPalette {
    let bricks = tm.load_or(
        "assets/bricks.png",
        CpuTexture::bricks("bricks", 32, 32, Color::new(150, 60, 40, 255), Color::new(90, 90, 90, 255)),
    );
    let stone = tm.load_or(
        "assets/stone.png",
        CpuTexture::checker("stone", 32, 32, Color::new(100, 100, 110, 255), 8),
    );
    let cracks = tm.insert(CpuTexture::cracks("cracks", 32, 32));
    let floor = tm.load_or(
        "assets/floor.png",
        CpuTexture::checker("floor", 32, 32, Color::new(60, 56, 48, 255), 16),
    );
    let ceiling = tm.load_or(
        "assets/ceiling.png",
        CpuTexture::checker("ceiling", 32, 32, Color::new(40, 40, 56, 255), 8),
    );
    let sky = tm.load_or("assets/skybox.png", CpuTexture::skybox("skybox", 240));


    MapPalette {
        walls: vec![bricks, stone],
        detail: Some(cracks),
        floor: Some(floor),
        ceiling: Some(ceiling),
        skybox: Some(sky),
        sprite_strip: Some(SpriteStrip {
            texture: CpuTexture::orb_strip("orb", 16, 4, Color::new(255, 220, 80, 255)),
            frame_width: 16,
            frame_height: 16,
            frames: 4,
        }),
    }
}

fn build_map(palette: &MapPalette) -> Map {
    let path = std::env::args().nth(1).unwrap_or_else(|| "maps/demo.txt".to_string());
    match load_map(&path, TILE_SIZE, palette) {
        Ok(map) => map,
        Err(e) => {
            log::warn!("{path}: {e}; using the built-in test map");
            let wall_a = palette.walls[0];
            let wall_b = palette.walls.get(1).copied().unwrap_or(wall_a);
            let mut map = Map::test_map(TILE_SIZE, wall_a, wall_b, palette.floor, palette.ceiling);
            map.skybox_texture = palette.skybox;
            map
        }
    }
}

/// Maps held keys and mouse motion to commands.
fn collect_input(window: &RaylibHandle, scene: &mut Scene) {
    if scene.state == SceneState::TitleScreen {
        if window.is_key_pressed(KeyboardKey::KEY_ENTER) || window.is_key_pressed(KeyboardKey::KEY_SPACE) {
            scene.handle(Command::Start);
        }
        return;
    }
    if window.is_key_down(KeyboardKey::KEY_W) || window.is_key_down(KeyboardKey::KEY_UP) {
        scene.handle(Command::MoveForward);
    }
    if window.is_key_down(KeyboardKey::KEY_S) || window.is_key_down(KeyboardKey::KEY_DOWN) {
        scene.handle(Command::MoveBackward);
    }
    if window.is_key_down(KeyboardKey::KEY_A) {
        scene.handle(Command::StrafeLeft);
    }
    if window.is_key_down(KeyboardKey::KEY_D) {
        scene.handle(Command::StrafeRight);
    }
    if window.is_key_down(KeyboardKey::KEY_LEFT) {
        scene.handle(Command::Turn(1.0));
    }
    if window.is_key_down(KeyboardKey::KEY_RIGHT) {
        scene.handle(Command::Turn(-1.0));
    }
    let mouse = window.get_mouse_delta();
    if mouse.x != 0.0 {
        scene.handle(Command::Turn(-mouse.x * MOUSE_SENSITIVITY));
    }
}

fn main() {
    env_logger::init();

    let window_width = (SCREEN_WIDTH as f32 * WINDOW_SCALE) as i32;
    let window_height = (SCREEN_HEIGHT as f32 * WINDOW_SCALE) as i32;

    let (mut window, raylib_thread) = raylib::init()
        .size(window_width, window_height)
        .title("tilecaster")
        .build();
    window.set_target_fps(TICK_RATE as u32);
    window.disable_cursor();

    let mut textures = TextureManager::new();
    let palette = load_textures(&mut textures);
    let map = build_map(&palette);
    log::info!("map {}: {}x{} tiles, {} textures", map.name, map.width, map.height, textures.len());

    let config = RenderConfig::default();
    let mut framebuffer = Framebuffer::new(config.width, config.height);
    let mut scene = Scene::new(map, textures, config, &mut rand::thread_rng());

    let blank = Image::gen_image_color(config.width as i32, config.height as i32, Color::BLACK);
    let mut screen = match window.load_texture_from_image(&raylib_thread, &blank) {
        Ok(tex) => tex,
        Err(e) => {
            log::error!("could not create screen texture: {e}");
            return;
        }
    };

    while !window.window_should_close() {
        collect_input(&window, &mut scene);
        scene.tick();
        scene.draw(&mut framebuffer);
        framebuffer.upload_to_texture(&mut screen);

        let fps_now = window.get_fps();
        let state = scene.state;
        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        d.draw_texture_ex(&screen, Vector2::new(0.0, 0.0), 0.0, WINDOW_SCALE, Color::WHITE);
        match state {
            SceneState::TitleScreen => {
                let y = window_height / 3 + 20;
                d.draw_text("TILECASTER", window_width / 8 + 24, y, 48, Color::WHITE);
                d.draw_text("press ENTER", window_width / 8 + 24, y + 56, 20, Color::LIGHTGRAY);
            }
            SceneState::Playing => {
                d.draw_text(&format!("FPS: {}", fps_now), 10, 10, 20, Color::WHITE);
            }
        }
    }
}
