//! Title screen and in-level state, switched by input commands.
use rand::Rng;
use raylib::prelude::Color;

use crate::config::{RenderConfig, SPRITE_FRAME_TICKS};
use crate::core::map::Map;
use crate::core::player::Player;
use crate::core::process_events::{Command, CommandQueue, process_events};
use crate::render::casters::RayCaster;
use crate::render::render3d::render_frame;
use crate::render::renderer::Renderer;
use crate::render::textures::TextureManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    TitleScreen,
    Playing,
}

pub struct Scene {
    pub state: SceneState,
    pub map: Map,
    pub player: Player,
    pub textures: TextureManager,
    pub config: RenderConfig,
    caster: RayCaster,
    commands: CommandQueue,
    ticks: u64,
}

impl Scene {
    /// Starts on the title screen with the player on a random spawn point.
    pub fn new<R: Rng + ?Sized>(map: Map, textures: TextureManager, config: RenderConfig, rng: &mut R) -> Self {
        let player = match map.random_spawn_location(rng) {
            Some(spawn) => Player::from_spawn(spawn),
            None => {
                log::warn!("map {} has no spawn locations; starting at its center", map.name);
                Player::new(map.world_size.x / 2.0, map.world_size.y / 2.0, 0.0)
            }
        };
        let caster = RayCaster::new(config.total_rays(), config.fov);
        Self {
            state: SceneState::TitleScreen,
            map,
            player,
            textures,
            config,
            caster,
            commands: CommandQueue::new(),
            ticks: 0,
        }
    }

    /// Queues input for the next tick.
    pub fn handle(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    /// Advances one simulation step.
    pub fn tick(&mut self) {
        self.ticks += 1;
        match self.state {
            SceneState::TitleScreen => {
                let start = self.commands.drain().any(|c| c == Command::Start);
                if start {
                    log::debug!("scene: title screen -> playing");
                    self.state = SceneState::Playing;
                }
            }
            SceneState::Playing => {
                process_events(&mut self.commands, &mut self.player, &self.map);
                if self.ticks % SPRITE_FRAME_TICKS == 0 {
                    self.map.update_sprites();
                }
            }
        }
    }

    pub fn draw<R: Renderer>(&mut self, r: &mut R) {
        match self.state {
            SceneState::TitleScreen => {
                draw_title(r, self.ticks);
                r.swap_buffer();
            }
            SceneState::Playing => render_frame(
                r,
                &mut self.caster,
                &self.map,
                &self.player,
                &self.textures,
                &self.config,
            ),
        }
    }

    pub fn caster(&self) -> &RayCaster {
        &self.caster
    }
}

/// Dark vertical gradient with a pulsing banner across the middle.
fn draw_title<R: Renderer>(r: &mut R, ticks: u64) {
    let (w, h) = (r.width() as i32, r.height() as i32);
    r.clear(Color::BLACK);
    for y in 0..h {
        let t = y as f32 / h.max(1) as f32;
        let c = Color::new((10.0 + 30.0 * t) as u8, (12.0 + 10.0 * t) as u8, (30.0 + 60.0 * t) as u8, 255);
        r.draw_horizontal_line(0, w - 1, y, c);
    }
    let pulse = ((ticks as f32 * 0.08).sin() * 0.5 + 0.5) * 80.0;
    let banner = Color::new(140 + pulse as u8, 40, 40, 255);
    r.draw_rect(w / 8, h / 3, w * 3 / 4, h / 6, banner);
}
