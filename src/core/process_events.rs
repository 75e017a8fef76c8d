//! Input commands and player movement.
//!
//! The host pushes [`Command`]s as input arrives; the simulation drains the
//! queue once per tick, in arrival order.
use std::collections::VecDeque;

use raylib::prelude::Vector2;

use crate::core::map::Map;
use crate::core::math::RAD_90;
use crate::core::player::Player;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    /// Turn input; positive turns counter-clockwise (left).
    Turn(f32),
    /// Leave the title screen.
    Start,
}

#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: Command) {
        self.pending.push_back(cmd);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes every queued command, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.pending.drain(..)
    }
}

/// Solid if any sample on the player's collision circle is in a wall.
fn blocked(map: &Map, x: f32, y: f32, r: f32) -> bool {
    if r <= 0.0 {
        return map.is_solid(Vector2::new(x, y));
    }
    let d = r * std::f32::consts::FRAC_1_SQRT_2;
    let samples = [
        (x, y),
        (x + r, y),
        (x - r, y),
        (x, y + r),
        (x, y - r),
        (x + d, y + d),
        (x - d, y + d),
        (x + d, y - d),
        (x - d, y - d),
    ];
    samples.iter().any(|&(sx, sy)| map.is_solid(Vector2::new(sx, sy)))
}

/// Moves by `delta`, one axis at a time so the player slides along walls.
fn move_player(player: &mut Player, map: &Map, delta: Vector2) {
    let nx = player.pos.x + delta.x;
    if nx > 0.0 && nx < map.world_size.x && !blocked(map, nx, player.pos.y, player.radius) {
        player.pos.x = nx;
    }
    let ny = player.pos.y + delta.y;
    if ny > 0.0 && ny < map.world_size.y && !blocked(map, player.pos.x, ny, player.radius) {
        player.pos.y = ny;
    }
}

/// Applies one command to the player.
fn apply_command(player: &mut Player, map: &Map, cmd: Command) {
    let v = player.move_speed;
    let a = player.a;
    let step = |angle: f32, sign: f32| Vector2::new(sign * angle.cos() * v, -sign * angle.sin() * v);
    match cmd {
        Command::MoveForward => move_player(player, map, step(a, 1.0)),
        Command::MoveBackward => move_player(player, map, step(a, -1.0)),
        Command::StrafeLeft => move_player(player, map, step(a + RAD_90, 1.0)),
        Command::StrafeRight => move_player(player, map, step(a - RAD_90, 1.0)),
        Command::Turn(amount) => player.set_angle(a + player.rot_speed * amount),
        Command::Start => {}
    }
}

/// Drains the queue into the player.
pub fn process_events(queue: &mut CommandQueue, player: &mut Player, map: &Map) {
    for cmd in queue.drain() {
        apply_command(player, map, cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::textures::TextureId;

    fn room() -> Map {
        Map::enclosed(5, 5, 20.0, TextureId(0))
    }

    #[test]
    fn forward_moves_along_facing() {
        let map = room();
        let mut p = Player::new(50.0, 50.0, 0.0);
        apply_command(&mut p, &map, Command::MoveForward);
        assert!((p.pos.x - 54.0).abs() < 1e-4);
        assert!((p.pos.y - 50.0).abs() < 1e-4);

        let mut p = Player::new(50.0, 50.0, RAD_90);
        apply_command(&mut p, &map, Command::MoveForward);
        assert!((p.pos.y - 46.0).abs() < 1e-4, "north is -y");
    }

    #[test]
    fn strafe_is_perpendicular() {
        let map = room();
        let mut p = Player::new(50.0, 50.0, 0.0);
        apply_command(&mut p, &map, Command::StrafeLeft);
        assert!((p.pos.y - 46.0).abs() < 1e-4);
        apply_command(&mut p, &map, Command::StrafeRight);
        apply_command(&mut p, &map, Command::StrafeRight);
        assert!((p.pos.y - 54.0).abs() < 1e-4);
    }

    #[test]
    fn walls_stop_movement() {
        let map = room();
        let mut p = Player::new(50.0, 50.0, 0.0);
        for _ in 0..100 {
            apply_command(&mut p, &map, Command::MoveForward);
        }
        assert!(p.pos.x < 80.0);
        assert!(p.pos.x > 70.0);
    }

    #[test]
    fn radius_keeps_distance_from_walls() {
        let map = room();
        let mut p = Player::new(50.0, 50.0, 0.0);
        p.radius = 5.0;
        for _ in 0..100 {
            apply_command(&mut p, &map, Command::MoveForward);
        }
        assert!(p.pos.x + p.radius < 80.0);
    }

    #[test]
    fn queue_preserves_order_and_empties() {
        let map = room();
        let mut q = CommandQueue::new();
        q.push(Command::Turn(1.0));
        q.push(Command::MoveForward);
        assert_eq!(q.len(), 2);
        let mut p = Player::new(50.0, 50.0, 0.0);
        process_events(&mut q, &mut p, &map);
        assert!(q.is_empty());
        // turned first, so the step has a -y component
        assert!(p.pos.y < 50.0);
        assert!((p.a - 0.15).abs() < 1e-6);
    }

    #[test]
    fn turning_keeps_angle_normalized() {
        let map = room();
        let mut p = Player::new(50.0, 50.0, 0.0);
        apply_command(&mut p, &map, Command::Turn(-1.0));
        assert!(p.a > 6.0 && p.a < std::f32::consts::TAU);
    }
}
