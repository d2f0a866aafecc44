//! Attract mode autopilot
//!
//! Produces a `TickInput` from the current state so the game can play itself
//! for demos and headless runs. Purely a function of the state, so an
//! autopiloted session stays deterministic.

use glam::Vec2;

use super::state::{Facing, GameState};
use super::tick::TickInput;
use crate::consts::*;

/// Preferred horizontal distance from the enemy being engaged
const STANDOFF: f32 = 150.0;
/// Vertical gap that counts as lined up for a shot
const AIM_TOLERANCE: f32 = 8.0;
/// Ticks between shots
const FIRE_INTERVAL: u64 = 8;
/// Enemies on screen before a bomb is worth spending
const BOMB_CROWD: usize = 4;
const BOMB_INTERVAL: u64 = 60;
const DEADZONE: f32 = 4.0;

/// Horizontal offset from `from` to `to` taking the shorter way around the world
pub fn wrapped_dx(from: f32, to: f32) -> f32 {
    let half = WORLD_WIDTH / 2.0;
    let mut dx = to - from;
    if dx > half {
        dx -= WORLD_WIDTH;
    } else if dx < -half {
        dx += WORLD_WIDTH;
    }
    dx
}

/// Decide this tick's input
pub fn drive(state: &GameState) -> TickInput {
    let ship = state.player.pos;
    let mut input = TickInput::default();

    if state.player.carrying.is_some() {
        // Head for the ground to drop off
        input.down = true;
        return input;
    }

    let falling = state
        .humanoids
        .iter()
        .filter(|h| h.is_falling())
        .min_by(|a, b| {
            distance(ship, a.pos)
                .partial_cmp(&distance(ship, b.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(humanoid) = falling {
        steer(&mut input, wrapped_dx(ship.x, humanoid.pos.x), humanoid.pos.y - ship.y);
        return input;
    }

    let nearest = state.enemies.iter().min_by(|a, b| {
        distance(ship, a.pos)
            .partial_cmp(&distance(ship, b.pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(enemy) = nearest {
        engage(
            &mut input,
            state,
            wrapped_dx(ship.x, enemy.pos.x),
            enemy.pos.y - ship.y,
        );
    }

    let crowd = state
        .enemies
        .iter()
        .filter(|e| state.camera.is_on_screen(e.pos.x, 0.0))
        .count();
    if crowd >= BOMB_CROWD && state.player.bombs > 0 && state.time_ticks % BOMB_INTERVAL == 0 {
        input.bomb = true;
    }

    input
}

fn distance(a: Vec2, b: Vec2) -> f32 {
    Vec2::new(wrapped_dx(a.x, b.x), b.y - a.y).length_squared()
}

fn steer(input: &mut TickInput, dx: f32, dy: f32) {
    input.left = dx < -DEADZONE;
    input.right = dx > DEADZONE;
    input.up = dy < -DEADZONE;
    input.down = dy > DEADZONE;
}

/// Close to firing range, line up vertically and shoot
fn engage(input: &mut TickInput, state: &GameState, dx: f32, dy: f32) {
    let wanted = if dx < 0.0 { Facing::Left } else { Facing::Right };

    if dx.abs() > STANDOFF || state.player.facing != wanted {
        input.left = wanted == Facing::Left;
        input.right = wanted == Facing::Right;
    }
    input.up = dy < -DEADZONE;
    input.down = dy > DEADZONE;

    if dy.abs() < AIM_TOLERANCE
        && state.player.facing == wanted
        && state.time_ticks % FIRE_INTERVAL == 0
    {
        input.fire = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{GameEvent, GamePhase, HumanoidState};
    use crate::sim::terrain::Terrain;
    use crate::sim::tick::tick;

    fn sparse_state() -> GameState {
        GameState::with_terrain(
            &Settings {
                seed: 31,
                humanoids: 0,
                abductors: 0,
                ..Settings::default()
            },
            Terrain::flat(540.0),
        )
    }

    #[test]
    fn test_wrapped_dx() {
        assert_eq!(wrapped_dx(100.0, 300.0), 200.0);
        assert_eq!(wrapped_dx(100.0, 3100.0), -200.0);
        assert_eq!(wrapped_dx(3100.0, 100.0), 200.0);
    }

    #[test]
    fn test_carrying_descends() {
        let mut state = sparse_state();
        let h = state.add_humanoid(Vec2::new(1600.0, 320.0));
        state.humanoids[0].state = HumanoidState::Carried;
        state.player.carrying = Some(h);

        let input = drive(&state);
        assert!(input.down);
        assert!(!input.fire);
    }

    #[test]
    fn test_chases_falling_humanoid() {
        let mut state = sparse_state();
        state.add_humanoid(Vec2::new(1700.0, 200.0));
        state.humanoids[0].start_fall();
        state.add_hunter(Vec2::new(1500.0, 300.0));

        let input = drive(&state);
        assert!(input.right);
        assert!(input.up);
    }

    #[test]
    fn test_fires_when_lined_up() {
        let mut state = sparse_state();
        state.player.facing = Facing::Right;
        state.add_abductor(Vec2::new(1700.0, 302.0), Vec2::ZERO);
        state.time_ticks = FIRE_INTERVAL * 3;

        let input = drive(&state);
        assert!(input.fire);
        // Inside the standoff distance there is no need to close in
        assert!(!input.right);
    }

    #[test]
    fn test_turns_before_firing() {
        let mut state = sparse_state();
        state.player.facing = Facing::Right;
        state.add_abductor(Vec2::new(1500.0, 300.0), Vec2::ZERO);
        state.time_ticks = 0;

        let input = drive(&state);
        assert!(input.left);
        assert!(!input.fire);
    }

    #[test]
    fn test_autopilot_session_plays() {
        let mut state = GameState::new(2024);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let mut fired = false;
        for _ in 0..3000 {
            tick(&mut state, &input);
            fired |= state.events.contains(&GameEvent::Fired);
            if state.phase != GamePhase::Playing {
                break;
            }
        }

        assert!(fired);
        assert!(state.time_ticks > 0);
    }
}
