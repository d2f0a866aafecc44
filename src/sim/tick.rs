//! Fixed timestep simulation tick
//!
//! One tick is one rendered frame. Each phase finishes (and applies its
//! buffered changes) before the next one starts:
//! input → movement → camera → AI → collisions → terminal check.

use glam::Vec2;

use super::ai::ai_phase;
use super::autopilot;
use super::collision::collision_phase;
use super::movement::movement_phase;
use super::state::{GameEvent, GameOverReason, GamePhase, GameState, Projectile};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire one bolt in the facing direction
    pub fire: bool,
    /// Detonate a smart bomb
    pub bomb: bool,
    pub quit: bool,
    /// Attract mode - the autopilot plays the game
    pub autopilot: bool,
}

impl TickInput {
    /// Movement direction with each axis in {-1, 0, 1}
    pub fn axis(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.quit {
        if state.phase != GamePhase::Quit {
            log::info!("Quit requested at tick {}", state.time_ticks);
        }
        state.phase = GamePhase::Quit;
        return;
    }

    // Nothing moves once the session is over
    if state.phase != GamePhase::Playing {
        return;
    }

    let input = if input.autopilot {
        autopilot::drive(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;

    if input.fire {
        fire(state);
    }

    movement_phase(state, &input);
    state.camera.follow(state.player.pos.x);
    ai_phase(state);
    collision_phase(state, &input);
    check_terminal(state);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Launch a bolt from the ship in the facing direction
pub fn fire(state: &mut GameState) {
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: state.player.pos,
        vel_x: PROJECTILE_SPEED * state.player.facing.sign(),
    });
    state.events.push(GameEvent::Fired);
}

/// End the session when the ship is out of lives or no humanoids remain
pub fn check_terminal(state: &mut GameState) {
    let reason = if state.player.lives == 0 {
        GameOverReason::LivesExhausted
    } else if state.humanoids.is_empty() {
        GameOverReason::HumanoidsLost
    } else {
        return;
    };

    state.phase = GamePhase::GameOver;
    state.game_over_reason = Some(reason);
    state.events.push(GameEvent::GameOver(reason));
    log::info!(
        "Game over ({:?}) at tick {} with score {}",
        reason,
        state.time_ticks,
        state.score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{AbductorState, Facing, HumanoidState};
    use crate::sim::terrain::Terrain;
    use crate::sim::Camera;

    fn sparse_state(humanoids: usize) -> GameState {
        GameState::with_terrain(
            &Settings {
                seed: 777,
                humanoids: 0,
                abductors: 0,
                ..Settings::default()
            },
            Terrain::flat(540.0),
        )
        .with_humanoids_at(humanoids)
    }

    impl GameState {
        /// Humanoids spread along the far left of the world
        fn with_humanoids_at(mut self, count: usize) -> Self {
            for i in 0..count {
                self.add_humanoid(Vec2::new(100.0 + i as f32 * 20.0, 533.0));
            }
            self
        }
    }

    #[test]
    fn test_axis() {
        let input = TickInput {
            left: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(input.axis(), Vec2::new(-1.0, 1.0));

        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(both.axis(), Vec2::ZERO);
    }

    #[test]
    fn test_fire_uses_facing() {
        let mut state = sparse_state(1);
        state.player.facing = Facing::Left;
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].vel_x, -PROJECTILE_SPEED);
        assert!(state.events.contains(&GameEvent::Fired));
    }

    #[test]
    fn test_single_kill_scores_once() {
        let mut state = sparse_state(0);
        state.add_humanoid(Vec2::new(2500.0, 533.0));
        state.player.pos = Vec2::new(1000.0, 400.0);
        state.camera = Camera::centered_on(1000.0);
        state.add_abductor(Vec2::new(1040.0, 400.0), Vec2::ZERO);

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }

        assert_eq!(state.score, KILL_SCORE);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_respawn_invincibility_window() {
        let mut state = sparse_state(1);
        let ship = state.player.pos;
        state.add_hunter(ship);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, STARTING_LIVES - 1);
        assert!(state.player.invincible);

        for _ in 0..INVINCIBILITY_TICKS {
            let ship = state.player.pos;
            state.add_hunter(ship);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.player.lives, STARTING_LIVES - 1);
        }

        // First tick after the window: contact counts again
        let ship = state.player.pos;
        state.add_hunter(ship);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, STARTING_LIVES - 2);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = sparse_state(3);
        state.player.lives = 1;
        let ship = state.player.pos;
        state.add_hunter(ship);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::LivesExhausted));
        assert!(
            state
                .events
                .contains(&GameEvent::GameOver(GameOverReason::LivesExhausted))
        );
    }

    #[test]
    fn test_last_humanoid_escape_ends_game() {
        let mut state = sparse_state(0);
        let h = state.add_humanoid(Vec2::new(200.0, 26.0));
        let e = state.add_abductor(Vec2::new(200.0, 1.0), Vec2::ZERO);
        state.enemies[0].as_abductor_mut().unwrap().state = AbductorState::Ascending { target: h };
        state.humanoids[0].state = HumanoidState::Abducted { by: e };
        state.humanoids[0].claimed_by = Some(e);

        tick(&mut state, &TickInput::default());
        assert!(state.humanoids.is_empty());
        assert!(state.enemies.iter().any(|e| e.is_hunter()));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::HumanoidsLost));
    }

    #[test]
    fn test_last_body_expiring_ends_game() {
        let mut state = sparse_state(0);
        state.add_humanoid(Vec2::new(100.0, 533.0));
        state.humanoids[0].state = HumanoidState::Dead { ticks: 0 };
        // Keep the ship out of reach of wandering respawns
        state.player.pos.y = 530.0;

        for _ in 0..DEATH_TICKS {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.phase, GamePhase::Playing);
            assert_eq!(state.hud().humanoids, 1);
        }

        tick(&mut state, &TickInput::default());
        assert!(state.humanoids.is_empty());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::HumanoidsLost));
    }

    #[test]
    fn test_bomb_without_bombs_changes_nothing() {
        let mut state = GameState::new(4242);
        state.player.bombs = 0;
        let enemies = state.enemies.len();

        let bomb = TickInput {
            bomb: true,
            ..Default::default()
        };
        tick(&mut state, &bomb);
        assert_eq!(state.enemies.len(), enemies);
        assert_eq!(state.score, 0);
        assert!(!state.events.contains(&GameEvent::Exploded));
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = sparse_state(1);
        state.player.lives = 1;
        let ship = state.player.pos;
        state.add_hunter(ship);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let ticks = state.time_ticks;
        let pos = state.player.pos;
        tick(
            &mut state,
            &TickInput {
                right: true,
                fire: true,
                ..Default::default()
            },
        );
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.player.pos, pos);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_quit() {
        let mut state = GameState::new(1);
        tick(
            &mut state,
            &TickInput {
                quit: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Quit);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                down: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                up: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..400 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.pos, b.pos);
        }
    }
}
