//! Abductor decision making
//!
//! Wandering → Pursuing → Ascending, falling back to Wandering whenever the
//! target humanoid is no longer valid. Escaping off the top of the world turns
//! the abductor into a homing hunter and takes the humanoid with it.

use glam::Vec2;

use super::pending::Pending;
use super::state::{AbductorState, Enemy, GameState, Humanoid, HumanoidState};
use crate::consts::*;

/// Update every abductor, then apply deferred escapes
pub fn ai_phase(state: &mut GameState) {
    let mut pending = Pending::new();
    for idx in 0..state.enemies.len() {
        update_abductor(state, idx, &mut pending);
    }
    pending.apply(state);
}

fn update_abductor(state: &mut GameState, idx: usize, pending: &mut Pending) {
    let id = state.enemies[idx].id;
    let Some(ai_state) = state.enemies[idx].as_abductor().map(|a| a.state) else {
        return;
    };

    match ai_state {
        AbductorState::Ascending { target } => ascend(state, idx, target, pending),
        AbductorState::Pursuing { target } => {
            if pursuit_valid(state, id, target) {
                pursue(state, idx, target);
            } else {
                drop_target(state, idx);
                wander_or_acquire(state, idx);
            }
        }
        AbductorState::Wandering => wander_or_acquire(state, idx),
    }
}

/// The target still stands on the ground and is still claimed by us
fn pursuit_valid(state: &GameState, id: u32, target: u32) -> bool {
    state
        .humanoid(target)
        .is_some_and(|h| h.state == HumanoidState::OnGround && h.claimed_by == Some(id))
}

fn drop_target(state: &mut GameState, idx: usize) {
    let id = state.enemies[idx].id;
    if let Some(abductor) = state.enemies[idx].as_abductor_mut() {
        abductor.state = AbductorState::Wandering;
    }
    for humanoid in &mut state.humanoids {
        if humanoid.claimed_by == Some(id) {
            humanoid.claimed_by = None;
        }
    }
}

/// Nearest standing, unclaimed humanoid. Ties go to the lowest id.
pub fn nearest_target(humanoids: &[Humanoid], from: Vec2) -> Option<usize> {
    humanoids
        .iter()
        .enumerate()
        .filter(|(_, h)| h.is_targetable())
        .min_by(|(_, a), (_, b)| {
            a.pos
                .distance_squared(from)
                .partial_cmp(&b.pos.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

fn wander_or_acquire(state: &mut GameState, idx: usize) {
    let id = state.enemies[idx].id;
    if let Some(h_idx) = nearest_target(&state.humanoids, state.enemies[idx].pos) {
        let target = state.humanoids[h_idx].id;
        state.humanoids[h_idx].claimed_by = Some(id);
        if let Some(abductor) = state.enemies[idx].as_abductor_mut() {
            abductor.state = AbductorState::Pursuing { target };
        }
        pursue(state, idx, target);
    } else {
        wander(state, idx);
    }
}

/// Drift, bouncing off the world edges, the ceiling and a floor above the terrain
fn wander(state: &mut GameState, idx: usize) {
    let enemy = &mut state.enemies[idx];
    let Some(vel) = enemy.as_abductor().map(|a| a.vel) else {
        return;
    };

    let pos = enemy.pos + vel;
    let mut vel = vel;
    if pos.x <= 0.0 {
        vel.x = vel.x.abs();
    } else if pos.x >= WORLD_WIDTH {
        vel.x = -vel.x.abs();
    }
    if pos.y <= WANDER_CEILING {
        vel.y = vel.y.abs();
    } else if pos.y >= state.terrain.height_at(pos.x) - WANDER_FLOOR_CLEARANCE {
        vel.y = -vel.y.abs();
    }

    enemy.pos = pos;
    if let Some(abductor) = enemy.as_abductor_mut() {
        abductor.vel = vel;
    }
}

/// Fixed-speed approach with a per-axis dead zone; grab on arrival
fn pursue(state: &mut GameState, idx: usize, target: u32) {
    let id = state.enemies[idx].id;
    let Some(h_idx) = state.humanoids.iter().position(|h| h.id == target) else {
        return;
    };
    let target_pos = state.humanoids[h_idx].pos;

    let enemy = &mut state.enemies[idx];
    enemy.pos += pursuit_step(target_pos - enemy.pos);

    let gap = (target_pos - enemy.pos).abs();
    if gap.x < CAPTURE_RADIUS && gap.y < CAPTURE_RADIUS {
        if let Some(abductor) = enemy.as_abductor_mut() {
            abductor.state = AbductorState::Ascending { target };
        }
        state.humanoids[h_idx].state = HumanoidState::Abducted { by: id };
        log::debug!("Abductor {} captured humanoid {}", id, target);
    }
}

/// Per-axis step toward a target offset
pub fn pursuit_step(delta: Vec2) -> Vec2 {
    let axis = |d: f32, speed: f32| {
        if d.abs() > PURSUIT_DEADZONE {
            speed.copysign(d)
        } else {
            0.0
        }
    };
    Vec2::new(axis(delta.x, PURSUIT_SPEED_X), axis(delta.y, PURSUIT_SPEED_Y))
}

/// Climb with the payload; leaving the top converts to a hunter
fn ascend(state: &mut GameState, idx: usize, target: u32, pending: &mut Pending) {
    let id = state.enemies[idx].id;
    let held = state
        .humanoid(target)
        .is_some_and(|h| h.state == HumanoidState::Abducted { by: id });
    if !held {
        // Payload was released or destroyed elsewhere
        drop_target(state, idx);
        return;
    }

    state.enemies[idx].pos.y -= ASCENT_SPEED;
    let pos = state.enemies[idx].pos;
    if let Some(humanoid) = state.humanoid_mut(target) {
        humanoid.pos = Vec2::new(pos.x, pos.y + PAYLOAD_OFFSET);
    }

    if pos.y < 0.0 && pending.remove_enemy(id) {
        pending.remove_humanoid(target);
        let hunter_id = state.next_entity_id();
        pending.spawn_enemy(Enemy::hunter(hunter_id, pos));
        log::debug!(
            "Abductor {} escaped with humanoid {}; hunter {} spawned",
            id,
            target,
            hunter_id
        );
    }
}
