//! Per-tick movement for every entity kind
//!
//! Abductors are moved by the AI controller (`ai.rs`) because their motion
//! depends on their decision state; everything else moves here.

use glam::Vec2;

use super::pending::Pending;
use super::state::{
    EnemyKind, Facing, GameEvent, GameState, Humanoid, HumanoidState, Particle, Player,
    Projectile,
};
use super::terrain::Terrain;
use super::tick::TickInput;
use crate::consts::*;
use crate::wrap_coord;

/// Run the movement pass for all entities, then apply deferred removals
pub fn movement_phase(state: &mut GameState, input: &TickInput) {
    let mut pending = Pending::new();

    step_player(&mut state.player, input, &state.terrain);
    step_projectiles(&mut state.projectiles, &mut pending);
    step_hunters(state);
    step_humanoids(state, &mut pending);
    step_particles(&mut state.particles);

    pending.apply(state);
}

/// Momentum flight: accelerate, apply friction, cap speed, integrate,
/// wrap horizontally and keep between the scanner and the terrain.
pub fn step_player(player: &mut Player, input: &TickInput, terrain: &Terrain) {
    if player.invincible {
        if player.invincible_ticks == 0 {
            player.invincible = false;
        } else {
            player.invincible_ticks -= 1;
        }
    }

    let axis = input.axis();
    if axis.x < 0.0 {
        player.facing = Facing::Left;
    } else if axis.x > 0.0 {
        player.facing = Facing::Right;
    }

    player.vel += axis * PLAYER_ACCEL;
    player.vel *= PLAYER_FRICTION;
    player.vel = player.vel.clamp(
        Vec2::splat(-PLAYER_MAX_SPEED),
        Vec2::splat(PLAYER_MAX_SPEED),
    );
    player.pos += player.vel;
    player.pos.x = wrap_coord(player.pos.x, WORLD_WIDTH);

    // Keep between the scanner and the terrain
    let floor = terrain.height_at(player.pos.x) - SHIP_CLEARANCE;
    if player.pos.y < SCANNER_BOTTOM {
        player.pos.y = SCANNER_BOTTOM;
        player.vel.y = 0.0;
    }
    if player.pos.y > floor {
        player.pos.y = floor;
        player.vel.y = 0.0;
    }
}

/// Straight horizontal flight; bolts past the world edge margin are dropped
pub fn step_projectiles(projectiles: &mut [Projectile], pending: &mut Pending) {
    for projectile in projectiles.iter_mut() {
        projectile.pos.x += projectile.vel_x;
        if projectile.pos.x < -PROJECTILE_MARGIN || projectile.pos.x > WORLD_WIDTH + PROJECTILE_MARGIN
        {
            pending.remove_projectile(projectile.id);
        }
    }
}

/// Hunters head straight for the ship and wrap on both axes
fn step_hunters(state: &mut GameState) {
    let target = state.player.pos;
    for enemy in &mut state.enemies {
        if let EnemyKind::Hunter { speed } = enemy.kind {
            enemy.pos = home_toward(enemy.pos, target, speed);
        }
    }
}

/// One homing step of `speed` toward `target`, wrapped into the world
pub fn home_toward(pos: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let next = pos + (target - pos).normalize_or_zero() * speed;
    Vec2::new(
        wrap_coord(next.x, WORLD_WIDTH),
        wrap_coord(next.y, SCREEN_HEIGHT),
    )
}

fn step_humanoids(state: &mut GameState, pending: &mut Pending) {
    let carrier = state.player.pos;
    let carrying = state.player.carrying;

    for humanoid in &mut state.humanoids {
        match humanoid.state {
            HumanoidState::Carried => {
                if carrying == Some(humanoid.id) {
                    humanoid.pos = Vec2::new(carrier.x, carrier.y + CARRY_OFFSET);
                } else {
                    // Carrier link was lost
                    humanoid.start_fall();
                }
            }
            HumanoidState::Falling { .. } => {
                if step_fall(humanoid, &state.terrain) {
                    state.events.push(GameEvent::HumanoidDied);
                    log::debug!("Humanoid {} died from a fall", humanoid.id);
                }
            }
            HumanoidState::Dead { ticks } => {
                let ticks = ticks + 1;
                humanoid.state = HumanoidState::Dead { ticks };
                if ticks > DEATH_TICKS {
                    pending.remove_humanoid(humanoid.id);
                }
            }
            HumanoidState::OnGround | HumanoidState::Abducted { .. } => {}
        }
    }
}

/// Advance a falling humanoid. Returns true if it just died on landing.
pub fn step_fall(humanoid: &mut Humanoid, terrain: &Terrain) -> bool {
    let HumanoidState::Falling { vel_y, origin_y } = humanoid.state else {
        return false;
    };

    let vel_y = vel_y + HUMANOID_GRAVITY;
    humanoid.pos.y += vel_y;

    let rest_y = terrain.height_at(humanoid.pos.x) - HUMANOID_GROUND_OFFSET;
    if humanoid.pos.y < rest_y {
        humanoid.state = HumanoidState::Falling { vel_y, origin_y };
        return false;
    }

    humanoid.pos.y = rest_y;
    if fall_is_fatal(origin_y, rest_y) {
        humanoid.state = HumanoidState::Dead { ticks: 0 };
        true
    } else {
        humanoid.state = HumanoidState::OnGround;
        false
    }
}

/// A fall is fatal only when it is longer than `FALL_DAMAGE_DISTANCE`
pub fn fall_is_fatal(origin_y: f32, landing_y: f32) -> bool {
    landing_y - origin_y > FALL_DAMAGE_DISTANCE
}

pub fn step_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}
