//! Collision detection and interaction rules
//!
//! Runs once per tick after movement and AI, in a fixed order:
//! projectiles vs enemies, ship vs enemies, ship vs humanoids, smart bomb,
//! then population top-up. Each pass buffers its removals and applies them
//! before the next pass starts.

use glam::Vec2;

use super::pending::Pending;
use super::state::{GameEvent, GameState, HumanoidState, ParticleColor, Player, Projectile};
use super::tick::TickInput;
use crate::consts::*;

/// Axis-aligned box overlap between two centred boxes
#[inline]
pub fn overlaps(a: Vec2, a_half: Vec2, b: Vec2, b_half: Vec2) -> bool {
    let gap = (a - b).abs();
    let reach = a_half + b_half;
    gap.x < reach.x && gap.y < reach.y
}

/// Resolve every interaction for this tick
pub fn collision_phase(state: &mut GameState, input: &TickInput) {
    projectiles_vs_enemies(state);

    player_vs_enemies(state);
    if state.player.lives == 0 {
        return;
    }

    player_vs_humanoids(state);

    if input.bomb {
        smart_bomb(state);
    }

    maintain_population(state);
}

/// Bolt hits destroy both parties and score `KILL_SCORE`
pub fn projectiles_vs_enemies(state: &mut GameState) {
    let mut pending = Pending::new();
    let mut kills: Vec<(Vec2, ParticleColor)> = Vec::new();

    for projectile in &state.projectiles {
        for enemy in &state.enemies {
            if pending.enemy_removed(enemy.id) {
                continue;
            }
            if overlaps(
                projectile.pos,
                Projectile::HALF_EXTENTS,
                enemy.pos,
                enemy.half_extents(),
            ) {
                pending.remove_enemy(enemy.id);
                pending.remove_projectile(projectile.id);
                kills.push((enemy.pos, enemy.particle_color()));
                break;
            }
        }
    }

    for (pos, color) in kills {
        state.score += KILL_SCORE;
        state.events.push(GameEvent::Exploded);
        state.explode(pos, color);
    }
    pending.apply(state);
}

/// Ship contact destroys the enemy and costs one life per tick, however many
/// enemies were touched. Skipped entirely while invincible.
pub fn player_vs_enemies(state: &mut GameState) {
    if state.player.invincible {
        return;
    }

    let mut pending = Pending::new();
    let mut wrecks: Vec<(Vec2, ParticleColor)> = Vec::new();
    for enemy in &state.enemies {
        if overlaps(
            state.player.pos,
            Player::HALF_EXTENTS,
            enemy.pos,
            enemy.half_extents(),
        ) && pending.remove_enemy(enemy.id)
        {
            wrecks.push((enemy.pos, enemy.particle_color()));
        }
    }
    if wrecks.is_empty() {
        return;
    }

    for (pos, color) in wrecks {
        state.explode(pos, color);
    }
    state.events.push(GameEvent::Exploded);
    state.player.lives = state.player.lives.saturating_sub(1);

    // The ship is lost, so whatever it carried starts to fall
    if let Some(id) = state.player.carrying.take() {
        if let Some(humanoid) = state.humanoid_mut(id) {
            humanoid.start_fall();
        }
    }
    pending.apply(state);

    log::debug!("Ship destroyed, {} lives left", state.player.lives);
    if state.player.lives > 0 {
        let at = Vec2::new(state.camera.center_x(), SCREEN_HEIGHT / 2.0);
        state.player.respawn(at);
    }
}

/// Catch a falling humanoid, or set a carried one down on the ground
pub fn player_vs_humanoids(state: &mut GameState) {
    let ship = state.player.pos;

    if let Some(id) = state.player.carrying {
        let ground = state.terrain.height_at(ship.x);
        if ship.y < ground - SHIP_CLEARANCE - LANDING_TOLERANCE {
            return;
        }

        state.player.carrying = None;
        let Some(humanoid) = state.humanoid_mut(id) else {
            return;
        };
        if humanoid.state != HumanoidState::Carried {
            return;
        }
        humanoid.state = HumanoidState::OnGround;
        humanoid.pos = Vec2::new(ship.x, ground - HUMANOID_GROUND_OFFSET);
        state.score += RESCUE_BONUS;
        state.events.push(GameEvent::Rescued);
        log::debug!("Humanoid {} delivered", id);
        return;
    }

    // At most one catch per tick, lowest id first
    if let Some(humanoid) = state
        .humanoids
        .iter_mut()
        .find(|h| h.is_falling() && h.pos.distance(ship) < CATCH_RADIUS)
    {
        humanoid.state = HumanoidState::Carried;
        humanoid.claimed_by = None;
        state.player.carrying = Some(humanoid.id);
        state.events.push(GameEvent::Rescued);
        log::debug!("Humanoid {} caught", humanoid.id);
    }
}

/// Destroy every enemy on screen. Does nothing without bombs.
pub fn smart_bomb(state: &mut GameState) {
    if state.player.bombs == 0 {
        return;
    }
    state.player.bombs -= 1;

    let camera = state.camera;
    let mut pending = Pending::new();
    let mut wrecks: Vec<(Vec2, ParticleColor)> = Vec::new();
    for enemy in &state.enemies {
        if camera.is_on_screen(enemy.pos.x, BOMB_MARGIN) && pending.remove_enemy(enemy.id) {
            wrecks.push((enemy.pos, enemy.particle_color()));
        }
    }

    log::debug!(
        "Smart bomb destroyed {} enemies, {} bombs left",
        wrecks.len(),
        state.player.bombs
    );
    for (pos, color) in wrecks {
        state.score += BOMB_KILL_SCORE;
        state.events.push(GameEvent::Exploded);
        state.explode(pos, color);
    }
    pending.apply(state);
}

/// Keep at least `ENEMY_FLOOR` enemies around
pub fn maintain_population(state: &mut GameState) {
    if state.enemies.len() >= ENEMY_FLOOR {
        return;
    }
    for _ in 0..RESPAWN_BATCH {
        state.spawn_abductor();
    }
    log::trace!("Population low, {} enemies after respawn", state.enemies.len());
}
