//! Deferred entity creation and removal
//!
//! Each simulation pass records what it wants to add or remove here and the
//! changes are applied once the pass is finished, so no collection is mutated
//! while it is being scanned.

use super::state::{AbductorState, Enemy, GameState, HumanoidState};

#[derive(Debug, Default)]
pub struct Pending {
    enemies_removed: Vec<u32>,
    humanoids_removed: Vec<u32>,
    projectiles_removed: Vec<u32>,
    enemies_spawned: Vec<Enemy>,
}

impl Pending {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an enemy for removal. Returns false if it was already queued.
    pub fn remove_enemy(&mut self, id: u32) -> bool {
        if self.enemies_removed.contains(&id) {
            return false;
        }
        self.enemies_removed.push(id);
        true
    }

    pub fn enemy_removed(&self, id: u32) -> bool {
        self.enemies_removed.contains(&id)
    }

    pub fn remove_humanoid(&mut self, id: u32) -> bool {
        if self.humanoids_removed.contains(&id) {
            return false;
        }
        self.humanoids_removed.push(id);
        true
    }

    pub fn remove_projectile(&mut self, id: u32) -> bool {
        if self.projectiles_removed.contains(&id) {
            return false;
        }
        self.projectiles_removed.push(id);
        true
    }

    pub fn projectile_removed(&self, id: u32) -> bool {
        self.projectiles_removed.contains(&id)
    }

    pub fn spawn_enemy(&mut self, enemy: Enemy) {
        self.enemies_spawned.push(enemy);
    }

    pub fn is_empty(&self) -> bool {
        self.enemies_removed.is_empty()
            && self.humanoids_removed.is_empty()
            && self.projectiles_removed.is_empty()
            && self.enemies_spawned.is_empty()
    }

    /// Apply queued changes and clear every reference to removed entities
    pub fn apply(self, state: &mut GameState) {
        if self.is_empty() {
            return;
        }

        // Humanoids first: an escaping abductor takes its humanoid with it,
        // so by the time the abductor goes there is nothing left to drop.
        if !self.humanoids_removed.is_empty() {
            let removed = &self.humanoids_removed;
            state.humanoids.retain(|h| !removed.contains(&h.id));

            if state.player.carrying.is_some_and(|id| removed.contains(&id)) {
                state.player.carrying = None;
            }
            for enemy in &mut state.enemies {
                if let Some(abductor) = enemy.as_abductor_mut() {
                    if abductor.target().is_some_and(|id| removed.contains(&id)) {
                        abductor.state = AbductorState::Wandering;
                    }
                }
            }
        }

        if !self.enemies_removed.is_empty() {
            let removed = &self.enemies_removed;
            state.enemies.retain(|e| !removed.contains(&e.id));

            // Anything an enemy was holding or chasing is let go
            for humanoid in &mut state.humanoids {
                if let HumanoidState::Abducted { by } = humanoid.state {
                    if removed.contains(&by) {
                        humanoid.start_fall();
                        log::debug!("Humanoid {} dropped by abductor {}", humanoid.id, by);
                    }
                }
                if humanoid.claimed_by.is_some_and(|id| removed.contains(&id)) {
                    humanoid.claimed_by = None;
                }
            }
        }

        if !self.projectiles_removed.is_empty() {
            let removed = &self.projectiles_removed;
            state.projectiles.retain(|p| !removed.contains(&p.id));
        }

        state.enemies.extend(self.enemies_spawned);
    }
}
