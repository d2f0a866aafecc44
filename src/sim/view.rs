//! Read-only presentation snapshot
//!
//! Everything a renderer needs for one frame: entity kinds, positions and
//! visual flags, the HUD values and the scanner blips. Built from the state
//! after a tick and never fed back into it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::scanner;
use super::starfield::StarView;
use super::state::{
    AbductorState, Facing, GameEvent, GamePhase, GameState, HumanoidState, ParticleColor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Abductor,
    Hunter,
    Humanoid,
    Projectile,
}

/// Humanoid colour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumanoidLook {
    Idle,
    Abducted,
    Falling,
    Carried,
    Dead,
}

/// Visual state flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualFlags {
    /// Invincible ship in the "off" half of its blink
    pub hidden: bool,
    pub invincible: bool,
    pub carrying: bool,
    pub has_payload: bool,
    pub pursuing: bool,
    pub humanoid: Option<HumanoidLook>,
    pub facing: Option<Facing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    /// None for the ship
    pub id: Option<u32>,
    pub pos: Vec2,
    /// Position relative to the camera
    pub screen: Vec2,
    pub flags: VisualFlags,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub screen: Vec2,
    pub color: ParticleColor,
    pub size: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blip {
    pub kind: EntityKind,
    /// Position inside the scanner strip
    pub pos: Vec2,
}

/// HUD values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub bombs: u32,
    pub humanoids: usize,
    /// Height of the ship above the terrain under it
    pub altitude: f32,
    pub phase: GamePhase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub camera_x: f32,
    pub hud: Hud,
    pub entities: Vec<EntityView>,
    pub particles: Vec<ParticleView>,
    /// Background stars in view
    pub stars: Vec<StarView>,
    pub scanner: Vec<Blip>,
    /// Scanner X and width of the visible window
    pub view_window: (f32, f32),
    /// Terrain polyline in world coordinates
    pub terrain: Vec<Vec2>,
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.player.lives,
            bombs: self.player.bombs,
            humanoids: self.humanoids.len(),
            altitude: self.terrain.height_at(self.player.pos.x) - self.player.pos.y,
            phase: self.phase,
        }
    }

    /// Build the presentation snapshot for the current tick
    pub fn snapshot(&self) -> Snapshot {
        let camera = self.camera;
        let mut entities = Vec::with_capacity(
            1 + self.enemies.len() + self.humanoids.len() + self.projectiles.len(),
        );
        let mut blips = Vec::with_capacity(1 + self.enemies.len() + self.humanoids.len());

        let player = &self.player;
        entities.push(EntityView {
            kind: EntityKind::Player,
            id: None,
            pos: player.pos,
            screen: camera.world_to_screen(player.pos),
            flags: VisualFlags {
                hidden: player.blink_hidden(),
                invincible: player.invincible,
                carrying: player.carrying.is_some(),
                facing: Some(player.facing),
                ..Default::default()
            },
        });
        blips.push(Blip {
            kind: EntityKind::Player,
            pos: scanner::map(player.pos),
        });

        for enemy in &self.enemies {
            let (kind, flags) = match enemy.as_abductor() {
                Some(abductor) => (
                    EntityKind::Abductor,
                    VisualFlags {
                        has_payload: abductor.has_payload(),
                        pursuing: matches!(abductor.state, AbductorState::Pursuing { .. }),
                        ..Default::default()
                    },
                ),
                None => (EntityKind::Hunter, VisualFlags::default()),
            };
            entities.push(EntityView {
                kind,
                id: Some(enemy.id),
                pos: enemy.pos,
                screen: camera.world_to_screen(enemy.pos),
                flags,
            });
            blips.push(Blip {
                kind,
                pos: scanner::map(enemy.pos),
            });
        }

        for humanoid in &self.humanoids {
            let look = match humanoid.state {
                HumanoidState::OnGround => HumanoidLook::Idle,
                HumanoidState::Abducted { .. } => HumanoidLook::Abducted,
                HumanoidState::Falling { .. } => HumanoidLook::Falling,
                HumanoidState::Carried => HumanoidLook::Carried,
                HumanoidState::Dead { .. } => HumanoidLook::Dead,
            };
            entities.push(EntityView {
                kind: EntityKind::Humanoid,
                id: Some(humanoid.id),
                pos: humanoid.pos,
                screen: camera.world_to_screen(humanoid.pos),
                flags: VisualFlags {
                    humanoid: Some(look),
                    ..Default::default()
                },
            });
            blips.push(Blip {
                kind: EntityKind::Humanoid,
                pos: scanner::map_ground(humanoid.pos.x),
            });
        }

        for projectile in &self.projectiles {
            entities.push(EntityView {
                kind: EntityKind::Projectile,
                id: Some(projectile.id),
                pos: projectile.pos,
                screen: camera.world_to_screen(projectile.pos),
                flags: VisualFlags {
                    facing: Some(if projectile.vel_x < 0.0 {
                        Facing::Left
                    } else {
                        Facing::Right
                    }),
                    ..Default::default()
                },
            });
        }

        let particles = self
            .particles
            .iter()
            .map(|p| ParticleView {
                screen: camera.world_to_screen(p.pos),
                color: p.color,
                size: p.size,
                alpha: p.alpha(),
            })
            .collect();

        Snapshot {
            tick: self.time_ticks,
            camera_x: camera.x,
            hud: self.hud(),
            entities,
            particles,
            stars: self.stars.visible(&camera, self.time_ticks),
            scanner: blips,
            view_window: scanner::view_window(&camera),
            terrain: self.terrain.points().map(|(x, y)| Vec2::new(x, y)).collect(),
            events: self.events.clone(),
        }
    }
}

/// Convenience for renderers that only draw what is in view
pub fn visible(snapshot: &Snapshot) -> impl Iterator<Item = &EntityView> {
    snapshot
        .entities
        .iter()
        .filter(|e| !e.flags.hidden)
        .filter(|e| e.screen.x > -50.0 && e.screen.x < crate::consts::SCREEN_WIDTH + 50.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::terrain::Terrain;

    fn sparse_state() -> GameState {
        GameState::with_terrain(
            &Settings {
                seed: 8,
                humanoids: 0,
                abductors: 0,
                ..Settings::default()
            },
            Terrain::flat(540.0),
        )
    }

    #[test]
    fn test_hud_altitude() {
        let mut state = sparse_state();
        state.player.pos.y = 400.0;
        state.add_humanoid(Vec2::new(100.0, 533.0));

        let hud = state.hud();
        assert_eq!(hud.altitude, 140.0);
        assert_eq!(hud.lives, STARTING_LIVES);
        assert_eq!(hud.bombs, STARTING_BOMBS);
        assert_eq!(hud.humanoids, 1);
        assert_eq!(hud.score, 0);
    }

    #[test]
    fn test_snapshot_lists_every_entity() {
        let mut state = sparse_state();
        let h = state.add_humanoid(Vec2::new(1600.0, 320.0));
        state.humanoids[0].state = HumanoidState::Carried;
        state.player.carrying = Some(h);
        state.add_abductor(Vec2::new(1500.0, 200.0), Vec2::ZERO);
        state.add_hunter(Vec2::new(1700.0, 200.0));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.entities.len(), 4);
        assert_eq!(snapshot.scanner.len(), 4);

        let ship = &snapshot.entities[0];
        assert_eq!(ship.kind, EntityKind::Player);
        assert!(ship.flags.carrying);

        let humanoid = snapshot
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Humanoid)
            .unwrap();
        assert_eq!(humanoid.flags.humanoid, Some(HumanoidLook::Carried));
        assert!(snapshot.entities.iter().any(|e| e.kind == EntityKind::Hunter));

        // Humanoid blips sit on the scanner's bottom line
        let blip = snapshot
            .scanner
            .iter()
            .find(|b| b.kind == EntityKind::Humanoid)
            .unwrap();
        assert_eq!(blip.pos.y, scanner::BOTTOM);
    }

    #[test]
    fn test_blinking_ship_is_hidden() {
        let mut state = sparse_state();
        state.player.respawn(Vec2::new(1600.0, 300.0));
        state.player.invincible_ticks = 5;

        let snapshot = state.snapshot();
        assert!(snapshot.entities[0].flags.hidden);
        assert_eq!(visible(&snapshot).filter(|e| e.kind == EntityKind::Player).count(), 0);

        state.player.invincible_ticks = 15;
        assert!(!state.snapshot().entities[0].flags.hidden);
    }

    #[test]
    fn test_snapshot_stars_in_view() {
        let state = GameState::new(8);
        let snapshot = state.snapshot();
        assert!(!snapshot.stars.is_empty());
        for star in &snapshot.stars {
            assert!(star.screen.x >= -5.0 && star.screen.x <= SCREEN_WIDTH + 5.0);
        }
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = sparse_state();
        state.add_humanoid(Vec2::new(100.0, 533.0));
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"hud\""));
        assert!(json.contains("Humanoid"));
    }
}
