//! Game state and core simulation types
//!
//! Every entity lives in a per-category `Vec` owned by [`GameState`], sorted by
//! id. Cross-entity links (abductor → humanoid, ship → carried humanoid) are
//! plain ids and are looked up each time they are used.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::starfield::Starfield;
use super::terrain::Terrain;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Session ended by a terminal condition
    GameOver,
    /// Player asked to quit
    Quit,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    LivesExhausted,
    HumanoidsLost,
}

/// Discrete notifications for the audio/presentation layers.
/// Cleared at the start of every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired,
    Exploded,
    Rescued,
    HumanoidDied,
    GameOver(GameOverReason),
}

/// Which way the ship's nose points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    pub lives: u32,
    pub bombs: u32,
    pub invincible: bool,
    /// Ticks of invincibility left once `invincible` is set
    pub invincible_ticks: u32,
    /// Humanoid currently hanging below the ship
    pub carrying: Option<u32>,
}

impl Player {
    pub const HALF_EXTENTS: Vec2 = Vec2::new(16.0, 5.0);

    pub fn new() -> Self {
        Self {
            pos: Vec2::new(WORLD_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            facing: Facing::Right,
            lives: STARTING_LIVES,
            bombs: STARTING_BOMBS,
            invincible: false,
            invincible_ticks: 0,
            carrying: None,
        }
    }

    /// Put the ship back in play after losing a life
    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.invincible = true;
        self.invincible_ticks = INVINCIBILITY_TICKS;
    }

    /// Hidden half of the blink cycle while invincible
    pub fn blink_hidden(&self) -> bool {
        self.invincible && self.invincible_ticks % BLINK_PERIOD < BLINK_PERIOD / 2
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Humanoid life cycle. A humanoid is in exactly one of these at any time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HumanoidState {
    /// Standing on the terrain
    OnGround,
    /// Being lifted by the abductor with this id
    Abducted { by: u32 },
    /// Dropped; `origin_y` is where the fall began
    Falling { vel_y: f32, origin_y: f32 },
    /// Hanging below the player's ship
    Carried,
    /// Killed by a long fall, removed after `DEATH_TICKS`
    Dead { ticks: u32 },
}

/// A defended ground character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Humanoid {
    pub id: u32,
    pub pos: Vec2,
    pub state: HumanoidState,
    /// Abductor pursuing this humanoid, if any
    pub claimed_by: Option<u32>,
}

impl Humanoid {
    pub const HALF_EXTENTS: Vec2 = Vec2::new(4.0, 7.0);

    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            state: HumanoidState::OnGround,
            claimed_by: None,
        }
    }

    /// Standing, alive and not already chosen by an abductor
    pub fn is_targetable(&self) -> bool {
        self.state == HumanoidState::OnGround && self.claimed_by.is_none()
    }

    pub fn is_falling(&self) -> bool {
        matches!(self.state, HumanoidState::Falling { .. })
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.state, HumanoidState::Dead { .. })
    }

    /// Drop from the current height
    pub fn start_fall(&mut self) {
        self.state = HumanoidState::Falling {
            vel_y: 0.0,
            origin_y: self.pos.y,
        };
        self.claimed_by = None;
    }
}

/// Abductor decision state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AbductorState {
    /// Drifting, looking for a humanoid
    #[default]
    Wandering,
    /// Closing in on a claimed humanoid
    Pursuing { target: u32 },
    /// Carrying the humanoid towards the top of the world
    Ascending { target: u32 },
}

/// Per-abductor data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Abductor {
    /// Wander velocity
    pub vel: Vec2,
    pub state: AbductorState,
}

impl Abductor {
    pub fn has_payload(&self) -> bool {
        matches!(self.state, AbductorState::Ascending { .. })
    }

    /// Humanoid this abductor has claimed or is carrying
    pub fn target(&self) -> Option<u32> {
        match self.state {
            AbductorState::Wandering => None,
            AbductorState::Pursuing { target } | AbductorState::Ascending { target } => {
                Some(target)
            }
        }
    }
}

/// Enemy variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EnemyKind {
    Abductor(Abductor),
    /// Spawned when an abductor escapes; homes in on the ship
    Hunter { speed: f32 },
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn abductor(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            kind: EnemyKind::Abductor(Abductor {
                vel,
                state: AbductorState::Wandering,
            }),
        }
    }

    pub fn hunter(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            kind: EnemyKind::Hunter {
                speed: HUNTER_SPEED,
            },
        }
    }

    pub fn as_abductor(&self) -> Option<&Abductor> {
        match &self.kind {
            EnemyKind::Abductor(a) => Some(a),
            EnemyKind::Hunter { .. } => None,
        }
    }

    pub fn as_abductor_mut(&mut self) -> Option<&mut Abductor> {
        match &mut self.kind {
            EnemyKind::Abductor(a) => Some(a),
            EnemyKind::Hunter { .. } => None,
        }
    }

    pub fn is_hunter(&self) -> bool {
        matches!(self.kind, EnemyKind::Hunter { .. })
    }

    pub fn has_payload(&self) -> bool {
        self.as_abductor().is_some_and(Abductor::has_payload)
    }

    pub fn half_extents(&self) -> Vec2 {
        match self.kind {
            EnemyKind::Abductor(_) => Vec2::new(8.0, 7.0),
            EnemyKind::Hunter { .. } => Vec2::new(8.0, 4.0),
        }
    }

    pub fn particle_color(&self) -> ParticleColor {
        match self.kind {
            EnemyKind::Abductor(_) => ParticleColor::Green,
            EnemyKind::Hunter { .. } => ParticleColor::Orange,
        }
    }
}

/// A laser bolt fired by the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Signed horizontal speed
    pub vel_x: f32,
}

impl Projectile {
    pub const HALF_EXTENTS: Vec2 = Vec2::new(7.5, 1.5);
}

/// Explosion colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Green,
    Orange,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    /// Ticks left
    pub life: u32,
    pub initial_life: u32,
    pub size: f32,
}

impl Particle {
    /// Opacity in 0-1, fading with remaining life
    pub fn alpha(&self) -> f32 {
        if self.initial_life == 0 {
            0.0
        } else {
            self.life as f32 / self.initial_life as f32
        }
    }
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 512;
/// Particles per explosion
pub const EXPLOSION_PARTICLES: usize = 15;

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (spawns, wander velocities)
    pub rng: Pcg32,
    /// Cosmetic RNG (particles), kept apart so effects never change gameplay
    pub fx_rng: Pcg32,
    pub terrain: Terrain,
    /// Background stars (cosmetic only)
    pub stars: Starfield,
    pub camera: Camera,
    pub phase: GamePhase,
    pub game_over_reason: Option<GameOverReason>,
    /// Score
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Active enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    /// Humanoids (sorted by id for determinism)
    pub humanoids: Vec<Humanoid>,
    /// Active projectiles (sorted by id for determinism)
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Events raised during the last tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with default composition
    pub fn new(seed: u64) -> Self {
        Self::from_settings(&Settings {
            seed,
            ..Settings::default()
        })
    }

    /// Create a new session sized by `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed;
        Self::with_terrain(settings, Terrain::generate(seed))
    }

    /// Create a new session over a given terrain
    pub fn with_terrain(settings: &Settings, terrain: Terrain) -> Self {
        let seed = settings.seed;
        let player = Player::new();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            fx_rng: Pcg32::seed_from_u64(seed.wrapping_add(0xD1B5_4A32_D192_ED03)),
            terrain,
            stars: Starfield::generate(seed),
            camera: Camera::centered_on(player.pos.x),
            phase: GamePhase::Playing,
            game_over_reason: None,
            score: 0,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            humanoids: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        for _ in 0..settings.humanoids {
            state.spawn_humanoid();
        }
        for _ in 0..settings.abductors {
            state.spawn_abductor();
        }

        log::info!(
            "Session started: seed={}, humanoids={}, abductors={}",
            seed,
            state.humanoids.len(),
            state.enemies.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a humanoid on the terrain at a random X
    pub fn spawn_humanoid(&mut self) -> u32 {
        let x = self
            .rng
            .random_range(HUMANOID_SPAWN_MARGIN..=WORLD_WIDTH - HUMANOID_SPAWN_MARGIN);
        let y = self.terrain.height_at(x) - HUMANOID_GROUND_OFFSET;
        self.add_humanoid(Vec2::new(x, y))
    }

    /// Place a humanoid at an exact position
    pub fn add_humanoid(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.humanoids.push(Humanoid::new(id, pos));
        id
    }

    /// Spawn a wandering abductor high in the sky at a random X
    pub fn spawn_abductor(&mut self) -> u32 {
        let enemy = self.new_abductor();
        let id = enemy.id;
        self.enemies.push(enemy);
        id
    }

    /// Build (but do not insert) a randomly placed abductor
    pub fn new_abductor(&mut self) -> Enemy {
        let id = self.next_entity_id();
        let pos = Vec2::new(
            self.rng.random_range(0.0..=WORLD_WIDTH),
            self.rng.random_range(SPAWN_MIN_Y..=SPAWN_MAX_Y),
        );
        let vel = Vec2::new(
            self.rng.random_range(-2.0..=2.0),
            self.rng.random_range(0.5..=1.5),
        );
        Enemy::abductor(id, pos, vel)
    }

    /// Place an abductor at an exact position with an exact wander velocity
    pub fn add_abductor(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::abductor(id, pos, vel));
        id
    }

    /// Place a homing hunter at an exact position
    pub fn add_hunter(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::hunter(id, pos));
        id
    }

    pub fn humanoid(&self, id: u32) -> Option<&Humanoid> {
        self.humanoids.iter().find(|h| h.id == id)
    }

    pub fn humanoid_mut(&mut self, id: u32) -> Option<&mut Humanoid> {
        self.humanoids.iter_mut().find(|h| h.id == id)
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Burst of particles at a position
    pub fn explode(&mut self, pos: Vec2, color: ParticleColor) {
        for _ in 0..EXPLOSION_PARTICLES {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let life = self.fx_rng.random_range(20..=40);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(
                    self.fx_rng.random_range(-4.0..=4.0),
                    self.fx_rng.random_range(-4.0..=4.0),
                ),
                color,
                life,
                initial_life: life,
                size: self.fx_rng.random_range(2u8..=5) as f32,
            });
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.humanoids.sort_by_key(|h| h.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}
