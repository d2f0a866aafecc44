//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod movement;
pub mod pending;
pub mod starfield;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod view;

pub use camera::Camera;
pub use collision::{collision_phase, overlaps};
pub use state::{
    Abductor, AbductorState, Enemy, EnemyKind, Facing, GameEvent, GameOverReason, GamePhase,
    GameState, Humanoid, HumanoidState, Particle, ParticleColor, Player, Projectile,
};
pub use starfield::{Starfield, StarView};
pub use terrain::Terrain;
pub use tick::{TickInput, tick};
pub use view::{EntityKind, EntityView, Hud, Snapshot};
