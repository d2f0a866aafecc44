//! Defender - a side-scrolling humanoid-defence arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, enemy AI, collisions, session state)
//! - `audio`: Tone cues for simulation events (synthesis happens outside the crate)
//! - `settings`: Session settings loaded from JSON

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Viewport dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// The world is four screens wide and wraps horizontally
    pub const WORLD_WIDTH: f32 = SCREEN_WIDTH * 4.0;
    /// Baseline terrain height before jitter
    pub const GROUND_LEVEL: f32 = SCREEN_HEIGHT - 60.0;
    /// Lowest Y the ship may reach (scanner strip occupies the top of the screen)
    pub const SCANNER_BOTTOM: f32 = 60.0;
    /// Vertical span between the scanner and the ground
    pub const PLAYABLE_HEIGHT: f32 = GROUND_LEVEL - SCANNER_BOTTOM;
    /// Falls longer than this kill a humanoid
    pub const FALL_DAMAGE_DISTANCE: f32 = PLAYABLE_HEIGHT * 0.2;

    /// Terrain generation
    pub const TERRAIN_SPACING: f32 = 60.0;
    pub const TERRAIN_JITTER: i32 = 25;

    /// Player ship
    pub const PLAYER_ACCEL: f32 = 0.8;
    pub const PLAYER_MAX_SPEED: f32 = 8.0;
    pub const PLAYER_FRICTION: f32 = 0.97;
    /// Minimum gap between the ship and the terrain
    pub const SHIP_CLEARANCE: f32 = 10.0;
    /// Extra slack when deciding whether a carrying ship has touched down
    pub const LANDING_TOLERANCE: f32 = 1.0;
    pub const INVINCIBILITY_TICKS: u32 = 120;
    /// Blink period while invincible (hidden for the first half)
    pub const BLINK_PERIOD: u32 = 20;
    pub const STARTING_LIVES: u32 = 3;
    pub const STARTING_BOMBS: u32 = 3;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 15.0;
    /// Distance past the world edge at which projectiles are dropped
    pub const PROJECTILE_MARGIN: f32 = 100.0;

    /// Homing hunters
    pub const HUNTER_SPEED: f32 = 4.0;

    /// Abductors
    pub const PURSUIT_SPEED_X: f32 = 2.5;
    pub const PURSUIT_SPEED_Y: f32 = 2.0;
    /// Per-axis distance under which a pursuing abductor stops adjusting
    pub const PURSUIT_DEADZONE: f32 = 5.0;
    pub const CAPTURE_RADIUS: f32 = 15.0;
    pub const ASCENT_SPEED: f32 = 2.0;
    /// Vertical offset of a captured humanoid below its abductor
    pub const PAYLOAD_OFFSET: f32 = 25.0;
    pub const WANDER_CEILING: f32 = 80.0;
    /// Wandering abductors turn back this far above the terrain
    pub const WANDER_FLOOR_CLEARANCE: f32 = 40.0;
    pub const SPAWN_MIN_Y: f32 = 80.0;
    pub const SPAWN_MAX_Y: f32 = 200.0;

    /// Humanoids
    pub const HUMANOID_GRAVITY: f32 = 0.02;
    /// Resting humanoids stand this far above the terrain line
    pub const HUMANOID_GROUND_OFFSET: f32 = 7.0;
    /// Carried humanoids hang this far below the ship
    pub const CARRY_OFFSET: f32 = 20.0;
    pub const CATCH_RADIUS: f32 = 25.0;
    /// Ticks a dead humanoid lingers before removal
    pub const DEATH_TICKS: u32 = 60;
    pub const HUMANOID_SPAWN_MARGIN: f32 = 50.0;

    /// Scoring
    pub const KILL_SCORE: u64 = 150;
    pub const BOMB_KILL_SCORE: u64 = 100;
    pub const RESCUE_BONUS: u64 = 1000;

    /// Population maintenance
    pub const ENEMY_FLOOR: usize = 3;
    pub const RESPAWN_BATCH: usize = 2;

    /// Smart bombs reach slightly past the screen edges
    pub const BOMB_MARGIN: f32 = 50.0;
    /// Camera smoothing factor per tick
    pub const CAMERA_LERP: f32 = 0.1;

    /// Session composition defaults
    pub const HUMANOID_COUNT: usize = 10;
    pub const ABDUCTOR_COUNT: usize = 6;
}

/// Wrap a coordinate into [0, span)
#[inline]
pub fn wrap_coord(value: f32, span: f32) -> f32 {
    let wrapped = value.rem_euclid(span);
    // rem_euclid can round up to `span` for tiny negative inputs
    if wrapped >= span { 0.0 } else { wrapped }
}
