//! Forest Ray - a side-view forest arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: Canvas2D rendering (wasm only)
//! - `audio`: Web Audio procedural sound effects (wasm only)
//! - `highscores`: Persisted best score
//! - `settings`: Audio/visual preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::Settings;

/// Game tuning constants
pub mod consts {
    /// Largest dt fed into one tick; protects against tab-stall spikes
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Ground line as a fraction of world height
    pub const GROUND_RATIO: f32 = 0.85;

    /// Downward acceleration applied to airborne entities (units/s²)
    pub const GRAVITY: f32 = 1800.0;
    /// Per-frame horizontal velocity decay when no direction is held
    pub const FRICTION: f32 = 0.85;
    /// Horizontal speed cap for the player (units/s)
    pub const MAX_RUN_SPEED: f32 = 420.0;
    /// Horizontal acceleration from held input (units/s²)
    pub const RUN_ACCEL: f32 = 2000.0;
    /// Speeds below this snap to zero (units/s)
    pub const VELOCITY_DEADBAND: f32 = 6.0;
    /// Upward jump impulse (units/s)
    pub const JUMP_FORCE: f32 = 780.0;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 36.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_HP_MAX: f32 = 100.0;
    /// Invulnerability window after taking damage (seconds)
    pub const INVULN_WINDOW: f32 = 0.8;

    /// Enemy hitbox (all kinds)
    pub const ENEMY_SIZE: f32 = 34.0;
    /// Grace period between an enemy dying and its removal (seconds)
    pub const DESPAWN_GRACE: f32 = 1.2;
    /// Hard cap on live enemies regardless of level
    pub const MAX_LIVE_ENEMIES: u32 = 6;
    /// Kills needed per level step
    pub const KILLS_PER_LEVEL: u32 = 5;

    /// Off-world margin before a projectile is culled (units)
    pub const PROJECTILE_MARGIN: f32 = 100.0;

    /// Burst particles spawned per enemy death
    pub const BURST_COUNT: usize = 24;
    /// Per-step burst speed multiplier
    pub const BURST_DRAG: f32 = 0.96;

    /// Fixed ambient particle pool size
    pub const AMBIENT_PARTICLE_COUNT: usize = 140;
}
