//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Poll-driven ticks only (no scheduled callbacks)
//! - Seeded RNG only
//! - Fixed per-frame update order
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{
    AmbientParticle, BurstParticle, Enemy, EnemyKind, GameEvent, GameState, Player, Projectile,
    WeaponKind, WorldBounds,
};
pub use tick::{TickInput, tick};
