//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Wall-clock timestamps passed in, never read
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod interact;
pub mod spawn;
pub mod state;
pub mod tick;

pub use interact::pointer_down;
pub use spawn::{explode, launch_toward, spawn_collectible};
pub use state::{
    Collectible, CollectibleKind, Color, Finale, Firework, GameState, Phase, ScheduledTask, Spark,
    TaskKind,
};
pub use tick::frame;
