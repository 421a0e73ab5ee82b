//! Diya Burst - a Diwali fireworks arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fireworks, sparks, collectibles, session)
//! - `renderer`: Canvas2D rendering adapter (wasm only)
//! - `score`: Best-score persistence and share message formatting

pub mod score;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use score::BestScore;

use rand::Rng;

/// Game tuning constants
pub mod consts {
    /// Maximum frame delta (seconds); longer frames are clamped so a
    /// backgrounded tab resuming doesn't blow up the simulation
    pub const MAX_FRAME_DT: f32 = 0.033;
    /// Velocities are stored in px per 1/60 s frame; updates scale by dt * this
    pub const FRAME_RATE: f32 = 60.0;

    /// Session length in seconds
    pub const SESSION_SECONDS: i32 = 20;
    /// Minimum gap between autonomous launches (wall-clock ms)
    pub const LAUNCH_CADENCE_MS: f64 = 550.0;

    /// Firework launch speed range (px/frame)
    pub const FIREWORK_SPEED_MIN: f32 = 2.2;
    pub const FIREWORK_SPEED_MAX: f32 = 3.2;
    /// Downward drift applied to firework vertical velocity each frame
    pub const FIREWORK_GRAVITY: f32 = 0.012;
    /// Explode when within this distance of the target
    pub const ARRIVAL_RADIUS: f32 = 10.0;
    /// Explode when rising above this fraction of viewport height
    pub const APEX_FRACTION: f32 = 0.15;
    /// Points awarded when a firework explodes
    pub const FIREWORK_SCORE: u32 = 5;
    /// Warm launch hue range (degrees)
    pub const LAUNCH_HUE_MIN: f32 = 25.0;
    pub const LAUNCH_HUE_MAX: f32 = 45.0;
    /// Launch origin band along the bottom edge (viewport-width fractions)
    pub const LAUNCH_BAND_MIN: f32 = 0.2;
    pub const LAUNCH_BAND_MAX: f32 = 0.8;
    /// Launch origin sits this far below the bottom edge (px)
    pub const LAUNCH_ORIGIN_DROP: f32 = 20.0;
    /// Autonomous launch target band (viewport fractions)
    pub const AUTO_TARGET_X_MIN: f32 = 0.15;
    pub const AUTO_TARGET_X_MAX: f32 = 0.85;
    pub const AUTO_TARGET_Y_MIN: f32 = 0.2;
    pub const AUTO_TARGET_Y_MAX: f32 = 0.45;
    /// Horizontal margin for finale salvo targets (px)
    pub const FINALE_SALVO_MARGIN: f32 = 80.0;

    /// Sparks per explosion
    pub const SPARK_COUNT_MIN: u32 = 30;
    pub const SPARK_COUNT_MAX: u32 = 60;
    /// Spark speed range (px/frame)
    pub const SPARK_SPEED_MIN: f32 = 1.5;
    pub const SPARK_SPEED_MAX: f32 = 3.6;
    /// Angular jitter around the even spread (radians)
    pub const SPARK_JITTER: f32 = 0.15;
    /// Downward drift applied to spark vertical velocity each frame
    pub const SPARK_GRAVITY: f32 = 0.02;
    /// Life lost per frame
    pub const SPARK_FADE: f32 = 0.012;
    /// Alpha of the one-frame warm flash an explosion paints over the scene
    pub const FLASH_ALPHA: f32 = 0.15;

    /// Collectible visual radius and the (slightly larger) pointer hit radius
    pub const COLLECTIBLE_RADIUS: f32 = 20.0;
    pub const COLLECTIBLE_HIT_RADIUS: f32 = 26.0;
    /// Horizontal spawn margin (px) and vertical spawn band (viewport fractions)
    pub const COLLECTIBLE_MARGIN: f32 = 36.0;
    pub const COLLECTIBLE_BAND_TOP: f32 = 0.35;
    pub const COLLECTIBLE_BAND_BOTTOM: f32 = 0.8;
    /// At most this many collectibles live at once
    pub const COLLECTIBLE_CAP: usize = 6;
    /// Chance per cadence tick to spawn a collectible
    pub const COLLECTIBLE_SPAWN_CHANCE: f64 = 0.35;
    /// Chance a spawned collectible is a diya (rest are bombs)
    pub const DIYA_CHANCE: f64 = 0.3;
    /// Flicker phase advance per second
    pub const FLICKER_RATE: f32 = 6.0;
    /// Points for popping each kind
    pub const DIYA_SCORE: u32 = 10;
    pub const BOMB_SCORE: u32 = 5;

    /// Finale: staggered salvo size and spacing, then centerpiece and summary
    pub const FINALE_SALVO_COUNT: u32 = 8;
    pub const FINALE_SALVO_SPACING_MS: f64 = 120.0;
    pub const FINALE_GLOW_DELAY_MS: f64 = 1500.0;
    pub const FINALE_SUMMARY_DELAY_MS: f64 = 2500.0;
    /// Centerpiece glow phase advance per frame; sequence ends at 4π
    pub const FINALE_GLOW_RATE: f32 = 0.1;
}

/// Uniform random value in [lo, hi)
#[inline]
pub fn rand_range<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if lo >= hi {
        return lo;
    }
    rng.random_range(lo..hi)
}
