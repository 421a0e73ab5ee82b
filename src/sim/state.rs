//! Session state and core simulation types
//!
//! Velocities follow the px-per-1/60s-frame convention; advance methods scale
//! by `dt * FRAME_RATE` so variable frame deltas stay screen-accurate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// HSL color carried by fireworks and sparks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Hue in degrees
    pub hue: f32,
    /// Saturation percent
    pub saturation: f32,
    /// Lightness percent
    pub lightness: f32,
}

impl Color {
    pub const fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// CSS color string for the canvas API
    pub fn css(&self) -> String {
        format!(
            "hsl({:.0} {:.0}% {:.0}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Burst color when a diya is popped
pub const DIYA_BURST: Color = Color::hsl(40.0, 100.0, 70.0);
/// Burst color when a bomb is popped
pub const BOMB_BURST: Color = Color::hsl(35.0, 100.0, 60.0);

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Call-to-action visible, countdown idle
    #[default]
    Idle,
    /// Countdown active, autonomous launches occur, scoring enabled
    Running,
    /// Countdown expired; celebratory sequence plays, scoring stopped
    Finale,
}

/// A launched firework rising toward its target
#[derive(Debug, Clone)]
pub struct Firework {
    pub pos: Vec2,
    pub target: Vec2,
    pub vel: Vec2,
    pub color: Color,
}

impl Firework {
    /// Velocity is derived once from origin/target/speed and only perturbed
    /// by gravity afterwards
    pub fn new(origin: Vec2, target: Vec2, color: Color, speed: f32) -> Self {
        let angle = (target.y - origin.y).atan2(target.x - origin.x);
        Self {
            pos: origin,
            target,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
        }
    }

    /// Advance one time-slice; returns true when the firework should explode
    /// (target reached or apex boundary crossed)
    pub fn advance(&mut self, dt: f32, apex_y: f32) -> bool {
        let scale = dt * FRAME_RATE;
        self.pos += self.vel * scale;
        self.vel.y += FIREWORK_GRAVITY * scale;
        self.pos.distance(self.target) < ARRIVAL_RADIUS || self.pos.y < apex_y
    }
}

/// A short-lived fading explosion fragment
#[derive(Debug, Clone)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub color: Color,
}

impl Spark {
    /// Advance one time-slice; returns true while still alive
    pub fn advance(&mut self, dt: f32) -> bool {
        let scale = dt * FRAME_RATE;
        self.pos += self.vel * scale;
        self.vel.y += SPARK_GRAVITY * scale;
        self.life -= SPARK_FADE * scale;
        self.life > 0.0
    }
}

/// Collectible variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    Diya,
    Bomb,
}

impl CollectibleKind {
    pub fn points(&self) -> u32 {
        match self {
            CollectibleKind::Diya => DIYA_SCORE,
            CollectibleKind::Bomb => BOMB_SCORE,
        }
    }

    pub fn burst_color(&self) -> Color {
        match self {
            CollectibleKind::Diya => DIYA_BURST,
            CollectibleKind::Bomb => BOMB_BURST,
        }
    }
}

/// A clickable bonus target; never expires on its own, only a pointer hit
/// removes it (the spawn cap bounds the live set instead)
#[derive(Debug, Clone)]
pub struct Collectible {
    pub pos: Vec2,
    pub kind: CollectibleKind,
    pub radius: f32,
    /// Phase for the pulsing glow; rendering-only
    pub flicker: f32,
}

impl Collectible {
    pub fn tick(&mut self, dt: f32) {
        self.flicker += dt * FLICKER_RATE;
    }

    /// Pulsing glow intensity in [0.65, 1.0]
    pub fn glow(&self) -> f32 {
        (self.flicker.sin() * 0.5 + 0.5) * 0.35 + 0.65
    }
}

/// Work queued to run at a wall-clock instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// One automatic celebratory launch
    SalvoLaunch,
    /// Start the centerpiece glow animation
    CenterpieceGlow,
    /// Reveal the closing summary overlay
    Summary,
}

/// A scheduled task keyed to the session generation; tasks from a previous
/// generation are dropped unrun, so `reset()` retracts a pending finale
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub due_ms: f64,
    pub generation: u32,
    pub kind: TaskKind,
}

/// Finale progression, created at the countdown zero crossing
#[derive(Debug, Clone, Default)]
pub struct Finale {
    /// Zero-crossing instant (ms)
    pub started_ms: f64,
    /// Centerpiece glow phase once the delayed task fires; the glyph pulses
    /// until the phase reaches 4π, then the closing message shows
    pub glow: Option<f32>,
    /// Summary overlay revealed
    pub summary: bool,
}

impl Finale {
    /// Glow phase at which the centerpiece ends and the message appears
    pub const GLOW_END: f32 = 4.0 * std::f32::consts::PI;

    pub fn glow_finished(&self) -> bool {
        self.glow.is_some_and(|g| g >= Self::GLOW_END)
    }
}

/// Complete session state
///
/// Owns the three live collections and all shared scalars. Every event
/// source (frame callback, pointer handler) takes `&mut GameState`; the
/// host runtime guarantees serial dispatch, so no locking is needed.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub score: u32,
    /// Whole seconds remaining; display clamps at zero
    pub time_left: i32,
    /// Viewport size in CSS pixels
    pub view: Vec2,
    pub fireworks: Vec<Firework>,
    pub sparks: Vec<Spark>,
    pub collectibles: Vec<Collectible>,
    /// One-frame warm overlay alpha, set by explosions, cleared next frame
    pub flash: f32,
    pub finale: Option<Finale>,
    pub tasks: Vec<ScheduledTask>,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) generation: u32,
    pub(crate) last_launch_ms: f64,
    pub(crate) countdown_due_ms: f64,
    pub(crate) last_frame_ms: f64,
}

impl GameState {
    pub fn new(seed: u64, view: Vec2) -> Self {
        Self {
            phase: Phase::Idle,
            score: 0,
            time_left: SESSION_SECONDS,
            view,
            fireworks: Vec::new(),
            sparks: Vec::new(),
            collectibles: Vec::new(),
            flash: 0.0,
            finale: None,
            tasks: Vec::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            generation: 0,
            last_launch_ms: 0.0,
            countdown_due_ms: 0.0,
            last_frame_ms: 0.0,
        }
    }

    /// Update the viewport size (on resize)
    pub fn set_view(&mut self, view: Vec2) {
        self.view = view;
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Begin a session. Effective from Idle or Finale only; collections
    /// persist across a restart (only `reset` clears them). Arms the
    /// countdown and supersedes any pending finale tasks.
    pub fn start(&mut self, now_ms: f64) {
        if self.phase == Phase::Running {
            return;
        }
        self.phase = Phase::Running;
        self.score = 0;
        self.time_left = SESSION_SECONDS;
        self.last_launch_ms = now_ms;
        self.countdown_due_ms = now_ms + 1000.0;
        self.finale = None;
        self.generation += 1;
        self.tasks.clear();
    }

    /// Forcibly return to Idle from any state, clearing all live entities.
    /// Bumping the generation retracts any still-queued finale tasks.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.score = 0;
        self.time_left = SESSION_SECONDS;
        self.fireworks.clear();
        self.sparks.clear();
        self.collectibles.clear();
        self.flash = 0.0;
        self.finale = None;
        self.generation += 1;
        self.tasks.clear();
        self.last_launch_ms = 0.0;
        self.countdown_due_ms = 0.0;
    }

    /// Award points. Scoring only counts while Running; finale launches and
    /// pops are cosmetic.
    pub fn award(&mut self, points: u32) {
        if self.phase == Phase::Running {
            self.score += points;
        }
    }

    /// Queue a task for the current generation
    pub fn schedule(&mut self, kind: TaskKind, due_ms: f64) {
        self.tasks.push(ScheduledTask {
            due_ms,
            generation: self.generation,
            kind,
        });
    }

    /// Time-left value for display (never negative)
    pub fn display_time(&self) -> i32 {
        self.time_left.max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firework_velocity_points_at_target() {
        let fw = Firework::new(
            Vec2::new(0.0, 100.0),
            Vec2::new(100.0, 0.0),
            Color::hsl(30.0, 100.0, 65.0),
            3.0,
        );
        assert!((fw.vel.length() - 3.0).abs() < 1e-4);
        assert!(fw.vel.x > 0.0 && fw.vel.y < 0.0);
    }

    #[test]
    fn firework_at_own_origin_explodes_first_update() {
        let origin = Vec2::new(50.0, 50.0);
        let mut fw = Firework::new(origin, origin, Color::hsl(30.0, 100.0, 65.0), 2.5);
        assert!(fw.advance(1.0 / 60.0, 0.0));
    }

    #[test]
    fn spark_expires_when_cumulative_fade_exceeds_life() {
        let mut spark = Spark {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -1.0),
            life: 1.0,
            color: Color::hsl(40.0, 100.0, 70.0),
        };
        let dt = 1.0 / 60.0;
        let mut ticks = 0;
        while spark.advance(dt) {
            ticks += 1;
            assert!(ticks < 200, "spark never expired");
        }
        assert!(spark.life <= 0.0);
        // 1.0 / 0.012 per-frame fade => dies within ~84 frames
        assert!((80..=90).contains(&ticks));
    }

    #[test]
    fn collectible_glow_stays_in_band() {
        let mut c = Collectible {
            pos: Vec2::ZERO,
            kind: CollectibleKind::Diya,
            radius: 20.0,
            flicker: 0.0,
        };
        for _ in 0..500 {
            c.tick(1.0 / 60.0);
            let g = c.glow();
            assert!((0.65..=1.0).contains(&g), "glow {g} out of band");
        }
    }

    #[test]
    fn start_only_effective_from_idle_or_finale() {
        let mut state = GameState::new(7, Vec2::new(800.0, 600.0));
        state.start(1000.0);
        assert_eq!(state.phase, Phase::Running);
        state.score = 42;
        // Start while running is a no-op
        state.start(2000.0);
        assert_eq!(state.score, 42);

        state.phase = Phase::Finale;
        state.start(3000.0);
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_left, crate::consts::SESSION_SECONDS);
    }

    #[test]
    fn reset_clears_entities_and_retracts_tasks() {
        let mut state = GameState::new(7, Vec2::new(800.0, 600.0));
        state.start(0.0);
        state.schedule(TaskKind::Summary, 2500.0);
        state.sparks.push(Spark {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 1.0,
            color: DIYA_BURST,
        });
        let generation_before = state.generation;

        state.reset();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_left, crate::consts::SESSION_SECONDS);
        assert!(state.fireworks.is_empty());
        assert!(state.sparks.is_empty());
        assert!(state.collectibles.is_empty());
        assert!(state.tasks.is_empty());
        assert!(state.generation > generation_before);
    }

    #[test]
    fn award_gated_on_running() {
        let mut state = GameState::new(7, Vec2::new(800.0, 600.0));
        state.award(10);
        assert_eq!(state.score, 0);
        state.start(0.0);
        state.award(10);
        assert_eq!(state.score, 10);
        state.phase = Phase::Finale;
        state.award(10);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn color_css_format() {
        assert_eq!(Color::hsl(40.0, 100.0, 70.0).css(), "hsl(40 100% 70%)");
    }
}
