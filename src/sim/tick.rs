//! Per-frame simulation advance
//!
//! One continuous frame callback drives everything: scheduled tasks, the
//! session countdown, the autonomous launch cadence, and entity updates.
//! Wall-clock instants are passed in (never read), so tests can replay a
//! synthetic timeline deterministically.

use glam::Vec2;

use super::spawn::{explode, launch_toward, spawn_collectible};
use super::state::{Finale, GameState, Phase, TaskKind};
use crate::consts::*;
use crate::rand_range;
use rand::Rng;

/// Advance the simulation to wall-clock instant `now_ms`.
///
/// The frame delta is clamped to [`MAX_FRAME_DT`] so a resumed background
/// tab steps instead of teleporting. Within one frame: tasks run first, then
/// the countdown, then cadence spawns, then entity updates; the renderer
/// reads the state afterwards.
pub fn frame(state: &mut GameState, now_ms: f64) {
    let dt = if state.last_frame_ms > 0.0 {
        (((now_ms - state.last_frame_ms) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    state.last_frame_ms = now_ms;

    // Flash lasts exactly one frame
    state.flash = 0.0;

    run_due_tasks(state, now_ms);
    run_countdown(state, now_ms);
    run_cadence(state, now_ms);
    advance_entities(state, dt);
    advance_finale(state, dt);
}

/// Drain scheduled tasks whose due time has passed. Tasks carrying a stale
/// generation (scheduled before a reset/restart) are dropped unrun.
fn run_due_tasks(state: &mut GameState, now_ms: f64) {
    let generation = state.generation;
    state.tasks.retain(|t| t.generation == generation);

    let mut due = Vec::new();
    state.tasks.retain(|t| {
        if now_ms >= t.due_ms {
            due.push(t.kind);
            false
        } else {
            true
        }
    });

    for kind in due {
        match kind {
            TaskKind::SalvoLaunch => {
                let target = Vec2::new(
                    rand_range(
                        &mut state.rng,
                        FINALE_SALVO_MARGIN,
                        state.view.x - FINALE_SALVO_MARGIN,
                    ),
                    rand_range(
                        &mut state.rng,
                        state.view.y * AUTO_TARGET_Y_MIN,
                        state.view.y * AUTO_TARGET_Y_MAX,
                    ),
                );
                launch_toward(state, target);
            }
            TaskKind::CenterpieceGlow => {
                if let Some(finale) = state.finale.as_mut() {
                    finale.glow = Some(0.0);
                }
            }
            TaskKind::Summary => {
                if let Some(finale) = state.finale.as_mut() {
                    finale.summary = true;
                }
            }
        }
    }
}

/// Session countdown, armed by `start`. Decrements once per elapsed second;
/// the zero crossing flips to Finale exactly once and schedules the
/// celebratory sequence relative to that instant.
fn run_countdown(state: &mut GameState, now_ms: f64) {
    while state.phase == Phase::Running && now_ms >= state.countdown_due_ms {
        state.countdown_due_ms += 1000.0;
        state.time_left -= 1;
        if state.time_left <= 0 {
            begin_finale(state, now_ms);
        }
    }
}

fn begin_finale(state: &mut GameState, now_ms: f64) {
    state.phase = Phase::Finale;
    state.finale = Some(Finale {
        started_ms: now_ms,
        glow: None,
        summary: false,
    });

    for i in 0..FINALE_SALVO_COUNT {
        state.schedule(
            TaskKind::SalvoLaunch,
            now_ms + i as f64 * FINALE_SALVO_SPACING_MS,
        );
    }
    state.schedule(TaskKind::CenterpieceGlow, now_ms + FINALE_GLOW_DELAY_MS);
    state.schedule(TaskKind::Summary, now_ms + FINALE_SUMMARY_DELAY_MS);
}

/// Autonomous launches while Running: one firework per cadence window, with
/// a chance to spawn a collectible while under the live cap. Player launches
/// are handled separately and are not rate-limited.
fn run_cadence(state: &mut GameState, now_ms: f64) {
    if state.phase != Phase::Running || now_ms - state.last_launch_ms <= LAUNCH_CADENCE_MS {
        return;
    }
    state.last_launch_ms = now_ms;

    let target = Vec2::new(
        rand_range(
            &mut state.rng,
            state.view.x * AUTO_TARGET_X_MIN,
            state.view.x * AUTO_TARGET_X_MAX,
        ),
        rand_range(
            &mut state.rng,
            state.view.y * AUTO_TARGET_Y_MIN,
            state.view.y * AUTO_TARGET_Y_MAX,
        ),
    );
    launch_toward(state, target);

    if state.rng.random_bool(COLLECTIBLE_SPAWN_CHANCE)
        && state.collectibles.len() < COLLECTIBLE_CAP
    {
        spawn_collectible(state);
    }
}

/// Advance all live entities one time-slice and remove expired ones.
/// Fireworks that reach their target (or the apex boundary) explode in
/// place, award the launch bonus, and leave the live set.
fn advance_entities(state: &mut GameState, dt: f32) {
    let apex_y = state.view.y * APEX_FRACTION;

    // Deferred bursts; explode() needs the whole state
    let mut bursts = Vec::new();
    state.fireworks.retain_mut(|fw| {
        if fw.advance(dt, apex_y) {
            bursts.push((fw.pos, fw.color));
            false
        } else {
            true
        }
    });
    for (pos, color) in bursts {
        state.award(FIREWORK_SCORE);
        explode(state, pos, color);
    }

    state.sparks.retain_mut(|s| s.advance(dt));

    for c in &mut state.collectibles {
        c.tick(dt);
    }
}

fn advance_finale(state: &mut GameState, dt: f32) {
    if let Some(finale) = state.finale.as_mut()
        && let Some(glow) = finale.glow.as_mut()
        && *glow < Finale::GLOW_END
    {
        *glow = (*glow + FINALE_GLOW_RATE * dt * FRAME_RATE).min(Finale::GLOW_END);
    }
}
