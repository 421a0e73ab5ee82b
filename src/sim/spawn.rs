//! Spawn functions: explosion bursts, collectibles, firework launches

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Collectible, CollectibleKind, Color, Firework, GameState, Spark};
use crate::consts::*;
use crate::rand_range;

/// Burst an explosion at `pos`: 30-60 sparks evenly spread around the circle
/// with small angular jitter, all sharing the triggering color. Also arms the
/// one-frame warm flash overlay.
pub fn explode(state: &mut GameState, pos: Vec2, color: Color) {
    let count = rand_range(
        &mut state.rng,
        SPARK_COUNT_MIN as f32,
        SPARK_COUNT_MAX as f32,
    )
    .floor() as u32;

    for i in 0..count {
        let angle = TAU * (i as f32 / count as f32)
            + rand_range(&mut state.rng, -SPARK_JITTER, SPARK_JITTER);
        let speed = rand_range(&mut state.rng, SPARK_SPEED_MIN, SPARK_SPEED_MAX);
        state.sparks.push(Spark {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            color,
        });
    }

    state.flash = FLASH_ALPHA;
}

/// Launch a firework from a random point along the bottom band toward
/// `target`, with a warm randomized hue
pub fn launch_toward(state: &mut GameState, target: Vec2) {
    let hue = rand_range(&mut state.rng, LAUNCH_HUE_MIN, LAUNCH_HUE_MAX).floor();
    let color = Color::hsl(hue, 100.0, 65.0);
    let origin = Vec2::new(
        rand_range(
            &mut state.rng,
            state.view.x * LAUNCH_BAND_MIN,
            state.view.x * LAUNCH_BAND_MAX,
        ),
        state.view.y + LAUNCH_ORIGIN_DROP,
    );
    let speed = rand_range(&mut state.rng, FIREWORK_SPEED_MIN, FIREWORK_SPEED_MAX);
    state.fireworks.push(Firework::new(origin, target, color, speed));
}

/// Spawn a collectible at a random position within the horizontal margin and
/// vertical band; 30% diya, 70% bomb. Callers enforce the live cap.
pub fn spawn_collectible(state: &mut GameState) {
    let pos = Vec2::new(
        rand_range(
            &mut state.rng,
            COLLECTIBLE_MARGIN,
            state.view.x - COLLECTIBLE_MARGIN,
        ),
        rand_range(
            &mut state.rng,
            state.view.y * COLLECTIBLE_BAND_TOP,
            state.view.y * COLLECTIBLE_BAND_BOTTOM,
        ),
    );
    let kind = if state.rng.random_bool(DIYA_CHANCE) {
        CollectibleKind::Diya
    } else {
        CollectibleKind::Bomb
    };
    let flicker = rand_range(&mut state.rng, 0.0, TAU);
    state.collectibles.push(Collectible {
        pos,
        kind,
        radius: COLLECTIBLE_RADIUS,
        flicker,
    });
}
