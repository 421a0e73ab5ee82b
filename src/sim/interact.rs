//! Pointer interaction
//!
//! A pointer/touch coordinate either pops a collectible or launches a new
//! firework; never both, and at most one collectible per event.

use glam::Vec2;

use super::spawn::{explode, launch_toward};
use super::state::GameState;
use crate::consts::COLLECTIBLE_HIT_RADIUS;

/// Handle one discrete pointer event at a surface-local coordinate.
///
/// Collectibles are scanned newest-first, so an overlapping pair resolves to
/// the most recently spawned (topmost on screen). A miss is a launch
/// command. Player launches are intentionally not rate-limited.
pub fn pointer_down(state: &mut GameState, pos: Vec2) {
    for i in (0..state.collectibles.len()).rev() {
        if state.collectibles[i].pos.distance(pos) <= COLLECTIBLE_HIT_RADIUS {
            let hit = state.collectibles.remove(i);
            state.award(hit.kind.points());
            explode(state, pos, hit.kind.burst_color());
            return;
        }
    }

    launch_toward(state, pos);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Collectible, CollectibleKind, DIYA_BURST, Phase};

    fn test_state() -> GameState {
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0));
        state.start(0.0);
        state
    }

    fn collectible_at(pos: Vec2, kind: CollectibleKind) -> Collectible {
        Collectible {
            pos,
            kind,
            radius: COLLECTIBLE_RADIUS,
            flicker: 0.0,
        }
    }

    #[test]
    fn diya_hit_scores_ten_and_bursts_at_point() {
        let mut state = test_state();
        let p = Vec2::new(200.0, 300.0);
        state.collectibles.push(collectible_at(p, CollectibleKind::Diya));

        pointer_down(&mut state, p);
        assert_eq!(state.score, DIYA_SCORE);
        assert!(state.collectibles.is_empty());
        assert!(!state.sparks.is_empty());
        assert!(state.fireworks.is_empty(), "hit must not also launch");
        assert_eq!(state.sparks[0].pos, p);
        assert_eq!(state.sparks[0].color, DIYA_BURST);
    }

    #[test]
    fn bomb_hit_scores_five() {
        let mut state = test_state();
        let p = Vec2::new(200.0, 300.0);
        state.collectibles.push(collectible_at(p, CollectibleKind::Bomb));

        pointer_down(&mut state, p);
        assert_eq!(state.score, BOMB_SCORE);
        assert!(state.collectibles.is_empty());
    }

    #[test]
    fn hit_within_radius_but_outside_visual_circle() {
        let mut state = test_state();
        let center = Vec2::new(200.0, 300.0);
        state
            .collectibles
            .push(collectible_at(center, CollectibleKind::Bomb));

        pointer_down(&mut state, center + Vec2::new(COLLECTIBLE_HIT_RADIUS - 1.0, 0.0));
        assert!(state.collectibles.is_empty());
    }

    #[test]
    fn overlapping_pair_resolves_to_most_recent_only() {
        let mut state = test_state();
        let p = Vec2::new(200.0, 300.0);
        state.collectibles.push(collectible_at(p, CollectibleKind::Bomb));
        state.collectibles.push(collectible_at(p, CollectibleKind::Diya));

        pointer_down(&mut state, p);
        // The diya was spawned last, so only it is consumed
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.collectibles[0].kind, CollectibleKind::Bomb);
        assert_eq!(state.score, DIYA_SCORE);
    }

    #[test]
    fn miss_launches_firework_toward_click() {
        let mut state = test_state();
        let click = Vec2::new(450.0, 180.0);
        pointer_down(&mut state, click);

        assert_eq!(state.fireworks.len(), 1);
        let fw = &state.fireworks[0];
        assert_eq!(fw.target, click);
        assert!(fw.pos.x >= state.view.x * LAUNCH_BAND_MIN);
        assert!(fw.pos.x <= state.view.x * LAUNCH_BAND_MAX);
        assert_eq!(fw.pos.y, state.view.y + LAUNCH_ORIGIN_DROP);
    }

    #[test]
    fn near_miss_outside_hit_radius_launches_instead() {
        let mut state = test_state();
        let center = Vec2::new(200.0, 300.0);
        state
            .collectibles
            .push(collectible_at(center, CollectibleKind::Diya));

        pointer_down(&mut state, center + Vec2::new(COLLECTIBLE_HIT_RADIUS + 1.0, 0.0));
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.fireworks.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn finale_pops_are_cosmetic() {
        let mut state = test_state();
        let p = Vec2::new(200.0, 300.0);
        state.collectibles.push(collectible_at(p, CollectibleKind::Diya));
        state.phase = Phase::Finale;

        pointer_down(&mut state, p);
        assert!(state.collectibles.is_empty());
        assert!(!state.sparks.is_empty());
        assert_eq!(state.score, 0);
    }
}
