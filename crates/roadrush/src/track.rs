//! Endless road: the segments scroll down forever and each one jumps back
//! above the others once it has left the screen.

use glam::Vec2;
use roadrush_engine::{EngineContext, Tween, TweenChain, TweenLoop};

use crate::config::RaceConfig;
use crate::state::RaceState;

/// Height of all bound segments stacked.
fn total_height(state: &RaceState, config: &RaceConfig) -> f32 {
    state.handles.segments.len() as f32 * config.segment_height
}

/// Start the repeating scroll on every segment.
pub fn start(state: &RaceState, ctx: &mut EngineContext, config: &RaceConfig) {
    let total = total_height(state, config);
    for &segment in &state.handles.segments {
        ctx.tweens.add(
            segment,
            TweenChain::from(Tween::move_by(Vec2::new(0.0, -total), config.scroll_time))
                .with_loop(TweenLoop::Forever),
        );
    }
}

/// Move every segment that fell below `-segment_height` back up by the
/// full track height, keeping the segments contiguous and in order.
pub fn wrap(state: &RaceState, ctx: &mut EngineContext, config: &RaceConfig) {
    let total = total_height(state, config);
    if total <= 0.0 {
        return;
    }
    for &id in &state.handles.segments {
        let Some(segment) = ctx.scene.get_mut(id) else { continue };
        while segment.pos.y < -config.segment_height {
            segment.pos.y += total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RaceHandles;
    use roadrush_engine::Entity;

    fn setup() -> (RaceState, EngineContext, RaceConfig) {
        let config = RaceConfig::default();
        let mut ctx = EngineContext::new();
        let mut handles = RaceHandles::default();
        for i in 0..4 {
            let id = ctx.next_id();
            ctx.spawn(
                Entity::new(id)
                    .with_tag(format!("trackSection{}", i + 1))
                    .with_pos(Vec2::new(0.0, i as f32 * config.segment_height)),
            );
            handles.segments.push(id);
        }
        (RaceState::new(handles, &config), ctx, config)
    }

    fn heights(state: &RaceState, ctx: &EngineContext) -> Vec<f32> {
        state
            .handles
            .segments
            .iter()
            .map(|&id| ctx.scene.get(id).unwrap().pos.y)
            .collect()
    }

    /// Segments stay one height apart, in index order, modulo the track length.
    fn assert_contiguous(ys: &[f32], config: &RaceConfig) {
        let h = config.segment_height;
        let total = h * ys.len() as f32;
        for (i, &y) in ys.iter().enumerate() {
            assert!(y >= -h && y < total - h, "segment {} at {}", i, y);
            let next = ys[(i + 1) % ys.len()];
            let gap = (next - y).rem_euclid(total);
            assert!((gap - h).abs() < 0.5, "gap {} after segment {}", gap, i);
        }
    }

    #[test]
    fn wrap_moves_segment_to_top() {
        let (state, mut ctx, config) = setup();
        let first = state.handles.segments[0];
        ctx.scene.get_mut(first).unwrap().pos.y = -2049.0;

        wrap(&state, &mut ctx, &config);
        assert_eq!(ctx.scene.get(first).unwrap().pos.y, -2049.0 + 8192.0);
    }

    #[test]
    fn segment_at_threshold_stays() {
        let (state, mut ctx, config) = setup();
        let first = state.handles.segments[0];
        ctx.scene.get_mut(first).unwrap().pos.y = -2048.0;
        wrap(&state, &mut ctx, &config);
        assert_eq!(ctx.scene.get(first).unwrap().pos.y, -2048.0);
    }

    #[test]
    fn huge_gap_wraps_repeatedly() {
        let (state, mut ctx, config) = setup();
        let first = state.handles.segments[0];
        ctx.scene.get_mut(first).unwrap().pos.y = -30_000.0;
        wrap(&state, &mut ctx, &config);
        let y = ctx.scene.get(first).unwrap().pos.y;
        assert!((-2048.0..6144.0).contains(&y), "y = {}", y);
    }

    #[test]
    fn scrolling_keeps_segments_contiguous() {
        let (state, mut ctx, config) = setup();
        start(&state, &mut ctx, &config);

        let dt = 1.0 / 60.0;
        for step in 0..(60 * 25) {
            ctx.begin_step(dt);
            wrap(&state, &mut ctx, &config);
            if step % 7 == 0 {
                assert_contiguous(&heights(&state, &ctx), &config);
            }
        }
        assert_contiguous(&heights(&state, &ctx), &config);
    }

    #[test]
    fn scroll_speed_matches_config() {
        let (state, mut ctx, config) = setup();
        start(&state, &mut ctx, &config);
        ctx.begin_step(1.0);
        let ys = heights(&state, &ctx);
        assert!((ys[1] - (2048.0 - 819.2)).abs() < 1e-2, "ys = {:?}", ys);
    }

    #[test]
    fn no_segments_is_harmless() {
        let config = RaceConfig::default();
        let state = RaceState::new(RaceHandles::default(), &config);
        let mut ctx = EngineContext::new();
        start(&state, &mut ctx, &config);
        wrap(&state, &mut ctx, &config);
        assert!(ctx.tweens.is_empty());
    }
}
