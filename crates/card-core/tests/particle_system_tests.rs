// Host-side integration tests for the shared particle-system lifecycle.

mod common;

use card_core::config::{Quality, SceneConfig};
use card_core::device::DeviceProfile;
use card_core::effects::{Blooms, Confetti, Fireworks};
use card_core::particle::Population;
use card_core::system::{Frame, Layer, ParticleSystem, TickOutcome};
use card_core::viewport::Viewport;
use common::{Call, RecordingSurface, FRAME};
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

const VIEW: Viewport = Viewport::new(800.0, 600.0);

fn frame(quality: &Quality) -> Frame<'_> {
    Frame {
        dt: FRAME,
        viewport: VIEW,
        quality,
    }
}

#[test]
fn firework_burst_splits_into_three_populations_within_ranges() {
    let q = Quality::default();
    let mut fw = ParticleSystem::new(Fireworks, 1500, 7);
    let admitted = fw.spawn_burst(Vec2::new(400.0, 300.0), 50, &q);
    assert_eq!(admitted, 50 + 16 + 10);

    let count = |pop| fw.particles().iter().filter(|p| p.population == pop).count();
    assert_eq!(count(Population::Main), 50);
    assert_eq!(count(Population::Sparkle), 16);
    assert_eq!(count(Population::Trail), 10);

    for p in fw.particles() {
        let speed = p.vel.length();
        let (speed_range, size_range, life_range) = match p.population {
            Population::Main => ((120.0, 400.0), (1.4, 4.2), (0.9, 1.55)),
            Population::Sparkle => ((80.0, 240.0), (0.9, 2.3), (0.45, 0.85)),
            Population::Trail => ((60.0, 180.0), (1.0, 2.0), (1.4, 2.2)),
            other => panic!("unexpected population {other:?}"),
        };
        assert!(speed >= speed_range.0 - 1e-3 && speed <= speed_range.1 + 1e-3);
        assert!(p.size >= size_range.0 && p.size <= size_range.1);
        assert!(p.life >= life_range.0 && p.life <= life_range.1);
        assert_eq!(p.pos, Vec2::new(400.0, 300.0));
    }
}

#[test]
fn pool_never_grows_without_emission_and_drains() {
    let q = Quality::default();
    let mut fw = ParticleSystem::new(Fireworks, 1500, 11);
    fw.spawn_burst(Vec2::new(400.0, 300.0), 60, &q);
    let mut last = fw.len();
    let mut frames = 0;
    while !fw.is_empty() {
        fw.tick(&frame(&q));
        assert!(fw.len() <= last, "pool grew from {} to {}", last, fw.len());
        last = fw.len();
        frames += 1;
        assert!(frames < 600, "pool did not drain");
    }
    assert_eq!(fw.tick(&frame(&q)), TickOutcome::Idle);
}

#[test]
fn bursts_beyond_capacity_are_truncated() {
    let q = Quality::default();
    let mut fw = ParticleSystem::new(Fireworks, 30, 1);
    assert_eq!(fw.spawn_burst(Vec2::ZERO, 50, &q), 30);
    assert_eq!(fw.spawn_burst(Vec2::ZERO, 50, &q), 0);
    assert_eq!(fw.len(), 30);
    fw.set_capacity(10);
    assert_eq!(fw.len(), 10);
}

#[test]
fn clear_always_empties_and_is_idempotent() {
    let q = Quality::default();
    let mut fw = ParticleSystem::new(Fireworks, 1500, 2);
    let mut surface = RecordingSurface::default();
    fw.spawn_burst(Vec2::new(100.0, 100.0), 40, &q);
    fw.clear(Some(&mut surface));
    assert_eq!(fw.len(), 0);
    fw.clear(Some(&mut surface));
    fw.clear(None);
    assert_eq!(fw.len(), 0);
    assert!(!fw.is_active());
    assert_eq!(surface.clears(), 2);
}

#[test]
fn life_never_increases_across_ticks() {
    let q = Quality::default();
    let mut fw = ParticleSystem::new(Fireworks, 1500, 5);
    fw.spawn_burst(Vec2::new(400.0, 300.0), 20, &q);
    // Nothing is culled in the first frames, so indices stay aligned.
    let before: Vec<f32> = fw.particles().iter().map(|p| p.life).collect();
    fw.tick(&frame(&q));
    assert_eq!(fw.len(), before.len());
    for (p, old) in fw.particles().iter().zip(before) {
        assert!(p.life < old);
    }
}

#[test]
fn confetti_completion_fires_once_per_activation() {
    let q = Quality::default();
    let fired = Rc::new(Cell::new(0));
    let seen = Rc::clone(&fired);
    let mut confetti = ParticleSystem::new(Confetti::default(), q.confetti_pool, 3);
    confetti.on_complete(move || seen.set(seen.get() + 1));

    confetti.activate(true);
    let mut peak = 0;
    let mut completed_at = None;
    for i in 0..1200 {
        let outcome = confetti.tick(&frame(&q));
        peak = peak.max(confetti.len());
        assert!(confetti.len() <= q.confetti_pool);
        if outcome == TickOutcome::Completed {
            completed_at = Some(i);
        }
    }
    assert!(completed_at.is_some(), "confetti never completed");
    assert!(peak >= 40);
    assert_eq!(fired.get(), 1);
    assert!(!confetti.is_active());

    // Idle ticks and repeated deactivation do not re-fire.
    confetti.activate(false);
    for _ in 0..30 {
        confetti.tick(&frame(&q));
    }
    assert_eq!(fired.get(), 1);

    confetti.activate(true);
    for _ in 0..1200 {
        confetti.tick(&frame(&q));
    }
    assert_eq!(fired.get(), 2);
}

#[test]
fn deactivating_mid_emission_stops_spawns_but_lets_pieces_finish() {
    let q = Quality::default();
    let fired = Rc::new(Cell::new(0));
    let seen = Rc::clone(&fired);
    let mut confetti = ParticleSystem::new(Confetti::default(), q.confetti_pool, 5);
    confetti.on_complete(move || seen.set(seen.get() + 1));

    confetti.activate(true);
    for _ in 0..10 {
        confetti.tick(&frame(&q));
    }
    assert!(confetti.is_active());
    confetti.activate(false);
    let mut last = confetti.len();
    assert!(last > 0);

    let mut frames = 0;
    while !confetti.is_empty() {
        confetti.tick(&frame(&q));
        assert!(confetti.len() <= last, "spawned after deactivation");
        last = confetti.len();
        frames += 1;
        assert!(frames < 1200, "confetti never drained");
    }
    // One more idle tick reports nothing new.
    confetti.tick(&frame(&q));
    assert_eq!(fired.get(), 1);
}

#[test]
fn cleared_confetti_does_not_report_completion() {
    let q = Quality::default();
    let fired = Rc::new(Cell::new(0));
    let seen = Rc::clone(&fired);
    let mut confetti = ParticleSystem::new(Confetti::default(), q.confetti_pool, 4);
    confetti.on_complete(move || seen.set(seen.get() + 1));
    confetti.activate(true);
    for _ in 0..10 {
        confetti.tick(&frame(&q));
    }
    confetti.clear(None);
    for _ in 0..60 {
        confetti.tick(&frame(&q));
    }
    assert_eq!(fired.get(), 0);
}

#[test]
fn reduced_motion_shrinks_confetti_budget_but_keeps_floor() {
    let cfg = SceneConfig::default();
    let q = cfg.quality(&DeviceProfile {
        reduced_motion: true,
        ..DeviceProfile::mobile()
    });
    let mut confetti = ParticleSystem::new(Confetti::default(), q.confetti_pool, 8);
    confetti.activate(true);
    let mut total = 0;
    let mut last = 0;
    for _ in 0..200 {
        confetti.tick(&frame(&q));
        // Pieces are not culled during the emission window.
        if confetti.len() > last {
            total += confetti.len() - last;
        }
        last = confetti.len();
    }
    assert!(total >= 40 && total <= 70, "emitted {total}");
}

#[test]
fn fireworks_layer_fades_and_glows_on_full_quality() {
    let q = Quality::default();
    let mut fw = ParticleSystem::new(Fireworks, 1500, 9);
    let mut layer = Layer::default();
    let mut surface = RecordingSurface::default();
    fw.spawn_burst(Vec2::new(400.0, 300.0), 10, &q);
    fw.tick(&frame(&q));

    assert!(layer.present(&fw, &mut surface, &q));
    assert_eq!(surface.calls.first(), Some(&Call::Fade(q.fade_alpha)));
    assert_eq!(surface.fades(), 1);
    assert_eq!(surface.clears(), 0);
    assert!(surface.count(|c| *c == Call::Glow) > 0);
    assert!(surface.count(|c| matches!(c, Call::Stroke(n) if *n >= 2)) > 0);
    assert!(surface.balanced());
}

#[test]
fn empty_fading_layer_settles_then_stays_untouched() {
    let q = Quality::default();
    let fw = ParticleSystem::new(Fireworks, 1500, 9);
    let mut layer = Layer::default();
    let mut surface = RecordingSurface::default();
    let mut touched = 0;
    for _ in 0..100 {
        if layer.present(&fw, &mut surface, &q) {
            touched += 1;
        }
    }
    assert!(touched > 1 && touched < 100);
    assert_eq!(surface.clears(), 1);
    assert_eq!(surface.calls.last(), Some(&Call::Clear));
}

#[test]
fn confetti_layer_clears_once_per_frame() {
    let q = Quality::default();
    let mut confetti = ParticleSystem::new(Confetti::default(), q.confetti_pool, 6);
    let mut layer = Layer::default();
    let mut surface = RecordingSurface::default();
    confetti.activate(true);
    for _ in 0..5 {
        confetti.tick(&frame(&q));
        surface.reset();
        layer.present(&confetti, &mut surface, &q);
        assert_eq!(surface.clears(), 1);
        assert_eq!(surface.fades(), 0);
        assert_eq!(surface.calls.first(), Some(&Call::Clear));
    }
}

#[test]
fn blooms_lay_out_corners_then_freeze_on_final_frame() {
    let q = Quality::default();
    let mut blooms = ParticleSystem::new(Blooms::default(), q.bloom_pool, 12);
    let mut layer = Layer::default();
    let mut surface = RecordingSurface::default();
    blooms.activate(true);
    blooms.tick(&frame(&q));
    let b = q.blooms;
    assert_eq!(blooms.len(), 2 * (b.top_corner_count + b.bottom_corner_count));
    for p in blooms.particles() {
        assert!(p.pos.x > 0.0 && p.pos.x < VIEW.width);
        assert!(p.pos.y > 0.0 && p.pos.y < VIEW.height);
    }

    let mut outcome = TickOutcome::Running;
    for _ in 0..400 {
        outcome = blooms.tick(&frame(&q));
    }
    assert_eq!(outcome, TickOutcome::Frozen);
    assert!(blooms.is_frozen());
    let count = blooms.len();

    assert!(layer.present(&blooms, &mut surface, &q));
    // 6 petals, a center and a highlight per flower.
    assert_eq!(surface.fills(), count * 8);
    surface.reset();
    assert!(!layer.present(&blooms, &mut surface, &q));
    assert!(surface.calls.is_empty());
}

#[test]
fn bloom_relayout_after_resize_jumps_to_final_frame() {
    let q = Quality::default();
    let mut blooms = ParticleSystem::new(Blooms::default(), q.bloom_pool, 13);
    blooms.activate(true);
    blooms.tick(&frame(&q));
    assert!(!blooms.is_frozen());
    let wide = Viewport::new(1400.0, 900.0);
    blooms.relayout(wide, &q);
    assert!(blooms.is_frozen());
    assert!(blooms.particles().iter().any(|p| p.pos.x > VIEW.width));
}
