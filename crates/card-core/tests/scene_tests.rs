// Host-side integration tests for the scene state machine and choreography.

mod common;

use card_core::device::DeviceProfile;
use card_core::scene::{ClickOutcome, LayerKind, Scene, SceneEvent, SceneState};
use card_core::viewport::Viewport;
use card_core::{CardError, SceneConfig};
use common::{RecordingSurface, FRAME};

fn mobile_scene(seed: u64) -> Scene {
    Scene::new(
        SceneConfig::default(),
        DeviceProfile::mobile(),
        Viewport::new(800.0, 600.0),
        seed,
    )
}

fn run(scene: &mut Scene, secs: f32) -> Vec<SceneEvent> {
    let frames = (secs / FRAME).ceil() as usize;
    (0..frames).flat_map(|_| scene.advance(FRAME)).collect()
}

/// Click every gnome in turn until the target is reached. Returns right after
/// the final click.
fn find_all(scene: &mut Scene) {
    loop {
        for id in 0..scene.gnomes().len() {
            if scene.click_gnome(id).unwrap() == ClickOutcome::TargetReached {
                return;
            }
        }
        run(scene, 0.6);
    }
}

#[test]
fn mobile_hunt_transitions_once_at_six_clicks() {
    let mut scene = mobile_scene(1);
    assert_eq!(scene.clicks_needed(), 6);
    assert_eq!(scene.hud_text(), "Gnomes: 0 / 6");
    assert!(scene.show_hint());

    let mut outcomes = Vec::new();
    for round in 0..2 {
        for id in 0..3 {
            outcomes.push(scene.click_gnome(id).unwrap());
        }
        if round == 0 {
            run(&mut scene, 0.6);
        }
    }
    assert_eq!(
        outcomes[..5],
        (1..=5)
            .map(|clicks| ClickOutcome::Counted { clicks })
            .collect::<Vec<_>>()[..]
    );
    assert_eq!(outcomes[5], ClickOutcome::TargetReached);
    assert_eq!(scene.state(), SceneState::Finale);
    assert!(scene.gnomes().iter().all(|g| !g.visible));
    assert!(!scene.show_hint());

    assert_eq!(scene.click_gnome(0).unwrap(), ClickOutcome::NotHunting);
    assert_eq!(scene.clicks(), 6);
}

#[test]
fn locked_gnome_ignores_repeat_clicks_until_cooldown() {
    let mut scene = mobile_scene(2);
    assert_eq!(
        scene.click_gnome(0).unwrap(),
        ClickOutcome::Counted { clicks: 1 }
    );
    assert_eq!(scene.click_gnome(0).unwrap(), ClickOutcome::Locked);
    assert_eq!(scene.clicks(), 1);
    run(&mut scene, 0.6);
    assert_eq!(
        scene.click_gnome(0).unwrap(),
        ClickOutcome::Counted { clicks: 2 }
    );
}

#[test]
fn unlock_is_reported_so_the_view_can_clear_found() {
    let mut scene = mobile_scene(10);
    scene.click_gnome(0).unwrap();
    assert!(scene.gnomes()[0].locked);

    let mut elapsed = 0.0;
    let mut unlocked_at = None;
    let mut last_change = None;
    for _ in 0..60 {
        let events = scene.advance(FRAME);
        elapsed += FRAME;
        if events.contains(&SceneEvent::GnomesChanged) {
            last_change = Some(elapsed);
        }
        if unlocked_at.is_none() && !scene.gnomes()[0].locked {
            unlocked_at = Some(elapsed);
        }
    }
    let unlocked_at = unlocked_at.expect("gnome never unlocked");
    assert!(unlocked_at >= 0.5);
    assert!(last_change.is_some_and(|t| t >= unlocked_at));
}

#[test]
fn unknown_gnome_is_an_error() {
    let mut scene = mobile_scene(3);
    assert_eq!(scene.click_gnome(99), Err(CardError::InvalidGnome(99)));
    assert_eq!(scene.clicks(), 0);
}

#[test]
fn click_spawns_burst_and_relocates_only_that_gnome() {
    let mut scene = mobile_scene(4);
    let before = scene.gnomes().to_vec();
    scene.click_gnome(1).unwrap();
    assert!(scene.fireworks().len() >= 28);

    let events = run(&mut scene, 0.4);
    assert!(events.contains(&SceneEvent::GnomesChanged));
    let after = scene.gnomes();
    assert_eq!(after[0].pos, before[0].pos);
    assert_eq!(after[2].pos, before[2].pos);
    assert_ne!(after[1].pos, before[1].pos);
}

#[test]
fn finale_reveals_card_then_confetti_completes_once() {
    let mut scene = mobile_scene(5);
    find_all(&mut scene);
    assert_eq!(scene.state(), SceneState::Finale);
    assert!(!scene.card_visible());

    let events = run(&mut scene, 20.0);
    let count = |e: SceneEvent| events.iter().filter(|x| **x == e).count();
    assert_eq!(count(SceneEvent::FinaleStarted), 1);
    assert_eq!(count(SceneEvent::CardRevealed), 1);
    assert_eq!(count(SceneEvent::ConfettiStarted), 1);
    assert_eq!(count(SceneEvent::ConfettiComplete), 1);

    let order: Vec<_> = events
        .iter()
        .filter(|e| **e != SceneEvent::GnomesChanged)
        .copied()
        .collect();
    assert_eq!(
        order,
        vec![
            SceneEvent::FinaleStarted,
            SceneEvent::CardRevealed,
            SceneEvent::ConfettiStarted,
            SceneEvent::ConfettiComplete,
        ]
    );

    assert_eq!(scene.state(), SceneState::Revealed);
    assert!(scene.card_visible());
    assert!(!scene.confetti_running());
    assert!(scene.blooms().is_frozen());
    assert_eq!(scene.pending_timers(), 0);
    assert!(scene.fireworks().is_empty());

    assert_eq!(scene.click_gnome(0).unwrap(), ClickOutcome::NotHunting);
    assert_eq!(scene.clicks(), 6);
}

#[test]
fn finale_fires_after_its_delay() {
    let mut scene = mobile_scene(6);
    find_all(&mut scene);
    let mut frames = 0;
    while !scene.advance(FRAME).contains(&SceneEvent::FinaleStarted) {
        frames += 1;
        assert!(frames < 120, "finale never started");
    }
    assert!((frames + 1) as f32 * FRAME >= 0.59);

    // The first ring launch is due immediately and lands on the next frame.
    let before = scene.fireworks().len();
    scene.advance(FRAME);
    assert!(scene.fireworks().len() > before);
}

#[test]
fn teardown_cancels_everything_and_is_idempotent() {
    let mut scene = mobile_scene(7);
    find_all(&mut scene);
    assert!(scene.pending_timers() > 0);

    scene.teardown();
    scene.teardown();
    assert!(!scene.is_alive());
    assert_eq!(scene.pending_timers(), 0);
    assert!(scene.fireworks().is_empty());
    assert_eq!(scene.click_gnome(0), Err(CardError::SceneTornDown));
    assert!(run(&mut scene, 5.0).is_empty());
    assert!(!scene.card_visible());

    let mut surface = RecordingSurface::default();
    assert!(!scene.render_layer(LayerKind::Fireworks, &mut surface));
    assert!(surface.calls.is_empty());
}

#[test]
fn resize_is_debounced() {
    let mut scene = mobile_scene(8);
    scene.notify_resize(Viewport::new(1200.0, 900.0)).unwrap();
    let early = run(&mut scene, 0.05);
    assert!(!early.contains(&SceneEvent::GnomesChanged));
    assert_eq!(scene.viewport(), Viewport::new(800.0, 600.0));

    let late = run(&mut scene, 0.1);
    assert!(late.contains(&SceneEvent::GnomesChanged));
    assert_eq!(scene.viewport(), Viewport::new(1200.0, 900.0));
}

#[test]
fn reduced_motion_change_rescales_quality() {
    let mut scene = Scene::new(
        SceneConfig::default(),
        DeviceProfile::desktop(),
        Viewport::new(1280.0, 800.0),
        9,
    );
    assert!(scene.gnomes().iter().all(|g| g.float.is_some()));
    scene.set_profile(DeviceProfile {
        reduced_motion: true,
        ..DeviceProfile::desktop()
    });
    assert!(scene.quality().reduced);
    assert!(!scene.quality().glow);
    assert!(scene.gnomes().iter().all(|g| g.float.is_none()));
    assert_eq!(scene.clicks_needed(), 10);
}

#[test]
fn each_layer_gets_one_prepare_step_per_frame() {
    let mut scene = mobile_scene(10);
    scene.click_gnome(0).unwrap();
    scene.advance(FRAME);

    let mut surface = RecordingSurface::default();
    assert!(scene.render_layer(LayerKind::Fireworks, &mut surface));
    assert_eq!(surface.fades() + surface.clears(), 1);
    assert!(surface.fills() > 0);
    assert!(surface.balanced());
}

#[test]
fn empty_viewport_is_refused() {
    let mut scene = mobile_scene(11);
    let before = scene.gnomes().to_vec();
    assert_eq!(
        scene.notify_resize(Viewport::new(0.0, 600.0)),
        Err(CardError::EmptyViewport)
    );
    assert_eq!(
        scene.resize(Viewport::new(800.0, 0.0)),
        Err(CardError::EmptyViewport)
    );
    run(&mut scene, 0.2);
    assert_eq!(scene.viewport(), Viewport::new(800.0, 600.0));
    assert_eq!(scene.gnomes(), &before[..]);

    scene.resize(Viewport::new(1024.0, 768.0)).unwrap();
    assert_eq!(scene.viewport(), Viewport::new(1024.0, 768.0));
}
