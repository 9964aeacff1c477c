//! Scene orchestration: the gnome hunt, the finale and the card reveal.
//!
//! The scene owns the three particle systems and every delayed action. It
//! has no notion of a browser; the host feeds it clicks, resizes and frame
//! steps and draws its layers onto whatever [`Surface`] it has.

use crate::config::{DeviceClassConfig, FinaleConfig, Quality, SceneConfig};
use crate::constants::VIEWPORT_DEBOUNCE_MS;
use crate::device::DeviceProfile;
use crate::effects::{Blooms, Confetti, Fireworks};
use crate::error::{CardError, Result};
use crate::layout::{place_all, relocate_one, GnomeSprite};
use crate::surface::Surface;
use crate::system::{Frame, Layer, ParticleSystem, TickOutcome};
use crate::timers::TimerSet;
use crate::timing::clamp_dt;
use crate::viewport::{Viewport, ViewportTracker};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::Cell;
use std::f32::consts::TAU;
use std::rc::Rc;
use std::time::Duration;

// Floors applied after motion scaling.
const MIN_CLICK_BURST: usize = 20;
const MIN_RING_COUNT: usize = 4;
const MIN_RING_PARTICLES: usize = 24;
const MIN_RANDOM_BURST_PARTICLES: usize = 32;
const MIN_CENTER_BURST_PARTICLES: usize = 48;

// Random finale bursts land within this fraction of the viewport around the center.
const RANDOM_BURST_SPREAD: Vec2 = Vec2::new(0.3, 0.25);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneState {
    Hunting,
    Finale,
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Fireworks,
    Confetti,
    Blooms,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [LayerKind::Blooms, LayerKind::Fireworks, LayerKind::Confetti];

    fn index(self) -> usize {
        match self {
            LayerKind::Fireworks => 0,
            LayerKind::Confetti => 1,
            LayerKind::Blooms => 2,
        }
    }
}

/// A delayed action. Positions are resolved when the cue is scheduled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    Unlock(usize),
    Relocate(usize),
    StartFinale,
    Launch { at: Vec2, count: usize },
    /// Last finale burst; also shows the card.
    Reveal { at: Vec2, count: usize },
    StartConfetti,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Counted { clicks: u32 },
    TargetReached,
    Locked,
    NotHunting,
}

/// Changes the host may want to mirror into its view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    GnomesChanged,
    FinaleStarted,
    CardRevealed,
    ConfettiStarted,
    ConfettiComplete,
}

/// Finale choreography relative to its start, in firing order.
pub fn finale_script(
    finale: &FinaleConfig,
    viewport: Viewport,
    quality: &Quality,
    rng: &mut StdRng,
) -> Vec<(Duration, Cue)> {
    let center = viewport.center();
    let rings = quality.scale_count(finale.ring_count, MIN_RING_COUNT);
    let ring_particles = quality.scale_count(finale.ring_particles, MIN_RING_PARTICLES);
    let burst_particles =
        quality.scale_count(finale.random_burst_particles, MIN_RANDOM_BURST_PARTICLES);
    let center_particles =
        quality.scale_count(finale.center_burst_particles, MIN_CENTER_BURST_PARTICLES);

    let mut script = Vec::with_capacity(rings + finale.random_bursts + 1);
    for i in 0..rings {
        let angle = TAU * i as f32 / rings as f32;
        script.push((
            finale.ring_stagger * i as u32,
            Cue::Launch {
                at: center + Vec2::from_angle(angle) * finale.ring_radius,
                count: ring_particles,
            },
        ));
    }

    let spread = Vec2::new(viewport.width, viewport.height) * RANDOM_BURST_SPREAD;
    for i in 0..finale.random_bursts {
        let jitter = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        script.push((
            finale.random_bursts_at + finale.random_burst_interval * i as u32,
            Cue::Launch {
                at: center + jitter * spread,
                count: burst_particles,
            },
        ));
    }

    script.push((
        finale.center_burst_at,
        Cue::Reveal {
            at: center,
            count: center_particles,
        },
    ));
    script.sort_by_key(|(at, _)| *at);
    script
}

pub struct Scene {
    config: SceneConfig,
    profile: DeviceProfile,
    quality: Quality,
    tracker: ViewportTracker,
    state: SceneState,
    clicks: u32,
    gnomes: Vec<GnomeSprite>,
    fireworks: ParticleSystem<Fireworks>,
    confetti: ParticleSystem<Confetti>,
    blooms: ParticleSystem<Blooms>,
    layers: [Layer; 3],
    timers: TimerSet<Cue>,
    clock: Duration,
    rng: StdRng,
    alive: bool,
    card_visible: bool,
    confetti_running: bool,
    confetti_drained: Rc<Cell<bool>>,
}

impl Scene {
    pub fn new(config: SceneConfig, profile: DeviceProfile, viewport: Viewport, seed: u64) -> Self {
        let quality = config.quality(&profile);
        let mut rng = StdRng::seed_from_u64(seed);
        let gnomes = place_all(config.gnome_count, viewport, &quality, &mut rng);

        let mut confetti =
            ParticleSystem::new(Confetti::default(), quality.confetti_pool, seed ^ 0x2);
        let confetti_drained = Rc::new(Cell::new(false));
        let flag = Rc::clone(&confetti_drained);
        confetti.on_complete(move || flag.set(true));

        log::info!(
            "scene ready: {:?} profile, {} gnomes, {} clicks needed",
            profile.class,
            gnomes.len(),
            config.for_profile(&profile).clicks_needed
        );
        Self {
            fireworks: ParticleSystem::new(Fireworks, quality.firework_pool, seed ^ 0x1),
            blooms: ParticleSystem::new(Blooms::default(), quality.bloom_pool, seed ^ 0x3),
            confetti,
            confetti_drained,
            config,
            profile,
            quality,
            tracker: ViewportTracker::new(viewport, Duration::from_millis(VIEWPORT_DEBOUNCE_MS)),
            state: SceneState::Hunting,
            clicks: 0,
            gnomes,
            layers: Default::default(),
            timers: TimerSet::new(),
            clock: Duration::ZERO,
            rng,
            alive: true,
            card_visible: false,
            confetti_running: false,
        }
    }

    fn class(&self) -> &DeviceClassConfig {
        self.config.for_profile(&self.profile)
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn clicks_needed(&self) -> u32 {
        self.class().clicks_needed
    }

    pub fn gnomes(&self) -> &[GnomeSprite] {
        &self.gnomes
    }

    pub fn quality(&self) -> &Quality {
        &self.quality
    }

    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    pub fn viewport(&self) -> Viewport {
        self.tracker.current()
    }

    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn card_visible(&self) -> bool {
        self.card_visible
    }

    pub fn confetti_running(&self) -> bool {
        self.confetti_running
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn fireworks(&self) -> &ParticleSystem<Fireworks> {
        &self.fireworks
    }

    pub fn confetti(&self) -> &ParticleSystem<Confetti> {
        &self.confetti
    }

    pub fn blooms(&self) -> &ParticleSystem<Blooms> {
        &self.blooms
    }

    /// Counter text for the HUD.
    pub fn hud_text(&self) -> String {
        format!("Gnomes: {} / {}", self.clicks, self.clicks_needed())
    }

    /// The hint is only useful before the first find.
    pub fn show_hint(&self) -> bool {
        self.state == SceneState::Hunting && self.clicks == 0
    }

    /// Register a click on gnome `id`.
    pub fn click_gnome(&mut self, id: usize) -> Result<ClickOutcome> {
        if !self.alive {
            log::debug!("click on gnome {} after teardown", id);
            return Err(CardError::SceneTornDown);
        }
        if self.state != SceneState::Hunting {
            return Ok(ClickOutcome::NotHunting);
        }
        let cooldown = self.config.click_cooldown;
        let move_delay = self.config.move_delay;
        let gnome = self
            .gnomes
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(CardError::InvalidGnome(id))?;
        if !gnome.visible {
            return Ok(ClickOutcome::NotHunting);
        }
        if gnome.locked {
            return Ok(ClickOutcome::Locked);
        }
        gnome.locked = true;
        let center = gnome.center();

        self.clicks += 1;
        let burst = self
            .quality
            .scale_count(self.class().click_burst_particles, MIN_CLICK_BURST);
        self.fireworks.spawn_burst(center, burst, &self.quality);
        self.timers.schedule(self.clock + cooldown, Cue::Unlock(id));

        if self.clicks >= self.clicks_needed() {
            self.begin_finale();
            return Ok(ClickOutcome::TargetReached);
        }
        self.timers.schedule(self.clock + move_delay, Cue::Relocate(id));
        Ok(ClickOutcome::Counted {
            clicks: self.clicks,
        })
    }

    fn begin_finale(&mut self) {
        log::info!("all {} gnomes found, starting finale", self.clicks);
        self.state = SceneState::Finale;
        for g in &mut self.gnomes {
            g.visible = false;
        }
        self.timers
            .schedule(self.clock + self.config.finale_delay, Cue::StartFinale);
    }

    /// Record a viewport change; it is applied once resizes settle. Sizes with
    /// no drawable area are refused and the current layout is kept.
    pub fn notify_resize(&mut self, viewport: Viewport) -> Result<()> {
        if viewport.is_empty() {
            return Err(CardError::EmptyViewport);
        }
        self.tracker.notify(viewport, self.clock);
        Ok(())
    }

    /// Apply a viewport change immediately.
    pub fn resize(&mut self, viewport: Viewport) -> Result<()> {
        if !self.alive {
            return Err(CardError::SceneTornDown);
        }
        if viewport.is_empty() {
            return Err(CardError::EmptyViewport);
        }
        self.tracker = ViewportTracker::new(viewport, Duration::from_millis(VIEWPORT_DEBOUNCE_MS));
        self.relayout();
        Ok(())
    }

    /// Switch device profile, for instance after a reduced-motion change.
    pub fn set_profile(&mut self, profile: DeviceProfile) {
        if !self.alive || profile == self.profile {
            return;
        }
        log::info!("device profile changed: {:?} -> {:?}", self.profile, profile);
        self.profile = profile;
        self.quality = self.config.quality(&profile);
        self.fireworks.set_capacity(self.quality.firework_pool);
        self.confetti.set_capacity(self.quality.confetti_pool);
        self.blooms.set_capacity(self.quality.bloom_pool);
        self.relayout();
        if self.state == SceneState::Hunting && self.clicks >= self.clicks_needed() {
            self.begin_finale();
        }
    }

    fn relayout(&mut self) {
        let viewport = self.tracker.current();
        let fresh = place_all(self.gnomes.len(), viewport, &self.quality, &mut self.rng);
        for (g, f) in self.gnomes.iter_mut().zip(fresh) {
            g.pos = f.pos;
            g.size = f.size;
            g.float = f.float;
        }
        self.blooms.relayout(viewport, &self.quality);
        for layer in &mut self.layers {
            layer.invalidate();
        }
        log::debug!("relayout for {}x{}", viewport.width, viewport.height);
    }

    /// Advance the scene clock by `dt` seconds (clamped): fire due cues, then
    /// step every particle system.
    pub fn advance(&mut self, dt: f32) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        if !self.alive {
            return events;
        }
        let dt = clamp_dt(dt);
        self.clock += Duration::from_secs_f32(dt);

        if self.tracker.poll(self.clock).is_some() {
            self.relayout();
            events.push(SceneEvent::GnomesChanged);
        }

        for cue in self.timers.advance_to(self.clock) {
            self.apply(cue, &mut events);
        }

        let frame = Frame {
            dt,
            viewport: self.tracker.current(),
            quality: &self.quality,
        };
        self.fireworks.tick(&frame);
        self.blooms.tick(&frame);
        if self.confetti.tick(&frame) == TickOutcome::Completed {
            log::debug!("confetti pool drained");
        }

        if self.confetti_drained.replace(false) {
            self.on_confetti_complete();
            events.push(SceneEvent::ConfettiComplete);
        }
        events
    }

    fn apply(&mut self, cue: Cue, events: &mut Vec<SceneEvent>) {
        match cue {
            Cue::Unlock(id) => {
                if let Some(g) = self.gnomes.iter_mut().find(|g| g.id == id && g.locked) {
                    g.locked = false;
                    events.push(SceneEvent::GnomesChanged);
                }
            }
            Cue::Relocate(id) => {
                if self.state != SceneState::Hunting {
                    return;
                }
                self.gnomes = relocate_one(
                    &self.gnomes,
                    id,
                    self.tracker.current(),
                    &self.quality,
                    &mut self.rng,
                );
                events.push(SceneEvent::GnomesChanged);
            }
            Cue::StartFinale => {
                let script = finale_script(
                    &self.config.for_profile(&self.profile).finale,
                    self.tracker.current(),
                    &self.quality,
                    &mut self.rng,
                );
                for (delay, cue) in script {
                    self.timers.schedule(self.clock + delay, cue);
                }
                events.push(SceneEvent::FinaleStarted);
            }
            Cue::Launch { at, count } => {
                self.fireworks.spawn_burst(at, count, &self.quality);
            }
            Cue::Reveal { at, count } => {
                self.fireworks.spawn_burst(at, count, &self.quality);
                self.state = SceneState::Revealed;
                self.card_visible = true;
                self.blooms.activate(true);
                self.timers
                    .schedule(self.clock + self.config.confetti_delay, Cue::StartConfetti);
                log::info!("card revealed");
                events.push(SceneEvent::CardRevealed);
            }
            Cue::StartConfetti => {
                self.confetti.activate(true);
                self.confetti_running = true;
                events.push(SceneEvent::ConfettiStarted);
            }
        }
    }

    /// Confetti finished: the pool drained after its emission budget ran out.
    fn on_confetti_complete(&mut self) {
        self.confetti_running = false;
        log::info!("confetti complete");
    }

    /// Prepare and draw one layer. Returns whether the surface was touched.
    pub fn render_layer(&mut self, kind: LayerKind, surface: &mut dyn Surface) -> bool {
        if !self.alive {
            return false;
        }
        let layer = &mut self.layers[kind.index()];
        match kind {
            LayerKind::Fireworks => layer.present(&self.fireworks, surface, &self.quality),
            LayerKind::Confetti => layer.present(&self.confetti, surface, &self.quality),
            LayerKind::Blooms => layer.present(&self.blooms, surface, &self.quality),
        }
    }

    /// Stop everything. Later calls are no-ops; clicks report [`CardError::SceneTornDown`].
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.timers.cancel_all();
        self.fireworks.clear(None);
        self.confetti.clear(None);
        self.blooms.clear(None);
        self.confetti_running = false;
        log::info!("scene torn down");
    }
}
