//! Shared particle-system lifecycle.
//!
//! Every effect runs through the same control flow (spawn, tick, render,
//! clear); what differs is supplied by an [`Effect`] strategy.

use crate::config::Quality;
use crate::particle::Particle;
use crate::surface::{ClearMode, Surface};
use crate::viewport::Viewport;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Per-frame inputs shared by every system.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub dt: f32,
    pub viewport: Viewport,
    pub quality: &'a Quality,
}

/// Result of continuous emission for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emission {
    Continue,
    /// Nothing more to emit; the system deactivates itself.
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Particles are alive or emission is ongoing.
    Running,
    /// Pool empty and inactive.
    Idle,
    /// The pool drained after deactivation; reported once per activation.
    Completed,
    /// The effect stopped simulating and holds its last frame.
    Frozen,
}

/// Per-effect behaviour plugged into [`ParticleSystem`].
pub trait Effect {
    /// Build the particles for one burst. The system truncates to capacity.
    fn burst(
        &mut self,
        _origin: Vec2,
        _count: usize,
        _quality: &Quality,
        _rng: &mut StdRng,
        _out: &mut Vec<Particle>,
    ) {
    }

    /// Continuous seeding while active. `room` is the free pool capacity.
    fn emit(
        &mut self,
        _frame: &Frame<'_>,
        _room: usize,
        _rng: &mut StdRng,
        _out: &mut Vec<Particle>,
    ) -> Emission {
        Emission::Exhausted
    }

    /// Called when the system is (re)activated or hard-reset.
    fn reset(&mut self) {}

    /// Effect-wide clock, advanced once per frame before particles integrate.
    fn advance(&mut self, _dt: f32) {}

    /// Step one particle; return `false` to drop it.
    fn integrate(&self, p: &mut Particle, frame: &Frame<'_>) -> bool;

    /// Rebuild position-dependent particles after a viewport change.
    fn relayout(
        &mut self,
        _pool: &mut Vec<Particle>,
        _viewport: Viewport,
        _quality: &Quality,
        _rng: &mut StdRng,
    ) {
    }

    fn begin_draw(&self, _surface: &mut dyn Surface, _quality: &Quality) {}
    fn draw(&self, p: &Particle, surface: &mut dyn Surface, quality: &Quality);
    fn end_draw(&self, _surface: &mut dyn Surface, _quality: &Quality) {}

    fn clear_mode(&self, _quality: &Quality) -> ClearMode {
        ClearMode::Clear
    }

    /// A frozen effect no longer simulates and its layer keeps the last frame.
    fn is_frozen(&self) -> bool {
        false
    }
}

/// A capped pool of particles driven by one [`Effect`].
pub struct ParticleSystem<E: Effect> {
    effect: E,
    pool: Vec<Particle>,
    capacity: usize,
    active: bool,
    armed: bool,
    rng: StdRng,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl<E: Effect> ParticleSystem<E> {
    pub fn new(effect: E, capacity: usize, seed: u64) -> Self {
        Self {
            effect,
            pool: Vec::with_capacity(capacity.min(1024)),
            capacity,
            active: false,
            armed: false,
            rng: StdRng::seed_from_u64(seed),
            on_complete: None,
        }
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn particles(&self) -> &[Particle] {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_frozen(&self) -> bool {
        self.effect.is_frozen()
    }

    /// Change the ceiling; surplus particles are dropped immediately.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.pool.len() > capacity {
            self.pool.truncate(capacity);
        }
    }

    /// Register a callback run once each time the pool drains after deactivation.
    pub fn on_complete(&mut self, f: impl FnMut() + 'static) {
        self.on_complete = Some(Box::new(f));
    }

    /// Spawn a burst at `origin`. Returns how many particles were admitted.
    pub fn spawn_burst(&mut self, origin: Vec2, count: usize, quality: &Quality) -> usize {
        if count == 0 {
            return 0;
        }
        let mut fresh = Vec::with_capacity(count);
        self.effect
            .burst(origin, count, quality, &mut self.rng, &mut fresh);
        self.admit(fresh)
    }

    /// Toggle continuous emission. Live particles keep simulating either way.
    pub fn activate(&mut self, active: bool) {
        if active && !self.active {
            self.effect.reset();
            self.armed = true;
        }
        self.active = active;
    }

    /// Hard reset: drop every particle and wipe the surface. Idempotent.
    pub fn clear(&mut self, surface: Option<&mut dyn Surface>) {
        self.pool.clear();
        self.active = false;
        self.armed = false;
        self.effect.reset();
        if let Some(s) = surface {
            s.clear();
        }
    }

    /// Re-derive position-dependent state after a resize.
    pub fn relayout(&mut self, viewport: Viewport, quality: &Quality) {
        self.effect
            .relayout(&mut self.pool, viewport, quality, &mut self.rng);
        self.pool.truncate(self.capacity);
    }

    /// Advance the simulation one frame.
    pub fn tick(&mut self, frame: &Frame<'_>) -> TickOutcome {
        if self.effect.is_frozen() {
            return TickOutcome::Frozen;
        }
        self.effect.advance(frame.dt);

        let effect = &self.effect;
        self.pool
            .retain_mut(|p| effect.integrate(p, frame) && p.is_alive());

        if self.active {
            let room = self.capacity.saturating_sub(self.pool.len());
            let mut fresh = Vec::new();
            let emission = self.effect.emit(frame, room, &mut self.rng, &mut fresh);
            self.admit(fresh);
            if emission == Emission::Exhausted {
                log::debug!("emission exhausted, deactivating");
                self.active = false;
            }
        }

        if self.active || !self.pool.is_empty() {
            return TickOutcome::Running;
        }
        if self.armed {
            self.armed = false;
            if let Some(cb) = self.on_complete.as_mut() {
                cb();
            }
            return TickOutcome::Completed;
        }
        TickOutcome::Idle
    }

    /// Draw every live particle. Does not touch simulation state.
    pub fn render(&self, surface: &mut dyn Surface, quality: &Quality) {
        if self.pool.is_empty() {
            return;
        }
        self.effect.begin_draw(surface, quality);
        for p in &self.pool {
            self.effect.draw(p, surface, quality);
        }
        self.effect.end_draw(surface, quality);
    }

    pub fn clear_mode(&self, quality: &Quality) -> ClearMode {
        self.effect.clear_mode(quality)
    }

    fn admit(&mut self, mut fresh: Vec<Particle>) -> usize {
        let room = self.capacity.saturating_sub(self.pool.len());
        if fresh.len() > room {
            log::debug!(
                "pool full: admitting {} of {} particles",
                room,
                fresh.len()
            );
            fresh.truncate(room);
        }
        let n = fresh.len();
        self.pool.append(&mut fresh);
        n
    }
}

// Frames a fading layer keeps fading after its pool empties before one final clear.
const FADE_SETTLE_FRAMES: u32 = 30;

/// Per-surface bookkeeping for the single clear/fade step each frame.
#[derive(Clone, Debug, Default)]
pub struct Layer {
    final_frame_drawn: bool,
    idle_frames: u32,
    clean: bool,
}

impl Layer {
    /// Force the next [`Layer::present`] to repaint from scratch.
    pub fn invalidate(&mut self) {
        self.final_frame_drawn = false;
        self.clean = false;
        self.idle_frames = 0;
    }

    /// Prepare the surface once (clear, fade or retain) and draw the system.
    /// Returns whether the surface was touched.
    pub fn present<E: Effect>(
        &mut self,
        system: &ParticleSystem<E>,
        surface: &mut dyn Surface,
        quality: &Quality,
    ) -> bool {
        if system.is_frozen() {
            if self.final_frame_drawn {
                return false;
            }
            surface.clear();
            system.render(surface, quality);
            self.final_frame_drawn = true;
            self.clean = false;
            return true;
        }
        self.final_frame_drawn = false;

        if system.is_empty() {
            if self.clean {
                return false;
            }
            match system.clear_mode(quality) {
                ClearMode::Fade(alpha) if self.idle_frames < FADE_SETTLE_FRAMES => {
                    self.idle_frames += 1;
                    surface.fade(alpha);
                }
                ClearMode::Retain => {}
                _ => {
                    surface.clear();
                    self.clean = true;
                    self.idle_frames = 0;
                }
            }
            return true;
        }

        self.clean = false;
        self.idle_frames = 0;
        match system.clear_mode(quality) {
            ClearMode::Clear => surface.clear(),
            ClearMode::Fade(alpha) => surface.fade(alpha),
            ClearMode::Retain => {}
        }
        system.render(surface, quality);
        true
    }
}

/// Uniform sample from `(lo, hi)`; degenerate ranges return `lo`.
#[inline]
pub(crate) fn sample(rng: &mut StdRng, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
