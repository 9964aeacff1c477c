//! Scene configuration and the per-frame quality settings derived from it.

use crate::device::{DeviceClass, DeviceProfile};
use std::time::Duration;

/// UI-safe margins the gnome layout keeps clear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
    pub top: f32,
    pub bottom: f32,
    pub side: f32,
}

/// Counts and timing of the scripted finale for one device class.
///
/// Particle counts are the unscaled base; the reduced-motion multiplier is
/// applied when the script is built.
#[derive(Clone, Debug)]
pub struct FinaleConfig {
    pub ring_count: usize,
    pub ring_radius: f32,
    pub ring_stagger: Duration,
    pub ring_particles: usize,
    pub random_bursts: usize,
    pub random_burst_interval: Duration,
    pub random_bursts_at: Duration,
    pub random_burst_particles: usize,
    pub center_burst_at: Duration,
    pub center_burst_particles: usize,
}

/// Corner flower arrangement.
#[derive(Clone, Copy, Debug)]
pub struct BloomLayout {
    pub flower_size: f32,
    pub spacing: f32,
    pub top_corner_count: usize,
    pub bottom_corner_count: usize,
}

/// Everything that differs between phones and desktops.
#[derive(Clone, Debug)]
pub struct DeviceClassConfig {
    pub clicks_needed: u32,
    pub click_burst_particles: usize,
    pub confetti_count: usize,
    pub firework_pool: usize,
    pub confetti_pool: usize,
    pub bloom_pool: usize,
    pub max_pixel_ratio: f32,
    pub gnome_width: f32,
    pub padding: Padding,
    pub confetti_sway: f32,
    pub firework_speed_scale: f32,
    pub finale: FinaleConfig,
    pub blooms: BloomLayout,
}

impl DeviceClassConfig {
    pub fn mobile() -> Self {
        Self {
            clicks_needed: 6,
            click_burst_particles: 28,
            confetti_count: 70,
            firework_pool: 700,
            confetti_pool: 140,
            bloom_pool: 16,
            max_pixel_ratio: 1.5,
            gnome_width: 140.0,
            padding: Padding {
                top: 100.0,
                bottom: 100.0,
                side: 40.0,
            },
            confetti_sway: 18.0,
            firework_speed_scale: 0.9,
            finale: FinaleConfig {
                ring_count: 6,
                ring_radius: 140.0,
                ring_stagger: Duration::from_millis(170),
                ring_particles: 38,
                random_bursts: 4,
                random_burst_interval: Duration::from_millis(180),
                random_bursts_at: Duration::from_millis(1200),
                random_burst_particles: 48,
                center_burst_at: Duration::from_millis(1800),
                center_burst_particles: 70,
            },
            blooms: BloomLayout {
                flower_size: 30.0,
                spacing: 40.0,
                top_corner_count: 2,
                bottom_corner_count: 2,
            },
        }
    }

    pub fn desktop() -> Self {
        Self {
            clicks_needed: 10,
            click_burst_particles: 40,
            confetti_count: 130,
            firework_pool: 1500,
            confetti_pool: 260,
            bloom_pool: 16,
            max_pixel_ratio: 2.0,
            gnome_width: 160.0,
            padding: Padding {
                top: 160.0,
                bottom: 160.0,
                side: 90.0,
            },
            confetti_sway: 26.0,
            firework_speed_scale: 1.0,
            finale: FinaleConfig {
                ring_count: 10,
                ring_radius: 220.0,
                ring_stagger: Duration::from_millis(140),
                ring_particles: 60,
                random_bursts: 4,
                random_burst_interval: Duration::from_millis(180),
                random_bursts_at: Duration::from_millis(1500),
                random_burst_particles: 80,
                center_burst_at: Duration::from_millis(2100),
                center_burst_particles: 120,
            },
            blooms: BloomLayout {
                flower_size: 50.0,
                spacing: 70.0,
                top_corner_count: 3,
                bottom_corner_count: 2,
            },
        }
    }
}

/// Top-level scene parameters.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub gnome_count: usize,
    pub mobile: DeviceClassConfig,
    pub desktop: DeviceClassConfig,
    /// Count multiplier when reduced motion is requested (durations unchanged).
    pub reduced_motion_scale: f32,
    pub move_delay: Duration,
    pub finale_delay: Duration,
    pub confetti_delay: Duration,
    pub click_cooldown: Duration,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gnome_count: 3,
            mobile: DeviceClassConfig::mobile(),
            desktop: DeviceClassConfig::desktop(),
            reduced_motion_scale: 0.55,
            move_delay: Duration::from_millis(320),
            finale_delay: Duration::from_millis(600),
            confetti_delay: Duration::from_millis(450),
            click_cooldown: Duration::from_millis(520),
        }
    }
}

impl SceneConfig {
    pub fn class(&self, class: DeviceClass) -> &DeviceClassConfig {
        match class {
            DeviceClass::Mobile => &self.mobile,
            DeviceClass::Desktop => &self.desktop,
        }
    }

    pub fn for_profile(&self, profile: &DeviceProfile) -> &DeviceClassConfig {
        self.class(profile.class)
    }

    /// Resolve the quality settings threaded through every spawn and draw.
    pub fn quality(&self, profile: &DeviceProfile) -> Quality {
        let c = self.for_profile(profile);
        let reduced = profile.is_reduced();
        // Layout metrics follow the reduced tier, not just the device class.
        let tier = if reduced { &self.mobile } else { c };
        Quality {
            class: profile.class,
            reduced,
            motion_scale: if profile.reduced_motion {
                self.reduced_motion_scale
            } else {
                1.0
            },
            pixel_ratio: profile.device_pixel_ratio.min(c.max_pixel_ratio).max(1.0),
            firework_pool: c.firework_pool,
            confetti_pool: c.confetti_pool,
            bloom_pool: c.bloom_pool,
            confetti_count: c.confetti_count,
            trail_len: if reduced { 3 } else { 4 },
            fade_alpha: if reduced { 0.22 } else { 0.18 },
            trail_alpha: if reduced { 0.18 } else { 0.28 },
            trail_width: if reduced { 0.18 } else { 0.35 },
            glow: !reduced,
            confetti_sway: c.confetti_sway,
            speed_scale: c.firework_speed_scale,
            blooms: tier.blooms,
            gnome_width: tier.gnome_width,
            padding: tier.padding,
        }
    }
}

/// Device-dependent scaling, resolved once per profile change.
#[derive(Clone, Debug)]
pub struct Quality {
    pub class: DeviceClass,
    pub reduced: bool,
    pub motion_scale: f32,
    pub pixel_ratio: f32,
    pub firework_pool: usize,
    pub confetti_pool: usize,
    pub bloom_pool: usize,
    /// Unscaled confetti emission budget.
    pub confetti_count: usize,
    pub trail_len: usize,
    pub fade_alpha: f32,
    pub trail_alpha: f32,
    pub trail_width: f32,
    pub glow: bool,
    pub confetti_sway: f32,
    pub speed_scale: f32,
    pub blooms: BloomLayout,
    pub gnome_width: f32,
    pub padding: Padding,
}

impl Quality {
    /// Apply the motion multiplier to a base count, never dropping below `min`.
    #[inline]
    pub fn scale_count(&self, base: usize, min: usize) -> usize {
        ((base as f32 * self.motion_scale).round() as usize).max(min)
    }
}

impl Default for Quality {
    fn default() -> Self {
        SceneConfig::default().quality(&DeviceProfile::desktop())
    }
}
