//! Device classification from host capability signals.

use crate::constants::MOBILE_WIDTH_BREAKPOINT;

/// Raw capability signals reported by the host environment.
#[derive(Clone, Copy, Debug)]
pub struct DeviceSignals {
    pub viewport_width: f32,
    pub coarse_pointer: bool,
    pub portrait: bool,
    pub prefers_reduced_motion: bool,
    pub device_pixel_ratio: f32,
}

impl Default for DeviceSignals {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            coarse_pointer: false,
            portrait: false,
            prefers_reduced_motion: false,
            device_pixel_ratio: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

/// Resolved profile. `Reduced` fidelity applies to phones and to anyone who
/// asked the OS for less motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceProfile {
    pub class: DeviceClass,
    pub reduced_motion: bool,
    pub device_pixel_ratio: f32,
}

impl DeviceProfile {
    /// Narrow screens are phones; so are touch-first devices held upright.
    /// Touch alone is not enough, plenty of laptops have touch screens.
    pub fn classify(signals: &DeviceSignals) -> Self {
        let narrow = signals.viewport_width < MOBILE_WIDTH_BREAKPOINT;
        let handheld = signals.coarse_pointer && signals.portrait;
        let class = if narrow || handheld {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        };
        let dpr = if signals.device_pixel_ratio.is_finite() && signals.device_pixel_ratio > 0.0 {
            signals.device_pixel_ratio
        } else {
            1.0
        };
        Self {
            class,
            reduced_motion: signals.prefers_reduced_motion,
            device_pixel_ratio: dpr,
        }
    }

    pub const fn desktop() -> Self {
        Self {
            class: DeviceClass::Desktop,
            reduced_motion: false,
            device_pixel_ratio: 1.0,
        }
    }

    pub const fn mobile() -> Self {
        Self {
            class: DeviceClass::Mobile,
            reduced_motion: false,
            device_pixel_ratio: 1.0,
        }
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.class == DeviceClass::Mobile
    }

    /// Lower render fidelity: no glow, shorter trails, heavier fade.
    #[inline]
    pub fn is_reduced(&self) -> bool {
        self.is_mobile() || self.reduced_motion
    }
}
