// Shared tuning constants for the card scene and its particle effects.
// Distances are CSS pixels, times are seconds unless the name says otherwise.

// Frame timing
pub const DT_MIN_SEC: f32 = 0.001;
pub const DT_MAX_SEC: f32 = 0.033; // clamp so a background tab does not explode the sim

// Device classification
pub const MOBILE_WIDTH_BREAKPOINT: f32 = 768.0;
pub const VIEWPORT_DEBOUNCE_MS: u64 = 100;

// Drag is specified per 60 Hz frame and rescaled by dt
pub const DRAG_PER_FRAME: f32 = 0.985;
pub const REFERENCE_FPS: f32 = 60.0;

// Fireworks
pub const FIREWORK_GRAVITY: f32 = 280.0; // px/s^2
pub const FIREWORK_ANGLE_JITTER: f32 = 0.4; // total spread, applied as +/- half
pub const FIREWORK_SPEED: (f32, f32) = (120.0, 400.0);
pub const FIREWORK_SIZE: (f32, f32) = (1.4, 4.2);
pub const FIREWORK_LIFE: (f32, f32) = (0.9, 1.55);
pub const FIREWORK_OFF_COLOR_CHANCE: f32 = 0.3;
pub const SPARKLE_DIVISOR: usize = 3;
pub const SPARKLE_SPEED: (f32, f32) = (80.0, 240.0);
pub const SPARKLE_SIZE: (f32, f32) = (0.9, 2.3);
pub const SPARKLE_LIFE: (f32, f32) = (0.45, 0.85);
pub const TRAIL_DIVISOR: usize = 5;
pub const TRAIL_SPEED: (f32, f32) = (60.0, 180.0);
pub const TRAIL_SIZE: (f32, f32) = (1.0, 2.0);
pub const TRAIL_LIFE: (f32, f32) = (1.4, 2.2);
pub const TRAIL_GRAVITY_SCALE: f32 = 0.4;
pub const FIREWORK_CULL_MARGIN: f32 = 120.0;
pub const FIREWORK_GLOW_BLUR: f32 = 16.0;
pub const TRAIL_CAPACITY: usize = 8; // inline storage, >= any configured trail length

// Confetti
pub const CONFETTI_GRAVITY: f32 = 420.0;
pub const CONFETTI_SPEED_X: f32 = 80.0; // total spread around 0
pub const CONFETTI_SPEED_Y: (f32, f32) = (140.0, 360.0);
pub const CONFETTI_SIZE: (f32, f32) = (4.0, 13.0);
pub const CONFETTI_LIFE: (f32, f32) = (3.8, 5.6);
pub const CONFETTI_SPIN: f32 = 3.5; // total spread around 0, rad/s
pub const CONFETTI_SWAY_SPEED: (f32, f32) = (1.2, 3.0); // rad/s
pub const CONFETTI_SPAWN_Y: (f32, f32) = (-110.0, -10.0);
pub const CONFETTI_CULL_MARGIN: f32 = 40.0;
pub const CONFETTI_EMIT_WINDOW_SEC: f32 = 1.2;
pub const CONFETTI_MIN_COUNT: usize = 40;
pub const CONFETTI_HIGHLIGHT: f32 = 0.35;
pub const CONFETTI_POP_SPREAD: f32 = 1.2; // cone width around straight up, rad
pub const CONFETTI_POP_SPEED: (f32, f32) = (260.0, 560.0);

// Flower bloom
pub const BLOOM_REVEAL_SEC: f32 = 0.8;
pub const BLOOM_HARD_STOP_SEC: f32 = 5.0;
pub const BLOOM_SWAY_AMPLITUDE: f32 = 0.03;
pub const BLOOM_PETALS: usize = 6;

// Gnome layout
pub const GNOME_ASPECT_RATIO: f32 = 1.35;
pub const GNOME_POSITION_ATTEMPTS: usize = 18;
pub const GNOME_MIN_DISTANCE_FACTOR: f32 = 0.8;
pub const GNOME_FLOAT_DELAY: (f32, f32) = (0.0, 1.2);
pub const GNOME_FLOAT_DURATION: (f32, f32) = (4.6, 6.8);
pub const GNOME_TILT_DEG: (f32, f32) = (-6.0, 6.0);
