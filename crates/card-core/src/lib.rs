//! Platform-free engine for the gnome-hunt greeting card: particle effects,
//! gnome layout and the scene that choreographs them.

pub mod color;
pub mod config;
pub mod constants;
pub mod device;
pub mod effects;
pub mod error;
pub mod layout;
pub mod particle;
pub mod scene;
pub mod surface;
pub mod system;
pub mod timers;
pub mod timing;
pub mod viewport;

pub use config::{Quality, SceneConfig};
pub use device::{DeviceClass, DeviceProfile, DeviceSignals};
pub use error::CardError;
pub use layout::GnomeSprite;
pub use scene::{ClickOutcome, LayerKind, Scene, SceneEvent, SceneState};
pub use surface::Surface;
pub use system::{Effect, ParticleSystem};
pub use viewport::Viewport;
