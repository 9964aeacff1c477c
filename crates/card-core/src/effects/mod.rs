pub mod blooms;
pub mod confetti;
pub mod fireworks;

pub use blooms::Blooms;
pub use confetti::Confetti;
pub use fireworks::Fireworks;
