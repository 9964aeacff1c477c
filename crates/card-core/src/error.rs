use thiserror::Error;

/// Refusals reported by scene operations. None of them are fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("no gnome with id {0}")]
    InvalidGnome(usize),
    #[error("viewport has no drawable area")]
    EmptyViewport,
    #[error("scene has been torn down")]
    SceneTornDown,
}

pub type Result<T> = std::result::Result<T, CardError>;
