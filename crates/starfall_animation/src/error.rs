//! Effect engine error types

use crate::scheduler::EffectHandle;
use thiserror::Error;

/// Errors raised by effect construction and scheduling
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffectError {
    /// The effect configuration cannot be played; nothing was scheduled
    #[error("Invalid effect configuration: {0}")]
    InvalidConfig(String),

    /// The handle does not refer to an active effect
    #[error("Unknown effect handle: {0:?}")]
    UnknownHandle(EffectHandle),
}

/// Result type for effect operations
pub type Result<T> = std::result::Result<T, EffectError>;
