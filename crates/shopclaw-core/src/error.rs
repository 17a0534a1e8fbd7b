//! ShopClaw error types.

use thiserror::Error;

/// Errors surfaced by the ShopClaw service layers.
#[derive(Debug, Error)]
pub enum ShopClawError {
    /// Configuration load/parse failure.
    #[error("config error: {0}")]
    Config(String),

    /// Knowledge store read/write failure.
    #[error("store error: {0}")]
    Store(String),

    /// Entity lookup by id failed.
    #[error("{0} not found")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShopClawError>;
