//! Error type for the fallible edges of the crate.
//!
//! Behaviours never fail. Missing elements and empty groups are no-ops.
//! Only config loading and layout can go wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("layout failed: {0}")]
    Layout(String),
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;
