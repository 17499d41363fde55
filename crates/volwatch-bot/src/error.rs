use thiserror::Error;

use volwatch_core::{ConfigError, SourceError};

/// Process-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl BotError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Source(_) => 10,
        }
    }
}
