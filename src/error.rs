//! Error types for the edges of the game: configuration and the terminal.
//!
//! The simulation itself is total and never returns these.

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A value breaks a setup-time contract (e.g. a negative speed).
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    /// The merged config sources could not be extracted.
    #[error("failed to load config: {0}")]
    Load(#[from] Box<figment::Error>),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(Box::new(e))
    }
}

/// Top-level error returned by the binary.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
