use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncounterError {
    #[error("Actor not found: {0:?}")]
    ActorNotFound(crate::core::types::ActorId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EncounterError>;
