use thiserror::Error;

#[derive(Error, Debug)]
pub enum BattlerError {
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BattlerError>;
