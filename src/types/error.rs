//! Error type for the fallible edges of the engine

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreferenceError {
    /// Profile id is empty or contains characters outside `[A-Za-z0-9_-]`
    #[error("Invalid profile id: {0:?}")]
    InvalidProfile(String),

    #[error("Unknown visual type: {0}")]
    UnknownCategory(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl PreferenceError {
    /// Get the code string (for logging and API bodies)
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidProfile(_) => "E101_INVALID_PROFILE",
            Self::UnknownCategory(_) => "E102_UNKNOWN_CATEGORY",
            Self::ProfileNotFound(_) => "E103_PROFILE_NOT_FOUND",
            Self::Storage(_) => "E201_STORAGE_ERROR",
            Self::Serialize(_) => "E202_SERIALIZE_ERROR",
        }
    }
}

impl From<std::io::Error> for PreferenceError {
    fn from(e: std::io::Error) -> Self {
        PreferenceError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for PreferenceError {
    fn from(e: serde_json::Error) -> Self {
        PreferenceError::Serialize(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PreferenceError>;
