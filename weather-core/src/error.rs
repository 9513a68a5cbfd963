//! Typed errors shared by the stores and the weather provider.

use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the weather API.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City '{0}' not found")]
    CityNotFound(String),

    #[error("The API key was rejected. Choose \"Change API key\" to enter a new one")]
    InvalidCredential,

    #[error("Failed to fetch weather data: {0}")]
    FetchFailed(String),
}

/// Failures reading or writing the local JSON files.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize data for {}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
