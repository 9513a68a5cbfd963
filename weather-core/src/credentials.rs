use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::StorageError,
    storage::{read_json, write_json},
};

/// The saved API key and when it was entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub api_key: String,
    pub setup_date: DateTime<Utc>,
}

/// JSON file holding a single [`Credential`].
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read: distinguishes a missing file (`Ok(None)`) from a corrupt one.
    pub fn read(&self) -> Result<Option<Credential>, StorageError> {
        read_json(&self.path)
    }

    /// Load the credential, treating unreadable or malformed files as absent.
    pub fn load(&self) -> Option<Credential> {
        match self.read() {
            Ok(credential) => credential,
            Err(err) => {
                tracing::warn!(
                    "Could not load saved API key, setup will run again: {:#}",
                    anyhow::Error::new(err)
                );
                None
            }
        }
    }

    /// Overwrite the file with `api_key` stamped with the current time.
    pub fn save(&self, api_key: impl Into<String>) -> Result<Credential, StorageError> {
        let credential = Credential { api_key: api_key.into(), setup_date: Utc::now() };
        write_json(&self.path, &credential)?;
        Ok(credential)
    }
}
