use anyhow::{Result, anyhow};

use crate::{
    Config,
    credentials::{Credential, CredentialStore},
    error::StorageError,
    favorites::Favorites,
    provider::{WeatherProvider, provider_from_config},
};

/// Process-lifetime state: configuration, the saved credential and the favorites list.
#[derive(Debug)]
pub struct Session {
    config: Config,
    credentials: CredentialStore,
    credential: Option<Credential>,
    /// Rebuilt whenever the credential changes.
    provider: Option<Box<dyn WeatherProvider>>,
    favorites: Favorites,
}

impl Session {
    /// Load both stores from the locations `config` points at.
    pub fn open(config: Config) -> Result<Self> {
        let credentials = CredentialStore::new(config.credentials_path()?);
        let credential = credentials.load();
        let favorites = Favorites::load(config.favorites_path()?);

        tracing::debug!(
            has_credential = credential.is_some(),
            favorites = favorites.cities().len(),
            "session opened"
        );

        let provider = credential
            .as_ref()
            .map(|c| provider_from_config(&c.api_key, &config));

        Ok(Self { config, credentials, credential, provider, favorites })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Persist a new API key and make it the active one.
    pub fn set_api_key(&mut self, api_key: &str) -> Result<&Credential, StorageError> {
        let credential = self.credentials.save(api_key)?;
        self.provider = Some(provider_from_config(&credential.api_key, &self.config));
        Ok(&*self.credential.insert(credential))
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut Favorites {
        &mut self.favorites
    }

    /// Weather provider authenticated with the current credential.
    pub fn provider(&self) -> Result<&dyn WeatherProvider> {
        self.provider
            .as_deref()
            .ok_or_else(|| anyhow!("No API key configured.\nHint: run `weather configure` first."))
    }
}
