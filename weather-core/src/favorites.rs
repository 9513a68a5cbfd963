use std::path::{Path, PathBuf};

use crate::{
    error::StorageError,
    storage::{read_json, write_json},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Ordered, duplicate-free list of favorite cities backed by a JSON array.
///
/// Every successful mutation rewrites the whole file.
#[derive(Debug, Clone)]
pub struct Favorites {
    path: PathBuf,
    cities: Vec<String>,
}

impl Favorites {
    /// Strict read of the backing file. A missing file is an empty list.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let cities = read_json(&path)?.unwrap_or_default();
        Ok(Self { path, cities })
    }

    /// Load the list, falling back to empty when the file is unreadable or malformed.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::read(path.clone()) {
            Ok(favorites) => favorites,
            Err(err) => {
                tracing::warn!(
                    "Could not load favorite cities, starting with an empty list: {:#}",
                    anyhow::Error::new(err)
                );
                Self { path, cities: Vec::new() }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    pub fn save(&self) -> Result<(), StorageError> {
        write_json(&self.path, &self.cities)
    }

    /// Append `city` unless an exact (case-sensitive) match is already stored.
    pub fn add(&mut self, city: &str) -> Result<AddOutcome, StorageError> {
        if self.contains(city) {
            return Ok(AddOutcome::AlreadyPresent);
        }

        self.cities.push(city.to_string());
        if let Err(err) = self.save() {
            self.cities.pop();
            return Err(err);
        }

        Ok(AddOutcome::Added)
    }

    /// Remove the exact match for `city`, if any.
    pub fn remove(&mut self, city: &str) -> Result<RemoveOutcome, StorageError> {
        let Some(index) = self.cities.iter().position(|c| c == city) else {
            return Ok(RemoveOutcome::NotFound);
        };

        let removed = self.cities.remove(index);
        if let Err(err) = self.save() {
            self.cities.insert(index, removed);
            return Err(err);
        }

        Ok(RemoveOutcome::Removed)
    }
}
