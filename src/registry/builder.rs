//! Builder for SettingsRegistry
//!
//! This module contains [`SettingsRegistryBuilder`] which provides a fluent API
//! for creating a [`SettingsRegistry`](super::SettingsRegistry).

use crate::config::RegistryConfigBuilder;
use crate::storage::{PropertiesStorage, StorageBackend};
use std::path::PathBuf;

use super::SettingsRegistry;

/// Builder for creating a [`SettingsRegistry`] with a fluent API.
///
/// # Example
///
/// ```rust,no_run
/// use propman::{SettingsRegistry, PropertiesStorage};
///
/// let registry = SettingsRegistry::builder()
///     .for_app("my-app")
///     .storage(PropertiesStorage::new().header("my-app settings"))
///     .build();
/// ```
pub struct SettingsRegistryBuilder<S: StorageBackend = PropertiesStorage> {
    config_builder: RegistryConfigBuilder<S>,
}

impl SettingsRegistryBuilder {
    /// Create a new builder using `.properties` storage.
    pub fn new() -> Self {
        Self {
            config_builder: RegistryConfigBuilder::new(),
        }
    }
}

impl Default for SettingsRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StorageBackend> SettingsRegistryBuilder<S> {
    /// Set the base directory for relative locations.
    ///
    /// Supports `~` expansion for home directory.
    #[must_use]
    pub fn config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.config_dir(path);
        self
    }

    /// Resolve relative locations against the system config directory of `app_name`.
    #[must_use]
    pub fn for_app(mut self, app_name: &str) -> Self {
        self.config_builder = self.config_builder.for_app(app_name);
        self
    }

    /// Use another storage backend, e.g. `JsonStorage`.
    pub fn storage<T: StorageBackend>(self, storage: T) -> SettingsRegistryBuilder<T> {
        SettingsRegistryBuilder {
            config_builder: self.config_builder.storage(storage),
        }
    }

    /// Build the [`SettingsRegistry`].
    pub fn build(self) -> SettingsRegistry<S> {
        SettingsRegistry::new(self.config_builder.build())
    }
}
