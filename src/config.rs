//! Registry configuration

use std::path::{Path, PathBuf};

use crate::storage::{PropertiesStorage, StorageBackend};

/// Configuration for a [`SettingsRegistry`](crate::SettingsRegistry)
#[derive(Clone, Debug)]
pub struct RegistryConfig<S: StorageBackend = PropertiesStorage> {
    /// Base directory for relative backing-store locations.
    /// If None, relative locations resolve against the working directory.
    pub config_dir: Option<PathBuf>,

    /// Storage backend implementation
    pub storage: S,
}

impl Default for RegistryConfig<PropertiesStorage> {
    fn default() -> Self {
        Self {
            config_dir: None,
            storage: PropertiesStorage::new(),
        }
    }
}

impl RegistryConfig<PropertiesStorage> {
    /// Create a new builder for RegistryConfig
    ///
    /// # Example
    /// ```rust
    /// use propman::RegistryConfig;
    ///
    /// let config = RegistryConfig::builder()
    ///     .config_dir("~/.config/my-app")
    ///     .build();
    /// ```
    pub fn builder() -> RegistryConfigBuilder<PropertiesStorage> {
        RegistryConfigBuilder::new()
    }
}

impl<S: StorageBackend> RegistryConfig<S> {
    /// Resolve a backing-store location to the path actually read and written
    ///
    /// `~` is expanded; relative paths are joined onto `config_dir`.
    pub fn resolve(&self, location: &Path) -> PathBuf {
        let expanded = expand_home(location);
        match &self.config_dir {
            Some(dir) if expanded.is_relative() => dir.join(expanded),
            _ => expanded,
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(path));
        }
    }
    path.to_path_buf()
}

/// Builder for creating RegistryConfig with a fluent API
#[derive(Clone, Debug)]
pub struct RegistryConfigBuilder<S: StorageBackend = PropertiesStorage> {
    config_dir: Option<PathBuf>,
    storage: S,
}

impl RegistryConfigBuilder<PropertiesStorage> {
    /// Create a new builder using `.properties` storage
    pub fn new() -> Self {
        Self {
            config_dir: None,
            storage: PropertiesStorage::new(),
        }
    }
}

impl Default for RegistryConfigBuilder<PropertiesStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StorageBackend> RegistryConfigBuilder<S> {
    /// Set the base directory for relative locations
    ///
    /// Supports `~` expansion for home directory.
    #[must_use]
    pub fn config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(expand_home(&path.into()));
        self
    }

    /// Use the system config directory for `app_name` as the base directory
    /// (e.g. `~/.config/<app_name>` on Linux)
    #[must_use]
    pub fn for_app(mut self, app_name: &str) -> Self {
        self.config_dir = Some(
            dirs::config_dir()
                .map(|d| d.join(app_name))
                .unwrap_or_else(|| PathBuf::from(app_name)),
        );
        self
    }

    /// Swap the storage backend
    ///
    /// # Example
    /// ```rust
    /// use propman::{RegistryConfig, JsonStorage};
    ///
    /// let config = RegistryConfig::builder()
    ///     .storage(JsonStorage::compact())
    ///     .build();
    /// ```
    pub fn storage<T: StorageBackend>(self, storage: T) -> RegistryConfigBuilder<T> {
        RegistryConfigBuilder {
            config_dir: self.config_dir,
            storage,
        }
    }

    /// Build the RegistryConfig
    pub fn build(self) -> RegistryConfig<S> {
        RegistryConfig {
            config_dir: self.config_dir,
            storage: self.storage,
        }
    }
}
