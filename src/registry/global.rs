//! Process-wide default registry
//!
//! Convenience entry points for applications that bind a handful of settings
//! types once at startup. Locations resolve against the working directory and
//! use `.properties` storage.

use super::SettingsRegistry;
use crate::error::Result;
use crate::metadata::Settings;
use std::path::Path;
use std::sync::OnceLock;

static GLOBAL: OnceLock<SettingsRegistry> = OnceLock::new();

/// The process-wide registry, created on first use
pub fn global() -> &'static SettingsRegistry {
    GLOBAL.get_or_init(SettingsRegistry::default)
}

/// Register `T` with the process-wide registry.
///
/// See [`SettingsRegistry::register`].
///
/// # Errors
///
/// Same as [`SettingsRegistry::register`].
pub fn register<T: Settings>(location: impl AsRef<Path>) -> Result<T> {
    global().register(location)
}

/// Save `instance` through the process-wide registry.
///
/// See [`SettingsRegistry::save`].
///
/// # Errors
///
/// Same as [`SettingsRegistry::save`].
pub fn save<T: Settings>(instance: &T) -> Result<()> {
    global().save(instance)
}
