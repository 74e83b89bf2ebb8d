//! Settings registry
//!
//! This module contains [`SettingsRegistry`], the entry point for binding a
//! settings type to its backing store and persisting changes.

mod builder;
mod global;

pub use builder::SettingsRegistryBuilder;
pub use global::{global, register, save};

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::metadata::{Settings, SettingsMetadata};
use crate::storage::{PropertiesStorage, StorageBackend};
use crate::sync::MutexExt;

use log::{debug, info};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

type Entry = Arc<dyn Any + Send + Sync>;

/// Binds settings types to backing stores.
///
/// Each settings type can be registered once. Registration discovers the
/// type's properties, creates an instance with `Default` and loads the
/// backing store into it if the store exists. [`save`](Self::save) writes
/// every property of an instance back.
///
/// `register` and `save` hold one lock for their whole duration, so a
/// registry can be shared between threads.
///
/// # Example
///
/// ```rust,no_run
/// use propman::{SettingsRegistry, Settings};
///
/// #[derive(Default, Settings)]
/// struct AppSettings {
///     theme: String,
///     font_size: f64,
/// }
///
/// let registry = SettingsRegistry::builder()
///     .config_dir("~/.config/my-app")
///     .build();
///
/// let mut settings: AppSettings = registry.register("app.properties")?;
/// settings.font_size = 16.0;
/// registry.save(&settings)?;
/// # Ok::<(), propman::Error>(())
/// ```
pub struct SettingsRegistry<S: StorageBackend = PropertiesStorage> {
    /// Configuration
    config: RegistryConfig<S>,

    /// Metadata per registered type, `Arc<SettingsMetadata<T>>` keyed by `TypeId::of::<T>()`
    entries: Mutex<HashMap<TypeId, Entry>>,
}

impl SettingsRegistry {
    /// Create a builder for `SettingsRegistry` with a fluent API.
    pub fn builder() -> SettingsRegistryBuilder {
        SettingsRegistryBuilder::new()
    }
}

impl Default for SettingsRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl<S: StorageBackend> SettingsRegistry<S> {
    /// Create an empty registry with the given configuration.
    pub fn new(config: RegistryConfig<S>) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &RegistryConfig<S> {
        &self.config
    }

    /// Register `T` against a backing-store location and return its instance.
    ///
    /// If the location does not exist, the instance keeps its `Default`
    /// values. Otherwise every stored key that names a property is applied;
    /// other keys are ignored, and properties without a key keep their
    /// defaults.
    ///
    /// The metadata stays registered even if loading the store fails.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `location` is empty
    /// - [`Error::AlreadyRegistered`] if `T` is already registered
    /// - discovery errors ([`Error::UnsupportedType`], [`Error::AmbiguousAccessor`], ...)
    /// - [`Error::FileRead`] or a codec error if the store cannot be read
    /// - [`Error::InvalidValue`] or [`Error::NullValue`] for bad stored values
    pub fn register<T: Settings>(&self, location: impl AsRef<Path>) -> Result<T> {
        let location = location.as_ref();
        if location.as_os_str().is_empty() {
            return Err(Error::Config(
                "Backing store location must not be empty".into(),
            ));
        }

        let type_name = std::any::type_name::<T>();
        let mut entries = self.entries.lock_recovered();
        if entries.contains_key(&TypeId::of::<T>()) {
            return Err(Error::AlreadyRegistered(type_name.to_string()));
        }

        let metadata = Arc::new(SettingsMetadata::<T>::discover(
            self.config.resolve(location),
        )?);
        entries.insert(TypeId::of::<T>(), metadata.clone());

        info!(
            "Registered {type_name} ({} properties) at {}",
            metadata.len(),
            metadata.location().display()
        );

        let mut instance = T::default();
        if !metadata.location().exists() {
            debug!(
                "No backing store at {}, using defaults",
                metadata.location().display()
            );
            return Ok(instance);
        }

        let stored = self.config.storage.read(metadata.location())?;
        metadata.apply(&mut instance, &stored)?;

        debug!(
            "Loaded {type_name} from {}",
            metadata.location().display()
        );
        Ok(instance)
    }

    /// Write every property of `instance` to its type's backing store.
    ///
    /// All values are read before the store is touched, so a null value
    /// leaves the existing file as it was.
    ///
    /// # Errors
    ///
    /// - [`Error::NotRegistered`] if `T` was never registered
    /// - [`Error::NullValue`] if a property has no value
    /// - [`Error::FileWrite`] or [`Error::DirectoryCreate`] if the store cannot be written
    pub fn save<T: Settings>(&self, instance: &T) -> Result<()> {
        let entries = self.entries.lock_recovered();
        let metadata = Self::metadata_for::<T>(&entries)?;

        let values = metadata.collect(instance)?;
        self.config.storage.write(metadata.location(), &values)?;

        info!(
            "Saved {} ({} properties) to {}",
            std::any::type_name::<T>(),
            values.len(),
            metadata.location().display()
        );
        Ok(())
    }

    fn metadata_for<T: Settings>(
        entries: &HashMap<TypeId, Entry>,
    ) -> Result<Arc<SettingsMetadata<T>>> {
        entries
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|entry| entry.downcast::<SettingsMetadata<T>>().ok())
            .ok_or_else(|| Error::NotRegistered(std::any::type_name::<T>().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{Scalar, Value};
    use crate::metadata::Accessor;
    use tempfile::tempdir;

    #[derive(Debug)]
    struct Counter {
        count: i64,
        label: Option<String>,
    }

    impl Default for Counter {
        fn default() -> Self {
            Self {
                count: 5,
                label: Some("counter".into()),
            }
        }
    }

    impl Settings for Counter {
        fn accessors() -> Vec<Accessor<Self>> {
            vec![
                Accessor::read("get_count", "i64", |c: &Counter| Some(Value::I64(c.count))),
                Accessor::write("set_count", "i64", |c: &mut Counter, v| {
                    c.count = i64::from_value(v)?;
                    Ok(())
                }),
                Accessor::read("get_label", "String", |c: &Counter| {
                    c.label.clone().map(Value::Text)
                }),
                Accessor::write("set_label", "String", |c: &mut Counter, v| {
                    c.label = Some(String::from_value(v)?);
                    Ok(())
                }),
            ]
        }
    }

    #[test]
    fn test_register_without_store_returns_defaults() {
        let dir = tempdir().unwrap();
        let registry = SettingsRegistry::builder().config_dir(dir.path()).build();

        let counter: Counter = registry.register("counter.properties").unwrap();

        assert_eq!(counter.count, 5);
        assert_eq!(counter.label.as_deref(), Some("counter"));
        assert!(!dir.path().join("counter.properties").exists());
    }

    #[test]
    fn test_register_twice_fails() {
        let dir = tempdir().unwrap();
        let registry = SettingsRegistry::builder().config_dir(dir.path()).build();

        let _first: Counter = registry.register("a.properties").unwrap();
        let err = registry.register::<Counter>("b.properties").unwrap_err();

        assert!(matches!(err, Error::AlreadyRegistered(_)));
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_concurrent_register_admits_one() {
        let dir = tempdir().unwrap();
        let registry = SettingsRegistry::builder().config_dir(dir.path()).build();
        const THREADS: usize = 8;

        let results: Vec<Result<Counter>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|i| {
                    let registry = &registry;
                    scope.spawn(move || registry.register::<Counter>(format!("c{i}.properties")))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        let registered = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(Error::AlreadyRegistered(_))))
            .count();
        assert_eq!(registered, 1);
        assert_eq!(rejected, THREADS - 1);
    }

    #[test]
    fn test_register_empty_location_fails() {
        let registry = SettingsRegistry::default();
        let err = registry.register::<Counter>("").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        // nothing was recorded, so a valid registration still succeeds
        let dir = tempdir().unwrap();
        assert!(registry.register::<Counter>(dir.path().join("c.properties")).is_ok());
    }

    #[test]
    fn test_save_unregistered_type_fails() {
        let registry = SettingsRegistry::default();
        let err = registry.save(&Counter::default()).unwrap_err();

        match err {
            Error::NotRegistered(name) => assert!(name.ends_with("Counter")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_save_null_leaves_store_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("counter.properties");
        std::fs::write(&path, "count=1\nlabel=kept\n").unwrap();

        let registry = SettingsRegistry::default();
        let mut counter: Counter = registry.register(&path).unwrap();
        counter.count = 2;
        counter.label = None;

        let err = registry.save(&counter).unwrap_err();
        assert!(matches!(err, Error::NullValue(ref name) if name == "label"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "count=1\nlabel=kept\n"
        );
    }

    #[test]
    fn test_register_keeps_metadata_after_data_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("counter.properties");
        std::fs::write(&path, "count=lots\n").unwrap();

        let registry = SettingsRegistry::default();
        let err = registry.register::<Counter>(&path).unwrap_err();
        assert!(err.is_data_error());

        // discovery succeeded before the load failed, so the type stays registered
        assert!(matches!(
            registry.register::<Counter>(&path),
            Err(Error::AlreadyRegistered(_))
        ));
        registry.save(&Counter::default()).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("count=5"));
    }

    #[test]
    fn test_register_null_token_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("counter.properties");
        std::fs::write(&path, "label=NULL\n").unwrap();

        let registry = SettingsRegistry::default();
        let err = registry.register::<Counter>(&path).unwrap_err();
        assert!(matches!(err, Error::NullValue(_)));
    }
}
