//! # propman - Rust Properties Manager
//!
//! Binds plain settings structs to flat `key=value` properties files. The
//! mapping is inferred from each type's accessors (`get_x`/`is_x` paired with
//! `set_x`) instead of being declared key by key.
//!
//! ## Features
//!
//! - **Accessor discovery**: Read/write accessor pairs become properties, unpaired ones are ignored
//! - **Scalar conversion**: Strings, booleans, characters, integers and floats round-trip through text
//! - **Registry**: One registration per settings type; load on register, save on demand
//! - **Storage backends**: `.properties` by default, JSON and TOML behind features
//! - **Derive macro**: `#[derive(Settings)]` generates accessors from named fields
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use propman::{Settings, SettingsRegistry};
//!
//! #[derive(Debug, Settings)]
//! struct Bean {
//!     id: i32,
//!     name: String,
//!     price: f64,
//! }
//!
//! impl Default for Bean {
//!     fn default() -> Self {
//!         Self { id: 42, name: "x".into(), price: 10.43 }
//!     }
//! }
//!
//! # fn example() -> propman::Result<()> {
//! let registry = SettingsRegistry::builder()
//!     .config_dir("~/.config/my-app")
//!     .build();
//!
//! // Loads ~/.config/my-app/app.properties if it exists
//! let mut bean: Bean = registry.register("app.properties")?;
//!
//! bean.price = 999.99;
//! registry.save(&bean)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Accessor Conventions
//!
//! Without the derive macro, implement [`Settings`] by listing accessors:
//!
//! ```rust
//! use propman::{Accessor, Scalar, Settings, Value};
//!
//! #[derive(Default)]
//! struct Window {
//!     maximized: bool,
//! }
//!
//! impl Settings for Window {
//!     fn accessors() -> Vec<Accessor<Self>> {
//!         vec![
//!             Accessor::read("isMaximized", "bool", |w: &Window| Some(Value::Bool(w.maximized))),
//!             Accessor::write("setMaximized", "bool", |w: &mut Window, v| {
//!                 w.maximized = bool::from_value(v)?;
//!                 Ok(())
//!             }),
//!         ]
//!     }
//! }
//! ```
//!
//! Names are classified by prefix (`get`, `is` → read, `set` → write) and
//! the rest of the name, lower-cased, is the property key: `isMaximized`
//! and `setMaximized` bind `maximized`.
//!
//! ## Null Values
//!
//! Null values are not supported in either direction. A stored value of
//! `null` fails registration, and saving an `Option` field holding `None`
//! fails before the file is touched.

// Core modules
mod error;
mod registry;
mod sync;

pub mod config;
pub mod convert;
pub mod metadata;
pub mod storage;

// Re-exports from core
pub use error::{Error, Result};
pub use registry::{SettingsRegistry, SettingsRegistryBuilder, global, register, save};

pub use config::{RegistryConfig, RegistryConfigBuilder};
pub use convert::{Bindable, Converter, Scalar, ScalarType, Value};
pub use metadata::{Accessor, AccessorKind, Property, Settings, SettingsMetadata};

pub use storage::{Entries, PropertiesStorage, StorageBackend};

#[cfg(feature = "json")]
pub use storage::JsonStorage;

#[cfg(feature = "toml")]
pub use storage::TomlStorage;

// Derive macro re-export (requires `derive` feature)
/// Derive macro for generating [`Settings`] implementations.
///
/// # Example
///
/// ```rust,ignore
/// use propman::Settings;
///
/// #[derive(Default, Settings)]
/// struct GeneralSettings {
///     tray_enabled: bool,
///
///     #[property(rename = "lang")]
///     language: String,
/// }
/// ```
#[cfg(feature = "derive")]
pub use propman_derive::Settings;
