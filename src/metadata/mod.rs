//! Property metadata discovery
//!
//! This module turns a settings type's accessor surface into
//! [`SettingsMetadata`]: the set of bindable properties, each with a read
//! accessor, a write accessor and a converter.
//!
//! Accessor names are classified by prefix:
//! - `get` or `is` → read accessor
//! - `set` → write accessor
//!
//! The remainder after the prefix (and an optional `_` separator), lower-cased,
//! is the property name, so `get_port`, `getPort` and `set_port` all bind the
//! property `port`.

mod accessor;
mod property;

pub use accessor::{Accessor, AccessorKind, ReadFn, Settings, WriteFn};
pub use property::Property;

use crate::convert::{Converter, ScalarType};
use crate::error::{Error, Result};
use log::{debug, warn};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ACCESSOR_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(get|is|set)_?([A-Za-z0-9]\w*)$").expect("accessor name pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Read,
    Write,
}

/// Split an accessor name into its role and property name
fn classify(accessor_name: &str) -> Option<(Role, String)> {
    let captures = ACCESSOR_NAME.captures(accessor_name)?;
    let role = match &captures[1] {
        "set" => Role::Write,
        _ => Role::Read,
    };
    Some((role, captures[2].to_lowercase()))
}

struct Half<F> {
    name: &'static str,
    value_type: &'static str,
    accessor: F,
}

struct Provisional<T> {
    read: Option<Half<ReadFn<T>>>,
    write: Option<Half<WriteFn<T>>>,
}

impl<T> Default for Provisional<T> {
    fn default() -> Self {
        Self {
            read: None,
            write: None,
        }
    }
}

/// Full binding of one settings type: its properties and backing store
pub struct SettingsMetadata<T> {
    location: PathBuf,
    properties: BTreeMap<String, Property<T>>,
}

impl<T: Settings> SettingsMetadata<T> {
    /// Discover the bindable properties of `T`.
    ///
    /// No instance of `T` is created. Accessors missing their other half are
    /// dropped; everything else must bind cleanly or the whole discovery fails.
    ///
    /// # Errors
    ///
    /// - [`Error::AmbiguousAccessor`] if two read (or two write) accessors map
    ///   to the same property, e.g. `get_x` and `is_x`. This is checked before
    ///   pairing, so it fails even when `x` has no write accessor and would
    ///   otherwise be dropped as incomplete.
    /// - [`Error::AccessorTypeMismatch`] if a read/write pair disagree on type
    /// - [`Error::UnsupportedType`] if a property's type has no converter
    pub fn discover(location: impl Into<PathBuf>) -> Result<Self> {
        let location = location.into();
        let mut provisional: BTreeMap<String, Provisional<T>> = BTreeMap::new();

        for accessor in T::accessors() {
            let Some((role, name)) = classify(accessor.name()) else {
                continue;
            };

            let previous = match (role, accessor.kind()) {
                (Role::Read, AccessorKind::Read(read)) => provisional
                    .entry(name.clone())
                    .or_default()
                    .read
                    .replace(Half {
                        name: accessor.name(),
                        value_type: accessor.value_type(),
                        accessor: read,
                    })
                    .map(|half| half.name),
                (Role::Write, AccessorKind::Write(write)) => provisional
                    .entry(name.clone())
                    .or_default()
                    .write
                    .replace(Half {
                        name: accessor.name(),
                        value_type: accessor.value_type(),
                        accessor: write,
                    })
                    .map(|half| half.name),
                _ => {
                    warn!(
                        "Accessor '{}' of {} has a {:?} prefix but the opposite kind, ignoring",
                        accessor.name(),
                        std::any::type_name::<T>(),
                        role
                    );
                    continue;
                }
            };

            if let Some(first) = previous {
                return Err(Error::AmbiguousAccessor {
                    property: name,
                    first: first.to_string(),
                    second: accessor.name().to_string(),
                });
            }
        }

        let mut properties = BTreeMap::new();
        for (name, candidate) in provisional {
            let (Some(read), Some(write)) = (candidate.read, candidate.write) else {
                debug!("Dropping incomplete property '{name}'");
                continue;
            };

            let converter = Converter::lookup(read.value_type)?;
            if ScalarType::from_type_name(write.value_type) != Some(converter.scalar_type()) {
                return Err(Error::AccessorTypeMismatch {
                    property: name,
                    read: read.value_type.to_string(),
                    write: write.value_type.to_string(),
                });
            }

            let property = Property::new(
                name.clone(),
                read.name,
                read.accessor,
                write.name,
                write.accessor,
                converter,
            );
            properties.insert(name, property);
        }

        debug!(
            "Discovered {} properties for {}: {:?}",
            properties.len(),
            std::any::type_name::<T>(),
            properties.keys().collect::<Vec<_>>()
        );

        Ok(Self {
            location,
            properties,
        })
    }

    /// Apply stored entries to an instance.
    ///
    /// Entries without a matching property are ignored; properties without an
    /// entry are left untouched.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that is `null` or does not parse.
    pub fn apply(&self, instance: &mut T, entries: &BTreeMap<String, String>) -> Result<()> {
        for (key, text) in entries {
            match self.properties.get(key) {
                Some(property) => property.write(instance, text)?,
                None => debug!("Ignoring unknown key '{key}' in {}", self.location.display()),
            }
        }
        Ok(())
    }

    /// Read and format every property of an instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullValue`] on the first property without a value.
    pub fn collect(&self, instance: &T) -> Result<BTreeMap<String, String>> {
        self.properties
            .iter()
            .map(|(name, property)| Ok((name.clone(), property.read(instance)?)))
            .collect()
    }
}

impl<T> SettingsMetadata<T> {
    /// Backing store location
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, Property<T>> {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property<T>> {
        self.properties.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<T> std::fmt::Debug for SettingsMetadata<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsMetadata")
            .field("location", &self.location)
            .field("properties", &self.properties)
            .finish()
    }
}
