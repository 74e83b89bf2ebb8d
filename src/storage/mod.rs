//! Storage backend trait and implementations

pub mod properties;

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Flat key/value entries as they are read from or written to a backing store
pub type Entries = BTreeMap<String, String>;

/// Trait for storage backend implementations
///
/// A backend turns flat string entries into file contents and back. The
/// default `read`/`write` methods handle the filesystem.
pub trait StorageBackend: Clone + Send + Sync + 'static {
    /// File extension for this storage format (e.g., "properties", "json")
    fn extension(&self) -> &str;

    /// Serialize entries to string
    fn serialize(&self, entries: &Entries) -> Result<String>;

    /// Deserialize entries from string
    fn deserialize(&self, content: &str) -> Result<Entries>;

    /// Read and deserialize from file
    fn read(&self, path: &Path) -> Result<Entries> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.deserialize(&content)
    }

    /// Serialize and write to file, replacing previous contents
    ///
    /// Uses atomic write: writes to temp file then renames to prevent corruption.
    fn write(&self, path: &Path, entries: &Entries) -> Result<()> {
        let content = self.serialize(entries)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        // Use .tmp suffix append to preserve original filename fully
        let file_name = path.file_name().ok_or_else(|| {
            Error::Config(format!(
                "Invalid path '{}': must have a filename",
                path.display()
            ))
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = path.with_file_name(temp_filename);

        std::fs::write(&temp_path, &content).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// =============================================================================
// Properties Storage Implementation
// =============================================================================

/// `.properties` storage backend (default)
#[derive(Clone, Debug)]
pub struct PropertiesStorage {
    /// Comment written at the top of every saved file
    header: Option<String>,
    /// Write a `#<timestamp>` line after the header
    timestamp: bool,
}

impl Default for PropertiesStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertiesStorage {
    /// Create a properties backend that stamps saved files with the save time
    pub fn new() -> Self {
        Self {
            header: None,
            timestamp: true,
        }
    }

    /// Create a properties backend that writes entries only, no comments
    pub fn plain() -> Self {
        Self {
            header: None,
            timestamp: false,
        }
    }

    /// Set the header comment
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

impl StorageBackend for PropertiesStorage {
    fn extension(&self) -> &str {
        "properties"
    }

    fn serialize(&self, entries: &Entries) -> Result<String> {
        let stamp = if self.timestamp {
            let now = time::OffsetDateTime::now_utc();
            Some(
                now.format(&time::format_description::well_known::Rfc2822)
                    .map_err(|e| Error::Format(format!("Failed to format timestamp: {e}")))?,
            )
        } else {
            None
        };

        let comments: Vec<&str> = self
            .header
            .as_deref()
            .into_iter()
            .chain(stamp.as_deref())
            .collect();

        Ok(properties::encode(entries, &comments))
    }

    fn deserialize(&self, content: &str) -> Result<Entries> {
        properties::decode(content)
    }
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON storage backend: one flat object of strings
///
/// Scalar JSON values (numbers, booleans) are accepted on read and converted
/// to their text form; `null` is read as the text `null`. Arrays and objects are
/// rejected.
#[cfg(feature = "json")]
#[derive(Clone, Debug)]
pub struct JsonStorage {
    /// Pretty print JSON output
    pretty: bool,
}

#[cfg(feature = "json")]
impl Default for JsonStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "json")]
impl JsonStorage {
    /// Create a new JSON storage backend with pretty printing enabled
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON storage (no pretty printing)
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

#[cfg(feature = "json")]
impl StorageBackend for JsonStorage {
    fn extension(&self) -> &str {
        "json"
    }

    fn serialize(&self, entries: &Entries) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(entries).map_err(Error::from)
        } else {
            serde_json::to_string(entries).map_err(Error::from)
        }
    }

    fn deserialize(&self, content: &str) -> Result<Entries> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)
            .map_err(|e| Error::Parse(format!("Invalid JSON: {e}")))?;
        object
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => "null".to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Array(_) => return Err(unsupported_value(&key, "array")),
                    serde_json::Value::Object(_) => {
                        return Err(unsupported_value(&key, "object"));
                    }
                };
                Ok((key, text))
            })
            .collect()
    }
}

/// Only scalar values map onto a flat key/value store
#[cfg(any(feature = "json", feature = "toml"))]
fn unsupported_value(key: &str, kind: &str) -> Error {
    Error::Parse(format!("Unsupported {kind} value for key '{key}'"))
}

// =============================================================================
// TOML Storage Implementation
// =============================================================================

/// TOML storage backend: one flat table of strings
#[cfg(feature = "toml")]
#[derive(Clone, Debug, Default)]
pub struct TomlStorage;

#[cfg(feature = "toml")]
impl TomlStorage {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "toml")]
impl StorageBackend for TomlStorage {
    fn extension(&self) -> &str {
        "toml"
    }

    fn serialize(&self, entries: &Entries) -> Result<String> {
        toml::to_string(entries).map_err(|e| Error::Toml(e.to_string()))
    }

    fn deserialize(&self, content: &str) -> Result<Entries> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| Error::Parse(format!("Invalid TOML: {e}")))?;
        table
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    other => return Err(unsupported_value(&key, other.type_str())),
                };
                Ok((key, text))
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
