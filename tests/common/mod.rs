//! Common test utilities for propman integration tests
//!
//! Provides shared test fixtures, settings types, and helper functions.

#![allow(dead_code)]

use propman::{PropertiesStorage, Settings, SettingsRegistry};
use std::path::PathBuf;
use tempfile::TempDir;

pub const PROPERTIES_FILE: &str = "app.properties";

pub const NAME_1: &str = "testing string";
pub const ID_1: i32 = 42;
pub const PRICE_1: f64 = 10.43;

pub const NAME_2: &str = "The price is 999.99!";
pub const ID_2: i32 = 99;
pub const PRICE_2: f64 = 999.99;

// =============================================================================
// Test Settings Types
// =============================================================================

/// The basic settings bean used across workflow tests
#[derive(Debug, Clone, PartialEq, Settings)]
pub struct Bean {
    pub id: i32,
    pub name: Option<String>,
    pub price: f64,
}

impl Default for Bean {
    fn default() -> Self {
        Self {
            id: ID_1,
            name: Some(NAME_1.to_string()),
            price: PRICE_1,
        }
    }
}

/// One field of every supported scalar type
#[derive(Debug, Clone, PartialEq, Settings)]
pub struct AllScalars {
    pub text: String,
    pub flag: bool,
    pub tiny: i8,
    pub small: i16,
    pub int: i32,
    pub long: i64,
    pub byte: u8,
    pub word: u16,
    pub dword: u32,
    pub qword: u64,
    pub single: f32,
    pub double: f64,
    pub letter: char,
}

impl Default for AllScalars {
    fn default() -> Self {
        Self {
            text: "hello".into(),
            flag: false,
            tiny: -8,
            small: -16,
            int: -32,
            long: -64,
            byte: 8,
            word: 16,
            dword: 32,
            qword: 64,
            single: 0.5,
            double: 0.25,
            letter: 'a',
        }
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================

/// Route `log` output through the test harness; set `RUST_LOG=debug` to see it
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Test fixture that provides a temporary directory and a fresh registry
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub registry: SettingsRegistry,
}

impl TestFixture {
    /// Create a new test fixture with plain `.properties` storage
    pub fn new() -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let registry = Self::registry_in(&temp_dir);
        Self { temp_dir, registry }
    }

    /// A second registry over the same directory, as a restarted process would see it
    pub fn reopen(&self) -> SettingsRegistry {
        Self::registry_in(&self.temp_dir)
    }

    fn registry_in(temp_dir: &TempDir) -> SettingsRegistry {
        SettingsRegistry::builder()
            .config_dir(temp_dir.path())
            .storage(PropertiesStorage::plain())
            .build()
    }

    /// Get the backing store path
    pub fn properties_path(&self) -> PathBuf {
        self.temp_dir.path().join(PROPERTIES_FILE)
    }

    /// Write raw text to the backing store
    pub fn write_store(&self, content: &str) {
        std::fs::write(self.properties_path(), content).expect("Failed to write store");
    }

    /// Read the raw backing store text
    pub fn read_store(&self) -> Option<String> {
        std::fs::read_to_string(self.properties_path()).ok()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
