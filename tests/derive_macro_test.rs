//! Tests for the derive macro
//!
//! Ensures `#[derive(Settings)]` emits accessors that discovery binds the
//! same way it binds hand-written ones.

mod common;

use common::{Bean, TestFixture};
use propman::{AccessorKind, Error, ScalarType, Settings, SettingsMetadata, Value};

#[derive(Debug, Default, Settings)]
struct UiSettings {
    dark_mode: bool,

    #[property(rename = "fontsize")]
    font_size: f64,

    #[property(skip)]
    dirty: bool,

    accent: Option<char>,
}

#[test]
fn test_accessor_names_follow_field_types() {
    let names: Vec<&str> = UiSettings::accessors().iter().map(|a| a.name()).collect();

    assert_eq!(
        names,
        vec![
            "is_dark_mode",
            "set_dark_mode",
            "get_fontsize",
            "set_fontsize",
            "get_accent",
            "set_accent",
        ]
    );
}

#[test]
fn test_accessor_value_types() {
    let accessors = UiSettings::accessors();

    assert_eq!(accessors[0].value_type(), "bool");
    assert_eq!(accessors[2].value_type(), "f64");
    // Option fields bind through their inner type
    assert_eq!(accessors[4].value_type(), "char");
    assert!(accessors[0].is_read());
    assert!(!accessors[1].is_read());
}

#[test]
fn test_discovered_metadata() {
    let metadata = SettingsMetadata::<UiSettings>::discover("ui.properties").unwrap();

    let keys: Vec<&String> = metadata.properties().keys().collect();
    assert_eq!(keys, vec!["accent", "dark_mode", "fontsize"]);
    assert!(metadata.property("dirty").is_none());

    let dark_mode = metadata.property("dark_mode").unwrap();
    assert_eq!(dark_mode.read_accessor(), "is_dark_mode");
    assert_eq!(dark_mode.write_accessor(), "set_dark_mode");
    assert_eq!(dark_mode.converter().scalar_type(), ScalarType::Bool);
}

#[test]
fn test_generated_accessors_read_and_write() {
    let mut settings = UiSettings::default();

    for accessor in UiSettings::accessors() {
        if let AccessorKind::Write(write) = accessor.kind() {
            match accessor.name() {
                "set_dark_mode" => write(&mut settings, Value::Bool(true)).unwrap(),
                "set_fontsize" => write(&mut settings, Value::F64(14.5)).unwrap(),
                "set_accent" => write(&mut settings, Value::Char('#')).unwrap(),
                other => panic!("unexpected accessor {other}"),
            }
        }
    }

    assert!(settings.dark_mode);
    assert_eq!(settings.font_size, 14.5);
    assert_eq!(settings.accent, Some('#'));

    let accent = UiSettings::accessors()
        .into_iter()
        .find(|a| a.name() == "get_accent")
        .unwrap();
    let AccessorKind::Read(read) = accent.kind() else {
        panic!("get_accent should be a read accessor");
    };
    assert_eq!(read(&settings), Some(Value::Char('#')));
}

#[test]
fn test_generated_writer_rejects_wrong_value() {
    let mut settings = UiSettings::default();
    let set_fontsize = UiSettings::accessors()
        .into_iter()
        .find(|a| a.name() == "set_fontsize")
        .unwrap();
    let AccessorKind::Write(write) = set_fontsize.kind() else {
        panic!("set_fontsize should be a write accessor");
    };

    let err = write(&mut settings, Value::Text("big".into())).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_skipped_field_is_not_persisted() {
    let fixture = TestFixture::new();

    let mut settings: UiSettings = fixture.registry.register("ui.properties").unwrap();
    settings.dirty = true;
    settings.accent = Some('x');
    fixture.registry.save(&settings).unwrap();

    let stored =
        std::fs::read_to_string(fixture.temp_dir.path().join("ui.properties")).unwrap();
    assert!(stored.contains("fontsize=0"));
    assert!(stored.contains("dark_mode=false"));
    assert!(!stored.contains("dirty"));
}

#[test]
fn test_derived_bean_binds_all_fields() {
    let metadata = SettingsMetadata::<Bean>::discover("bean.properties").unwrap();
    assert_eq!(metadata.len(), 3);

    let bean = Bean::default();
    let values = metadata.collect(&bean).unwrap();
    assert_eq!(values.get("id").map(String::as_str), Some("42"));
    assert_eq!(values.get("name").map(String::as_str), Some("testing string"));
    assert_eq!(values.get("price").map(String::as_str), Some("10.43"));
}
