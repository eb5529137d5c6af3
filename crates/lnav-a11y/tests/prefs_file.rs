//! Preferences loaded from TOML files on disk

use lnav_a11y::{BorderMode, Configuration, MemoryPreferenceStore, PrefError, PreferenceStore};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_prefs(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = write_prefs(
        r#"
[landmarks]
borderMode = "momentary"
nextKey = "j"
previousKey = "k"
shiftModifier = false
controlModifier = true
"#,
    );

    let config = Configuration::from_toml_file(file.path()).unwrap();
    assert_eq!(config.border_mode, BorderMode::Momentary);
    assert_eq!(config.next_key, "j");
    assert_eq!(config.previous_key, "k");
    assert!(!config.use_shift);
    assert!(config.use_control);
}

#[test]
fn test_file_seeds_memory_store() {
    let file = write_prefs("[landmarks]\nnextKey = \"l\"\n");
    let config = Configuration::from_toml_file(file.path()).unwrap();

    let mut store = MemoryPreferenceStore::from_config(&config);
    assert!(store.take_changes().is_empty());
    assert_eq!(Configuration::load(&store).unwrap(), config);
    assert_eq!(store.get_string("borderMode").unwrap(), "persistent");
}

#[test]
fn test_unknown_border_mode_rejected() {
    let file = write_prefs("[landmarks]\nborderMode = \"flashing\"\n");
    let err = Configuration::from_toml_file(file.path()).unwrap_err();
    assert!(matches!(err, PrefError::TomlParse(_)));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Configuration::from_toml_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, PrefError::Io(_)));
}
