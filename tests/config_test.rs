//! Integration tests for Settings config loading.
//!
//! These tests run without a global config (temp directories only),
//! so they test local config merging with compiled defaults.

use std::fs;

use tempfile::TempDir;

use bintree::application::{ApplicationError, TreeRequest, TreeService};
use bintree::config::Settings;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("bintree.toml");
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn given_no_local_config_when_loading_then_uses_defaults() {
    let settings = Settings::load(None).expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_local_config_when_loading_then_overrides_only_given_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
height = 2
root = 1
left = "mul:2"
"#,
    );

    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    assert_eq!(settings.height, 2);
    assert_eq!(settings.root, 1);
    assert_eq!(settings.left, "mul:2");
    assert_eq!(settings.right, "double-minus-one");
    assert!(!settings.memoize);
}

#[test]
fn given_local_config_when_building_then_tree_follows_settings() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
height = 2
root = 1
left = "mul:2"
right = "add:3"
memoize = true
"#,
    );

    let settings = Settings::load(Some(path.as_path())).unwrap();
    let service = TreeService::new(TreeRequest::from(&settings));

    assert_eq!(service.flatten().unwrap(), vec![Some(1), Some(2), Some(4)]);
}

#[test]
fn given_missing_local_config_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = Settings::load(Some(missing.as_path())).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }), "{err}");
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn given_malformed_toml_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "height = \"four\"\n");

    let err = Settings::load(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }), "{err}");
    assert!(err.to_string().contains("parse"));
}

#[test]
fn given_unknown_rule_in_config_when_building_then_type_mismatch() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "right = \"sqrt\"\n");

    let settings = Settings::load(Some(path.as_path())).unwrap();
    let err = TreeService::new(TreeRequest::from(&settings)).build().unwrap_err();
    assert!(err.to_string().contains("right generator is not invocable"), "{err}");
}

#[test]
fn given_root_beyond_i64_when_loading_then_config_error_but_flag_accepts_it() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "root = 9223372036854775808\n");
    let err = Settings::load(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }), "{err}");

    let mut request = TreeRequest::from(&Settings::default());
    request.root = i128::from(i64::MAX) + 1;
    request.height = 1;
    let tree = TreeService::new(request).build().unwrap().unwrap();
    assert_eq!(tree.value, 9_223_372_036_854_775_808);
}
