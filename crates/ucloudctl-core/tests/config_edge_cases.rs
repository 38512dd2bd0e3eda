use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;
use ucloudctl_core::config::{Config, ConfigError, DEFAULT_BASE_URL};

const UCLOUD_VARS: [&str; 5] = [
    "UCLOUD_REGION",
    "UCLOUD_PROJECT_ID",
    "UCLOUD_PUBLIC_KEY",
    "UCLOUD_PRIVATE_KEY",
    "UCLOUD_BASE_URL",
];

fn clear_env() {
    for var in UCLOUD_VARS {
        unsafe {
            std::env::remove_var(var);
        }
    }
}

/// Returns true if running as root (euid == 0). Used to skip permission tests.
#[cfg(unix)]
fn is_root() -> bool {
    std::process::Command::new("id")
        .arg("-u")
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim() == "0")
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// 1. Nonexistent path
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn load_from_nonexistent_path_is_load_error() {
    let path = PathBuf::from("/tmp/ucloudctl-test-nonexistent/does/not/exist/config.toml");
    assert!(!path.exists());

    let result = Config::load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::LoadError { .. })));
}

#[test]
#[serial]
fn load_falls_back_to_environment() {
    clear_env();
    unsafe {
        std::env::set_var("UCLOUD_REGION", "cn-gd");
        std::env::set_var("UCLOUD_PROJECT_ID", "org-env");
    }

    let path = PathBuf::from("/tmp/ucloudctl-test-nonexistent/config.toml");
    let config = Config::load(Some(&path));

    assert_eq!(config.region, "cn-gd");
    assert_eq!(config.project_id, "org-env");
    assert!(config.public_key.is_empty());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);

    clear_env();
}

// ---------------------------------------------------------------------------
// 2. Empty config file
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn load_empty_config_file_returns_defaults() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "").unwrap();

    let config = Config::load_from_path(&config_path).expect("empty file should parse as default");

    assert_eq!(config, Config::default());
    assert!(config.validate().is_err());
}

// ---------------------------------------------------------------------------
// 3. Corrupt files
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn load_corrupt_toml_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[[[broken").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::TomlError(_)));
    assert!(
        err.to_string().contains("parse"),
        "error should mention parsing: {err}"
    );
}

#[test]
#[serial]
fn load_corrupt_json_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, "{\"region\": ").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::JsonError(_)));
}

// ---------------------------------------------------------------------------
// 4. Format selection and env fallback
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn load_json_config_by_extension() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("ucloud.json");
    fs::write(
        &config_path,
        r#"{
            "region": "cn-bj2",
            "project_id": "org-abc",
            "public_key": "pub",
            "private_key": "priv",
            "timeout_secs": 5
        }"#,
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();

    assert_eq!(config.region, "cn-bj2");
    assert_eq!(config.timeout_secs, 5);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn load_partial_file_fills_from_environment() {
    clear_env();
    unsafe {
        std::env::set_var("UCLOUD_PUBLIC_KEY", "env-pub");
        std::env::set_var("UCLOUD_PRIVATE_KEY", "env-priv");
        std::env::set_var("UCLOUD_REGION", "cn-sh2");
    }

    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
region = "cn-bj2"
project_id = "org-abc"
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();

    assert_eq!(config.region, "cn-bj2", "file value wins over env");
    assert_eq!(config.public_key, "env-pub");
    assert_eq!(config.private_key, "env-priv");
    assert!(config.validate().is_ok());

    clear_env();
}

#[test]
#[serial]
fn load_expands_variable_references() {
    clear_env();
    unsafe {
        std::env::set_var("UCLOUDCTL_TEST_SECRET", "from-var");
    }

    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
private_key = "${UCLOUDCTL_TEST_SECRET}"
region = "${UCLOUDCTL_TEST_UNSET:-cn-bj2}"
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();
    assert_eq!(config.private_key, "from-var");
    assert_eq!(config.region, "cn-bj2");

    unsafe {
        std::env::remove_var("UCLOUDCTL_TEST_SECRET");
    }
}

// ---------------------------------------------------------------------------
// 5. Unknown fields
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn load_config_with_unknown_fields_ignores_them() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
region = "cn-bj2"
unknown_top_level_key = "hello"
"#,
    )
    .unwrap();

    let config =
        Config::load_from_path(&config_path).expect("unknown fields should be silently ignored");
    assert_eq!(config.region, "cn-bj2");
}

// ---------------------------------------------------------------------------
// 6. Permission errors (unix only)
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
#[serial]
fn load_unreadable_file_returns_clear_error() {
    use std::os::unix::fs::PermissionsExt;

    if is_root() {
        eprintln!("skipping test: running as root");
        return;
    }

    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "# valid toml").unwrap();
    fs::set_permissions(&config_path, fs::Permissions::from_mode(0o000)).unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(
        err.to_string().contains("Failed to load"),
        "error should reference loading: {err}"
    );

    fs::set_permissions(&config_path, fs::Permissions::from_mode(0o644)).unwrap();
}
