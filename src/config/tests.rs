use super::validation::validate_config;
use super::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn config_with(
    store_url: Option<&str>,
    request_timeout: Option<u64>,
    default_power: Option<u8>,
    delete_grace_period: Option<u64>,
) -> Config {
    Config {
        store_url: store_url.map(str::to_string),
        request_timeout,
        default_power,
        delete_grace_period,
    }
}

#[test]
fn test_defaults_when_keys_missing() {
    let config = Config::default();
    assert_eq!(config.store_url(), DEFAULT_STORE_URL);
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.default_power(), 5);
    assert_eq!(config.delete_grace_period(), Duration::from_secs(3));
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_validation_accepts_boundaries() {
    let config = config_with(Some("https://store.example/api"), Some(1), Some(10), Some(10));
    assert!(validate_config(&config).is_ok());
    let config = config_with(None, Some(60), Some(1), Some(1));
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_validation_rejects_bad_power() {
    let result = validate_config(&config_with(None, None, Some(0), None));
    assert!(result.unwrap_err().to_string().contains("default_power"));
    assert!(validate_config(&config_with(None, None, Some(11), None)).is_err());
}

#[test]
fn test_validation_rejects_bad_timeout_and_grace() {
    assert!(validate_config(&config_with(None, Some(0), None, None)).is_err());
    assert!(validate_config(&config_with(None, Some(61), None, None)).is_err());
    assert!(validate_config(&config_with(None, None, None, Some(0))).is_err());
    assert!(validate_config(&config_with(None, None, None, Some(11))).is_err());
}

#[test]
fn test_validation_rejects_non_http_url() {
    let result = validate_config(&config_with(Some("ftp://store"), None, None, None));
    assert!(result.unwrap_err().to_string().contains("http://"));
    assert!(validate_config(&config_with(Some("   "), None, None, None)).is_err());
}

#[test]
fn test_load_from_path_parses_toml() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        "store_url = \"http://10.0.0.2:5211/api/microwave\"\ndefault_power = 8\n",
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.store_url(), "http://10.0.0.2:5211/api/microwave");
    assert_eq!(config.default_power(), 8);
    assert_eq!(config.delete_grace_period(), Duration::from_secs(3));
}

#[test]
fn test_load_from_path_reports_invalid_values() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "default_power = 42\n").unwrap();
    assert!(load_from_path(&path).is_err());

    fs::write(&path, "default_power = \"high\"\n").unwrap();
    let err = load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_load_creates_default_in_custom_dir() {
    let temp_dir = tempdir().unwrap();
    let dir = temp_dir.path().join("nested");

    let config = Config::load(Some(&dir)).unwrap();
    assert_eq!(config.default_power(), DEFAULT_POWER);
    assert_eq!(config.store_url(), DEFAULT_STORE_URL);

    let written = fs::read_to_string(dir.join(CONFIG_FILE_NAME)).unwrap();
    assert!(written.contains("#[Preset store]"));
    assert!(written.contains("delete_grace_period = 3"));
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);

    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let result = Config::load(None);

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    assert!(result.is_ok(), "Config::load() failed: {:?}", result.err());
    assert!(config_path.exists());
}

#[test]
fn test_default_file_round_trips_through_loader() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    create_default_config(&path).unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(
        config,
        config_with(
            Some(DEFAULT_STORE_URL),
            Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            Some(DEFAULT_POWER),
            Some(DEFAULT_DELETE_GRACE_SECS),
        )
    );
}
