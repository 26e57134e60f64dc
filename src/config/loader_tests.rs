//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_recview_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("recview") && path_str.ends_with("config.toml"),
        "Path should contain 'recview' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_recview_log() {
    let path = default_log_path();
    assert!(
        path.ends_with("recview/recview.log") || path == PathBuf::from("recview.log"),
        "unexpected log path: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
page_size = 30
export_dir = "/tmp/exports"
document_title = "Quarterly Review"
currency_symbol = "€"
log_file_path = "/tmp/recview.log"
"#;
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.page_size, Some(PageSize::new(30).unwrap()));
    assert_eq!(config.export_dir, Some(PathBuf::from("/tmp/exports")));
    assert_eq!(config.document_title.as_deref(), Some("Quarterly Review"));
    assert_eq!(config.currency_symbol.as_deref(), Some("€"));
    assert_eq!(config.log_file_path, Some(PathBuf::from("/tmp/recview.log")));
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("invalid.toml");
    fs::write(&config_path, "page_size = = 10").unwrap();

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a parse error, got {:?}",
        result
    );
}

#[test]
fn load_config_file_rejects_disallowed_page_size() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "page_size = 25").unwrap();

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn load_config_file_handles_partial_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("partial.toml");
    fs::write(&config_path, "document_title = \"Only Title\"\n").unwrap();

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config.document_title.as_deref(), Some("Only Title"));
    assert_eq!(config.page_size, None);
    assert_eq!(config.export_dir, None);
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
    assert!(result.is_err(), "Unknown keys should be rejected");
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.page_size.get(), 10);
    assert_eq!(config.document_title, "Data Management System Export");
    assert_eq!(config.currency_symbol, "$");
    assert_eq!(config.log_file_path, default_log_path());
    assert_eq!(config.export_dir, default_export_dir());
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let file = ConfigFile {
        page_size: Some(PageSize::new(50).unwrap()),
        export_dir: Some(PathBuf::from("/srv/out")),
        document_title: Some("Ledger".to_string()),
        currency_symbol: Some("£".to_string()),
        log_file_path: Some(PathBuf::from("/var/log/recview.log")),
    };

    let resolved = merge_config(Some(file));
    assert_eq!(resolved.page_size.get(), 50);
    assert_eq!(resolved.export_dir, PathBuf::from("/srv/out"));
    assert_eq!(resolved.document_title, "Ledger");
    assert_eq!(resolved.currency_symbol, "£");
    assert_eq!(resolved.log_file_path, PathBuf::from("/var/log/recview.log"));
}

#[test]
fn merge_config_uses_defaults_for_none_fields() {
    let file = ConfigFile {
        currency_symbol: Some("¥".to_string()),
        ..ConfigFile::default()
    };
    let defaults = ResolvedConfig::default();

    let resolved = merge_config(Some(file));
    assert_eq!(resolved.currency_symbol, "¥");
    assert_eq!(resolved.page_size, defaults.page_size);
    assert_eq!(resolved.document_title, defaults.document_title);
    assert_eq!(resolved.export_dir, defaults.export_dir);
}

/// Removes the var on creation and on drop.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(recview_env)]
fn apply_env_overrides_respects_page_size() {
    let _guard = EnvGuard::new("RECVIEW_PAGE_SIZE");
    env::set_var("RECVIEW_PAGE_SIZE", "40");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(result.page_size.get(), 40);
}

#[test]
#[serial(recview_env)]
fn apply_env_overrides_ignores_invalid_page_size() {
    let _guard = EnvGuard::new("RECVIEW_PAGE_SIZE");
    let base = ResolvedConfig::default();

    for raw in ["25", "ten", ""] {
        env::set_var("RECVIEW_PAGE_SIZE", raw);
        let result = apply_env_overrides(base.clone());
        assert_eq!(result.page_size, base.page_size, "{raw:?} should be ignored");
    }
}

#[test]
#[serial(recview_env)]
fn apply_env_overrides_respects_export_dir() {
    let _guard = EnvGuard::new("RECVIEW_EXPORT_DIR");
    env::set_var("RECVIEW_EXPORT_DIR", "/data/exports");

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone());
    assert_eq!(result.export_dir, PathBuf::from("/data/exports"));
    assert_eq!(result.page_size, base.page_size);
    assert_eq!(result.document_title, base.document_title);
}

#[test]
#[serial(recview_env)]
fn apply_env_overrides_no_change_when_env_vars_not_set() {
    let _page = EnvGuard::new("RECVIEW_PAGE_SIZE");
    let _dir = EnvGuard::new("RECVIEW_EXPORT_DIR");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(recview_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new("RECVIEW_CONFIG");
    let temp_dir = tempfile::tempdir().unwrap();

    let explicit = temp_dir.path().join("explicit.toml");
    let from_env = temp_dir.path().join("env.toml");
    fs::write(&explicit, "document_title = \"explicit\"").unwrap();
    fs::write(&from_env, "document_title = \"env\"").unwrap();
    env::set_var("RECVIEW_CONFIG", &from_env);

    let config = load_config_with_precedence(Some(explicit)).unwrap().unwrap();
    assert_eq!(config.document_title.as_deref(), Some("explicit"));
}

#[test]
#[serial(recview_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new("RECVIEW_CONFIG");
    let temp_dir = tempfile::tempdir().unwrap();

    let from_env = temp_dir.path().join("env.toml");
    fs::write(&from_env, "currency_symbol = \"CHF \"").unwrap();
    env::set_var("RECVIEW_CONFIG", &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.currency_symbol.as_deref(), Some("CHF "));
}

#[test]
#[serial(recview_config)]
fn load_config_with_precedence_missing_env_file_is_not_an_error() {
    let _guard = EnvGuard::new("RECVIEW_CONFIG");
    env::set_var("RECVIEW_CONFIG", "/nonexistent/recview/config.toml");

    assert_eq!(load_config_with_precedence(None), Ok(None));
}

#[test]
#[serial(recview_env)]
fn precedence_chain_defaults_to_file_to_env() {
    let _guard = EnvGuard::new("RECVIEW_PAGE_SIZE");
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "page_size = 20\ndocument_title = \"From File\"").unwrap();

    let file = load_config_file(&path).unwrap();
    let merged = merge_config(file);
    assert_eq!(merged.page_size.get(), 20);

    env::set_var("RECVIEW_PAGE_SIZE", "50");
    let resolved = apply_env_overrides(merged);
    assert_eq!(resolved.page_size.get(), 50);
    assert_eq!(resolved.document_title, "From File");
}
