//! Integration tests for the configuration store and context registry

use multitool::config::{expand_home, ConfigStore, DEFAULT_CONNECTION_STRING};
use multitool::context::{ContextRegistry, ContextUpdate, NewContext};
use multitool::error::ConfigError;
use multitool::settings::RuntimeSettings;
use std::fs;
use tempfile::TempDir;

use crate::integration::{config_file, with_home_env};

#[test]
fn test_startup_protocol_end_to_end() {
    let test_dir = TempDir::new().unwrap();
    let path = config_file(&test_dir);

    let mut store = ConfigStore::with_path(&path);
    assert!(matches!(store.load(), Err(ConfigError::ConfigNotFound)));
    store.set_default();
    store.save().unwrap();

    {
        let mut registry = ContextRegistry::new(&mut store);
        let mut prod = NewContext::new("prod", "postgresql://svc:pw@db/prod");
        prod.warning = true;
        prod.service_user = Some("svc".to_string());
        prod.service_pass = Some("pw".to_string());
        registry.create(prod).unwrap();
        registry.activate("prod").unwrap();
    }

    let mut reloaded = ConfigStore::with_path(&path);
    reloaded.load().unwrap();
    let doc = reloaded.document().unwrap();
    assert_eq!(doc.active_context, "prod");
    assert_eq!(doc.contexts.len(), 2);
    assert_eq!(doc.contexts[0].connection_string, DEFAULT_CONNECTION_STRING);
    assert_eq!(reloaded.active_context().unwrap().service_pass.as_deref(), Some("pw"));
    assert_eq!(reloaded.document().unwrap(), store.document().unwrap());
}

#[test]
fn test_unset_credentials_written_as_null() {
    let test_dir = TempDir::new().unwrap();
    let path = config_file(&test_dir);
    let mut store = ConfigStore::with_path(&path);
    store.set_default();
    store.save().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("db_string:"));
    assert!(content.contains("service_user: null"));

    let mut reloaded = ConfigStore::with_path(&path);
    reloaded.load().unwrap();
    assert!(reloaded.active_context().unwrap().service_user.is_none());
}

#[test]
fn test_hand_written_file_without_optional_fields() {
    let test_dir = TempDir::new().unwrap();
    let path = config_file(&test_dir);
    fs::write(
        &path,
        "active_context: local\ncontexts:\n- name: local\n  db_string: sqlite:///local.db\n",
    )
    .unwrap();

    let mut store = ConfigStore::with_path(&path);
    store.load().unwrap();
    let local = store.active_context().unwrap();
    assert!(!local.warning);
    assert!(local.root_user.is_none());
    assert_eq!(store.document().unwrap().logging_level, 30);
}

#[test]
fn test_rejected_update_does_not_touch_disk() {
    let test_dir = TempDir::new().unwrap();
    let path = config_file(&test_dir);
    let mut store = ConfigStore::with_path(&path);
    store.set_default();
    store.save().unwrap();
    ContextRegistry::new(&mut store)
        .create(NewContext::new("dev", "sqlite:///dev.db"))
        .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let update = ContextUpdate {
        new_name: Some("default".to_string()),
        connection_string: Some("sqlite:///changed.db".to_string()),
        ..Default::default()
    };
    let result = ContextRegistry::new(&mut store).update("dev", update);
    assert!(matches!(result, Err(ConfigError::DuplicateContext(_))));

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert_eq!(
        store.document().unwrap().find("dev").unwrap().connection_string,
        "sqlite:///dev.db"
    );
}

#[test]
fn test_failed_save_restores_document() {
    let test_dir = TempDir::new().unwrap();
    // A directory where the file should be makes every write fail.
    let path = test_dir.path().join("occupied");
    fs::create_dir_all(&path).unwrap();

    let mut store = ConfigStore::with_path(&path);
    store.set_default();
    let result = ContextRegistry::new(&mut store).create(NewContext::new("dev", "sqlite:///dev.db"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
    assert!(!store.document().unwrap().contains("dev"));
}

#[test]
fn test_runtime_settings_default_path_under_home() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, |home| {
        let settings = RuntimeSettings::load().unwrap();
        assert_eq!(settings.log_format, "text");
        assert_eq!(
            expand_home(&settings.config_path),
            home.join(".multitool_config.yaml")
        );
    });
}

#[test]
fn test_runtime_settings_environment_and_flag_precedence() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, |_home| {
        std::env::set_var("MULTITOOL_CONFIG_PATH", "/tmp/from-env.yaml");
        let settings = RuntimeSettings::load().unwrap();
        assert_eq!(settings.config_path, std::path::PathBuf::from("/tmp/from-env.yaml"));

        let settings = settings.with_overrides(Some("/tmp/from-flag.yaml".into()), None);
        assert_eq!(settings.config_path, std::path::PathBuf::from("/tmp/from-flag.yaml"));
    });
}
