//! Integration tests for handing the active context to a data backend

use multitool::config::{ConfigStore, ContextRecord};
use multitool::context::{ContextRegistry, NewContext};
use multitool::data::{open_for_context, ConnectionRequest, DataBackend, DataHandle, EngineArgs};
use multitool::error::{CliError, DataError};
use tempfile::TempDir;

use crate::integration::config_file;

struct Handle {
    context: String,
}

impl DataHandle for Handle {
    fn context_name(&self) -> &str {
        &self.context
    }
}

/// Backend that authenticates with the service account, like the real library
struct ServiceAccountBackend;

impl DataBackend for ServiceAccountBackend {
    fn connect(&self, request: &ConnectionRequest) -> Result<Box<dyn DataHandle>, DataError> {
        request.require_service_credentials()?;
        if request.connection_string.is_empty() {
            return Err(DataError::Backend("empty connection string".to_string()));
        }
        Ok(Box::new(Handle {
            context: request.context_name.clone(),
        }))
    }
}

fn store_with(test_dir: &TempDir, context: NewContext) -> ConfigStore {
    let mut store = ConfigStore::with_path(config_file(test_dir));
    store.set_default();
    store.save().unwrap();
    let name = context.name.clone();
    let mut registry = ContextRegistry::new(&mut store);
    registry.create(context).unwrap();
    registry.activate(&name).unwrap();
    store
}

fn active(store: &ConfigStore) -> ContextRecord {
    store.active_context().unwrap().clone()
}

#[test]
fn test_open_active_context() {
    let test_dir = TempDir::new().unwrap();
    let mut prod = NewContext::new("prod", "postgresql://db/prod");
    prod.service_user = Some("svc".to_string());
    prod.service_pass = Some("pw".to_string());
    let store = store_with(&test_dir, prod);

    let handle = open_for_context(
        &ServiceAccountBackend,
        &active(&store),
        EngineArgs { echo_sql: true },
    )
    .unwrap();
    assert_eq!(handle.context_name(), "prod");
}

#[test]
fn test_half_set_credentials_fail_with_data_exit_code() {
    let test_dir = TempDir::new().unwrap();
    let mut prod = NewContext::new("prod", "postgresql://db/prod");
    prod.service_pass = Some("pw".to_string());
    let store = store_with(&test_dir, prod);

    let err = open_for_context(&ServiceAccountBackend, &active(&store), EngineArgs::default())
        .err()
        .unwrap();
    assert!(matches!(err, DataError::CredentialsIncomplete(ref name) if name == "prod"));

    let cli_err: CliError = err.into();
    assert_eq!(cli_err.exit_code(), 11);
}

#[test]
fn test_root_user_for_user_administration() {
    let test_dir = TempDir::new().unwrap();
    let mut admin = NewContext::new("admin", "postgresql://db/admin");
    admin.root_user = Some("postgres".to_string());
    let store = store_with(&test_dir, admin);

    let request = ConnectionRequest::for_context(&active(&store), EngineArgs::default());
    assert_eq!(request.require_root_user().unwrap(), "postgres");

    let plain = ConnectionRequest::for_context(
        &ContextRecord::new("plain", "sqlite:///plain.db"),
        EngineArgs::default(),
    );
    assert!(matches!(
        plain.require_root_user(),
        Err(DataError::RootUserMissing(_))
    ));
}
