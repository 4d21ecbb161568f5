//! Data Library Hand-off
//!
//! Boundary between a resolved context and the downstream data-access library.
//! A [`ConnectionRequest`] carries everything the library needs to open a
//! connection for one context; [`DataBackend`] is the port the library plugs
//! into. Handles returned by a backend are opaque to this crate.

use crate::config::ContextRecord;
use crate::error::DataError;
use serde::{Deserialize, Serialize};

/// Optional engine arguments forwarded to the data library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineArgs {
    /// Echo executed SQL statements
    pub echo_sql: bool,
}

/// Service account used to authenticate on behalf of the operator
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("username", &self.username)
            .field("password", &crate::config::PASSWORD_MASK)
            .finish()
    }
}

/// How complete the service account settings of a context are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStatus {
    /// Both user and password are set
    Complete,
    /// Only one of user and password is set
    Incomplete,
    NotSet,
}

impl CredentialStatus {
    pub fn of(record: &ContextRecord) -> Self {
        match (&record.service_user, &record.service_pass) {
            (Some(_), Some(_)) => CredentialStatus::Complete,
            (None, None) => CredentialStatus::NotSet,
            _ => CredentialStatus::Incomplete,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            CredentialStatus::Complete => "complete",
            CredentialStatus::Incomplete => "incomplete (user and password must both be set)",
            CredentialStatus::NotSet => "not set",
        }
    }
}

/// Everything the data library needs to connect for one context
#[derive(Debug, Clone)]
pub struct ConnectionRequest {
    pub context_name: String,
    pub connection_string: String,
    pub engine_args: EngineArgs,
    pub service_credentials: Option<ServiceCredentials>,
    pub root_user: Option<String>,
    credential_status: CredentialStatus,
}

impl ConnectionRequest {
    /// Build the request for a resolved context. Half-set service credentials
    /// are dropped here and reported by [`Self::require_service_credentials`].
    pub fn for_context(record: &ContextRecord, engine_args: EngineArgs) -> Self {
        let service_credentials = match (&record.service_user, &record.service_pass) {
            (Some(username), Some(password)) => Some(ServiceCredentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        };
        Self {
            context_name: record.name.clone(),
            connection_string: record.connection_string.clone(),
            engine_args,
            service_credentials,
            root_user: record.root_user.clone(),
            credential_status: CredentialStatus::of(record),
        }
    }

    pub fn credential_status(&self) -> CredentialStatus {
        self.credential_status
    }

    /// Service credentials, failing unless both user and password are set.
    pub fn require_service_credentials(&self) -> Result<&ServiceCredentials, DataError> {
        self.service_credentials
            .as_ref()
            .ok_or_else(|| DataError::CredentialsIncomplete(self.context_name.clone()))
    }

    /// Root account name, needed for user administration.
    pub fn require_root_user(&self) -> Result<&str, DataError> {
        self.root_user
            .as_deref()
            .ok_or_else(|| DataError::RootUserMissing(self.context_name.clone()))
    }
}

/// Opaque connection handle produced by a backend
pub trait DataHandle {
    /// Name of the context the handle was opened for
    fn context_name(&self) -> &str;
}

/// Port implemented by the downstream data library
pub trait DataBackend {
    fn connect(&self, request: &ConnectionRequest) -> Result<Box<dyn DataHandle>, DataError>;
}

/// Resolve a request for `record` and open it with `backend`.
pub fn open_for_context(
    backend: &dyn DataBackend,
    record: &ContextRecord,
    engine_args: EngineArgs,
) -> Result<Box<dyn DataHandle>, DataError> {
    let request = ConnectionRequest::for_context(record, engine_args);
    tracing::debug!(
        context = %request.context_name,
        connection = %record.masked_connection_string(),
        echo_sql = request.engine_args.echo_sql,
        "Opening data connection"
    );
    backend.connect(&request)
}
