//! Shared test utilities for integration tests
//!
//! Provides isolated configuration files and a serialized view of the
//! environment variables that decide where the configuration lives.

use multitool::cli::{RunContext, StaticConfirmer};
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize HOME / MULTITOOL_* access across all tests
static HOME_ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 3] = ["HOME", "MULTITOOL_CONFIG_PATH", "MULTITOOL_LOG_FORMAT"];

/// Environment variable state to restore after test
struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            saved: ENV_KEYS
                .iter()
                .map(|key| (*key, std::env::var(key).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (key, value) in self.saved {
            match value {
                Some(orig) => std::env::set_var(key, orig),
                None => std::env::remove_var(key),
            }
        }
    }
}

/// Point HOME at `<test_dir>/home` and clear MULTITOOL_* overrides while `f` runs.
pub fn with_home_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce(PathBuf) -> R,
{
    let _guard = HOME_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();
    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::remove_var("MULTITOOL_CONFIG_PATH");
    std::env::remove_var("MULTITOOL_LOG_FORMAT");

    let result = f(test_home);

    env_state.restore();

    result
}

/// Config file location inside a test directory
pub fn config_file(test_dir: &TempDir) -> PathBuf {
    test_dir.path().join("multitool_config.yaml")
}

/// Run context over a fresh config file; the confirmation prompt answers `confirm`.
pub fn run_context(test_dir: &TempDir, confirm: bool) -> RunContext {
    RunContext::new(config_file(test_dir))
        .unwrap()
        .with_confirmer(Box::new(StaticConfirmer(confirm)))
}
