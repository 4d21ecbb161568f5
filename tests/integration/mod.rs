//! Integration tests for multitool context and configuration management

mod config_store;
mod data_handoff;
mod test_utils;

pub use test_utils::{config_file, run_context, with_home_env};
