//! Multitool: context and configuration management
//!
//! Keeps a set of named contexts, each describing how to reach one deployment
//! of the data system, in a YAML configuration file. One context is active at
//! a time; commands resolve it and hand its connection settings to the data
//! library.

pub mod cli;
pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod logging;
pub mod settings;
