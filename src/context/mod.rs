//! Context domain: the registry of named deployment profiles and the activation
//! protocol. The CLI consumes it; the config store owns persistence.

pub mod registry;

pub use registry::{ContextListEntry, ContextRegistry, ContextUpdate, NewContext};
