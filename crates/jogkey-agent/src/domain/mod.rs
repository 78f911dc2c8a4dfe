//! Domain types for the agent.

pub mod config;

pub use config::{AgentConfig, InjectorKind};
