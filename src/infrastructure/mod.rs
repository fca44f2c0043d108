//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading from the environment
//! - Adapters: Platform integrations (Discord, console)
//! - Shutdown: Process signal handling

pub mod config;
pub mod adapters;
pub mod shutdown;
