//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Reply policies for messages and slash commands
//! - Errors: Configuration and session errors
//! - Messaging: Parsing, middleware, dispatching

pub mod errors;
pub mod services;
pub mod messaging;
