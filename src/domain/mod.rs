//! Domain layer - Core business logic with no platform dependencies
//!
//! This layer contains:
//! - Entities: Core objects (User, IncomingEvent, Command, SessionState)
//! - Traits: Abstractions for infrastructure (Session)

pub mod entities;
pub mod traits;
