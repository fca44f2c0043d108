//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod gateway;

pub use bot::{BotInfo, Session};
pub use gateway::{Gateway, ShutdownSignal};
