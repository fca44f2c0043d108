//! Event handling - Event-driven command dispatch

pub mod dispatcher;
pub mod middleware;
pub mod parser;

pub use dispatcher::EventDispatcher;
pub use parser::MessageParser;
