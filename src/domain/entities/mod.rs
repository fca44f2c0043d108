//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod session;

pub use user::User;
pub use message::{IncomingEvent, InteractionEvent, MessageEvent};
pub use command::{Command, CommandDefinition, CommandRegistry};
pub use session::{SessionState, TransitionError};
