use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use crate::application::errors::{BotError, SessionError};

/// Resolves when the process has been asked to stop
pub type ShutdownSignal = Pin<Box<dyn Future<Output = std::io::Result<()>>>>;

/// Gateway trait - an opened, authenticated platform connection.
///
/// Once a value exists, `close` must run exactly once, whatever
/// `register_commands` or `serve` returned.
#[async_trait(?Send)]
pub trait Gateway {
    /// Declare every slash command, returning how many were declared
    async fn register_commands(&self) -> Result<usize, SessionError>;

    /// Deliver events until `shutdown` resolves or the connection fails
    async fn serve(&mut self, shutdown: ShutdownSignal) -> Result<(), BotError>;

    /// Tear the connection down
    async fn close(self);
}
