use async_trait::async_trait;
use crate::domain::entities::InteractionEvent;
use crate::application::errors::SessionError;

/// Session trait - send-capable handle on a live platform connection.
///
/// Handlers only ever read through this handle, so one instance is shared
/// by every concurrently running dispatch.
#[async_trait]
pub trait Session: Send + Sync {
    /// Send a plain message to a channel, returning the new message id
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, SessionError>;

    /// Answer an interaction through the interaction-response channel
    async fn respond_to_interaction(
        &self,
        interaction: &InteractionEvent,
        text: &str,
    ) -> Result<(), SessionError>;

    /// Identity the session authenticated as
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
}

impl BotInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
