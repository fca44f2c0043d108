//! Message parser - Turns raw text lines into incoming events

use crate::domain::entities::{IncomingEvent, InteractionEvent, MessageEvent, User};

/// Parses text typed into a local session into events
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Body used for trigger matching
    pub fn normalize(text: &str) -> &str {
        text.trim()
    }

    /// Parse a line of text. Prefixed lines become command interactions.
    pub fn parse(
        &self,
        id: impl Into<String>,
        channel_id: impl Into<String>,
        text: &str,
        sender: User,
    ) -> Option<IncomingEvent> {
        let text = Self::normalize(text);
        if text.is_empty() {
            return None;
        }

        let id = id.into();
        if let Some(cmd_text) = text.strip_prefix(self.command_prefix.as_str()) {
            // Only the command name counts; slash commands here take no options
            let name = cmd_text.split_whitespace().next()?;
            let token = format!("local-{}", id);
            return Some(InteractionEvent::new(id, token, channel_id, sender, name).into());
        }

        Some(MessageEvent::new(id, channel_id, sender, text).into())
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new("/")
    }
}
