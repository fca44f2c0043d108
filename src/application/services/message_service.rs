use std::collections::HashMap;
use crate::application::messaging::MessageParser;

/// Service holding the trigger table for plain messages.
///
/// Triggers are case-sensitive and matched against the whole trimmed body.
pub struct MessageService {
    triggers: HashMap<String, String>,
}

impl MessageService {
    pub fn new() -> Self {
        Self {
            triggers: HashMap::new(),
        }
    }

    pub fn register(&mut self, trigger: impl Into<String>, reply: impl Into<String>) {
        self.triggers.insert(trigger.into(), reply.into());
    }

    pub fn register_defaults(&mut self) {
        self.register("ping", "Pong!");
        self.register("pong", "Ping!");
    }

    /// Reply for a message body, or None for anything not in the table
    pub fn reply_for(&self, content: &str) -> Option<&str> {
        self.triggers
            .get(MessageParser::normalize(content))
            .map(String::as_str)
    }
}

impl Default for MessageService {
    fn default() -> Self {
        let mut service = Self::new();
        service.register_defaults();
        service
    }
}
