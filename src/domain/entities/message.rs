use super::User;
use chrono::{DateTime, Utc};

/// Kind tag of an incoming event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Message,
    Interaction,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Message => "message",
            EventKind::Interaction => "interaction",
        }
    }
}

/// A free-text message posted to a channel
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub id: String,
    pub channel_id: String,
    pub guild_id: Option<String>,
    pub author: User,
    pub content: String,
    pub received_at: DateTime<Utc>,
}

impl MessageEvent {
    pub fn new(
        id: impl Into<String>,
        channel_id: impl Into<String>,
        author: User,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            guild_id: None,
            author,
            content: content.into(),
            received_at: Utc::now(),
        }
    }

    pub fn with_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }
}

/// A slash-command invocation. Answered through the interaction-response
/// channel, never with a plain channel message.
#[derive(Debug, Clone)]
pub struct InteractionEvent {
    pub id: String,
    /// Short-lived token the platform requires to answer this interaction
    pub token: String,
    pub channel_id: String,
    pub guild_id: Option<String>,
    pub user: User,
    pub command: String,
    pub received_at: DateTime<Utc>,
}

impl InteractionEvent {
    pub fn new(
        id: impl Into<String>,
        token: impl Into<String>,
        channel_id: impl Into<String>,
        user: User,
        command: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
            channel_id: channel_id.into(),
            guild_id: None,
            user,
            command: command.into(),
            received_at: Utc::now(),
        }
    }

    pub fn with_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }
}

/// Everything the gateway hands to the dispatcher
#[derive(Debug, Clone)]
pub enum IncomingEvent {
    Message(MessageEvent),
    Interaction(InteractionEvent),
}

impl IncomingEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            IncomingEvent::Message(_) => EventKind::Message,
            IncomingEvent::Interaction(_) => EventKind::Interaction,
        }
    }

    pub fn author(&self) -> &User {
        match self {
            IncomingEvent::Message(m) => &m.author,
            IncomingEvent::Interaction(i) => &i.user,
        }
    }

    pub fn channel_id(&self) -> &str {
        match self {
            IncomingEvent::Message(m) => &m.channel_id,
            IncomingEvent::Interaction(i) => &i.channel_id,
        }
    }
}

impl From<MessageEvent> for IncomingEvent {
    fn from(event: MessageEvent) -> Self {
        IncomingEvent::Message(event)
    }
}

impl From<InteractionEvent> for IncomingEvent {
    fn from(event: InteractionEvent) -> Self {
        IncomingEvent::Interaction(event)
    }
}
