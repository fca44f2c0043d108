//! Event dispatcher - Routes incoming events to a reply policy

use std::sync::Arc;
use crate::application::services::{CommandService, MessageService};
use crate::domain::entities::{IncomingEvent, InteractionEvent, MessageEvent};
use crate::domain::traits::Session;
use super::middleware::{
    Context, LoggingMiddleware, Middleware, MiddlewareChain, MiddlewareError, Next,
    SelfMessageGuard,
};

/// What a single dispatch did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Plain message sent to a channel
    Replied { channel_id: String, text: String },
    /// Interaction answered through the interaction-response channel
    Responded { command: String, text: String },
    /// Dropped before lookup (e.g. self-authored)
    Ignored(String),
    /// Nothing in the tables matched
    Unmatched,
    /// The reply was chosen but sending it failed
    SendFailed(String),
}

/// Event dispatcher - runs messages through middleware and the trigger
/// table, and interactions through the command registry.
///
/// Holds no mutable state, so `dispatch` may run concurrently.
pub struct EventDispatcher<S: Session + ?Sized> {
    session: Arc<S>,
    self_id: String,
    middleware: Vec<Arc<dyn Middleware>>,
    messages: MessageService,
    commands: CommandService,
}

impl<S: Session + ?Sized> EventDispatcher<S> {
    pub fn new(session: Arc<S>, messages: MessageService, commands: CommandService) -> Self {
        let info = session.bot_info();
        tracing::debug!(bot = %info.name, bot_id = %info.id, "Dispatcher ready");
        Self {
            session,
            self_id: info.id,
            middleware: MiddlewareChain::new()
                .add(LoggingMiddleware)
                .add(SelfMessageGuard)
                .build(),
            messages,
            commands,
        }
    }

    /// Dispatcher with the default trigger table and the `hello` command
    pub fn with_defaults(session: Arc<S>) -> Self {
        Self::new(session, MessageService::default(), CommandService::default())
    }

    #[cfg(test)]
    pub fn session(&self) -> &Arc<S> {
        &self.session
    }

    pub fn commands(&self) -> &CommandService {
        &self.commands
    }

    /// Handle one event, sending at most one reply
    pub async fn dispatch(&self, event: IncomingEvent) -> DispatchOutcome {
        tracing::trace!(
            kind = event.kind().as_str(),
            channel_id = event.channel_id(),
            author = %event.author(),
            "Dispatching event"
        );
        match event {
            IncomingEvent::Message(message) => self.on_message(message).await,
            IncomingEvent::Interaction(interaction) => self.on_interaction(interaction).await,
        }
    }

    async fn on_message(&self, message: MessageEvent) -> DispatchOutcome {
        let ctx = Context::new(message, self.self_id.as_str());

        let ctx = match Next::new(self.middleware.clone()).run(ctx) {
            Ok(ctx) => ctx,
            Err(MiddlewareError::Ignored(reason)) => return DispatchOutcome::Ignored(reason),
        };

        let Some(reply) = self.messages.reply_for(&ctx.message.content) else {
            return DispatchOutcome::Unmatched;
        };

        let channel_id = ctx.message.channel_id;
        match self.session.send_message(&channel_id, reply).await {
            Ok(message_id) => {
                tracing::debug!(%channel_id, %message_id, "Sent reply");
                DispatchOutcome::Replied {
                    channel_id,
                    text: reply.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(%channel_id, "Failed to send reply: {}", e);
                DispatchOutcome::SendFailed(e.to_string())
            }
        }
    }

    async fn on_interaction(&self, interaction: InteractionEvent) -> DispatchOutcome {
        tracing::info!(
            command = %interaction.command,
            user = %interaction.user,
            guild_id = interaction.guild_id.as_deref().unwrap_or("-"),
            received_at = %interaction.received_at,
            "Received slash command"
        );

        let Some(text) = self.commands.handle(&interaction) else {
            tracing::warn!("Unknown command: {}", interaction.command);
            return DispatchOutcome::Unmatched;
        };

        match self.session.respond_to_interaction(&interaction, &text).await {
            Ok(()) => DispatchOutcome::Responded {
                command: interaction.command,
                text,
            },
            Err(e) => {
                tracing::error!(command = %interaction.command, "Cannot respond to slash command: {}", e);
                DispatchOutcome::SendFailed(e.to_string())
            }
        }
    }
}
