//! Discord adapter
//!
//! Gateway handshake, heartbeats, resumes and REST rate limits all live in
//! serenity. This module only authenticates, declares the `hello` command,
//! translates gateway events into [`IncomingEvent`]s and owns the
//! connection's open/close lifecycle.

use async_trait::async_trait;
use serenity::all::{
    ChannelId, Client, CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage, EventHandler, GatewayIntents, GuildId, Http, Interaction,
    InteractionId, Message, Ready, ResumedEvent,
};
use std::num::NonZeroU64;
use std::sync::Arc;

use crate::application::errors::{BotError, SessionError};
use crate::application::messaging::EventDispatcher;
use crate::domain::entities::{
    IncomingEvent, InteractionEvent, MessageEvent, SessionState, User,
};
use crate::domain::traits::{BotInfo, Gateway, Session, ShutdownSignal};
use crate::infrastructure::config::Config;

/// Event categories the gateway should deliver
pub fn intents() -> GatewayIntents {
    // Without MESSAGE_CONTENT guild message bodies arrive empty
    GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

/// Parse a platform id carried as a string in the domain types
pub fn parse_id(raw: &str) -> Result<NonZeroU64, SessionError> {
    raw.parse()
        .map_err(|_| SessionError::InvalidId(raw.to_string()))
}

/// Send-capable handle backed by the REST client
pub struct DiscordSession {
    http: Arc<Http>,
    info: BotInfo,
}

impl DiscordSession {
    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }
}

#[async_trait]
impl Session for DiscordSession {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, SessionError> {
        let channel = ChannelId::from(parse_id(channel_id)?);
        let sent = channel
            .say(&self.http, text)
            .await
            .map_err(|e| SessionError::Send(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn respond_to_interaction(
        &self,
        interaction: &InteractionEvent,
        text: &str,
    ) -> Result<(), SessionError> {
        let id = InteractionId::from(parse_id(&interaction.id)?);
        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new().content(text),
        );
        self.http
            .create_interaction_response(id, &interaction.token, &response, Vec::new())
            .await
            .map_err(|e| SessionError::Send(e.to_string()))
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Serenity event handler forwarding everything to the dispatcher
struct GatewayHandler {
    dispatcher: Arc<EventDispatcher<DiscordSession>>,
}

#[async_trait]
impl EventHandler for GatewayHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(
            guilds = ready.guilds.len(),
            "{} is connected!",
            ready.user.name
        );
    }

    async fn resume(&self, _ctx: Context, _: ResumedEvent) {
        tracing::info!("Gateway session resumed");
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        let outcome = self.dispatcher.dispatch(message_event(&msg)).await;
        tracing::debug!(message_id = %msg.id, "Dispatch outcome: {:?}", outcome);
    }

    async fn interaction_create(&self, _ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            let outcome = self.dispatcher.dispatch(interaction_event(&command)).await;
            tracing::debug!(interaction_id = %command.id, "Dispatch outcome: {:?}", outcome);
        }
    }
}

fn message_event(msg: &Message) -> IncomingEvent {
    let mut author = User::new(msg.author.id.to_string()).with_username(msg.author.name.clone());
    if msg.author.bot {
        author = author.as_bot();
    }

    let mut event = MessageEvent::new(
        msg.id.to_string(),
        msg.channel_id.to_string(),
        author,
        msg.content.clone(),
    );
    if let Some(guild_id) = msg.guild_id {
        event = event.with_guild(guild_id.to_string());
    }
    event.into()
}

fn interaction_event(command: &CommandInteraction) -> IncomingEvent {
    let user = User::new(command.user.id.to_string()).with_username(command.user.name.clone());

    let mut event = InteractionEvent::new(
        command.id.to_string(),
        command.token.clone(),
        command.channel_id.to_string(),
        user,
        command.data.name.clone(),
    );
    if let Some(guild_id) = command.guild_id {
        event = event.with_guild(guild_id.to_string());
    }
    event.into()
}

/// One authenticated gateway connection.
///
/// `open` -> `register_commands` -> `serve` -> `close`. Once `open` has
/// succeeded, hand it to `run_gateway`, which reaches `close` on every path.
pub struct DiscordGateway {
    client: Client,
    session: Arc<DiscordSession>,
    dispatcher: Arc<EventDispatcher<DiscordSession>>,
    guild_id: GuildId,
    state: SessionState,
}

impl DiscordGateway {
    /// Authenticate and build the gateway client
    pub async fn open(config: &Config) -> Result<Self, SessionError> {
        let guild_id = config
            .guild_snowflake()
            .map(GuildId::from)
            .map_err(|e| SessionError::InvalidId(e.to_string()))?;

        let http = Arc::new(Http::new(config.bot_token()));

        let me = http
            .get_current_user()
            .await
            .map_err(|e| SessionError::Auth(e.to_string()))?;
        let app = http
            .get_current_application_info()
            .await
            .map_err(|e| SessionError::Auth(e.to_string()))?;
        http.set_application_id(app.id);

        tracing::info!(user_id = %me.id, "Authenticated as {}", me.name);

        let session = Arc::new(DiscordSession {
            http,
            info: BotInfo::new(me.id.to_string(), me.name.clone()),
        });
        let dispatcher = Arc::new(EventDispatcher::with_defaults(Arc::clone(&session)));

        let handler = GatewayHandler {
            dispatcher: Arc::clone(&dispatcher),
        };
        let client = Client::builder(config.bot_token(), intents())
            .event_handler(handler)
            .application_id(app.id)
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        let state = SessionState::Unopened.advance(SessionState::Open)?;

        Ok(Self {
            client,
            session,
            dispatcher,
            guild_id,
            state,
        })
    }
}

#[async_trait(?Send)]
impl Gateway for DiscordGateway {
    /// Declare every slash command to the configured guild
    async fn register_commands(&self) -> Result<usize, SessionError> {
        let definitions = self.dispatcher.commands().definitions();

        for def in &definitions {
            let builder = CreateCommand::new(def.name.as_str()).description(def.description.as_str());
            let created = self
                .guild_id
                .create_command(self.session.http(), builder)
                .await
                .map_err(|e| SessionError::CommandRegistration {
                    name: def.name.clone(),
                    reason: e.to_string(),
                })?;
            tracing::info!(command_id = %created.id, guild_id = %self.guild_id, "Registered /{}", def.name);
        }

        Ok(definitions.len())
    }

    /// Run the gateway until `shutdown` resolves or the gateway fails
    async fn serve(&mut self, shutdown: ShutdownSignal) -> Result<(), BotError> {
        tracing::debug!(state = %self.state, "Starting gateway");
        tokio::select! {
            res = self.client.start() => {
                res.map_err(|e| SessionError::Transport(e.to_string()))?;
                tracing::warn!("Gateway stopped without a shutdown signal");
                Ok(())
            }
            res = shutdown => Ok(res?),
        }
    }

    /// Shut down every shard
    async fn close(self) {
        self.client.shard_manager.shutdown_all().await;
        match self.state.advance(SessionState::Closed) {
            Ok(state) => tracing::info!(%state, "Discord session closed"),
            Err(e) => tracing::warn!("{}", e),
        }
    }
}
