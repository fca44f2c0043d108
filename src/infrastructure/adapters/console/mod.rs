//! Console adapter for development/testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use crate::application::errors::{BotError, SessionError};
use crate::application::messaging::{EventDispatcher, MessageParser};
use crate::domain::entities::{InteractionEvent, User};
use crate::domain::traits::{BotInfo, Session, ShutdownSignal};

pub const CONSOLE_CHANNEL: &str = "console";
pub const CONSOLE_USER: &str = "console-user";

/// Console session - replies go to a writer instead of the network
pub struct ConsoleSession<W> {
    info: BotInfo,
    out: Mutex<W>,
}

impl ConsoleSession<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W: AsyncWrite + Unpin + Send> ConsoleSession<W> {
    pub fn new(out: W) -> Self {
        Self {
            info: BotInfo::new("console", "hello-bot"),
            out: Mutex::new(out),
        }
    }

    async fn write_line(&self, line: String) -> Result<(), SessionError> {
        let mut out = self.out.lock().await;
        out.write_all(line.as_bytes())
            .await
            .map_err(|e| SessionError::Send(e.to_string()))?;
        out.flush().await.map_err(|e| SessionError::Send(e.to_string()))
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Session for ConsoleSession<W> {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, SessionError> {
        self.write_line(format!("[BOT] {}\n", text)).await?;
        Ok(format!("{}-msg", channel_id))
    }

    async fn respond_to_interaction(
        &self,
        interaction: &InteractionEvent,
        text: &str,
    ) -> Result<(), SessionError> {
        self.write_line(format!("[BOT] (/{}) {}\n", interaction.command, text))
            .await
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Feed every line of `input` through the dispatcher until EOF
pub async fn run_lines<R, S>(input: R, dispatcher: Arc<EventDispatcher<S>>) -> Result<usize, BotError>
where
    R: tokio::io::AsyncRead + Unpin,
    S: Session + ?Sized,
{
    let parser = MessageParser::default();
    let user = User::new(CONSOLE_USER).with_username("you");
    let mut lines = BufReader::new(input).lines();
    let mut handled = 0;

    while let Some(line) = lines.next_line().await? {
        let id = uuid::Uuid::new_v4().to_string();
        let Some(event) = parser.parse(id, CONSOLE_CHANNEL, &line, user.clone()) else {
            continue;
        };
        let outcome = dispatcher.dispatch(event).await;
        tracing::debug!("Dispatch outcome: {:?}", outcome);
        handled += 1;
    }

    Ok(handled)
}

/// Answer `input` until EOF or until `shutdown` resolves, whichever is first
pub async fn serve<R, S>(
    input: R,
    dispatcher: Arc<EventDispatcher<S>>,
    shutdown: ShutdownSignal,
) -> Result<(), BotError>
where
    R: tokio::io::AsyncRead + Unpin,
    S: Session + ?Sized,
{
    tokio::select! {
        res = run_lines(input, dispatcher) => {
            let handled = res?;
            tracing::info!("Handled {} line(s)", handled);
            Ok(())
        }
        res = shutdown => Ok(res?),
    }
}
