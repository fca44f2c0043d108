use crate::application::errors::BotError;
use crate::domain::traits::{Gateway, ShutdownSignal};

/// Drive an opened gateway through register -> serve, then close it.
///
/// `close` runs on every path, including a failed registration or a
/// gateway error, and the first error is what gets returned.
pub async fn run_gateway<G: Gateway>(mut gateway: G, shutdown: ShutdownSignal) -> Result<(), BotError> {
    let result = async {
        let registered = gateway.register_commands().await?;
        tracing::info!("Registered {} slash command(s)", registered);

        tracing::info!("Bot is now running. Press CTRL-C to exit.");
        gateway.serve(shutdown).await
    }
    .await;

    gateway.close().await;
    result
}
