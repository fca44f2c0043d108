use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

mod domain;
mod application;
mod infrastructure;

use application::errors::BotError;
use application::messaging::EventDispatcher;
use application::services::{run_gateway, CommandService};
use infrastructure::adapters::console::{self, ConsoleSession};
use infrastructure::adapters::discord::DiscordGateway;
use infrastructure::config::Config;
use infrastructure::shutdown::shutdown_signal;

#[derive(Parser)]
#[command(name = "hello-bot")]
#[command(about = "A minimal Discord bot answering ping, pong and /hello", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and answer events (default)
    Run,
    /// Answer lines typed on stdin, no network needed
    Console,
    /// Print the slash commands `run` registers, as JSON
    Commands,
    /// Show version
    Version,
}

fn main() -> ExitCode {
    // Initialize logging, RUST_LOG wins over the info default
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_bot(),
        Commands::Console => run_console_bot(),
        Commands::Commands => print_commands(),
        Commands::Version => {
            println!("hello-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime, BotError> {
    Ok(tokio::runtime::Runtime::new()?)
}

fn run_bot() -> Result<(), BotError> {
    // Config errors must surface before any runtime or socket exists
    let config = Config::from_env()?;
    tracing::info!(guild_id = %config.guild_id(), "Starting hello-bot");

    runtime()?.block_on(run_discord_bot(config))
}

async fn run_discord_bot(config: Config) -> Result<(), BotError> {
    let gateway = DiscordGateway::open(&config).await?;
    run_gateway(gateway, Box::pin(shutdown_signal())).await
}

fn run_console_bot() -> Result<(), BotError> {
    let rt = runtime()?;
    let result = rt.block_on(async {
        let session = Arc::new(ConsoleSession::stdout());
        let dispatcher = Arc::new(EventDispatcher::with_defaults(session));

        tracing::info!("Console mode: type ping, pong or /hello. Ctrl-D or Ctrl-C to exit.");
        console::serve(tokio::io::stdin(), dispatcher, Box::pin(shutdown_signal())).await
    });

    // A pending stdin read holds a blocking thread until the next line arrives
    rt.shutdown_background();
    result
}

fn print_commands() -> Result<(), BotError> {
    let definitions = CommandService::default().definitions();
    let json = serde_json::to_string_pretty(&definitions)?;
    println!("{}", json);
    Ok(())
}
