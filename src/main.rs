//! Runs the anonymous relay for one forward chat.
//!
//! Usage:
//!
//! ```text
//! anonrelay [--cfg <config-path>]
//! ```
//!
//! The configuration format is documented in [`anonrelay::config`]. The
//! process checks its rights in the forward chat, seeds the ban set, and then
//! long-polls for updates until interrupted.

use std::sync::Arc;
use std::time::Duration;

use anonrelay::config::{Config, DEFAULT_CONFIG_PATH};
use anonrelay::relay::{
    adapters::{
        redis::RedisKeyValueStore,
        telegram::{
            DEFAULT_POLL_TIMEOUT_SECS, TelegramClient, UpdatePoller, api::BotCommandEntry,
            check_forward_chat_rights,
        },
    },
    domain::{BotCommand, KeyNamespace, UserId},
    ports::OperatorNotifier,
    services::{AccessGate, BroadcastNotifier, CorrespondenceLedger, Router, RouterSettings, UpdateDispatcher},
};
use camino::Utf8PathBuf;
use clap::Parser;
use eyre::WrapErr;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the config file (useful to run several relays side by side).
    #[arg(long = "cfg", default_value = DEFAULT_CONFIG_PATH)]
    cfg: Utf8PathBuf,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "anonrelay=info,warn".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config =
        Config::load(&cli.cfg).wrap_err_with(|| format!("loading config from {}", cli.cfg))?;
    let forward_chat = config.forward_chat();

    let poll_timeout = Duration::from_secs(u64::from(DEFAULT_POLL_TIMEOUT_SECS));
    let client = Arc::new(
        TelegramClient::new(config.token(), poll_timeout).wrap_err("building bot api client")?,
    );
    let me = client.get_me().await.wrap_err("fetching bot account")?;
    let membership = client
        .get_chat_member(forward_chat, UserId::new(me.id))
        .await
        .wrap_err("fetching bot membership in the forward chat")?;
    check_forward_chat_rights(forward_chat, &membership, &me)
        .wrap_err("checking bot rights in the forward chat")?;

    let store = Arc::new(
        RedisKeyValueStore::connect(&config.redis_url())
            .await
            .wrap_err("connecting to the store")?,
    );
    let namespace = KeyNamespace::new(forward_chat);
    let gate = Arc::new(AccessGate::new(Arc::clone(&store), &namespace));
    gate.initialize().await.wrap_err("seeding the ban set")?;

    let mut ledger = CorrespondenceLedger::new(Arc::clone(&store), namespace);
    if let Some(retention) = config.record_retention() {
        ledger = ledger.with_retention(retention);
    }

    let mut settings = RouterSettings::new().with_operators(config.operators());
    if let Some(username) = me.username.as_deref() {
        settings = settings.with_bot_username(username);
    }
    let router = Router::new(ledger, gate, Arc::clone(&client), settings);
    let notifier = Arc::new(BroadcastNotifier::new(
        Arc::clone(&client),
        config.operator_chats(),
    ));

    let commands = vec![BotCommandEntry {
        command: BotCommand::Ok.name().to_owned(),
        description: "check if bot is alive".to_owned(),
    }];
    if let Err(err) = client.set_my_commands(commands).await {
        notifier
            .notify(&format!("{err}\n\nwhile setting commands"))
            .await;
    }

    let dispatcher = UpdateDispatcher::new(
        router,
        Arc::clone(&client),
        Arc::clone(&notifier),
        config.start_message(),
    );
    let mut poller = UpdatePoller::new(client, DEFAULT_POLL_TIMEOUT_SECS);

    info!(%forward_chat, "relay started");
    poller.run(&dispatcher, shutdown_signal()).await;
    Ok(())
}
