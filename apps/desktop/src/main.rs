use std::{io::IsTerminal, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::{ConversationController, NotificationBus};
use storage::{load_preferences, normalize_database_url, Storage};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;
mod shell;

#[derive(Parser, Debug)]
#[command(name = "noir", about = "Terminal chat assistant")]
struct Args {
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    reply_delay_ms: Option<u64>,
    #[arg(long)]
    preferences_url: Option<String>,
    /// Disable ANSI colors.
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (mut settings, warnings) = config::load_settings(&args.config);
    if let Some(delay) = args.reply_delay_ms {
        settings.reply_delay_ms = delay;
    }
    if let Some(url) = args.preferences_url {
        settings.preferences_url = url;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    for warning in warnings {
        warn!("{warning}");
    }

    let database_url = normalize_database_url(&settings.preferences_url);
    let store = Arc::new(Storage::new(&database_url).await?);
    store.health_check().await?;
    let preferences = load_preferences(store.as_ref()).await?;
    info!(
        database_url = %database_url,
        language = preferences.language.code(),
        theme = preferences.theme.code(),
        "loaded preferences"
    );

    let controller = ConversationController::new(settings.controller_config());
    let bus = NotificationBus::new();
    let _listener = controller.attach_bus(&bus);

    let system_dark =
        render::system_prefers_dark(std::env::var("COLORFGBG").ok().as_deref());
    let colored = !args.plain && std::io::stdout().is_terminal();

    shell::Shell::new(controller, bus, store, preferences, system_dark, colored)
        .run()
        .await
}
