//! Rate Watch Bot - Telegram currency rate notifier.
//!
//! Two long-running workers: a scheduler loop broadcasting reference-pair
//! changes on fixed intra-hour slots, and the inbound dispatch loop answering
//! on-demand rate queries.

mod config;

use clap::Parser;
use config::AppConfig;
use ratewatch_alerts::{CommandRouter, HistoryStore, Notifier, Outbound, SubscriberStore, TelegramBot};
use ratewatch_feeds::{RateSource, RestRateSource};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Rate Watch Bot CLI
#[derive(Parser, Debug)]
#[command(name = "ratewatch-bot")]
#[command(about = "Telegram bot for currency rate change notifications", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Log level: trace, debug, info, warn, error (overrides config)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let config = match AppConfig::load(Path::new(&args.config)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let log_level = args.log_level.unwrap_or_else(|| config.log_level.clone());
    init_logging(&log_level);

    let reference = config.reference.pair();
    info!("🚀 Rate Watch Bot starting...");
    info!("  Reference pair: {}", reference);
    info!("  Feed: {}", config.feed_url);
    info!("  History: {}", config.history_path);
    info!("  Subscribers: {}", config.subscribers_path);

    let token = match std::env::var("BOT_TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ => {
            error!("BOT_TOKEN is not set; refusing to start");
            std::process::exit(1);
        }
    };

    let feed: Arc<dyn RateSource> = match RestRateSource::new(&config.feed_url) {
        Ok(feed) => Arc::new(feed),
        Err(e) => {
            error!("failed to build feed client: {e}");
            std::process::exit(1);
        }
    };

    // Both workers go through these mutexes, so every read-modify-write on
    // a persisted document is serialized.
    let history = Arc::new(Mutex::new(HistoryStore::new(&config.history_path)));
    let subscribers = Arc::new(Mutex::new(SubscriberStore::new(&config.subscribers_path)));

    let bot = Arc::new(TelegramBot::new(&token));

    let router = Arc::new(CommandRouter::new(
        Arc::clone(&feed),
        Arc::clone(&history),
        Arc::clone(&subscribers),
        reference.clone(),
        config.admin_chat_id,
    ));

    let notifier = Notifier::new(
        Arc::clone(&feed),
        Arc::clone(&bot) as Arc<dyn Outbound>,
        Arc::clone(&history),
        Arc::clone(&subscribers),
        reference,
    );

    tokio::spawn(async move {
        notifier.run().await;
    });

    // The dispatcher holds the main task for the life of the process.
    bot.run(router).await;
}
