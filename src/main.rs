//! Telegram trading-signal relay bot
//!
//! Watches a source channel, forwards reformatted signal and result
//! announcements to a target channel, and posts a daily accuracy report.

use chrono::Local;
use clap::{Parser, Subcommand};
use signal_relay::{
    config::Config,
    dispatch::Dispatcher,
    format,
    notify::{MessageSink, Notifier},
    scheduler::ReportScheduler,
    source::{InboundMessage, MessageSource, TelegramSource},
    stats::StatsStore,
};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "signal-relay")]
#[command(about = "Relays trading signals between Telegram channels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay bot
    Run,
    /// Send the daily report now (does not reset the counters)
    Report,
    /// Print the current accuracy record
    Stats,
    /// Test Telegram notification
    TestNotify,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Run => run_bot(config).await,
        Commands::Report => send_report(config).await,
        Commands::Stats => show_stats(config).await,
        Commands::TestNotify => test_notify(config).await,
    }
}

async fn run_bot(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting signal relay bot");

    let notifier = Notifier::new(
        config.telegram.bot_token.clone(),
        config.telegram.target_chat_id.clone(),
    );

    // Send startup notification
    if let Err(e) = notifier.startup().await {
        tracing::warn!("Failed to send startup notification: {}", e);
    }

    let sink: Arc<dyn MessageSink> = Arc::new(notifier);
    let store = Arc::new(RwLock::new(StatsStore::load_or_default(
        &config.stats.path,
    )));

    // Inbound message channel
    let (tx, rx) = mpsc::channel::<InboundMessage>(500);

    let source = TelegramSource::new(
        config.telegram.bot_token.clone(),
        config.telegram.source_chat_id,
    );
    tokio::spawn(async move {
        if let Err(e) = source.run(tx).await {
            tracing::error!("Telegram source error: {}", e);
        }
    });
    tracing::info!("Monitoring channel: {}", config.telegram.source_chat_id);
    tracing::info!("Forwarding to: {}", config.telegram.target_chat_id);

    // Daily report task
    let scheduler = ReportScheduler::new(sink.clone(), store.clone(), config.report.hour);
    tokio::spawn(async move {
        scheduler.run().await;
    });

    tracing::info!("Listening for messages...");
    let dispatcher = Dispatcher::new(sink, store);
    dispatcher.run(rx).await;

    Ok(())
}

async fn send_report(config: Config) -> anyhow::Result<()> {
    let store = StatsStore::load_or_default(&config.stats.path);
    let report = format::daily_report(store.record(), Local::now());

    let notifier = Notifier::new(
        config.telegram.bot_token.clone(),
        config.telegram.target_chat_id.clone(),
    );
    notifier.send(&report).await?;

    println!("✅ Report sent to Telegram");
    Ok(())
}

async fn show_stats(config: Config) -> anyhow::Result<()> {
    let store = StatsStore::load_or_default(&config.stats.path);
    let record = store.record();

    println!("\n📊 Accuracy Record\n");
    println!("Total Signals: {}", record.total_signals);
    println!("Wins:          {}", record.wins);
    println!("Losses:        {}", record.losses);
    println!("Accuracy:      {:.1}%", record.accuracy());
    println!("Start Date:    {}", record.start_date);
    println!("Last Reset:    {}", record.last_reset);

    Ok(())
}

async fn test_notify(config: Config) -> anyhow::Result<()> {
    let notifier = Notifier::new(
        config.telegram.bot_token.clone(),
        config.telegram.target_chat_id.clone(),
    );

    notifier
        .send("🧪 **Test Notification**\n\nIf you see this, Telegram delivery is working!")
        .await?;

    println!("✅ Test notification sent!");
    Ok(())
}
