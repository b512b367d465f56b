//! hush-bridge - Main Entry Point
//!
//! Reads commands line by line on stdin and answers each with a JSON
//! reply on stdout. All commands funnel through a single dispatch loop,
//! which is the serialization the suppression controller requires; the
//! controller itself takes no locks.

use anyhow::Result;
use std::env;
use std::io::{self, BufRead};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hush_bridge::{AppConfig, CommandDispatcher, PlatformFactory, SuppressionController};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let debug = args.iter().any(|a| a == "--debug" || a == "-d");
    init_logging(debug);

    info!("Starting hush-bridge v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load_or_default()?;
    info!("Configuration loaded");

    // Build the platform adapter and the controller on top of it
    let adapter = PlatformFactory::create_adapter(&config.audio)
        .map_err(|e| anyhow::anyhow!("failed to create platform audio adapter: {}", e))?;
    let controller = SuppressionController::new(adapter, config.audio.managed.clone());
    let mut dispatcher = CommandDispatcher::new(controller);
    info!("Platform audio adapter ready");

    // Feed stdin lines into a channel; the loop below is the only consumer.
    let (tx, mut rx) = mpsc::channel::<String>(16);
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    println!("Commands: muteSystemSounds | unmuteSystemSounds | quit");

    loop {
        tokio::select! {
            line = rx.recv() => {
                let Some(line) = line else {
                    info!("stdin closed");
                    break;
                };
                let command = line.trim();
                if command.is_empty() {
                    continue;
                }
                if command == "quit" || command == "exit" {
                    info!("User requested exit");
                    break;
                }
                let reply = dispatcher.dispatch(command);
                println!("{}", serde_json::to_string(&reply)?);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received");
                break;
            }
        }
    }

    // Never leave the device muted, no matter how the session ended.
    if config.general.restore_on_exit && dispatcher.is_suppressed() {
        warn!("Suppression still active at shutdown, restoring");
        dispatcher.restore_on_shutdown();
    }

    info!("Application exited");
    Ok(())
}

fn init_logging(debug: bool) {
    let level = if debug {
        "hush_bridge=debug"
    } else {
        "hush_bridge=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
