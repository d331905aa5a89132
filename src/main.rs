//! # Keyboard Teleop
//!
//! Drive a mobile robot from the keyboard.
//!
//! Holding a key publishes the matching velocity command; releasing it zeros
//! that axis. Keys are captured globally through evdev, so the terminal does
//! not need focus.
//!
//! # Control Flow
//!
//! 1. **Initialization**
//!    - Load configuration (first argument, default `config/default.toml`)
//!    - Set up logging with tracing subscriber
//!    - Open the keyboard and start the capture thread
//!    - Open the velocity sink
//!
//! 2. **Main Loop**
//!    - Publish a command on every handled key event
//!    - Republish the held command at `publish_rate_hz`
//!
//! 3. **Graceful Shutdown**
//!    - Ctrl+C publishes a final stop command and exits
//!
//! # Examples
//!
//! ```bash
//! cargo run --release -- config/default.toml
//! ```
//!
//! Expected output on stderr:
//! ```text
//! INFO keyboard_teleop: Keyboard Teleop v0.1.0 starting...
//! INFO keyboard_teleop::input::keyboard: Found keyboard 'AT Translated Set 2 keyboard' at: /dev/input/event3
//! INFO keyboard_teleop::teleop::runner: Publishing commands, republishing every 100ms
//! ```

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyboard_teleop::config::{Config, LoggingConfig};
use keyboard_teleop::input::keyboard::EvdevKeyboard;
use keyboard_teleop::input::spawn_source;
use keyboard_teleop::output::build_sink;
use keyboard_teleop::teleop::controller::TeleopController;
use keyboard_teleop::teleop::runner::Runner;

/// Configuration file used when no path is given
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// File name prefix for rolling log files
const LOG_FILE_PREFIX: &str = "keyboard-teleop.log";

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(&config.logging);

    info!("Keyboard Teleop v{} starting...", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {}", config_path);

    let controller = TeleopController::new(config.teleop.max_linear, config.teleop.max_angular);
    info!("{}", controller.controls_help());

    let keyboard = EvdevKeyboard::open(&config.input.device_path)
        .context("Failed to open keyboard (are you in the 'input' group?)")?;
    let events = spawn_source(keyboard)?;

    let sink = build_sink(&config.output)
        .await
        .context("Failed to open velocity sink")?;

    info!("Press Ctrl+C to exit");

    let mut runner = Runner::new(controller, sink, config.teleop.publish_rate_hz);
    runner
        .run(events, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}

/// Logs go to stderr, plus a daily rolling file when `log_dir` is set.
/// `RUST_LOG` overrides the configured level.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (file_layer, guard) = if config.log_dir.is_empty() {
        (None, None)
    } else {
        let appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            Some(fmt::layer().with_writer(writer).with_ansi(false)),
            Some(guard),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}
