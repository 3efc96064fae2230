//! dialogwatch: detect and answer browser-raised modal dialogs.

mod cli;
mod cmd_inspect;
mod cmd_watch;
mod desktop;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dialogwatch_config::{ConfigLoader, LoggingConfig};

use crate::cli::{Cli, Commands};

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Console output goes to stderr so `windows --format json` stays parseable.
    let console = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let file = match &logging.directory {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("dialogwatch")
                .filename_suffix("log")
                .max_log_files(logging.max_log_files)
                .build(log_dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keep the writer flushing until exit.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry().with(env_filter).with(console).with(file).init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Watch { browser, auto_dismiss } => {
            cmd_watch::run(config, browser.map(Into::into), auto_dismiss).await
        }
        Commands::Windows { format, all } => cmd_inspect::windows(format, all),
        Commands::Kinds => cmd_inspect::kinds(),
        Commands::CheckConfig => cmd_inspect::check_config(cli.config.as_deref()),
    }
}
