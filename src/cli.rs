//! CLI definitions for dialogwatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use dialogwatch_protocols::BrowserKind;

/// dialogwatch CLI.
#[derive(Debug, Parser)]
#[command(name = "dialogwatch")]
#[command(about = "Detect and answer browser-raised modal dialogs")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.dialogwatch/config.toml when present)
    #[arg(short, long, env = "DIALOGWATCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Watch a running browser and log every dialog it raises
    Watch {
        /// Browser to attach to (overrides the configuration)
        #[arg(long, value_enum)]
        browser: Option<BrowserArg>,

        /// Close every recognized dialog without answering it
        #[arg(long)]
        auto_dismiss: bool,
    },

    /// List top-level windows
    Windows {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Include hidden windows
        #[arg(long)]
        all: bool,
    },

    /// List dialog kinds and whether a typed wrapper handles them
    Kinds,

    /// Validate the configuration file
    CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BrowserArg {
    Firefox,
    #[value(alias = "ie")]
    InternetExplorer,
}

impl From<BrowserArg> for BrowserKind {
    fn from(arg: BrowserArg) -> Self {
        match arg {
            BrowserArg::Firefox => BrowserKind::Firefox,
            BrowserArg::InternetExplorer => BrowserKind::InternetExplorer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}
