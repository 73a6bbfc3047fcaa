mod cli;
mod commands;
mod config;
mod error;
mod prompt;
mod render;

use std::io::IsTerminal;

use clap::Parser;
use engine::{EngineError, FileStore, Ledger};

use crate::{
    cli::{Cli, Format},
    commands::Context,
    error::{AppError, Result},
    render::Style,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(&cli.global)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tally={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let store = FileStore::new(settings.data_dir());
    tracing::debug!("using ledger directory {}", store.dir().display());
    let mut ledger = Ledger::load_with_key(store, settings.storage_key.as_str());

    let stdout = std::io::stdout();
    let ctx = Context {
        today: settings.today()?,
        format: cli.global.format,
        style: Style {
            color: cli.global.format == Format::Text && stdout.is_terminal(),
        },
    };

    let mut confirm = |message: &str| match prompt::confirm(message) {
        Ok(answer) => answer,
        Err(err) => {
            tracing::warn!("confirmation prompt failed: {err}");
            false
        }
    };

    let mut out = stdout.lock();
    match commands::execute(&mut ledger, cli.command, &ctx, &mut confirm, &mut out) {
        Err(AppError::Engine(
            err @ (EngineError::InvalidAmount(_)
            | EngineError::InvalidDate(_)
            | EngineError::InvalidKind(_)),
        )) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
        other => other,
    }
}
