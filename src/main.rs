mod aggregate;
mod app;
mod browser;
mod cli;
mod error;
mod fmt;
mod ingest;
mod markdown;
mod models;
mod narrative;
mod settings;
mod tui;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};
use error::Result;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Warnings go to stderr by default. Terminal UIs stay silent unless RUST_LOG is set.
fn init_logging(cli: &Cli) {
    let interactive = matches!(
        cli.command,
        None | Some(Commands::Dashboard { .. }) | Some(Commands::View { .. })
    );
    let default_filter = if interactive { "off" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        None => cli::dashboard::run(None, runtime.handle().clone()),
        Some(Commands::Dashboard { file }) => cli::dashboard::run(file, runtime.handle().clone()),
        Some(Commands::Summary { file }) => runtime.block_on(cli::summary::run(&file)),
        Some(Commands::View { file }) => runtime.block_on(cli::view::run(&file)),
        Some(Commands::Analyze { file }) => runtime.block_on(cli::analyze::run(&file)),
        Some(Commands::Status) => cli::status::run(),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Set { key, value } => cli::config::set(&key, &value),
        },
    }
}
