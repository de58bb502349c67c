//! fleetlog library root.
//! Exposes the CLI parser, the high-level run() function and the core
//! operations (registry, records, calendar, report export) used by any front end.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use models::entity::EntityKind;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command),
        Commands::Machine { action } => commands::entity::handle(EntityKind::Machine, action, cfg),
        Commands::Driver { action } => commands::entity::handle(EntityKind::Driver, action, cfg),
        Commands::Counterparty { action } => {
            commands::entity::handle(EntityKind::Counterparty, action, cfg)
        }
        Commands::Record { action } => commands::record::handle(action, cfg),
        Commands::Calendar { .. } => commands::calendar::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point called by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Configuration is read once and handed down; nothing reads it globally.
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
