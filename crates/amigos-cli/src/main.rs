use std::path::PathBuf;

use amigos_core::contract::PlanTier;
use amigos_core::i18n::Language;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "amigos")]
#[command(about = "AMIGOS DE TRON CLI - contract queries and site helpers", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/amigos/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output language (es, en, pt); defaults to the configured one
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Public contract statistics
    Stats,
    /// Registration, plans and earnings of an account
    User { address: String },
    /// Matrix position of an account
    Matrix { address: String },
    /// Accounts referred by an account
    Referrals { address: String },
    /// Dividend standing of an account
    Dividends { address: String },
    /// Contract owner and service company address
    Owner,
    /// Connects a watch-only session and prints its snapshot
    Session { address: String },
    /// Plan prices
    Plans,
    /// Referral link and share URLs for a code
    Link { code: u64 },
    /// Site routes, or the route a path resolves to
    Routes { path: Option<String> },
    /// Looks up a translation key
    Translate { key: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context::load(cli.config, cli.lang, cli.json)?;

    match cli.command {
        Commands::Stats => commands::query::stats(&ctx).await?,
        Commands::User { address } => commands::query::user(&ctx, &address).await?,
        Commands::Matrix { address } => commands::query::matrix(&ctx, &address).await?,
        Commands::Referrals { address } => commands::query::referrals(&ctx, &address).await?,
        Commands::Dividends { address } => commands::query::dividends(&ctx, &address).await?,
        Commands::Owner => commands::query::owner(&ctx).await?,
        Commands::Session { address } => commands::query::session(&ctx, &address).await?,
        Commands::Plans => commands::site::plans(&ctx, &PlanTier::ALL)?,
        Commands::Link { code } => commands::site::link(&ctx, code)?,
        Commands::Routes { path } => commands::site::routes(&ctx, path.as_deref())?,
        Commands::Translate { key } => commands::site::translate(&ctx, &key)?,
    }

    Ok(())
}
