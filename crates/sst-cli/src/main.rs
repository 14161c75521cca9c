use anyhow::Context;
use clap::Parser;
use sst_config::SstConfig;

mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    if let Err(error) = run(cli).await {
        eprintln!("sst error: {error:#}");
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let flags = cli.global_flags();
    init_tracing(&flags)?;
    ui::init(&flags);

    // `.env` in the working directory first, then files, then `SST_*`.
    let config = SstConfig::load_with_dotenv().context("failed to load sst configuration")?;
    context::warn_unconfigured(&config);
    tracing::debug!(base_url = config.api.base_url(), "configuration loaded");

    if let cli::Commands::Auth { action } = &cli.command {
        return commands::auth::handle(action, &flags, &config).await;
    }

    let mut ctx =
        context::AppContext::init(config).context("failed to initialize sst application context")?;
    commands::dispatch::dispatch(cli.command, &mut ctx, &flags).await
}

/// `SST_LOG` overrides the level picked from `--quiet` / `--verbose`.
fn init_tracing(flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    let fallback = match (flags.quiet, flags.verbose) {
        (true, _) => "error",
        (false, true) => "debug",
        (false, false) => "warn",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("SST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
