mod args;
mod cli;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use args::Args;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;

    #[cfg(feature = "tui")]
    if !args.no_tui {
        return tui::run_with_tui(args.world);
    }

    cli::run(args.world, args.generations);
    Ok(())
}
