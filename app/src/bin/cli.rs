use clap::Parser;
use tracing_subscriber::EnvFilter;

use bluray_cover_lib::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    bluray_cover_lib::run(Cli::parse())
}
