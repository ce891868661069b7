pub mod cli;
pub mod config;
pub mod services;

use anyhow::Context;

pub use cli::Cli;
use config::AppConfig;
use services::{CoverService, CoverSources, CoverTargets};

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Resolve configuration from the arguments and render one cover.
pub fn run(cli: Cli) -> Result<(), anyhow::Error> {
    if cli.print_default_config {
        let json = serde_json::to_string_pretty(&config::AppConfig::default().cover)?;
        println!("{json}");
        return Ok(());
    }

    load_dotenv();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.assets {
        config.logo_dir = dir;
    }
    if let Some(dir) = cli.fonts {
        config.font_dir = dir;
    }

    let front = cli.front.context("--front is required")?;
    let sources = CoverSources {
        front,
        back: cli.back,
    };
    let targets = CoverTargets {
        output: cli.output,
        preview: cli.preview,
        preview_width: cli.preview_width,
    };

    let service = CoverService::new(&config);
    let output = service.render_to_files(&config.cover, &sources, &targets)?;

    if output.warnings.is_empty() {
        tracing::info!("Cover complete");
    } else {
        tracing::warn!("Cover complete with {} warning(s)", output.warnings.len());
    }
    Ok(())
}
