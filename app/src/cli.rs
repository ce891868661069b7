//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use cover_engine::export::DEFAULT_OUTPUT_NAME;

use crate::config::defaults::DEFAULT_PREVIEW_WIDTH;

/// Compose a printable Blu-ray cover: back | spine | front
#[derive(Parser, Debug)]
#[command(name = "bluray-cover")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Front image (PNG, JPEG or WEBP)
    #[arg(short, long, required_unless_present = "print_default_config")]
    pub front: Option<PathBuf>,

    /// Back image; without it the back panel is a solid color
    #[arg(short, long)]
    pub back: Option<PathBuf>,

    /// JSON cover configuration; missing fields take defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output JPEG
    #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
    pub output: PathBuf,

    /// Also write a downscaled PNG preview
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Preview width in pixels
    #[arg(long, default_value_t = DEFAULT_PREVIEW_WIDTH)]
    pub preview_width: u32,

    /// Directory containing bluray_white.png, bluray_black.png, bluray_blue.png
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Directory containing the DejaVu font files
    #[arg(long)]
    pub fonts: Option<PathBuf>,

    /// Print the default configuration as JSON and exit
    #[arg(long)]
    pub print_default_config: bool,
}
