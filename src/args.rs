use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
pub struct Args {
    /// JSON5 file with window and clear color settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Initial window width
    #[arg(long)]
    pub width: Option<u32>,
    /// Initial window height
    #[arg(long)]
    pub height: Option<u32>,
    /// Don't maximize the window on startup
    #[arg(long)]
    pub windowed: bool,
    /// Present frames without waiting for vertical sync
    #[arg(long)]
    pub no_vsync: bool,
    /// Seed for the color generator
    #[arg(short, long)]
    pub seed: Option<u64>,
}
