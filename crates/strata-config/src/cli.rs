//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Strata world generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Generate a stack of tile-world levels")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Level width in tiles.
    #[arg(long)]
    pub width: Option<u32>,

    /// Level height in tiles.
    #[arg(long)]
    pub height: Option<u32>,

    /// Comma-separated depths to generate, e.g. `-3,-2,-1,0,1`.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub depths: Option<Vec<i32>>,

    /// Generation worker threads (0 = one per CPU core).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Print every level as ASCII.
    #[arg(long)]
    pub ascii: bool,

    /// Write PNG previews into this directory.
    #[arg(long)]
    pub png_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(w) = args.width {
            self.world.width = w;
        }
        if let Some(h) = args.height {
            self.world.height = h;
        }
        if let Some(ref depths) = args.depths {
            self.world.depths = depths.clone();
        }
        if let Some(threads) = args.threads {
            self.world.threads = threads;
        }
        if args.ascii {
            self.output.ascii = true;
        }
        if let Some(ref dir) = args.png_dir {
            self.output.png_dir = Some(dir.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
