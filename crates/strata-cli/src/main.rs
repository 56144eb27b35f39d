//! `strata`: generate a stack of tile-world levels from the command line.

mod output;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use strata_config::{CliArgs, Config, default_config_dir};
use strata_worldgen::{TracingProgress, WorldParams, WorldgenError, generate_world};
use tracing::{error, info, warn};

fn world_params(config: &Config) -> WorldParams {
    WorldParams {
        seed: config.world.seed,
        width: config.world.width,
        height: config.world.height,
        depths: config.world.depths.clone(),
        threads: config.world.threads,
        overworld_smooth_passes: config.world.smooth_overworld,
    }
}

fn run(config: &Config) -> Result<(), WorldgenError> {
    let params = world_params(config);
    info!(
        seed = params.seed,
        width = params.width,
        height = params.height,
        depths = ?params.depths,
        "generating world"
    );

    let world = generate_world(&params, Arc::new(TracingProgress))?;

    // Highest level first, like looking down the stack.
    for level in world.levels().iter().rev() {
        if config.output.summary {
            print!("{}", output::level_summary(level));
        }
        if config.output.ascii {
            print!("{}", output::level_ascii(level));
        }
        if let Some(dir) = &config.output.png_dir {
            let path = output::write_level_png(dir, level, config.output.png_scale)?;
            info!(depth = level.depth(), path = %path.display(), "wrote preview");
        }
    }
    if config.output.summary {
        for link in world.links() {
            println!("{}", output::link_summary(link));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().or_else(default_config_dir);

    // Load or create config, then apply CLI overrides
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|d| d.join("logs"));
    strata_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));
    if config_dir.is_none() {
        warn!("No config directory available, running with defaults");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("strata: {e}");
            ExitCode::FAILURE
        }
    }
}
