//! Writing generated levels to the terminal and disk.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use strata_level::{Level, Tile};
use strata_worldgen::debug_viz::{render_ascii, render_level};
use strata_worldgen::{StairsLink, WorldgenError};

/// One-line header plus the non-empty tile counts of `level`, most common first.
pub fn level_summary(level: &Level) -> String {
    let counts = level.tile_counts();
    let mut present: Vec<(Tile, u32)> = Tile::ALL
        .iter()
        .map(|&t| (t, counts[t.id() as usize]))
        .filter(|&(_, n)| n > 0)
        .collect();
    present.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let total = level.width() as f64 * level.height() as f64;
    let mut out = format!(
        "level {} ({}x{}, seed {:#018x}, hash {:016x})\n",
        level.depth(),
        level.width(),
        level.height(),
        level.seed(),
        level.content_hash()
    );
    for (tile, n) in present {
        let _ = writeln!(
            out,
            "  {:<12} {:>7} {:>6.2}%",
            tile.name(),
            n,
            n as f64 * 100.0 / total
        );
    }
    out
}

pub fn link_summary(link: &StairsLink) -> String {
    format!(
        "stairs {} <-> {}: {} pair(s)",
        link.lower,
        link.upper,
        link.positions.len()
    )
}

/// ASCII dump with a header line.
pub fn level_ascii(level: &Level) -> String {
    format!("== level {} ==\n{}", level.depth(), render_ascii(level))
}

/// PNG path for `level` inside `dir`.
pub fn png_path(dir: &Path, level: &Level) -> PathBuf {
    dir.join(format!("level_{}.png", level.depth()))
}

/// Write a PNG preview of `level` into `dir`, creating it if needed.
pub fn write_level_png(dir: &Path, level: &Level, scale: u32) -> Result<PathBuf, WorldgenError> {
    std::fs::create_dir_all(dir)?;
    let path = png_path(dir, level);
    render_level(level, scale)?.write_png(&path)?;
    Ok(path)
}
