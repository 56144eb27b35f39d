//! Whole-world generation: every depth of a stack on a worker pool, then
//! stairs between neighbouring depths.
//!
//! Levels share no mutable state, so each is generated on its own worker.
//! Linking runs afterwards on the calling thread in ascending depth order,
//! which keeps the result independent of the thread count.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::unbounded;
use strata_level::{Level, LevelInfo};
use tracing::{debug, info, warn};

use crate::error::WorldgenError;
use crate::generator::{
    DEEPEST_DEPTH, Generator, GeneratorContext, HIGHEST_DEPTH, LevelGenerator,
    OverworldGenerator, OverworldParams, select_generator,
};
use crate::progress::ProgressSink;
use crate::seed::derive_level_seed;
use crate::stairs::select_stairs_generator;

/// What to generate.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldParams {
    /// World seed; each level's seed is derived from it and its depth.
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    /// Depths to generate. Order and duplicates do not matter.
    pub depths: Vec<i32>,
    /// Worker threads. 0 picks one per CPU core.
    pub threads: usize,
    /// Smoothing sweeps for the surface level. 0 keeps the reference pipeline.
    pub overworld_smooth_passes: u32,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 128,
            height: 128,
            depths: (DEEPEST_DEPTH..=HIGHEST_DEPTH).collect(),
            threads: 0,
            overworld_smooth_passes: 0,
        }
    }
}

impl WorldParams {
    /// Number of workers to spawn for `jobs` levels.
    pub fn worker_count(&self, jobs: usize) -> usize {
        let wanted = if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        };
        wanted.min(jobs).max(1)
    }
}

/// Stairs placed between two depths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StairsLink {
    pub lower: i32,
    pub upper: i32,
    pub positions: Vec<(i32, i32)>,
}

/// A generated stack of levels.
#[derive(Clone, Debug)]
pub struct World {
    seed: u64,
    /// Sorted by ascending depth.
    levels: Vec<Level>,
    links: Vec<StairsLink>,
}

impl World {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Levels in ascending depth order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, depth: i32) -> Option<&Level> {
        self.levels.iter().find(|l| l.depth() == depth)
    }

    /// Stairs links in ascending depth order.
    pub fn links(&self) -> &[StairsLink] {
        &self.links
    }
}

fn build_generator(
    info: LevelInfo,
    progress: Arc<dyn ProgressSink>,
    overworld_smooth_passes: u32,
) -> Result<Generator, WorldgenError> {
    if info.depth == 0 {
        let params = OverworldParams {
            smooth_passes: overworld_smooth_passes,
            ..Default::default()
        };
        return Ok(Generator::Overworld(OverworldGenerator::new(
            GeneratorContext::new(info, progress),
            params,
        )));
    }
    select_generator(info, progress)
}

fn generate_one(
    info: LevelInfo,
    progress: Arc<dyn ProgressSink>,
    overworld_smooth_passes: u32,
) -> Result<Level, WorldgenError> {
    let generator = build_generator(info, progress, overworld_smooth_passes)?;
    let mut level = generator.new_level()?;
    generator.generate(&mut level)?;
    Ok(level)
}

/// Generate every level of `params.depths` and link neighbouring depths.
///
/// # Errors
///
/// - [`WorldgenError::EmptyWorld`] if no depth is requested.
/// - [`WorldgenError::UnknownDepth`] or [`WorldgenError::Level`] if a depth or
///   the geometry is invalid. Both are reported before any worker starts.
/// - [`WorldgenError::WorkerLost`] if a worker died without reporting its level.
pub fn generate_world(
    params: &WorldParams,
    progress: Arc<dyn ProgressSink>,
) -> Result<World, WorldgenError> {
    let mut depths = params.depths.clone();
    depths.sort_unstable();
    depths.dedup();
    if depths.is_empty() {
        return Err(WorldgenError::EmptyWorld);
    }

    let mut infos = Vec::with_capacity(depths.len());
    for &depth in &depths {
        if !(DEEPEST_DEPTH..=HIGHEST_DEPTH).contains(&depth) {
            return Err(WorldgenError::UnknownDepth(depth));
        }
        let seed = derive_level_seed(params.seed, depth);
        infos.push(LevelInfo::new(seed, depth, params.width, params.height)?);
    }

    let start = Instant::now();
    let workers = params.worker_count(infos.len());
    let (task_sender, task_receiver) = unbounded::<LevelInfo>();
    let (result_sender, result_receiver) = unbounded::<(i32, Result<Level, WorldgenError>)>();

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let receiver = task_receiver.clone();
        let sender = result_sender.clone();
        let progress = Arc::clone(&progress);
        let smooth_passes = params.overworld_smooth_passes;

        let handle = std::thread::Builder::new()
            .name("level-gen-worker".into())
            .spawn(move || {
                while let Ok(info) = receiver.recv() {
                    let begun = Instant::now();
                    let result = generate_one(info, Arc::clone(&progress), smooth_passes);
                    if result.is_ok() {
                        info!(
                            depth = info.depth,
                            elapsed_ms = begun.elapsed().as_millis() as u64,
                            "level generated"
                        );
                    }
                    if sender.send((info.depth, result)).is_err() {
                        break;
                    }
                }
            })?;
        handles.push(handle);
    }
    drop(result_sender);

    for info in &infos {
        // Workers only stop once the task channel closes, so this cannot fail.
        let _ = task_sender.send(*info);
    }
    drop(task_sender);

    let mut finished: BTreeMap<i32, Result<Level, WorldgenError>> = BTreeMap::new();
    while let Ok((depth, result)) = result_receiver.recv() {
        finished.insert(depth, result);
        if finished.len() == infos.len() {
            break;
        }
    }
    for handle in handles {
        if let Err(payload) = handle.join() {
            warn!(panic = panic_message(payload.as_ref()), "generation worker panicked");
        }
    }

    let mut levels = Vec::with_capacity(infos.len());
    for info in &infos {
        match finished.remove(&info.depth) {
            Some(result) => levels.push(result?),
            None => return Err(WorldgenError::WorkerLost(info.depth)),
        }
    }

    let links = link_levels(&mut levels)?;

    debug!(
        seed = params.seed,
        levels = levels.len(),
        links = links.len(),
        workers,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "world generated"
    );

    Ok(World {
        seed: params.seed,
        levels,
        links,
    })
}

/// Text of a thread panic payload, if it carried one.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}

/// Link each pair of levels whose depths differ by one. `levels` must be
/// sorted by ascending depth.
pub fn link_levels(levels: &mut [Level]) -> Result<Vec<StairsLink>, WorldgenError> {
    let mut links = Vec::new();
    for i in 1..levels.len() {
        let (below, above) = levels.split_at_mut(i);
        let lower = &mut below[i - 1];
        let upper = &mut above[0];
        if upper.depth() != lower.depth() + 1 {
            continue;
        }

        let stairs = select_stairs_generator(&lower.info(), &upper.info());
        let positions = stairs.link(lower, upper)?;
        links.push(StairsLink {
            lower: lower.depth(),
            upper: upper.depth(),
            positions,
        });
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{ChannelProgress, NullProgress};
    use strata_level::Tile;

    fn params(depths: Vec<i32>, threads: usize) -> WorldParams {
        WorldParams {
            seed: 42,
            width: 48,
            height: 48,
            depths,
            threads,
            overworld_smooth_passes: 0,
        }
    }

    struct PanickingProgress;

    impl ProgressSink for PanickingProgress {
        fn notify(&self, label: &str, _fraction: f64) {
            panic!("progress sink failed at {label}");
        }
    }

    #[test]
    fn test_panicking_worker_reports_lost_level() {
        let result = generate_world(&params(vec![0], 1), Arc::new(PanickingProgress));
        assert!(matches!(result, Err(WorldgenError::WorkerLost(0))));
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");
        let payload: Box<dyn Any + Send> = Box::new(String::from("formatted 7"));
        assert_eq!(panic_message(payload.as_ref()), "formatted 7");
        let payload: Box<dyn Any + Send> = Box::new(7_u32);
        assert_eq!(panic_message(payload.as_ref()), "<non-string panic payload>");
    }

    #[test]
    fn test_full_stack_sorted_and_linked() {
        let world = generate_world(&params(vec![1, -3, 0, -1, -2], 2), Arc::new(NullProgress)).unwrap();
        let depths: Vec<i32> = world.levels().iter().map(Level::depth).collect();
        assert_eq!(depths, vec![-3, -2, -1, 0, 1]);
        assert_eq!(world.links().len(), 4);

        for link in world.links() {
            assert_eq!(link.upper, link.lower + 1);
            let lower = world.level(link.lower).unwrap();
            let upper = world.level(link.upper).unwrap();
            for &(x, y) in &link.positions {
                assert_eq!(lower.get(x, y), Tile::StairsUp, "depth {} at ({x}, {y})", link.lower);
                assert_eq!(upper.get(x, y), Tile::StairsDown, "depth {} at ({x}, {y})", link.upper);
            }
        }
    }

    #[test]
    fn test_thread_count_does_not_change_output() {
        let single = generate_world(&params(vec![-1, 0, 1], 1), Arc::new(NullProgress)).unwrap();
        let pooled = generate_world(&params(vec![-1, 0, 1], 3), Arc::new(NullProgress)).unwrap();
        for (a, b) in single.levels().iter().zip(pooled.levels()) {
            assert_eq!(a.content_hash(), b.content_hash(), "depth {} diverged", a.depth());
        }
        assert_eq!(single.links(), pooled.links());
    }

    #[test]
    fn test_duplicate_depths_collapse() {
        let world = generate_world(&params(vec![0, 0, -1], 0), Arc::new(NullProgress)).unwrap();
        assert_eq!(world.levels().len(), 2);
    }

    #[test]
    fn test_gaps_are_not_linked() {
        let world = generate_world(&params(vec![-3, 0], 2), Arc::new(NullProgress)).unwrap();
        assert_eq!(world.levels().len(), 2);
        assert!(world.links().is_empty());
    }

    #[test]
    fn test_empty_world_rejected() {
        let result = generate_world(&params(vec![], 1), Arc::new(NullProgress));
        assert!(matches!(result, Err(WorldgenError::EmptyWorld)));
    }

    #[test]
    fn test_unknown_depth_rejected_up_front() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let result = generate_world(&params(vec![0, 4], 2), Arc::new(ChannelProgress::new(tx)));
        assert!(matches!(result, Err(WorldgenError::UnknownDepth(4))));
        assert!(rx.try_recv().is_err(), "no level should have started");
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        let mut p = params(vec![0], 1);
        p.width = 0;
        let result = generate_world(&p, Arc::new(NullProgress));
        assert!(matches!(result, Err(WorldgenError::Level(_))));
    }

    #[test]
    fn test_progress_reports_every_level() {
        let (tx, rx) = crossbeam_channel::unbounded();
        generate_world(&params(vec![-2, -1, 0], 2), Arc::new(ChannelProgress::new(tx))).unwrap();
        let labels: Vec<String> = rx.try_iter().map(|e| e.label).collect();
        for depth in [-2, -1, 0] {
            let forming = format!("LEVEL {depth}: FORMING...");
            assert!(labels.contains(&forming), "missing {forming}");
        }
    }

    #[test]
    fn test_worker_count() {
        let p = params(vec![0], 8);
        assert_eq!(p.worker_count(3), 3);
        assert_eq!(p.worker_count(20), 8);
        let auto = params(vec![0], 0);
        assert!(auto.worker_count(5) >= 1 && auto.worker_count(5) <= 5);
    }
}
