//! Multi-threaded tile renderer.
//!
//! The output buffer is split into disjoint tiles, all tiles are queued, the
//! queue is shut down, and a fixed pool of worker threads drains it. Workers
//! exit as soon as the queue reports no more work.

use crate::prelude::*;
use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;

/// Number of worker threads to render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadCount {
    /// One thread per available hardware thread.
    #[default]
    Auto,
    Fixed(NonZeroUsize),
}

impl ThreadCount {
    /// Parses the command-line convention: `-1` selects [`ThreadCount::Auto`].
    pub fn from_arg(n: i64) -> Result<Self, RenderError> {
        match n {
            -1 => Ok(Self::Auto),
            n if n >= 1 => usize::try_from(n)
                .ok()
                .and_then(NonZeroUsize::new)
                .map(Self::Fixed)
                .ok_or(RenderError::InvalidThreadCount(n)),
            n => Err(RenderError::InvalidThreadCount(n)),
        }
    }

    pub fn resolve(self) -> usize {
        match self {
            Self::Auto => thread::available_parallelism().map_or(1, NonZeroUsize::get),
            Self::Fixed(n) => n.get(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub threads: ThreadCount,
    /// Base seed; each tile derives its own generator from it.
    pub seed: u64,
}

/// Per-tile seed, so output does not depend on which thread renders a tile.
fn tile_seed(seed: u64, tile_index: usize) -> u64 {
    // splitmix64 finalizer
    let mut z = seed ^ (tile_index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Renders `world` through `camera` and returns the row-major, linear
/// (un-gamma-corrected) color buffer of `image_width * image_height` pixels.
pub fn render<W: Hittable + ?Sized>(
    camera: &Camera,
    world: &W,
    options: &RenderOptions,
) -> Result<Vec<Color>, RenderError> {
    if !camera.is_initialized() {
        return Err(RenderError::CameraNotInitialized);
    }

    let width = camera.image_width;
    let height = camera.image_height();
    let num_threads = options.threads.resolve();
    let mut pixels = vec![Color::zero(); width * height];
    let started = Instant::now();

    {
        let queue = WorkQueue::new();
        let tiles = split_into_tiles(
            &mut pixels,
            width,
            camera.block_size_x,
            camera.block_size_y,
        );
        let tile_count = tiles.len();
        for tile in tiles {
            if let Err(PushError(tile)) = queue.push(tile) {
                unreachable!("tile {} queued after shutdown", tile.index);
            }
        }
        queue.shutdown();

        info!(
            "rendering {}x{} px, {} spp, depth {}, {} tiles of {}x{} on {} threads (seed {})",
            width,
            height,
            camera.samples_per_pixel,
            camera.max_depth,
            tile_count,
            camera.block_size_x,
            camera.block_size_y,
            num_threads,
            options.seed
        );

        thread::scope(|s| {
            for worker in 0..num_threads {
                let queue = &queue;
                s.spawn(move || run_worker(worker, queue, camera, world, options.seed));
            }
        });
    }

    info!("render finished in {:.2?}", started.elapsed());
    Ok(pixels)
}

fn run_worker<W: Hittable + ?Sized>(
    worker: usize,
    queue: &WorkQueue<Tile<'_>>,
    camera: &Camera,
    world: &W,
    seed: u64,
) {
    let mut rendered = 0usize;
    while let Some(mut tile) = queue.pop() {
        trace!("worker {} took tile ({}, {})", worker, tile.col, tile.row);
        let mut rng = StdRng::seed_from_u64(tile_seed(seed, tile.index));
        camera.render_tile(world, &mut tile, &mut rng);
        rendered += 1;
    }
    debug!("worker {} exiting after {} tiles", worker, rendered);
}
