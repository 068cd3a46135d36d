use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{BufWriter, Write};
use tile_tracer::cli::Args;
use tile_tracer::logger::init_logger;
use tile_tracer::prelude::*;
use tile_tracer::scene;

fn main() -> Result<(), RenderError> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let threads = ThreadCount::from_arg(args.threads)?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut scene_rng = StdRng::seed_from_u64(seed);
    let world = scene::random_spheres(&mut scene_rng);

    let mut cam =
        scene::random_spheres_camera(args.width, args.samples, args.max_depth, args.block_size);
    cam.initialize()?;

    let pixels = render(&cam, &world, &RenderOptions { threads, seed })?;

    let mut out = BufWriter::new(File::create(&args.output)?);
    write_ppm(&mut out, cam.image_width, cam.image_height(), &pixels)?;
    out.flush()?;
    info!("wrote {}", args.output.display());

    Ok(())
}
