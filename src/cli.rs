use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tile_tracer")]
#[command(about = "Multi-threaded tiled path tracer for sphere scenes")]
pub struct Args {
    /// Number of samples per pixel
    #[arg(short, long, default_value_t = 10)]
    pub samples: u32,

    /// Worker threads; -1 uses every available hardware thread
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    pub threads: i64,

    /// Image width in pixels (height follows the 3:2 aspect ratio)
    #[arg(long, default_value_t = 960)]
    pub width: usize,

    /// Maximum number of ray bounces
    #[arg(long, default_value_t = 50)]
    pub max_depth: u32,

    /// Tile edge length in pixels
    #[arg(long, default_value_t = 32)]
    pub block_size: usize,

    /// Seed for scene layout and sampling; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output path for the P3 PPM image
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}
