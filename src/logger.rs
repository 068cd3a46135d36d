use log::LevelFilter;

/// Initialize the logger, honoring `RUST_LOG` on top of the given level.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}
