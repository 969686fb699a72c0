//! Logger setup for the pomgen binary.

/// Initialises `env_logger`: debug output with `verbose`, info otherwise.
/// `RUST_LOG` still overrides the level when set.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();
}
