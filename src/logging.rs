use tracing::level_filters::LevelFilter;

/// `--ddebug` implies `--debug` and adds a hex dump of every frame.
pub fn level_for(debug: bool, ddebug: bool) -> LevelFilter {
    if ddebug {
        LevelFilter::TRACE
    } else if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

pub fn init_logging(debug: bool, ddebug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level_for(debug, ddebug))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
