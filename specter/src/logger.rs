// specter/src/logger.rs
//! Logger bootstrap for the CLI. All diagnostics go to stderr so stdout
//! stays reserved for the transformed payload.

use log::LevelFilter;

/// Initializes env_logger with an optional hard filter level.
///
/// With `None`, `RUST_LOG` from the environment applies unchanged. Safe to
/// call more than once; later calls are no-ops.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.format_timestamp(None);

    if let Some(level) = level {
        builder.filter_level(level);
    }

    let _ = builder.try_init();
}
