// ============================================================================
// fluxbitc-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the CLI
//
// All user-facing output (sections, status lines) is emitted through the
// `log` macros, so info records are printed bare. Other levels carry a
// level prefix. RUST_LOG, when set, overrides the level chosen here.
//
// USAGE:
// - default: info
// - --verbose: debug (includes the assembled ffmpeg command)
// - RUST_LOG=trace: everything

use env_logger::{Builder, Env, Target};
use log::{Level, LevelFilter};
use std::io::Write;

/// Returns the level filter for the given verbosity.
#[must_use]
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initialize the logger. Safe to call once per process.
pub fn init_logging(verbose: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(level_for(verbose).as_str()));
    builder
        .target(Target::Stdout)
        .format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{level:<5} {}", record.args()),
        });

    // A second init (e.g. from tests) is not an error worth reporting
    let _ = builder.try_init();
    log::debug!("Logger initialized with level: {}", level_for(verbose));
}
