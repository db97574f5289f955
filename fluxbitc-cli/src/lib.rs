// fluxbitc-cli/src/lib.rs
//
// Library portion of the fluxbitc CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, ScaleArg};
pub use commands::encode::run_encode;
