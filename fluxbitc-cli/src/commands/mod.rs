//! Command implementations for the CLI.

/// Burns the overlay and transcodes one input file.
pub mod encode;
