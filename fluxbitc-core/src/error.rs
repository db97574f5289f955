// ============================================================================
// fluxbitc-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the fluxbitc Core Library
//
// Every fallible operation in the library returns `CoreResult<T>`. Errors are
// surfaced to the user as a single terminal message; there is no retry or
// recovery logic anywhere in the pipeline.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the fluxbitc core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Config file '{}' does not exist", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Definition of preset '{0}' does not exist in the config file")]
    PresetNotFound(String),

    #[error("Definition of preset '{0}' does not have the `items` key")]
    PresetMissingItems(String),

    #[error("Badly formatted data entry '{0}'")]
    BadDataEntry(String),

    #[error("Input file '{}' does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input file '{}' does not have any video streams", .0.display())]
    NoVideoStream(PathBuf),

    #[error("Variable framerate video streams are not supported")]
    VariableFrameRate,

    #[error("Invalid frame rate '{0}'")]
    InvalidFrameRate(String),

    #[error("Video stream information error: {0}")]
    VideoInfo(String),

    #[error("Failed to parse JSON output: {0}")]
    JsonParse(String),

    #[error("There was an error while generating the encode command: {0} is disabled in the config file")]
    ToolDisabled(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Failed waiting for {0}: {1}")]
    CommandWait(String, #[source] io::Error),
}

/// Result type alias used throughout the core library.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a `CommandStart` error for a tool that could not be spawned.
pub fn command_start_error(tool: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(tool.into(), err)
}

/// Builds a `CommandFailed` error from a finished process.
pub fn command_failed_error(
    tool: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(tool.into(), status, stderr.into())
}

/// Builds a `CommandWait` error for a process whose status could not be collected.
pub fn command_wait_error(tool: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(tool.into(), err)
}
