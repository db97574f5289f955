// ============================================================================
// fluxbitc-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Running the Assembled Encode Command
//
// The encode runs once, synchronously, with the terminal attached so ffmpeg's
// own `-stats` progress line and any overwrite prompt reach the user directly.
//
// KEY COMPONENTS:
// - CommandRunner: Trait for executing an EncodeCommand
// - ProcessRunner: Concrete implementation using std::process

use crate::error::{CoreResult, command_start_error, command_wait_error};
use crate::external::EncodeCommand;
use std::process::{Command, ExitStatus};

/// Trait representing something that can run an assembled command.
pub trait CommandRunner {
    /// Runs the command to completion and returns its exit status.
    ///
    /// A non-zero exit status is not an error at this level.
    fn run(&self, command: &EncodeCommand) -> CoreResult<ExitStatus>;
}

/// Runs commands as child processes with inherited stdio.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &EncodeCommand) -> CoreResult<ExitStatus> {
        log::debug!("Spawning: {command}");

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .spawn()
            .map_err(|e| {
                log::error!("Failed to start {}: {}", command.program, e);
                command_start_error(command.program.clone(), e)
            })?;

        let status = child
            .wait()
            .map_err(|e| command_wait_error(command.program.clone(), e))?;

        log::debug!("{} finished with {}", command.program, status);
        Ok(status)
    }
}
