// ============================================================================
// fluxbitc-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffprobe and ffmpeg
//
// This module encapsulates every interaction with the external media
// toolchain. Probing and execution sit behind traits so the pipeline can be
// exercised in tests without the real binaries.
//
// KEY COMPONENTS:
// - FfprobeExecutor / CommandFfprobeExecutor: JSON metadata probing
// - FfmpegCommandBuilder / build_encode_command: argument assembly
// - CommandRunner / ProcessRunner: synchronous execution

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains ffmpeg argument building logic and encoding settings
pub mod ffmpeg_builder;

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Contains traits and implementations for executing ffprobe commands
pub mod ffprobe_executor;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_builder::{
    AudioCodec, EncodeCommand, EncodeSettings, FfmpegCommandBuilder, ScaleMode, auto_to_none,
    build_encode_command,
};
pub use ffmpeg_executor::{CommandRunner, ProcessRunner};
pub use ffprobe_executor::{
    CommandFfprobeExecutor, FfprobeExecutor, FormatInfo, ProbeReport, SelectedStreams, StreamInfo,
};
