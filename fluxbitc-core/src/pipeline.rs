//! The burn-in pipeline: probe, derive template data, render, assemble, run.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::external::{
    CommandRunner, EncodeCommand, EncodeSettings, FfprobeExecutor, FormatInfo, StreamInfo,
    build_encode_command,
};
use crate::metadata::metadata_userdata;
use crate::overlay::{VideoFilterChain, render_overlay};
use crate::userdata::UserData;
use chrono::{DateTime, Utc};
use std::path::{self, PathBuf};
use std::process::ExitStatus;

/// One burn-in request, as given by the user.
#[derive(Debug, Clone)]
pub struct EncodeJob {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Name of the preset to render
    pub preset: String,
    /// Raw `KEY=VALUE` entries overriding the metadata-derived data
    pub data: Vec<String>,
    pub settings: EncodeSettings,
}

/// Everything resolved for a run, ready to execute.
#[derive(Debug, Clone)]
pub struct EncodePlan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub video: StreamInfo,
    pub audio: Option<StreamInfo>,
    pub format: Option<FormatInfo>,
    pub userdata: UserData,
    pub command: EncodeCommand,
}

/// Result of running the encode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOutcome {
    status: ExitStatus,
}

impl EncodeOutcome {
    #[must_use]
    pub fn new(status: ExitStatus) -> Self {
        Self { status }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// The process exit code; termination by signal maps to 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.status.code().unwrap_or(1)
    }
}

/// Resolves paths, probes the input and assembles the encode command.
///
/// `now` stamps the `heading_sub` template value.
pub fn prepare_encode<P: FfprobeExecutor + ?Sized>(
    config: &Config,
    job: &EncodeJob,
    probe: &P,
    now: DateTime<Utc>,
) -> CoreResult<EncodePlan> {
    let input = path::absolute(&job.input)?;
    let output = path::absolute(&job.output)?;

    if !input.exists() {
        return Err(CoreError::InputNotFound(input));
    }

    let report = probe.probe(&input)?;
    let streams = report.select_streams(&input)?;

    let output_name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    // metadata first, then user data on top
    let mut userdata = metadata_userdata(&output_name, streams.video, now)?;
    userdata.merge(UserData::parse_entries(&job.data)?);

    let overlays = render_overlay(config, &job.preset, &userdata)?;
    let mut chain = VideoFilterChain::new();
    if let Some(scale) = job.settings.scale.filter() {
        chain = chain.add_filter(scale);
    }
    let video_filter = chain.add_filters(overlays).build();

    let command = build_encode_command(
        config.path.ffmpeg.as_deref(),
        &input,
        &output,
        &streams,
        video_filter.as_deref(),
        &job.settings,
    )?;
    log::debug!("Encode command: {command}");

    Ok(EncodePlan {
        video: streams.video.clone(),
        audio: streams.audio.cloned(),
        format: report.format.clone(),
        input,
        output,
        userdata,
        command,
    })
}

/// Runs a prepared plan once and reports the exit status.
pub fn execute_plan<R: CommandRunner + ?Sized>(
    plan: &EncodePlan,
    runner: &R,
) -> CoreResult<EncodeOutcome> {
    let status = runner.run(&plan.command)?;
    if status.success() {
        log::debug!("Encode finished: {}", plan.output.display());
    } else {
        log::debug!("Encode failed with {status}");
    }
    Ok(EncodeOutcome::new(status))
}
