//! Implementation of the encode run.
//!
//! Loads the config, prepares the plan through fluxbitc-core, reports what
//! is about to happen and then runs ffmpeg once (or prints the command on
//! `--dry-run`). Returns the process exit code.

use crate::cli::Cli;
use crate::terminal;

use fluxbitc_core::config::Config;
use fluxbitc_core::external::{CommandFfprobeExecutor, ProcessRunner, StreamInfo};
use fluxbitc_core::{
    CoreResult, EncodePlan, execute_plan, format_elapsed, format_file_size, format_probe_duration,
    prepare_encode,
};

use log::{debug, info};
use std::fs;
use std::time::Instant;

/// Short human description of a stream, e.g. "#0 h264 3840x2160 25/1 fps".
fn describe_stream(stream: &StreamInfo) -> String {
    let mut parts = vec![format!(
        "#{} {}",
        stream.index,
        stream.codec_name.as_deref().unwrap_or("unknown")
    )];
    if let (Some(w), Some(h)) = (stream.width, stream.height) {
        parts.push(format!("{w}x{h}"));
    }
    if let Some(rate) = stream.r_frame_rate.as_deref() {
        parts.push(format!("{rate} fps"));
    }
    parts.join(" ")
}

fn print_plan_summary(cli: &Cli, config: &Config, plan: &EncodePlan) {
    terminal::print_section("Initialization");
    terminal::print_status("Input", &plan.input.display().to_string(), false);
    terminal::print_status("Output", &plan.output.display().to_string(), false);
    terminal::print_status("Config", &cli.config.display().to_string(), false);

    let description = config
        .presets
        .get(&cli.preset)
        .and_then(|preset| preset.description.as_deref());
    let preset = match description {
        Some(text) => format!("{} ({text})", cli.preset),
        None => cli.preset.clone(),
    };
    terminal::print_status("Preset", &preset, true);

    terminal::print_status("Video stream", &describe_stream(&plan.video), false);
    let audio = plan
        .audio
        .as_ref()
        .map_or_else(|| "none".to_string(), describe_stream);
    terminal::print_status("Audio stream", &audio, false);

    if let Some(duration) = plan
        .format
        .as_ref()
        .and_then(|format| format.duration.as_deref())
        .and_then(format_probe_duration)
    {
        terminal::print_status("Duration", &duration, false);
    }

    let settings = &cli.encode_settings();
    terminal::print_status("Video codec", &settings.codec, true);
    terminal::print_status("Audio codec", &settings.audio_codec.to_string(), false);
    terminal::print_status("Scale", &settings.scale.to_string(), false);

    for (key, value) in plan.userdata.iter() {
        debug!("Template value {key} = {value}");
    }
}

/// Runs the encode described by `cli`, returning the exit code to use.
pub fn run_encode(cli: &Cli) -> CoreResult<i32> {
    let config = Config::load(&cli.config)?;
    let job = cli.encode_job();
    let probe = CommandFfprobeExecutor::new(config.path.ffprobe.clone());

    let plan = prepare_encode(&config, &job, &probe, chrono::Utc::now())?;
    print_plan_summary(cli, &config, &plan);

    if cli.dry_run {
        info!("");
        println!("{}", plan.command);
        return Ok(0);
    }

    terminal::print_processing("Encode starting...");
    info!("");
    let start = Instant::now();
    let outcome = execute_plan(&plan, &ProcessRunner)?;

    if !outcome.success() {
        terminal::print_failure("Encode FAILED!");
        return Ok(outcome.exit_code());
    }

    terminal::print_success(&format!(
        "Encode succeeded, your new file has been created at '{}'",
        plan.output.display()
    ));
    terminal::print_status("Encode time", &format_elapsed(start.elapsed()), false);
    if let Ok(metadata) = fs::metadata(&plan.output) {
        terminal::print_status("Output size", &format_file_size(metadata.len()), false);
    }
    Ok(0)
}
