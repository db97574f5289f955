//! FFprobe integration for media analysis.
//!
//! This module runs ffprobe with JSON output and deserializes the subset of
//! the report fluxbitc needs: stream indices, codec and geometry details,
//! frame rates and the container format.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::{Command, Stdio};

/// Trait for probing media files.
pub trait FfprobeExecutor {
    /// Probes `input` and returns its format and stream report.
    fn probe(&self, input: &Path) -> CoreResult<ProbeReport>;
}

/// `FfprobeExecutor` that spawns the ffprobe binary.
#[derive(Debug, Clone)]
pub struct CommandFfprobeExecutor {
    binary: Option<String>,
}

impl CommandFfprobeExecutor {
    /// Creates an executor for `binary`. `None` disables probing and every
    /// probe returns an empty report.
    #[must_use]
    pub fn new(binary: Option<String>) -> Self {
        Self { binary }
    }
}

impl FfprobeExecutor for CommandFfprobeExecutor {
    fn probe(&self, input: &Path) -> CoreResult<ProbeReport> {
        let Some(binary) = self.binary.as_deref() else {
            log::debug!("ffprobe disabled in config, skipping probe of {}", input.display());
            return Ok(ProbeReport::default());
        };

        log::debug!("Running {} on: {}", binary, input.display());
        let output = Command::new(binary)
            .args([
                "-hide_banner",
                "-show_format",
                "-show_streams",
                "-of",
                "json",
                "-loglevel",
                "quiet",
            ])
            .arg(input)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| command_start_error("ffprobe", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("could not read '{}'", input.display())
            } else {
                stderr
            };
            log::error!("ffprobe failed on {}: {}", input.display(), detail);
            return Err(command_failed_error("ffprobe", output.status, detail));
        }

        ProbeReport::from_json(&output.stdout)
    }
}

/// Container level information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatInfo {
    pub filename: Option<String>,
    pub format_name: Option<String>,
    /// Duration in seconds, as reported (decimal string)
    pub duration: Option<String>,
}

/// One media stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    #[serde(default)]
    pub index: u32,
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub pix_fmt: Option<String>,
    pub color_range: Option<String>,
    pub r_frame_rate: Option<String>,
    pub avg_frame_rate: Option<String>,
}

impl StreamInfo {
    fn is_type(&self, codec_type: &str) -> bool {
        self.codec_type.as_deref() == Some(codec_type)
    }
}

/// The streams chosen for processing: first video, first audio.
#[derive(Debug, Clone, Copy)]
pub struct SelectedStreams<'a> {
    pub video: &'a StreamInfo,
    pub audio: Option<&'a StreamInfo>,
}

/// Parsed ffprobe report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    #[serde(default)]
    pub format: Option<FormatInfo>,
    #[serde(default)]
    pub streams: Vec<StreamInfo>,
}

impl ProbeReport {
    /// Parses ffprobe's `-of json` output.
    pub fn from_json(bytes: &[u8]) -> CoreResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| CoreError::JsonParse(format!("ffprobe output: {e}")))
    }

    /// Selects the first video stream and the first audio stream.
    pub fn select_streams(&self, input: &Path) -> CoreResult<SelectedStreams<'_>> {
        let video = self
            .streams
            .iter()
            .find(|s| s.is_type("video"))
            .ok_or_else(|| CoreError::NoVideoStream(input.to_path_buf()))?;
        let audio = self.streams.iter().find(|s| s.is_type("audio"));

        log::debug!(
            "Selected video stream #{}{}",
            video.index,
            audio.map_or(String::new(), |a| format!(", audio stream #{}", a.index))
        );
        Ok(SelectedStreams { video, audio })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
        "streams": [
            { "index": 0, "codec_type": "data", "codec_name": "bin_data" },
            { "index": 1, "codec_type": "audio", "codec_name": "pcm_s24le", "sample_rate": "48000" },
            { "index": 2, "codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080,
              "pix_fmt": "yuv420p", "color_range": "tv", "r_frame_rate": "24000/1001", "avg_frame_rate": "24000/1001" },
            { "index": 3, "codec_type": "audio", "codec_name": "aac" },
            { "index": 4, "codec_type": "video", "codec_name": "mjpeg" }
        ],
        "format": { "filename": "clip.mov", "format_name": "mov,mp4,m4a,3gp,3g2,mj2", "duration": "12.345000" }
    }"#;

    #[test]
    fn test_parse_report() {
        let report = ProbeReport::from_json(REPORT.as_bytes()).unwrap();
        assert_eq!(report.streams.len(), 5);
        assert_eq!(report.format.as_ref().unwrap().duration.as_deref(), Some("12.345000"));
        assert_eq!(report.streams[2].width, Some(1920));
    }

    #[test]
    fn test_select_first_video_and_audio() {
        let report = ProbeReport::from_json(REPORT.as_bytes()).unwrap();
        let streams = report.select_streams(Path::new("clip.mov")).unwrap();
        assert_eq!(streams.video.index, 2);
        assert_eq!(streams.audio.unwrap().index, 1);
    }

    #[test]
    fn test_no_video_stream() {
        let report = ProbeReport::from_json(br#"{ "streams": [ { "index": 0, "codec_type": "audio" } ] }"#)
            .unwrap();
        let err = report.select_streams(Path::new("/media/audio.wav")).unwrap_err();
        assert!(matches!(err, CoreError::NoVideoStream(_)));
        assert_eq!(
            err.to_string(),
            "Input file '/media/audio.wav' does not have any video streams"
        );
    }

    #[test]
    fn test_empty_report_from_disabled_probe() {
        let probe = CommandFfprobeExecutor::new(None);
        let report = probe.probe(Path::new("whatever.mov")).unwrap();
        assert_eq!(report, ProbeReport::default());
        assert!(report.select_streams(Path::new("whatever.mov")).is_err());
    }

    #[test]
    fn test_invalid_json() {
        let err = ProbeReport::from_json(b"not json").unwrap_err();
        assert!(matches!(err, CoreError::JsonParse(_)));
    }
}
