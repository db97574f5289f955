//! FFmpeg command builder utilities
//!
//! This module turns the encode settings, the selected streams and the
//! rendered overlay filter chain into a single ffmpeg argument vector. The
//! result is deterministic for a given set of inputs.

use crate::error::{CoreError, CoreResult};
use crate::external::SelectedStreams;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Default output video codec.
pub const DEFAULT_VIDEO_CODEC: &str = "prores_ks";

/// Value meaning "let ffmpeg decide" for optional settings.
pub const AUTO: &str = "auto";

/// Turns the `"auto"` keyword into `None`.
#[must_use]
pub fn auto_to_none(value: &str) -> Option<String> {
    if value == AUTO {
        None
    } else {
        Some(value.to_string())
    }
}

/// Predefined output scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    #[default]
    Off,
    Hd1080,
    Hd720,
}

impl ScaleMode {
    /// The scale filter for this mode, keeping the aspect ratio with an even width.
    #[must_use]
    pub fn filter(self) -> Option<&'static str> {
        match self {
            ScaleMode::Off => None,
            ScaleMode::Hd1080 => Some("scale=-2:1080"),
            ScaleMode::Hd720 => Some("scale=-2:720"),
        }
    }
}

impl FromStr for ScaleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(ScaleMode::Off),
            "1080p" => Ok(ScaleMode::Hd1080),
            "720p" => Ok(ScaleMode::Hd720),
            other => Err(format!("unknown scale '{other}' (expected off, 1080p or 720p)")),
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScaleMode::Off => "off",
            ScaleMode::Hd1080 => "1080p",
            ScaleMode::Hd720 => "720p",
        })
    }
}

/// Output audio handling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AudioCodec {
    /// Map the audio stream, let ffmpeg pick the codec
    #[default]
    Auto,
    /// Drop audio
    Off,
    /// Map the audio stream and encode with the named codec
    Codec(String),
}

impl From<&str> for AudioCodec {
    fn from(s: &str) -> Self {
        match s {
            "auto" => AudioCodec::Auto,
            "off" => AudioCodec::Off,
            codec => AudioCodec::Codec(codec.to_string()),
        }
    }
}

impl FromStr for AudioCodec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AudioCodec::from(s))
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioCodec::Auto => f.write_str("auto"),
            AudioCodec::Off => f.write_str("off"),
            AudioCodec::Codec(codec) => f.write_str(codec),
        }
    }
}

/// Output encoding settings, as merged from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSettings {
    pub codec: String,
    /// `None` leaves the bitrate to the codec
    pub bitrate: Option<String>,
    pub profile: Option<String>,
    pub scale: ScaleMode,
    pub audio_codec: AudioCodec,
    pub audio_bitrate: Option<String>,
    /// Additional raw ffmpeg flags, whitespace separated
    pub extra_flags: Vec<String>,
    /// `None` lets ffmpeg pick the container from the output extension
    pub container: Option<String>,
    /// Pass `-y` to ffmpeg
    pub overwrite: bool,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            bitrate: None,
            profile: None,
            scale: ScaleMode::Off,
            audio_codec: AudioCodec::Auto,
            audio_bitrate: None,
            extra_flags: Vec::new(),
            container: None,
            overwrite: false,
        }
    }
}

impl EncodeSettings {
    /// Splits the extra flags into individual arguments.
    #[must_use]
    pub fn extra_args(&self) -> Vec<String> {
        self.extra_flags
            .join(" ")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// A fully assembled external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCommand {
    pub program: String,
    pub args: Vec<String>,
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

impl fmt::Display for EncodeCommand {
    /// Shell-style rendering, suitable for copy and paste.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Builder for creating `FFmpeg` commands with common configurations
#[derive(Debug)]
pub struct FfmpegCommandBuilder {
    program: String,
    hide_banner: bool,
    log_level: Option<String>,
    stats: bool,
    args: Vec<String>,
}

impl FfmpegCommandBuilder {
    /// Creates a new `FFmpeg` command builder with sensible defaults
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            hide_banner: true,
            log_level: Some("warning".to_string()),
            stats: true,
            args: Vec::new(),
        }
    }

    /// Sets whether to hide the `FFmpeg` banner
    #[must_use]
    pub fn with_hide_banner(mut self, hide: bool) -> Self {
        self.hide_banner = hide;
        self
    }

    /// Sets the `-loglevel` value, `None` to omit it
    #[must_use]
    pub fn with_log_level(mut self, level: Option<&str>) -> Self {
        self.log_level = level.map(str::to_string);
        self
    }

    /// Sets whether to print encoding progress (`-stats`)
    #[must_use]
    pub fn with_stats(mut self, stats: bool) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds `flag value` when `value` is set
    #[must_use]
    pub fn opt_arg(self, flag: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.arg(flag).arg(value),
            None => self,
        }
    }

    /// Builds the command with the global options first
    #[must_use]
    pub fn build(self) -> EncodeCommand {
        let mut args = Vec::with_capacity(self.args.len() + 4);
        if self.hide_banner {
            args.push("-hide_banner".to_string());
        }
        if let Some(level) = self.log_level {
            args.push("-loglevel".to_string());
            args.push(level);
        }
        if self.stats {
            args.push("-stats".to_string());
        }
        args.extend(self.args);

        EncodeCommand {
            program: self.program,
            args,
        }
    }
}

/// Assembles the burn-in encode command.
///
/// `ffmpeg` is the configured binary; `None` means ffmpeg was disabled in the
/// config file. `video_filter` is the complete `-vf` chain, if any.
pub fn build_encode_command(
    ffmpeg: Option<&str>,
    input: &Path,
    output: &Path,
    streams: &SelectedStreams<'_>,
    video_filter: Option<&str>,
    settings: &EncodeSettings,
) -> CoreResult<EncodeCommand> {
    let ffmpeg = ffmpeg.ok_or_else(|| CoreError::ToolDisabled("ffmpeg".to_string()))?;

    let mut builder = FfmpegCommandBuilder::new(ffmpeg)
        .arg("-i")
        .arg(input.to_string_lossy())
        // video stream processing
        .arg("-map")
        .arg(format!("0:{}", streams.video.index))
        .arg("-c:v")
        .arg(settings.codec.as_str())
        .opt_arg("-b:v", settings.bitrate.as_deref())
        .opt_arg("-profile:v", settings.profile.as_deref())
        .opt_arg("-vf", video_filter);

    // audio stream processing
    builder = match (&settings.audio_codec, streams.audio) {
        (AudioCodec::Off, _) | (_, None) => builder.arg("-an"),
        (codec, Some(audio)) => {
            let codec = match codec {
                AudioCodec::Codec(name) => Some(name.as_str()),
                _ => None,
            };
            builder
                .arg("-map")
                .arg(format!("0:{}", audio.index))
                .opt_arg("-c:a", codec)
                .opt_arg("-b:a", settings.audio_bitrate.as_deref())
        }
    };

    builder = builder
        .args(settings.extra_args())
        .opt_arg("-f", settings.container.as_deref());

    if settings.overwrite {
        builder = builder.arg("-y");
    }

    Ok(builder.arg(output.to_string_lossy()).build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::StreamInfo;

    fn stream(index: u32, codec_type: &str) -> StreamInfo {
        StreamInfo {
            index,
            codec_type: Some(codec_type.to_string()),
            ..Default::default()
        }
    }

    fn args(cmd: &EncodeCommand) -> Vec<&str> {
        cmd.args.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_minimal_command() {
        let video = stream(0, "video");
        let streams = SelectedStreams { video: &video, audio: None };
        let cmd = build_encode_command(
            Some("ffmpeg"),
            Path::new("/in/clip.mov"),
            Path::new("/out/proxy.mov"),
            &streams,
            None,
            &EncodeSettings::default(),
        )
        .unwrap();

        assert_eq!(cmd.program, "ffmpeg");
        assert_eq!(
            args(&cmd),
            vec![
                "-hide_banner", "-loglevel", "warning", "-stats",
                "-i", "/in/clip.mov",
                "-map", "0:0", "-c:v", "prores_ks",
                "-an",
                "/out/proxy.mov",
            ]
        );
    }

    #[test]
    fn test_full_command() {
        let video = stream(1, "video");
        let audio = stream(2, "audio");
        let streams = SelectedStreams { video: &video, audio: Some(&audio) };
        let settings = EncodeSettings {
            codec: "libx264".to_string(),
            bitrate: Some("8M".to_string()),
            profile: Some("high".to_string()),
            scale: ScaleMode::Hd720,
            audio_codec: AudioCodec::Codec("aac".to_string()),
            audio_bitrate: Some("192k".to_string()),
            extra_flags: vec!["-pix_fmt yuv420p".to_string(), "-movflags  +faststart".to_string()],
            container: Some("mp4".to_string()),
            overwrite: true,
        };
        let cmd = build_encode_command(
            Some("/opt/ffmpeg/bin/ffmpeg"),
            Path::new("/in/clip.mov"),
            Path::new("/out/proxy.mp4"),
            &streams,
            Some("scale=-2:720,drawtext=text='x'"),
            &settings,
        )
        .unwrap();

        assert_eq!(
            args(&cmd),
            vec![
                "-hide_banner", "-loglevel", "warning", "-stats",
                "-i", "/in/clip.mov",
                "-map", "0:1", "-c:v", "libx264", "-b:v", "8M", "-profile:v", "high",
                "-vf", "scale=-2:720,drawtext=text='x'",
                "-map", "0:2", "-c:a", "aac", "-b:a", "192k",
                "-pix_fmt", "yuv420p", "-movflags", "+faststart",
                "-f", "mp4",
                "-y",
                "/out/proxy.mp4",
            ]
        );
    }

    #[test]
    fn test_audio_auto_and_off() {
        let video = stream(0, "video");
        let audio = stream(1, "audio");
        let streams = SelectedStreams { video: &video, audio: Some(&audio) };

        let cmd = build_encode_command(
            Some("ffmpeg"),
            Path::new("in.mov"),
            Path::new("out.mov"),
            &streams,
            None,
            &EncodeSettings::default(),
        )
        .unwrap();
        let joined = args(&cmd).join(" ");
        assert!(joined.contains("-map 0:1"));
        assert!(!joined.contains("-c:a"));
        assert!(!joined.contains("-an"));

        let settings = EncodeSettings {
            audio_codec: AudioCodec::Off,
            audio_bitrate: Some("320k".to_string()),
            ..Default::default()
        };
        let cmd = build_encode_command(
            Some("ffmpeg"),
            Path::new("in.mov"),
            Path::new("out.mov"),
            &streams,
            None,
            &settings,
        )
        .unwrap();
        let joined = args(&cmd).join(" ");
        assert!(joined.contains("-an"));
        assert!(!joined.contains("0:1"));
        assert!(!joined.contains("-b:a"));
    }

    #[test]
    fn test_ffmpeg_disabled() {
        let video = stream(0, "video");
        let streams = SelectedStreams { video: &video, audio: None };
        let err = build_encode_command(
            None,
            Path::new("in.mov"),
            Path::new("out.mov"),
            &streams,
            None,
            &EncodeSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::ToolDisabled(_)));
    }

    #[test]
    fn test_settings_parsing() {
        assert_eq!(auto_to_none("auto"), None);
        assert_eq!(auto_to_none("10M"), Some("10M".to_string()));
        assert_eq!("1080p".parse::<ScaleMode>(), Ok(ScaleMode::Hd1080));
        assert!("4k".parse::<ScaleMode>().is_err());
        assert_eq!(ScaleMode::Hd720.filter(), Some("scale=-2:720"));
        assert_eq!(ScaleMode::Off.filter(), None);
        assert_eq!("off".parse::<AudioCodec>(), Ok(AudioCodec::Off));
        assert_eq!("pcm_s16le".parse::<AudioCodec>(), Ok(AudioCodec::Codec("pcm_s16le".to_string())));
    }

    #[test]
    fn test_command_display() {
        let cmd = FfmpegCommandBuilder::new("ffmpeg")
            .with_stats(false)
            .with_log_level(None)
            .args(["-i", "my clip.mov", "-vf", "drawtext=text='a b'"])
            .build();
        assert_eq!(
            cmd.to_string(),
            r#"ffmpeg -hide_banner -i 'my clip.mov' -vf 'drawtext=text='\''a b'\'''"#
        );
    }

    #[test]
    fn test_builder_defaults() {
        let cmd = FfmpegCommandBuilder::new("ffmpeg").with_hide_banner(false).build();
        assert_eq!(args(&cmd), vec!["-loglevel", "warning", "-stats"]);
    }
}
