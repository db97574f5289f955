// fluxbitc-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{ArgAction, Parser, ValueEnum};
use fluxbitc_core::config::{DEFAULT_CONFIG_FILE, DEFAULT_PRESET};
use fluxbitc_core::external::ffmpeg_builder::DEFAULT_VIDEO_CODEC;
use fluxbitc_core::external::{AudioCodec, EncodeSettings, ScaleMode, auto_to_none};
use fluxbitc_core::EncodeJob;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "fluxbitc burn-in timecode and video conversion utility",
    long_about = "Burns timecode and metadata overlays onto proxy video using a named preset \
                  from the config file, then transcodes the result with ffmpeg."
)]
pub struct Cli {
    /// Input filename
    #[arg(short = 'i', long = "input", value_name = "FILENAME")]
    pub input: PathBuf,

    /// Processing preset name
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_PRESET)]
    pub preset: String,

    // --- Video ---
    /// Output video codec
    #[arg(long, visible_alias = "vc", value_name = "CODEC", default_value = DEFAULT_VIDEO_CODEC)]
    pub codec: String,

    /// Output video bitrate
    #[arg(long, visible_alias = "vb", value_name = "RATE", default_value = "auto")]
    pub bitrate: String,

    /// Output video profile
    #[arg(long, visible_alias = "vp", value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Scale the video to one of the predefined standards
    #[arg(long, value_enum, default_value_t = ScaleArg::Off)]
    pub scale: ScaleArg,

    // --- Audio ---
    /// Output audio codec ("off" drops audio)
    #[arg(long, visible_alias = "ac", value_name = "CODEC", default_value = "auto")]
    pub audio_codec: String,

    /// Output audio bitrate
    #[arg(long, visible_alias = "ab", value_name = "RATE", default_value = "auto")]
    pub audio_bitrate: String,

    // --- Overlay data and extras ---
    /// Custom user data in KEY=VALUE format (repeatable)
    #[arg(short, long, value_name = "KEY=VALUE", action = ArgAction::Append)]
    pub data: Vec<String>,

    /// Additional ffmpeg flags, whitespace separated (repeatable)
    #[arg(long, value_name = "FLAGS", allow_hyphen_values = true, action = ArgAction::Append)]
    pub flags: Vec<String>,

    /// Output container format
    #[arg(long, value_name = "FORMAT", default_value = "auto")]
    pub container: String,

    /// Config filename
    #[arg(long, value_name = "FILE", env = "FLUXBITC_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override existing file check, will replace output file without asking!
    #[arg(short = 'y')]
    pub overwrite: bool,

    /// Print the ffmpeg command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Output filename
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

/// Values accepted by `--scale`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleArg {
    Off,
    #[value(name = "1080p")]
    Hd1080,
    #[value(name = "720p")]
    Hd720,
}

impl From<ScaleArg> for ScaleMode {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Off => ScaleMode::Off,
            ScaleArg::Hd1080 => ScaleMode::Hd1080,
            ScaleArg::Hd720 => ScaleMode::Hd720,
        }
    }
}

impl Cli {
    /// Merges the command-line flags into encode settings.
    #[must_use]
    pub fn encode_settings(&self) -> EncodeSettings {
        EncodeSettings {
            codec: self.codec.clone(),
            bitrate: auto_to_none(&self.bitrate),
            profile: self.profile.clone(),
            scale: self.scale.into(),
            audio_codec: AudioCodec::from(self.audio_codec.as_str()),
            audio_bitrate: auto_to_none(&self.audio_bitrate),
            extra_flags: self.flags.clone(),
            container: auto_to_none(&self.container),
            overwrite: self.overwrite,
        }
    }

    /// Builds the core encode job.
    #[must_use]
    pub fn encode_job(&self) -> EncodeJob {
        EncodeJob {
            input: self.input.clone(),
            output: self.output.clone(),
            preset: self.preset.clone(),
            data: self.data.clone(),
            settings: self.encode_settings(),
        }
    }
}
