//! Template data derived from the probed video stream.
//!
//! These values seed the `${key}` placeholders available to presets before
//! any user supplied `--data` entries are applied on top.

use crate::error::{CoreError, CoreResult};
use crate::external::StreamInfo;
use crate::userdata::UserData;
use chrono::{DateTime, Utc};
use std::fmt;

/// Frame number the burn-in counter starts from.
pub const DEFAULT_FRAME_START: &str = "0";

/// Timecode the burn-in timecode starts from.
pub const DEFAULT_TIMECODE_START: &str = "01:00:00:00";

/// A stream frame rate as reported by ffprobe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameRate {
    /// Plain integer rate, e.g. `25`
    Integer(u32),
    /// Rational rate, e.g. `24000/1001`
    Ratio { num: f64, den: f64 },
}

impl FrameRate {
    /// Parses `"n/d"` or a plain integer.
    pub fn parse(rate: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidFrameRate(rate.to_string());

        match rate.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.trim().parse().map_err(|_| invalid())?;
                let den: f64 = den.trim().parse().map_err(|_| invalid())?;
                if den == 0.0 || !num.is_finite() || !den.is_finite() {
                    return Err(invalid());
                }
                Ok(FrameRate::Ratio { num, den })
            }
            None => rate.trim().parse().map(FrameRate::Integer).map_err(|_| invalid()),
        }
    }

    #[must_use]
    pub fn fps(&self) -> f64 {
        match *self {
            FrameRate::Integer(fps) => f64::from(fps),
            FrameRate::Ratio { num, den } => num / den,
        }
    }
}

impl fmt::Display for FrameRate {
    /// Ratios are rounded to three decimals and always keep one decimal
    /// place (`25.0`, `23.976`); integers print as-is.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameRate::Integer(fps) => write!(f, "{fps}"),
            FrameRate::Ratio { .. } => {
                let rounded = (self.fps() * 1000.0).round() / 1000.0;
                if rounded.fract() == 0.0 {
                    write!(f, "{rounded:.1}")
                } else {
                    write!(f, "{rounded}")
                }
            }
        }
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> CoreResult<&'a str> {
    value.ok_or_else(|| CoreError::VideoInfo(format!("video stream is missing {field}")))
}

/// Builds the metadata-derived template data for a run.
///
/// Keys, in order: `frame_start`, `timecode_start`, `fps_rate`,
/// `heading_title`, `heading_sub`, `info_1`, `info_2`.
pub fn metadata_userdata(
    output_filename: &str,
    video: &StreamInfo,
    now: DateTime<Utc>,
) -> CoreResult<UserData> {
    let avg_rate = required(video.avg_frame_rate.as_deref(), "avg_frame_rate")?;
    let real_rate = required(video.r_frame_rate.as_deref(), "r_frame_rate")?;
    if avg_rate != real_rate {
        log::debug!("Frame rate mismatch: avg={avg_rate}, r={real_rate}");
        return Err(CoreError::VariableFrameRate);
    }

    let fps = FrameRate::parse(avg_rate)?;
    let width = video
        .width
        .ok_or_else(|| CoreError::VideoInfo("video stream is missing width".to_string()))?;
    let height = video
        .height
        .ok_or_else(|| CoreError::VideoInfo("video stream is missing height".to_string()))?;
    let codec_name = required(video.codec_name.as_deref(), "codec_name")?;
    let pix_fmt = required(video.pix_fmt.as_deref(), "pix_fmt")?;

    let color_info = match video.color_range.as_deref() {
        Some(range) if !range.is_empty() => format!("{range}, "),
        _ => String::new(),
    };

    let mut data = UserData::new();
    data.insert("frame_start", DEFAULT_FRAME_START);
    data.insert("timecode_start", DEFAULT_TIMECODE_START);
    data.insert("fps_rate", avg_rate);
    data.insert("heading_title", output_filename);
    data.insert("heading_sub", now.format("%Y-%m-%dT%H:%M:%SZ").to_string());
    data.insert("info_1", format!("{width}x{height}, {fps} FPS"));
    data.insert("info_2", format!("{codec_name}, {color_info}{pix_fmt}"));
    Ok(data)
}
