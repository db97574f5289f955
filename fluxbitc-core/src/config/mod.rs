//! Configuration file loading for fluxbitc.
//!
//! The configuration is a user-editable JSON file holding the external tool
//! paths, a color palette, named font styles and the burn-in presets. It is
//! read once at startup and never mutated afterwards, apart from resolving
//! font colors against the palette right after parsing.
//!
//! ```json
//! {
//!   "path": { "ffmpeg": "ffmpeg", "ffprobe": "ffprobe" },
//!   "colors": { "amber": "0xFFBF00" },
//!   "fonts": { "mono": { "fontfile": "/fonts/mono.ttf", "fontsize": 28, "fontcolor": "amber" } },
//!   "presets": { "default": { "items": [ { "text": "${heading_title}", "font": "mono", "x": 20, "y": 20 } ] } }
//! }
//! ```

mod preset;

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub use preset::{FontStyle, OverlayItem, Preset};

/// Default config file name, resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Default preset selected when none is given on the command line.
pub const DEFAULT_PRESET: &str = "default";

/// Default ffmpeg binary, looked up on `PATH`.
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Default ffprobe binary, looked up on `PATH`.
pub const DEFAULT_FFPROBE: &str = "ffprobe";

/// Font options whose key ends with this are looked up in the palette.
const COLOR_SUFFIX: &str = "color";

fn default_ffmpeg() -> Option<String> {
    Some(DEFAULT_FFMPEG.to_string())
}

fn default_ffprobe() -> Option<String> {
    Some(DEFAULT_FFPROBE.to_string())
}

/// Locations of the external tools.
///
/// A key missing from the file falls back to the bare binary name. An explicit
/// JSON `null` disables the tool: a disabled ffprobe yields an empty probe
/// report, a disabled ffmpeg makes command assembly fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPaths {
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: Option<String>,

    #[serde(default = "default_ffprobe")]
    pub ffprobe: Option<String>,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// External tool locations
    #[serde(default)]
    pub path: ToolPaths,

    /// Named colors usable as color option values (`fontcolor`, `boxcolor`, ...) in font styles
    #[serde(default)]
    pub colors: BTreeMap<String, String>,

    /// Named drawtext font styles referenced by the `font` key of overlay items
    #[serde(default)]
    pub fonts: BTreeMap<String, FontStyle>,

    /// Named burn-in presets
    #[serde(default)]
    pub presets: BTreeMap<String, Preset>,
}

impl Config {
    /// Loads and parses the configuration file at `path`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound(path.to_path_buf()));
        }

        log::debug!("Loading config file: {}", path.display());
        let contents = fs::read_to_string(path)?;
        let mut config: Config =
            serde_json::from_str(&contents).map_err(|source| CoreError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.resolve_font_colors();

        log::debug!(
            "Loaded {} preset(s), {} font(s), {} color(s)",
            config.presets.len(),
            config.fonts.len(),
            config.colors.len()
        );
        Ok(config)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(contents: &str) -> CoreResult<Self> {
        let mut config: Config =
            serde_json::from_str(contents).map_err(|source| CoreError::ConfigParse {
                path: "<inline>".into(),
                source,
            })?;
        config.resolve_font_colors();
        Ok(config)
    }

    /// Replaces color options (`fontcolor`, `boxcolor`, `bordercolor`,
    /// `shadowcolor`, ...) that name a palette entry with the palette color.
    fn resolve_font_colors(&mut self) {
        if self.colors.is_empty() {
            return;
        }

        for font in self.fonts.values_mut() {
            for (key, value) in font.iter_mut() {
                if !key.ends_with(COLOR_SUFFIX) {
                    continue;
                }
                let resolved = value.as_str().and_then(|name| self.colors.get(name));
                if let Some(color) = resolved {
                    *value = color.clone().into();
                }
            }
        }
    }

    /// Returns the overlay items of the named preset.
    pub fn preset(&self, name: &str) -> CoreResult<&[OverlayItem]> {
        let preset = self
            .presets
            .get(name)
            .ok_or_else(|| CoreError::PresetNotFound(name.to_string()))?;

        preset
            .items
            .as_deref()
            .ok_or_else(|| CoreError::PresetMissingItems(name.to_string()))
    }

    /// Looks up a font style by name.
    pub fn font(&self, name: &str) -> Option<&FontStyle> {
        self.fonts.get(name)
    }
}
