//! Burn-in overlay rendering.
//!
//! A preset is a list of overlay items. Each item becomes one ffmpeg
//! `drawtext` filter; the filters are chained with `,` into the `-vf`
//! expression. Item values go through `${key}` substitution and filtergraph
//! escaping before they are emitted.

use crate::config::{Config, OverlayItem};
use crate::error::CoreResult;
use crate::userdata::UserData;
use serde_json::Value;

/// Options whose values are emitted single-quoted.
const QUOTED_OPTIONS: [&str; 2] = ["text", "timecode"];

/// Overlay item key that expands a named font style.
const FONT_KEY: &str = "font";

/// Escapes the filtergraph separators `:` and `,` in an option value.
#[must_use]
pub fn escape_filter_value(value: &str) -> String {
    value.replace(':', "\\:").replace(',', "\\,")
}

/// Renders a config value the way it should appear in a filter option.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Builder for a single `drawtext` filter.
#[derive(Debug, Default, Clone)]
pub struct DrawText {
    options: Vec<String>,
}

impl DrawText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key=value`. The value must already be escaped.
    #[must_use]
    pub fn option(mut self, key: &str, value: &str) -> Self {
        self.options.push(format!("{key}={value}"));
        self
    }

    /// Adds `key='value'`. The value must already be escaped.
    #[must_use]
    pub fn quoted_option(mut self, key: &str, value: &str) -> Self {
        self.options.push(format!("{key}='{value}'"));
        self
    }

    /// Builds the `drawtext=...` filter string.
    #[must_use]
    pub fn build(self) -> String {
        format!("drawtext={}", self.options.join(":"))
    }
}

/// Builder for constructing video filter chains
#[derive(Debug, Default)]
pub struct VideoFilterChain {
    filters: Vec<String>,
}

impl VideoFilterChain {
    /// Creates a new empty filter chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter to the chain, ignoring empty ones
    #[must_use]
    pub fn add_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        if !filter.is_empty() {
            self.filters.push(filter);
        }
        self
    }

    /// Adds every filter from `filters`, in order
    #[must_use]
    pub fn add_filters<I, S>(self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        filters
            .into_iter()
            .fold(self, |chain, filter| chain.add_filter(filter))
    }

    /// Builds the filter chain into a single filter string
    #[must_use]
    pub fn build(self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(","))
        }
    }
}

/// Renders one overlay item into a `drawtext` filter.
///
/// Keys are processed in config order. A `font` key naming a configured font
/// first emits that font's options, then itself.
#[must_use]
pub fn render_item(item: &OverlayItem, config: &Config, userdata: &UserData) -> String {
    let mut drawtext = DrawText::new();

    for (key, value) in item {
        let raw = value_to_string(value);

        if key == FONT_KEY {
            match config.font(&raw) {
                Some(font) => {
                    for (font_key, font_value) in font {
                        let font_value = escape_filter_value(&value_to_string(font_value));
                        drawtext = drawtext.option(font_key, &font_value);
                    }
                }
                None => log::warn!("Font '{raw}' is not defined in the config file"),
            }
        }

        let rendered = escape_filter_value(&userdata.substitute(&raw));
        drawtext = if QUOTED_OPTIONS.contains(&key.as_str()) {
            drawtext.quoted_option(key, &rendered)
        } else {
            drawtext.option(key, &rendered)
        };
    }

    drawtext.build()
}

/// Renders every item of the named preset into `drawtext` filters.
pub fn render_overlay(
    config: &Config,
    preset_name: &str,
    userdata: &UserData,
) -> CoreResult<Vec<String>> {
    let items = config.preset(preset_name)?;
    log::debug!("Rendering preset '{}' with {} item(s)", preset_name, items.len());

    Ok(items
        .iter()
        .map(|item| render_item(item, config, userdata))
        .collect())
}
