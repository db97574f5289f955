//! Preset and font style definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named set of drawtext options (`fontfile`, `fontsize`, `fontcolor`, ...).
///
/// Option order follows the config file.
pub type FontStyle = Map<String, Value>;

/// One overlay line: drawtext option name to value, in config file order.
///
/// The special key `font` pulls in the options of a named [`FontStyle`].
pub type OverlayItem = Map<String, Value>;

/// A burn-in preset.
///
/// `items` is optional at the parsing level so that a preset without it is
/// reported when it is selected, not when the file is loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preset {
    /// Free-form description shown in the run summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Overlay items, one drawtext filter each
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OverlayItem>>,
}
