//! Demo configuration, deserializable from a JSON object.

use serde::{Deserialize, Serialize};

use crate::pipeline::Compositing;

/// Default offscreen target width in pixels.
pub const DEFAULT_OFFSCREEN_WIDTH: u32 = 640;
/// Default offscreen target height in pixels.
pub const DEFAULT_OFFSCREEN_HEIGHT: u32 = 480;

/// Configuration for one pipeline: offscreen target size and the
/// composite alpha policy.
///
/// Every field has a default matching the original demo, so a partial
/// (or empty) JSON object is valid input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoOptions {
    pub offscreen_width: u32,
    pub offscreen_height: u32,
    pub compositing: Compositing,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            offscreen_width: DEFAULT_OFFSCREEN_WIDTH,
            offscreen_height: DEFAULT_OFFSCREEN_HEIGHT,
            compositing: Compositing::default(),
        }
    }
}

impl DemoOptions {
    /// Parses options from a JSON object string.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
