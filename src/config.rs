//! Combobox configuration.

use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use crate::node::NodeId;
use crate::state::ViewportState;
use crate::ui::virtual_scrolling::{DEFAULT_ITEM_HEIGHT, DEFAULT_OVERSCAN, DEFAULT_VIEWPORT_HEIGHT};

/// Placeholder shown in the empty text input
pub const DEFAULT_PLACEHOLDER: &str = "Select items...";

/// Tunables for a [`Combobox`](crate::app::Combobox).
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboboxConfig {
    pub placeholder: String,
    /// Estimated row height in pixels
    pub item_height: f32,
    /// Height of the list viewport in pixels
    pub viewport_height: f32,
    /// Rows rendered beyond each edge of the viewport
    pub overscan: usize,
    /// Expand every branch when a non-empty query is typed
    pub expand_all_on_search: bool,
    /// Collapse every branch when the query is cleared (local filtering only)
    pub collapse_all_on_clear: bool,
    pub default_expanded_ids: Vec<NodeId>,
    pub default_selected_ids: Vec<NodeId>,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            item_height: DEFAULT_ITEM_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            expand_all_on_search: true,
            collapse_all_on_clear: true,
            default_expanded_ids: Vec::new(),
            default_selected_ids: Vec::new(),
        }
    }
}

impl ComboboxConfig {
    /// Loads a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Builds the initial viewport state for this config.
    pub fn viewport(&self) -> ViewportState {
        ViewportState::with_sizing(self.item_height, self.viewport_height, self.overscan)
    }
}
