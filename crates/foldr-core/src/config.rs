//! Engine tuning values, injected at construction.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pointer travel before a press on an item becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 10.0;
/// Smallest lasso extent, per axis, that counts as a rubber-band drag.
pub const DEFAULT_LASSO_MIN_EXTENT: f64 = 5.0;
/// Thumbnails stacked in the floating drag visual.
pub const DEFAULT_DRAG_PREVIEW_LIMIT: usize = 4;
/// Counter suffixes tried before giving up on a free file name.
pub const DEFAULT_MAX_NAME_ATTEMPTS: u32 = 10_000;
/// Item scale used by the grid layout helper.
pub const DEFAULT_ITEM_SCALE: f64 = 1.2;
/// Gap between the drop indicator and the item edge.
pub const DEFAULT_INDICATOR_GAP: f64 = 2.0;

/// Tuning for the drag-drop and selection engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub drag_threshold: f64,
    pub lasso_min_extent: f64,
    pub drag_preview_limit: usize,
    pub max_name_attempts: u32,
    pub item_scale: f64,
    pub indicator_gap: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            lasso_min_extent: DEFAULT_LASSO_MIN_EXTENT,
            drag_preview_limit: DEFAULT_DRAG_PREVIEW_LIMIT,
            max_name_attempts: DEFAULT_MAX_NAME_ATTEMPTS,
            item_scale: DEFAULT_ITEM_SCALE,
            indicator_gap: DEFAULT_INDICATOR_GAP,
        }
    }
}

impl EngineConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to defaults if it is absent or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid engine config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.drag_threshold, 10.0);
        assert_eq!(config.lasso_min_extent, 5.0);
        assert_eq!(config.drag_preview_limit, 4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "drag_threshold": 4.0 }"#).unwrap();
        assert_eq!(config.drag_threshold, 4.0);
        assert_eq!(config.lasso_min_extent, DEFAULT_LASSO_MIN_EXTENT);
        assert_eq!(config.max_name_attempts, DEFAULT_MAX_NAME_ATTEMPTS);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_or_default(&dir.path().join("nope.json"));
        assert_eq!(config, EngineConfig::default());
    }
}
