/// Application configuration
///
/// All behavioral knobs of the viewer, the upload panel and asset lookup.
/// The configuration is read once at startup from
/// `<config_dir>/mirror-3d/config.json`. Every field has a default, so a
/// partial file (or no file at all) is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// How often the viewer re-renders its scene
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Redraw on every display frame (needed for idle rotation)
    #[default]
    Continuous,
    /// Redraw only after an input event changed the view
    OnDemand,
}

/// Behavior of the 3D viewer
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    // ========== Behavior switches ==========

    /// Limit pitch to `[-vertical_limit, vertical_limit]`
    pub clamp_vertical_rotation: bool,

    /// Spin the model slowly while the user is not dragging it
    pub auto_idle_rotate: bool,

    /// Add a mouth primitive to the placeholder head
    pub include_mouth: bool,

    pub render_mode: RenderMode,

    // ========== Input ==========

    /// Radians of rotation per pixel of pointer movement
    pub rotate_sensitivity: f32,

    /// Camera units per pixel of wheel movement
    pub zoom_sensitivity: f32,

    /// Pitch limit in radians (only used when clamping)
    pub vertical_limit: f32,

    /// Yaw added per frame while idle, in radians
    pub idle_rotate_step: f32,

    // ========== Camera ==========

    pub min_distance: f32,
    pub max_distance: f32,
    pub initial_distance: f32,

    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Largest bounding-box dimension of a loaded asset after normalization
    pub target_size: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            clamp_vertical_rotation: true,
            auto_idle_rotate: true,
            include_mouth: false,
            render_mode: RenderMode::Continuous,
            rotate_sensitivity: 0.01,
            zoom_sensitivity: 0.001,
            vertical_limit: std::f32::consts::FRAC_PI_3,
            idle_rotate_step: 0.002,
            min_distance: 2.0,
            max_distance: 10.0,
            initial_distance: 5.0,
            fov_degrees: 50.0,
            target_size: 2.5,
        }
    }
}

impl ViewerConfig {
    /// The initial distance, pulled into the allowed zoom range
    pub fn clamped_initial_distance(&self) -> f32 {
        clamp_distance(self.initial_distance, self)
    }
}

/// Clamp a camera distance to the configured zoom range.
///
/// A misconfigured range (min above max) collapses to `min_distance`.
pub fn clamp_distance(distance: f32, config: &ViewerConfig) -> f32 {
    let max = config.max_distance.max(config.min_distance);
    distance.clamp(config.min_distance, max)
}

/// Behavior of the upload panel
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct UploadConfig {
    /// Artificial "processing" time before the photo is accepted
    pub simulated_delay_ms: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { simulated_delay_ms: 1500 }
    }
}

/// Where static assets are looked up
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory probed for head models
    pub model_dir: PathBuf,
    /// Model file names tried in order; the first one that loads wins
    pub candidates: Vec<String>,
    /// Directory holding the per-frame preview images
    pub preview_dir: PathBuf,
    /// Download gallery thumbnails from their URLs
    pub fetch_thumbnails: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("assets/models"),
            candidates: vec![
                "head.glb".to_string(),
                "head.gltf".to_string(),
                "head.obj".to_string(),
            ],
            preview_dir: PathBuf::from("assets/glasses"),
            fetch_thumbnails: true,
        }
    }
}

impl AssetConfig {
    /// Full paths of the model candidates, in probe order
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        self.candidates
            .iter()
            .map(|name| self.model_dir.join(name))
            .collect()
    }
}

/// Complete application configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub viewer: ViewerConfig,
    pub upload: UploadConfig,
    pub assets: AssetConfig,
}

impl AppConfig {
    /// Convert to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&json)?)
    }

    /// Load the user's configuration, falling back to defaults.
    ///
    /// The file lives in the user's config directory:
    /// - Linux: ~/.config/mirror-3d/config.json
    /// - macOS: ~/Library/Application Support/mirror-3d/config.json
    /// - Windows: %APPDATA%\mirror-3d\config.json
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::debug!("No config directory on this platform, using defaults");
            return Self::default();
        };

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("⚙️  Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("⚠️  Ignoring config: {}", e);
                Self::default()
            }
        }
    }

    /// Get the path where the configuration file is expected
    fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("mirror-3d");
        path.push("config.json");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(
            r#"{ "viewer": { "include_mouth": true, "render_mode": "on_demand" } }"#,
        )
        .unwrap();

        assert!(config.viewer.include_mouth);
        assert_eq!(config.viewer.render_mode, RenderMode::OnDemand);
        assert!(config.viewer.clamp_vertical_rotation);
        assert_eq!(config.upload.simulated_delay_ms, 1500);
        assert_eq!(config.assets, AssetConfig::default());
    }

    #[test]
    fn test_serialization() {
        let mut config = AppConfig::default();
        config.viewer.auto_idle_rotate = false;
        config.assets.candidates = vec!["face.obj".to_string()];

        let json = config.to_json().unwrap();
        let restored = AppConfig::from_json(&json).unwrap();

        assert_eq!(config, restored);
    }

    #[test]
    fn test_candidate_paths_follow_order() {
        let assets = AssetConfig::default();
        let paths = assets.candidate_paths();

        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0], PathBuf::from("assets/models/head.glb"));
        assert_eq!(paths[2], PathBuf::from("assets/models/head.obj"));
    }

    #[test]
    fn test_clamp_distance() {
        let config = ViewerConfig::default();
        assert_eq!(clamp_distance(0.5, &config), 2.0);
        assert_eq!(clamp_distance(50.0, &config), 10.0);
        assert_eq!(clamp_distance(4.0, &config), 4.0);

        let inverted = ViewerConfig {
            min_distance: 6.0,
            max_distance: 3.0,
            ..ViewerConfig::default()
        };
        assert_eq!(clamp_distance(9.0, &inverted), 6.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AppConfig::from_file(Path::new("/nonexistent/mirror-3d.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
