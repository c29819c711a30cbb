use std::path::{Path, PathBuf};

use facewarp_imgproc::interpolation::InterpolationMode;
use serde::{Deserialize, Serialize};

use crate::error::IoError;

/// Interpolation mode as written in configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Bilinear interpolation.
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation.
    Nearest,
}

impl From<Interpolation> for InterpolationMode {
    fn from(value: Interpolation) -> Self {
        match value {
            Interpolation::Bilinear => InterpolationMode::Bilinear,
            Interpolation::Nearest => InterpolationMode::Nearest,
        }
    }
}

/// Describes an overlay and how it attaches to the target landmarks.
///
/// ```json
/// {
///   "overlay_image": "eyes.png",
///   "overlay_points": "eyes.txt",
///   "selected": [36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47],
///   "interpolation": "bilinear"
/// }
/// ```
///
/// Relative paths are resolved against the directory of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Path to the overlay image, usually a PNG with an alpha channel.
    pub overlay_image: PathBuf,
    /// Path to the overlay landmark file.
    pub overlay_points: PathBuf,
    /// Optional path to a triangulation file computed on the overlay points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triangulation: Option<PathBuf>,
    /// Indices of the target landmarks matching the overlay points, in order.
    ///
    /// An empty list selects every target landmark.
    #[serde(default)]
    pub selected: Vec<usize>,
    /// Interpolation used to resample the overlay.
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl OverlayConfig {
    /// Read a configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileDoesNotExist(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let mut config: OverlayConfig = serde_json::from_str(&contents)?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }

        log::debug!(
            "loaded overlay config {} with {} selected landmarks",
            path.display(),
            config.selected.len()
        );

        Ok(config)
    }

    /// Write the configuration as pretty printed JSON.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Make every relative path absolute with respect to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.overlay_image);
        resolve(&mut self.overlay_points);
        if let Some(triangulation) = self.triangulation.as_mut() {
            resolve(triangulation);
        }
    }

    /// The interpolation mode to pass to the warp.
    pub fn interpolation_mode(&self) -> InterpolationMode {
        self.interpolation.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_defaults() -> Result<(), IoError> {
        let config: OverlayConfig = serde_json::from_str(
            r#"{ "overlay_image": "eyes.png", "overlay_points": "eyes.txt" }"#,
        )?;
        assert!(config.selected.is_empty());
        assert_eq!(config.triangulation, None);
        assert_eq!(config.interpolation_mode(), InterpolationMode::Bilinear);
        Ok(())
    }

    #[test]
    fn parse_nearest_and_selection() -> Result<(), IoError> {
        let config: OverlayConfig = serde_json::from_str(
            r#"{
                "overlay_image": "eyes.png",
                "overlay_points": "eyes.txt",
                "selected": [36, 37, 38],
                "interpolation": "nearest"
            }"#,
        )?;
        assert_eq!(config.selected, vec![36, 37, 38]);
        assert_eq!(config.interpolation_mode(), InterpolationMode::Nearest);
        Ok(())
    }

    #[test]
    fn reject_unknown_interpolation() {
        let res = serde_json::from_str::<OverlayConfig>(
            r#"{ "overlay_image": "a.png", "overlay_points": "a.txt", "interpolation": "cubic" }"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn file_round_trip_resolves_paths() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("overlay.json");

        let config = OverlayConfig {
            overlay_image: "eyes.png".into(),
            overlay_points: "eyes.txt".into(),
            triangulation: Some("eyes_tri.txt".into()),
            selected: (36..48).collect(),
            interpolation: Interpolation::Nearest,
        };
        config.to_file(&path)?;

        let read = OverlayConfig::from_file(&path)?;
        assert_eq!(read.overlay_image, tmp_dir.path().join("eyes.png"));
        assert_eq!(read.overlay_points, tmp_dir.path().join("eyes.txt"));
        assert_eq!(read.triangulation, Some(tmp_dir.path().join("eyes_tri.txt")));
        assert_eq!(read.selected, config.selected);
        assert_eq!(read.interpolation, Interpolation::Nearest);
        Ok(())
    }
}
