use std::path::Path;
use std::time::Duration;

use scene::Palette;
use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::clock::DEFAULT_IDLE_DELAY;
use crate::layout::LayoutConfig;

/// Tunables of one globe scene. Every field has a default, so a partial
/// JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub camera: CameraConfig,
    pub layout: LayoutConfig,
    pub palette: Palette,
    pub idle_delay_ms: u64,
    /// Container width used until the first resize.
    pub initial_width_px: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            layout: LayoutConfig::default(),
            palette: Palette::default(),
            idle_delay_ms: DEFAULT_IDLE_DELAY.as_millis() as u64,
            initial_width_px: 1280.0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    /// Parsed fine but a range or rate is unusable.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config read error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GlobeConfig {
    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.idle_delay_ms)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects inverted ranges and negative rates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if camera.min_altitude > camera.max_altitude {
            return Err(ConfigError::Invalid(format!(
                "camera.min_altitude {} exceeds camera.max_altitude {}",
                camera.min_altitude, camera.max_altitude
            )));
        }
        let layout = &self.layout;
        if layout.min_shift_px > layout.max_shift_px {
            return Err(ConfigError::Invalid(format!(
                "layout.min_shift_px {} exceeds layout.max_shift_px {}",
                layout.min_shift_px, layout.max_shift_px
            )));
        }
        if layout.smoothing < 0.0 || layout.snap_px < 0.0 {
            return Err(ConfigError::Invalid(
                "layout.smoothing and layout.snap_px must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GlobeConfig};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn partial_document_keeps_defaults() {
        let cfg = GlobeConfig::from_json_str(
            r#"{"idle_delay_ms": 5000, "camera": {"max_altitude": 3.0}}"#,
        )
        .expect("valid config");
        assert_eq!(cfg.idle_delay(), Duration::from_secs(5));
        assert_eq!(cfg.camera.max_altitude, 3.0);
        assert_eq!(cfg.camera.min_altitude, 0.25);
        assert_eq!(cfg.layout, GlobeConfig::default().layout);
    }

    #[test]
    fn default_idle_delay_is_thirty_seconds() {
        assert_eq!(GlobeConfig::default().idle_delay(), Duration::from_secs(30));
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        assert!(matches!(
            GlobeConfig::from_json_str(r#"{"camera": {"max_altitude": 0.2}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GlobeConfig::from_json_str(r#"{"layout": {"min_shift_px": 400.0}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(GlobeConfig::default().validate().is_ok());
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        assert!(matches!(
            GlobeConfig::from_json_str("[1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }
}
