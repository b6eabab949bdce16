//! Configuration types for orrery scenes.
//!
//! A [`SystemConfig`] describes every body plus the timing and input
//! settings, and round-trips through JSON. The default configuration is the
//! built-in solar system from [`crate::presets`].

use crate::body::{Body, Rgb};
use crate::error::ConfigError;
use crate::scene::{SceneSettings, MAX_SPEED_SCALE};
use crate::time::TickPolicy;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

fn default_speed_scale() -> f64 {
    1.0
}

fn default_star_count() -> usize {
    200
}

fn default_window_size() -> [f32; 2] {
    [1200.0, 800.0]
}

/// One body as written in a configuration file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub color: Rgb,
    /// Offset of the body from its orbit centre; its length is the orbit radius.
    pub orbit_offset: [f64; 2],
    pub diameter: f64,
    /// Revolutions per reference period; zero for a static body.
    #[serde(default)]
    pub angular_speed: f64,
    /// Offset of the orbit centre from the shared reference point.
    #[serde(default)]
    pub reference_offset: [f64; 2],
}

impl BodyConfig {
    pub fn to_body(&self) -> Body {
        Body::new(self.name.clone(), self.color, DVec2::from(self.orbit_offset), self.diameter)
            .with_angular_speed(self.angular_speed)
            .with_reference_offset(DVec2::from(self.reference_offset))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("body name is empty".into()));
        }
        if !(self.diameter.is_finite() && self.diameter > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "body '{}' has diameter {}, expected a positive number",
                self.name, self.diameter
            )));
        }
        let finite = self.angular_speed.is_finite()
            && self.orbit_offset.iter().all(|v| v.is_finite())
            && self.reference_offset.iter().all(|v| v.is_finite());
        if !finite {
            return Err(ConfigError::Invalid(format!(
                "body '{}' has a non-finite speed or offset",
                self.name
            )));
        }
        Ok(())
    }
}

/// Pan distances for keyboard and mouse input, in pixels.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PanConfig {
    /// Distance per arrow key press.
    pub key_step: f64,
    /// Distance per drag event, per axis.
    pub drag_step: f64,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            key_step: 10.0,
            drag_step: 5.0,
        }
    }
}

/// Complete orrery configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SystemConfig {
    pub name: String,
    /// Sleep between ticks of one body worker, in milliseconds.
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub tick_policy: TickPolicy,
    /// Multiplier on every body's phase step (1.0 = normal speed).
    #[serde(default = "default_speed_scale")]
    pub speed_scale: f64,
    #[serde(default)]
    pub pan: PanConfig,
    /// Number of background stars.
    #[serde(default = "default_star_count")]
    pub star_count: usize,
    /// Initial window size in logical pixels.
    #[serde(default = "default_window_size")]
    pub window_size: [f32; 2],
    /// Bodies in draw order.
    pub bodies: Vec<BodyConfig>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        crate::presets::solar_system()
    }
}

impl SystemConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot be animated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bodies.is_empty() {
            return Err(ConfigError::Invalid("configuration has no bodies".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick interval must be at least 1 ms".into()));
        }
        if !(self.speed_scale.is_finite() && (0.0..=MAX_SPEED_SCALE).contains(&self.speed_scale)) {
            return Err(ConfigError::Invalid(format!(
                "speed scale {} must be between 0 and {}",
                self.speed_scale, MAX_SPEED_SCALE
            )));
        }
        let steps = [self.pan.key_step, self.pan.drag_step];
        if !steps.iter().all(|s| s.is_finite() && *s > 0.0) {
            return Err(ConfigError::Invalid("pan steps must be positive".into()));
        }
        if !self.window_size.iter().all(|s| s.is_finite() && *s > 0.0) {
            return Err(ConfigError::Invalid("window size must be positive".into()));
        }
        self.bodies.iter().try_for_each(BodyConfig::validate)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            tick_interval: self.tick_interval(),
            tick_policy: self.tick_policy,
            speed_scale: self.speed_scale,
        }
    }

    /// Construct every body, in draw order.
    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.bodies.iter().map(BodyConfig::to_body)
    }

    /// The reference point that centres the system in the configured window.
    pub fn initial_reference_point(&self) -> DVec2 {
        DVec2::new(self.window_size[0] as f64, self.window_size[1] as f64) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> &'static str {
        r#"{
            "name": "Binary",
            "tick_interval_ms": 10,
            "bodies": [
                { "name": "Star", "color": [255, 200, 0], "orbit_offset": [0.0, 0.0], "diameter": 20.0 },
                { "name": "Rock", "color": [120, 120, 120], "orbit_offset": [3.0, 4.0], "diameter": 4.0,
                  "angular_speed": 2.0, "reference_offset": [10.0, 0.0] }
            ]
        }"#
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = SystemConfig::from_json(minimal_json()).unwrap();

        assert_eq!(config.tick_policy, TickPolicy::Fixed);
        assert_eq!(config.speed_scale, 1.0);
        assert_eq!(config.pan, PanConfig::default());
        assert_eq!(config.star_count, 200);
        assert_eq!(config.bodies[0].angular_speed, 0.0);
    }

    #[test]
    fn test_body_config_to_body() {
        let config = SystemConfig::from_json(minimal_json()).unwrap();
        let rock = config.bodies[1].to_body();

        assert_eq!(rock.orbit_radius(), 5.0);
        assert_eq!(rock.angular_speed(), 2.0);
        assert_eq!(rock.reference_offset(), DVec2::new(10.0, 0.0));
    }

    #[test]
    fn test_rejects_empty_bodies() {
        let mut config = SystemConfig::default();
        config.bodies.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_tick_interval() {
        let mut config = SystemConfig::default();
        config.tick_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_speed_scale_range() {
        let mut config = SystemConfig::default();
        config.speed_scale = MAX_SPEED_SCALE;
        assert!(config.validate().is_ok());
        config.speed_scale = 0.0;
        assert!(config.validate().is_ok());

        config.speed_scale = 50.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.speed_scale = -0.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_diameter() {
        let mut config = SystemConfig::default();
        config.bodies[1].diameter = 0.0;
        assert!(config.validate().is_err());

        config.bodies[1].diameter = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SystemConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("orrery-config-{}.json", std::process::id()));
        let config = SystemConfig::default();

        config.save(&path).unwrap();
        let loaded = SystemConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.name, config.name);
        assert_eq!(loaded.tick_interval_ms, config.tick_interval_ms);
        assert_eq!(loaded.bodies.len(), config.bodies.len());
        for (a, b) in loaded.bodies.iter().zip(&config.bodies) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.color, b.color);
            assert!((a.diameter - b.diameter).abs() < 1e-9);
            assert!((a.angular_speed - b.angular_speed).abs() < 1e-9);
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = SystemConfig::load("/definitely/not/here/orrery.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_initial_reference_point_is_window_centre() {
        let config = SystemConfig::default();
        assert_eq!(config.initial_reference_point(), DVec2::new(600.0, 400.0));
    }
}
