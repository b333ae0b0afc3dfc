// Tunable constants for the particle field. The defaults reproduce the look of
// the site background; a host page can override any subset of them by passing
// a partial JSON object.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Upper bound on the particle set size
    pub max_particles: usize,
    /// Surface area (px^2) that earns one particle
    pub area_per_particle: f64,
    /// Velocity components are drawn from [-drift_speed, drift_speed)
    pub drift_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_alpha: f64,
    pub max_alpha: f64,
    /// Particles closer than this are joined by a line
    pub link_distance: f64,
    /// Line opacity for two coincident particles
    pub link_alpha: f64,
    pub link_width: f64,
    pub dot_color: Color,
    pub link_color: Color,
    /// Wrap each frame in a console timer
    pub profile: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            max_particles: 80,
            area_per_particle: 15000.0,
            drift_speed: 0.2,
            min_radius: 0.5,
            max_radius: 2.5,
            min_alpha: 0.1,
            max_alpha: 0.6,
            link_distance: 120.0,
            link_alpha: 0.08,
            link_width: 0.5,
            dot_color: Color::VIOLET,
            link_color: Color::PURPLE,
            profile: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "malformed field options: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid field options: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl FieldConfig {
    pub fn from_json(text: &str) -> Result<FieldConfig, ConfigError> {
        let config: FieldConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("areaPerParticle", self.area_per_particle),
            ("driftSpeed", self.drift_speed),
            ("minRadius", self.min_radius),
            ("maxRadius", self.max_radius),
            ("minAlpha", self.min_alpha),
            ("maxAlpha", self.max_alpha),
            ("linkDistance", self.link_distance),
            ("linkAlpha", self.link_alpha),
            ("linkWidth", self.link_width),
        ];
        for (name, value) in values.iter() {
            if !value.is_finite() || *value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.area_per_particle <= 0.0 {
            return Err(invalid("areaPerParticle must be positive"));
        }
        if self.link_distance <= 0.0 {
            return Err(invalid("linkDistance must be positive"));
        }
        if self.min_radius > self.max_radius {
            return Err(invalid("minRadius exceeds maxRadius"));
        }
        if self.min_alpha > self.max_alpha {
            return Err(invalid("minAlpha exceeds maxAlpha"));
        }
        if self.max_alpha > 1.0 || self.link_alpha > 1.0 {
            return Err(invalid("opacities must not exceed 1"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_particles, 80);
        assert_eq!(config.area_per_particle, 15000.0);
        assert_eq!(config.link_distance, 120.0);
        assert_eq!(config.link_alpha, 0.08);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FieldConfig::from_json(r#"{"maxParticles": 40, "linkDistance": 90}"#).unwrap();
        assert_eq!(config.max_particles, 40);
        assert_eq!(config.link_distance, 90.0);
        assert_eq!(config.drift_speed, 0.2);
        assert_eq!(config.dot_color, Color::VIOLET);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(FieldConfig::from_json("{}").unwrap(), FieldConfig::default());
    }

    #[test]
    fn rejects_malformed_json() {
        match FieldConfig::from_json("{maxParticles: 3") {
            Err(ConfigError::Parse(_)) => {}
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_inverted_ranges() {
        let err = FieldConfig::from_json(r#"{"minRadius": 3, "maxRadius": 1}"#).unwrap_err();
        assert!(err.to_string().contains("minRadius"));

        let err = FieldConfig::from_json(r#"{"minAlpha": 0.9, "maxAlpha": 0.2}"#).unwrap_err();
        assert!(err.to_string().contains("minAlpha"));
    }

    #[test]
    fn rejects_zero_area_per_particle() {
        let config = FieldConfig {
            area_per_particle: 0.0,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        let config = FieldConfig {
            drift_speed: -1.0,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FieldConfig {
            link_width: f64::NAN,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
