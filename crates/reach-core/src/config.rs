use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_discretization_step() -> f32 {
    0.04
}
const fn default_duplicate_tolerance() -> f32 {
    1e-4
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Resolution engine configuration.
///
/// `discretization_step` is the one knob that matters: free parameters are
/// swept over `[0, 1]` in increments of this step, so the grid has
/// `ceil(1/step) + 1` cells per free parameter. Too coarse skips solution
/// basins, too fine is combinatorially expensive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Free-parameter sweep increment in `(0, 1]` (default: 0.04).
    #[serde(default = "default_discretization_step")]
    pub discretization_step: f32,

    /// Per-joint tolerance below which two candidates count as the same
    /// solution in full-set queries (default: 1e-4).
    #[serde(default = "default_duplicate_tolerance")]
    pub duplicate_tolerance: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            discretization_step: default_discretization_step(),
            duplicate_tolerance: default_duplicate_tolerance(),
        }
    }
}

impl EngineConfig {
    /// Config with an explicit sweep step and default tolerances.
    pub fn with_step(discretization_step: f32) -> Self {
        Self {
            discretization_step,
            ..Self::default()
        }
    }

    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.discretization_step > 0.0 && self.discretization_step <= 1.0) {
            return Err(ConfigError::InvalidStep(self.discretization_step));
        }
        if !(self.duplicate_tolerance > 0.0) {
            return Err(ConfigError::InvalidDuplicateTolerance(
                self.duplicate_tolerance,
            ));
        }
        Ok(())
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert!((cfg.discretization_step - 0.04).abs() < f32::EPSILON);
    }

    #[test]
    fn with_step_overrides_step_only() {
        let cfg = EngineConfig::with_step(0.1);
        assert!((cfg.discretization_step - 0.1).abs() < f32::EPSILON);
        assert!((cfg.duplicate_tolerance - 1e-4).abs() < f32::EPSILON);
    }

    #[test]
    fn validate_rejects_nonpositive_step() {
        assert!(matches!(
            EngineConfig::with_step(0.0).validate(),
            Err(ConfigError::InvalidStep(_))
        ));
        assert!(matches!(
            EngineConfig::with_step(-0.1).validate(),
            Err(ConfigError::InvalidStep(_))
        ));
    }

    #[test]
    fn validate_rejects_step_above_one() {
        assert!(matches!(
            EngineConfig::with_step(1.5).validate(),
            Err(ConfigError::InvalidStep(_))
        ));
    }

    #[test]
    fn validate_accepts_step_of_one() {
        assert!(EngineConfig::with_step(1.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_nan_step() {
        assert!(EngineConfig::with_step(f32::NAN).validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_tolerance() {
        let cfg = EngineConfig {
            duplicate_tolerance: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidDuplicateTolerance(_))
        ));
    }

    #[test]
    fn toml_deserialization() {
        let toml_str = r"
            discretization_step = 0.1
            duplicate_tolerance = 0.001
        ";
        let cfg: EngineConfig = toml::from_str(toml_str).unwrap();
        assert!((cfg.discretization_step - 0.1).abs() < f32::EPSILON);
        assert!((cfg.duplicate_tolerance - 0.001).abs() < f32::EPSILON);
    }

    #[test]
    fn toml_defaults() {
        let cfg: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn config_from_file() {
        let dir = std::env::temp_dir().join("reach_test_engine_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("engine.toml");
        std::fs::write(&path, "discretization_step = 0.25\n").unwrap();

        let cfg = EngineConfig::from_file(&path).unwrap();
        assert!((cfg.discretization_step - 0.25).abs() < f32::EPSILON);

        // Cleanup
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn config_from_file_invalid_step_rejected() {
        let dir = std::env::temp_dir().join("reach_test_engine_config_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("engine.toml");
        std::fs::write(&path, "discretization_step = 2.0\n").unwrap();

        assert!(matches!(
            EngineConfig::from_file(&path),
            Err(ConfigError::InvalidStep(_))
        ));

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn config_from_file_not_found() {
        let result = EngineConfig::from_file("/nonexistent/path/engine.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
