use thiserror::Error;

use crate::types::IkParameterizationKind;

/// Top-level error type for the Reach IK engine.
#[derive(Debug, Error)]
pub enum ReachError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Bind error: {0}")]
    Bind(#[from] BindError),

    #[error("Solve error: {0}")]
    Solve(#[from] SolveError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid discretization_step: {0} (must be in (0, 1])")]
    InvalidStep(f32),

    #[error("Invalid duplicate_tolerance: {0} (must be > 0)")]
    InvalidDuplicateTolerance(f32),
}

/// Errors binding a solver to a manipulator.
///
/// All of these are permanent for the solver instance: after a failed
/// `init` the instance is invalid and every solve fails fast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("Kinematics fingerprint mismatch: equations expect {expected}, manipulator has {actual}")]
    FingerprintMismatch { expected: String, actual: String },

    #[error("Joint count mismatch: equations solve {expected} joints, manipulator has {actual}")]
    JointCountMismatch { expected: usize, actual: usize },

    #[error("Free joint index {index} out of range for {joint_count} joints")]
    FreeIndexOutOfRange { index: usize, joint_count: usize },

    #[error("Solver is already bound to a manipulator")]
    AlreadyBound,
}

/// Per-query solve errors.
///
/// `NoSolution` is expected control flow for unreachable targets, not a
/// fault. Copy + static payloads for cheap propagation in hot paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("Solver is not bound to a manipulator")]
    NotBound,

    #[error("Solver binding is invalid (fingerprint or joint-count mismatch at init)")]
    InvalidBinding,

    #[error("No solution for the given target")]
    NoSolution,

    #[error("Unsupported parameterization: solver handles {expected}, got {got}")]
    UnsupportedParameterization {
        expected: IkParameterizationKind,
        got: IkParameterizationKind,
    },

    #[error("Seed dimension mismatch: expected {expected}, got {got}")]
    SeedDimMismatch { expected: usize, got: usize },

    #[error("Free parameter dimension mismatch: expected {expected}, got {got}")]
    FreeParameterDimMismatch { expected: usize, got: usize },

    #[error("Joint state dimension mismatch: expected {expected}, got {got}")]
    JointStateDimMismatch { expected: usize, got: usize },
}

/// Solver registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("No solver registered under name: {0}")]
    UnknownSolver(String),

    #[error("A solver is already registered under name: {0}")]
    DuplicateName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reach_error_from_config_error() {
        let err = ConfigError::InvalidStep(0.0);
        let reach_err: ReachError = err.into();
        assert!(matches!(reach_err, ReachError::Config(_)));
        assert!(reach_err.to_string().contains("(0, 1]"));
    }

    #[test]
    fn reach_error_from_bind_error() {
        let err = BindError::JointCountMismatch {
            expected: 7,
            actual: 6,
        };
        let reach_err: ReachError = err.into();
        assert!(matches!(reach_err, ReachError::Bind(_)));
        assert!(reach_err.to_string().contains('7'));
    }

    #[test]
    fn reach_error_from_solve_error() {
        let err = SolveError::NoSolution;
        let reach_err: ReachError = err.into();
        assert!(matches!(reach_err, ReachError::Solve(_)));
    }

    #[test]
    fn reach_error_from_registry_error() {
        let err = RegistryError::UnknownSolver("puma".into());
        let reach_err: ReachError = err.into();
        assert!(matches!(reach_err, ReachError::Registry(_)));
        assert!(reach_err.to_string().contains("puma"));
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::Io(_)));
    }

    #[test]
    fn solve_error_is_copy() {
        let err = SolveError::NoSolution;
        let err2 = err; // Copy
        assert_eq!(err, err2);
    }

    #[test]
    fn bind_error_display_messages() {
        assert_eq!(
            BindError::FingerprintMismatch {
                expected: "aa".into(),
                actual: "bb".into()
            }
            .to_string(),
            "Kinematics fingerprint mismatch: equations expect aa, manipulator has bb"
        );
        assert_eq!(
            BindError::JointCountMismatch {
                expected: 7,
                actual: 6
            }
            .to_string(),
            "Joint count mismatch: equations solve 7 joints, manipulator has 6"
        );
        assert_eq!(
            BindError::FreeIndexOutOfRange {
                index: 9,
                joint_count: 7
            }
            .to_string(),
            "Free joint index 9 out of range for 7 joints"
        );
        assert_eq!(
            BindError::AlreadyBound.to_string(),
            "Solver is already bound to a manipulator"
        );
    }

    #[test]
    fn solve_error_display_messages() {
        assert_eq!(
            SolveError::NoSolution.to_string(),
            "No solution for the given target"
        );
        assert_eq!(
            SolveError::UnsupportedParameterization {
                expected: IkParameterizationKind::Transform6D,
                got: IkParameterizationKind::Translation3D,
            }
            .to_string(),
            "Unsupported parameterization: solver handles Transform6D, got Translation3D"
        );
        assert_eq!(
            SolveError::FreeParameterDimMismatch {
                expected: 1,
                got: 2
            }
            .to_string(),
            "Free parameter dimension mismatch: expected 1, got 2"
        );
        assert_eq!(
            SolveError::SeedDimMismatch {
                expected: 6,
                got: 3
            }
            .to_string(),
            "Seed dimension mismatch: expected 6, got 3"
        );
    }

    #[test]
    fn registry_error_display_messages() {
        assert_eq!(
            RegistryError::UnknownSolver("wam7".into()).to_string(),
            "No solver registered under name: wam7"
        );
        assert_eq!(
            RegistryError::DuplicateName("wam7".into()).to_string(),
            "A solver is already registered under name: wam7"
        );
    }
}
