//! Analytic inverse kinematics resolution for Reach robots.
//!
//! Takes a per-robot closed-form equation set (an [`AnalyticIkFunction`])
//! and resolves joint configurations that place the end effector at a
//! workspace target, sweeping the null-space free parameters over a
//! discretized grid and filtering candidates through joint limits and an
//! optional caller-supplied validity predicate.
//!
//! # Architecture
//!
//! ```text
//! IkParameterization ──► IkSolver (DiscretizedIkSolver) ──► joint angles
//!                              │
//!            AnalyticIkFunction + Manipulator + FreeParameterGrid
//! ```
//!
//! The [`Manipulator`] descriptor (limits, topology, grasp frame,
//! fingerprint) is bound once via [`IkSolver::init`]; a fingerprint or
//! joint-count mismatch permanently invalidates the instance. Engines for
//! named robot models are handed out by a [`SolverRegistry`].

pub mod analytic;
pub mod discretizer;
pub mod engine;
pub mod manipulator;
pub mod parameterization;
pub mod registry;

pub use analytic::{AnalyticIkFunction, ValidityPredicate};
pub use discretizer::FreeParameterGrid;
pub use engine::{DiscretizedIkSolver, IkSolver};
pub use manipulator::{JointSpec, JointTopology, Manipulator};
pub use parameterization::IkParameterization;
pub use registry::{SolverFactory, SolverRegistry};

pub use reach_core::config::EngineConfig;
pub use reach_core::error::{BindError, ConfigError, ReachError, RegistryError, SolveError};
pub use reach_core::types::{IkParameterizationKind, KinematicsHash};
