// reach-core: Errors, configuration, and shared types for the Reach IK engine.

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{BindError, ConfigError, ReachError, RegistryError, SolveError};
pub use types::{IkParameterizationKind, KinematicsHash};
