//! Named solver registry.
//!
//! Hosts embed one closed-form equation set per robot model and hand out
//! engines by name. The registry is an explicit object owned by whoever
//! embeds it — construction and teardown follow normal ownership, there is
//! no process-wide table. A factory receives the discretization step and
//! returns an unbound engine ready for [`IkSolver::init`].

use std::collections::HashMap;

use reach_core::error::{ReachError, RegistryError};

use crate::engine::IkSolver;

/// Builds an engine for one robot model at a given discretization step.
pub type SolverFactory =
    Box<dyn Fn(f32) -> Result<Box<dyn IkSolver>, ReachError> + Send + Sync>;

/// Name → engine factory table.
#[derive(Default)]
pub struct SolverRegistry {
    factories: HashMap<String, SolverFactory>,
}

impl SolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(name, factory)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on a repeated name.
    pub fn with_solvers(
        entries: impl IntoIterator<Item = (String, SolverFactory)>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for (name, factory) in entries {
            registry.register(name, factory)?;
        }
        Ok(registry)
    }

    /// Register a factory under `name`.
    ///
    /// # Errors
    ///
    /// Fails if `name` is already taken; existing entries are never
    /// silently replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: SolverFactory,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Create an engine for the named robot model.
    pub fn create(&self, name: &str, step: f32) -> Result<Box<dyn IkSolver>, ReachError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RegistryError::UnknownSolver(name.to_owned()))?;
        factory(step)
    }

    /// Registered solver names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
