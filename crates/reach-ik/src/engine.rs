//! The discretized resolution engine.
//!
//! [`DiscretizedIkSolver`] turns a black-box analytic equation set into the
//! full [`IkSolver`] contract: it sweeps the free-parameter grid, evaluates
//! the equations per cell, discards out-of-limit and validity-rejected
//! branches, and either ranks survivors against a seed or returns the
//! deduplicated set.
//!
//! # Architecture
//!
//! ```text
//! IkParameterization ──► DiscretizedIkSolver ──► joint vector(s)
//!                             │
//!        FreeParameterGrid ◄──┼──► AnalyticIkFunction
//!                             │
//!                        Manipulator (limits, wrapping, grasp frame)
//! ```
//!
//! Grid cells are independent, so the full-grid sweeps run data-parallel
//! over cells and select the winner from the completed candidate set in
//! cell order — results do not depend on worker finish order. The seedless
//! single-solution path instead walks cells sequentially and stops at the
//! first survivor, which is both the documented tie-break and the cheap
//! early exit.

use log::{debug, warn};
use rayon::prelude::*;

use reach_core::config::EngineConfig;
use reach_core::error::{BindError, ConfigError, SolveError};

use crate::analytic::{AnalyticIkFunction, ValidityPredicate};
use crate::discretizer::FreeParameterGrid;
use crate::manipulator::Manipulator;
use crate::parameterization::IkParameterization;

/// The operations every resolution engine exposes.
///
/// Instances move `Unbound → Bound` through the one successful [`init`],
/// or `Unbound → Invalid` through a failed one; an invalid instance fails
/// every solve fast without touching the analytic function. `NoSolution`
/// is the expected outcome for unreachable targets, not a fault.
///
/// [`init`]: IkSolver::init
pub trait IkSolver {
    /// Bind to a manipulator. The only `Unbound → Bound` transition;
    /// instances are not re-bindable.
    fn init(&mut self, manipulator: Manipulator) -> Result<(), BindError>;

    /// The bound manipulator, if any.
    fn manipulator(&self) -> Option<&Manipulator>;

    /// Update the bound manipulator's current joint state (the input to
    /// [`free_parameters`](IkSolver::free_parameters)).
    fn set_joint_state(&mut self, q: &[f32]) -> Result<(), SolveError>;

    /// Dimensionality of the null space.
    fn num_free_parameters(&self) -> usize;

    /// Free-parameter fractions in `[0, 1]` implied by the manipulator's
    /// current joint state.
    fn free_parameters(&self) -> Result<Vec<f32>, SolveError>;

    /// Single solution over the full free-parameter grid.
    ///
    /// With a seed: the validity-passing candidate nearest the seed in
    /// wrapped, weighted joint distance (ties break to sweep order).
    /// Without: the first validity-passing candidate in sweep order.
    fn solve(
        &self,
        target: &IkParameterization,
        seed: Option<&[f32]>,
        validity: Option<&ValidityPredicate<'_>>,
    ) -> Result<Vec<f32>, SolveError>;

    /// Every distinct validity-passing solution over the full grid.
    fn solve_all(
        &self,
        target: &IkParameterization,
        validity: Option<&ValidityPredicate<'_>>,
    ) -> Result<Vec<Vec<f32>>, SolveError>;

    /// Single solution with the free parameters pinned to `free_fractions`
    /// (no sweep; one analytic evaluation).
    fn solve_with_free(
        &self,
        target: &IkParameterization,
        seed: Option<&[f32]>,
        free_fractions: &[f32],
        validity: Option<&ValidityPredicate<'_>>,
    ) -> Result<Vec<f32>, SolveError>;

    /// Every distinct solution at a pinned free-parameter point
    /// (multi-valued only through analytic branches).
    fn solve_all_with_free(
        &self,
        target: &IkParameterization,
        free_fractions: &[f32],
        validity: Option<&ValidityPredicate<'_>>,
    ) -> Result<Vec<Vec<f32>>, SolveError>;
}

enum BindState {
    Unbound,
    Bound(Manipulator),
    Invalid,
}

/// Resolution engine over one analytic equation set.
pub struct DiscretizedIkSolver<F: AnalyticIkFunction> {
    function: F,
    config: EngineConfig,
    state: BindState,
}

impl<F: AnalyticIkFunction> DiscretizedIkSolver<F> {
    /// Create an unbound engine. Fails fast on an invalid configuration.
    pub fn new(function: F, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            function,
            config,
            state: BindState::Unbound,
        })
    }

    /// Create an unbound engine with an explicit sweep step and default
    /// tolerances.
    pub fn with_step(function: F, step: f32) -> Result<Self, ConfigError> {
        Self::new(function, EngineConfig::with_step(step))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn function(&self) -> &F {
        &self.function
    }

    fn bound(&self) -> Result<&Manipulator, SolveError> {
        match &self.state {
            BindState::Bound(manipulator) => Ok(manipulator),
            BindState::Unbound => Err(SolveError::NotBound),
            BindState::Invalid => Err(SolveError::InvalidBinding),
        }
    }

    fn check_target(&self, target: &IkParameterization) -> Result<(), SolveError> {
        let expected = self.function.supported_kind();
        if target.kind() != expected {
            return Err(SolveError::UnsupportedParameterization {
                expected,
                got: target.kind(),
            });
        }
        Ok(())
    }

    fn check_seed(&self, seed: Option<&[f32]>) -> Result<(), SolveError> {
        let expected = self.function.joint_count();
        match seed {
            Some(q0) if q0.len() != expected => Err(SolveError::SeedDimMismatch {
                expected,
                got: q0.len(),
            }),
            _ => Ok(()),
        }
    }

    fn check_free_len(&self, free_fractions: &[f32]) -> Result<(), SolveError> {
        let expected = self.function.free_parameter_indices().len();
        if free_fractions.len() != expected {
            return Err(SolveError::FreeParameterDimMismatch {
                expected,
                got: free_fractions.len(),
            });
        }
        Ok(())
    }

    /// Evaluate one grid cell: denormalize the fractions, run the analytic
    /// equations, keep the branches that are in limits and pass validity.
    ///
    /// Out-of-limit and validity-rejected branches are discarded silently;
    /// both are routine at grid boundaries, not errors.
    fn evaluate_cell(
        &self,
        manipulator: &Manipulator,
        target: &IkParameterization,
        fractions: &[f32],
        validity: Option<&ValidityPredicate<'_>>,
    ) -> Vec<Vec<f32>> {
        let free_values: Vec<f32> = self
            .function
            .free_parameter_indices()
            .iter()
            .zip(fractions)
            .map(|(&joint, &fraction)| manipulator.fraction_to_value(joint, fraction))
            .collect();

        let mut survivors = self.function.solve(target, &free_values);
        survivors.retain(|q| {
            debug_assert_eq!(q.len(), self.function.joint_count());
            q.len() == self.function.joint_count()
                && manipulator.in_limits(q)
                && validity.is_none_or(|accept| accept(q))
        });
        survivors
    }

    /// Evaluate every grid cell in parallel, preserving cell order.
    fn sweep(
        &self,
        manipulator: &Manipulator,
        target: &IkParameterization,
        grid: &FreeParameterGrid,
        validity: Option<&ValidityPredicate<'_>>,
    ) -> Vec<Vec<Vec<f32>>> {
        debug!(
            "sweeping {} cells over {} free parameters",
            grid.len(),
            grid.dims()
        );
        (0..grid.len())
            .into_par_iter()
            .map(|i| self.evaluate_cell(manipulator, target, &grid.cell(i), validity))
            .collect()
    }

    /// Nearest-to-seed over candidates grouped by cell, in cell order.
    /// Strict `<` keeps the first-encountered candidate on ties.
    fn nearest(
        manipulator: &Manipulator,
        per_cell: &[Vec<Vec<f32>>],
        seed: &[f32],
    ) -> Option<Vec<f32>> {
        let mut best: Option<(f32, &Vec<f32>)> = None;
        for candidate in per_cell.iter().flatten() {
            let dist = manipulator.joint_distance(candidate, seed);
            if best.is_none_or(|(best_dist, _)| dist < best_dist) {
                best = Some((dist, candidate));
            }
        }
        best.map(|(_, q)| q.clone())
    }

    /// Collapse near-identical candidates, keeping the first-encountered
    /// representative of each distinct joint configuration.
    fn deduplicate(&self, manipulator: &Manipulator, per_cell: Vec<Vec<Vec<f32>>>) -> Vec<Vec<f32>> {
        let tolerance = self.config.duplicate_tolerance;
        let mut distinct: Vec<Vec<f32>> = Vec::new();
        for candidate in per_cell.into_iter().flatten() {
            let duplicate = distinct.iter().any(|kept| {
                (0..candidate.len())
                    .all(|i| manipulator.joint_delta(i, candidate[i], kept[i]).abs() < tolerance)
            });
            if !duplicate {
                distinct.push(candidate);
            }
        }
        distinct
    }
}

impl<F: AnalyticIkFunction> IkSolver for DiscretizedIkSolver<F> {
    fn init(&mut self, manipulator: Manipulator) -> Result<(), BindError> {
        if !matches!(self.state, BindState::Unbound) {
            return Err(BindError::AlreadyBound);
        }
        if let Err(err) = self.function.verify_binding(&manipulator) {
            warn!("solver binding rejected: {err}");
            self.state = BindState::Invalid;
            return Err(err);
        }
        self.state = BindState::Bound(manipulator);
        Ok(())
    }

    fn manipulator(&self) -> Option<&Manipulator> {
        match &self.state {
            BindState::Bound(manipulator) => Some(manipulator),
            _ => None,
        }
    }

    fn set_joint_state(&mut self, q: &[f32]) -> Result<(), SolveError> {
        match &mut self.state {
            BindState::Bound(manipulator) => manipulator.set_joint_state(q),
            BindState::Unbound => Err(SolveError::NotBound),
            BindState::Invalid => Err(SolveError::InvalidBinding),
        }
    }

    fn num_free_parameters(&self) -> usize {
        self.function.free_parameter_indices().len()
    }

    fn free_parameters(&self) -> Result<Vec<f32>, SolveError> {
        let manipulator = self.bound()?;
        Ok(manipulator.free_fractions(self.function.free_parameter_indices()))
    }

    fn solve(
        &self,
        target: &IkParameterization,
        seed: Option<&[f32]>,
        validity: Option<&ValidityPredicate<'_>>,
    ) -> Result<Vec<f32>, SolveError> {
        let manipulator = self.bound()?;
        self.check_target(target)?;
        self.check_seed(seed)?;

        let target = manipulator.to_solver_frame(target);
        let grid = FreeParameterGrid::from_config(self.num_free_parameters(), &self.config);

        if let Some(seed) = seed {
            let per_cell = self.sweep(manipulator, &target, &grid, validity);
            return Self::nearest(manipulator, &per_cell, seed).ok_or(SolveError::NoSolution);
        }

        // Seedless: first survivor in sweep order, stopping early.
        for fractions in grid.cells() {
            let mut survivors = self.evaluate_cell(manipulator, &target, &fractions, validity);
            if !survivors.is_empty() {
                return Ok(survivors.swap_remove(0));
            }
        }
        Err(SolveError::NoSolution)
    }

    fn solve_all(
        &self,
        target: &IkParameterization,
        validity: Option<&ValidityPredicate<'_>>,
    ) -> Result<Vec<Vec<f32>>, SolveError> {
        let manipulator = self.bound()?;
        self.check_target(target)?;

        let target = manipulator.to_solver_frame(target);
        let grid = FreeParameterGrid::from_config(self.num_free_parameters(), &self.config);
        let per_cell = self.sweep(manipulator, &target, &grid, validity);

        let distinct = self.deduplicate(manipulator, per_cell);
        debug!("{} distinct solutions", distinct.len());
        if distinct.is_empty() {
            return Err(SolveError::NoSolution);
        }
        Ok(distinct)
    }

    fn solve_with_free(
        &self,
        target: &IkParameterization,
        seed: Option<&[f32]>,
        free_fractions: &[f32],
        validity: Option<&ValidityPredicate<'_>>,
    ) -> Result<Vec<f32>, SolveError> {
        let manipulator = self.bound()?;
        self.check_target(target)?;
        self.check_seed(seed)?;
        self.check_free_len(free_fractions)?;

        let target = manipulator.to_solver_frame(target);
        let mut survivors = self.evaluate_cell(manipulator, &target, free_fractions, validity);
        if survivors.is_empty() {
            return Err(SolveError::NoSolution);
        }
        match seed {
            Some(seed) => {
                let per_cell = [survivors];
                Self::nearest(manipulator, &per_cell, seed).ok_or(SolveError::NoSolution)
            }
            None => Ok(survivors.swap_remove(0)),
        }
    }

    fn solve_all_with_free(
        &self,
        target: &IkParameterization,
        free_fractions: &[f32],
        validity: Option<&ValidityPredicate<'_>>,
    ) -> Result<Vec<Vec<f32>>, SolveError> {
        let manipulator = self.bound()?;
        self.check_target(target)?;
        self.check_free_len(free_fractions)?;

        let target = manipulator.to_solver_frame(target);
        let survivors = self.evaluate_cell(manipulator, &target, free_fractions, validity);
        let distinct = self.deduplicate(manipulator, vec![survivors]);
        if distinct.is_empty() {
            return Err(SolveError::NoSolution);
        }
        Ok(distinct)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
