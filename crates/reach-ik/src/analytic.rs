//! The analytic (closed-form) equation boundary.
//!
//! Per-robot equation sets are generated offline and consumed here as a
//! black box: a pure callable that maps a target pose plus pinned
//! free-joint values to zero or more exact joint-vector branches. The
//! trait also carries the capability metadata the engine needs to bind
//! safely — joint count, free-parameter indices, the one target kind the
//! equations solve for, and the kinematics fingerprint of the chain the
//! equations were derived from.

use reach_core::error::BindError;
use reach_core::types::{IkParameterizationKind, KinematicsHash};

use crate::manipulator::Manipulator;
use crate::parameterization::IkParameterization;

/// Caller-supplied acceptance test for a candidate joint vector,
/// typically a collision query. Must be safe to call from the engine's
/// parallel sweep.
pub type ValidityPredicate<'a> = dyn Fn(&[f32]) -> bool + Sync + 'a;

/// A closed-form inverse kinematics equation set for one manipulator.
///
/// `solve` must be pure and deterministic for fixed inputs. Branch order
/// carries no meaning; the engine imposes its own ordering.
pub trait AnalyticIkFunction: Send + Sync {
    /// Number of joints each returned branch covers (free joints included).
    fn joint_count(&self) -> usize;

    /// Joint indices the equations leave free, in sweep order.
    fn free_parameter_indices(&self) -> &[usize];

    /// The single target kind the equations solve for.
    fn supported_kind(&self) -> IkParameterizationKind;

    /// Fingerprint of the chain geometry the equations were derived from.
    fn kinematics_hash(&self) -> &KinematicsHash;

    /// Evaluate the equations at a target with the free joints pinned to
    /// `free_values` (joint-range values, not fractions).
    ///
    /// Returns every branch satisfying the constraint exactly, possibly
    /// none. Branches are full-length joint vectors; limit checking is the
    /// engine's job.
    fn solve(&self, target: &IkParameterization, free_values: &[f32]) -> Vec<Vec<f32>>;

    /// Check that a manipulator is structurally compatible with these
    /// equations. Called once at solver bind time.
    fn verify_binding(&self, manipulator: &Manipulator) -> Result<(), BindError> {
        if manipulator.joint_count() != self.joint_count() {
            return Err(BindError::JointCountMismatch {
                expected: self.joint_count(),
                actual: manipulator.joint_count(),
            });
        }
        if manipulator.fingerprint() != self.kinematics_hash() {
            return Err(BindError::FingerprintMismatch {
                expected: self.kinematics_hash().to_string(),
                actual: manipulator.fingerprint().to_string(),
            });
        }
        if let Some(&index) = self
            .free_parameter_indices()
            .iter()
            .find(|&&i| i >= self.joint_count())
        {
            return Err(BindError::FreeIndexOutOfRange {
                index,
                joint_count: self.joint_count(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
