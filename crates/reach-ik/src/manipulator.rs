//! Manipulator descriptor: the joint subset an IK solver is bound to.
//!
//! A [`Manipulator`] carries everything the resolution engine needs to know
//! about the robot side of the binding: per-joint limits and topology, the
//! current joint state, the kinematics fingerprint of the chain geometry,
//! and the grasp-frame transform applied to full-pose targets. It does no
//! solving itself; joint-space arithmetic (wrapping, distance, the
//! fraction mapping for free parameters) lives here so the engine stays
//! purely orchestration.

use nalgebra::Isometry3;

use reach_core::error::SolveError;
use reach_core::types::KinematicsHash;

use crate::parameterization::IkParameterization;

/// Joint motion class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointTopology {
    /// Rotational joint. `wraps` is true for continuous joints whose angle
    /// is identified modulo 2π (no limits).
    Revolute { wraps: bool },
    /// Translational joint. Never wraps.
    Prismatic,
}

/// A single joint in the solved subset.
#[derive(Debug, Clone)]
pub struct JointSpec {
    /// Joint name (diagnostics only).
    pub name: String,
    pub topology: JointTopology,
    /// Lower position limit (rad or m).
    pub lower: f32,
    /// Upper position limit (rad or m).
    pub upper: f32,
    /// Weight in the nearest-seed distance metric.
    pub weight: f32,
}

impl JointSpec {
    /// A limited revolute joint with unit weight.
    pub fn revolute(name: impl Into<String>, lower: f32, upper: f32) -> Self {
        Self {
            name: name.into(),
            topology: JointTopology::Revolute { wraps: false },
            lower,
            upper,
            weight: 1.0,
        }
    }

    /// An unlimited (continuous) revolute joint with unit weight.
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            topology: JointTopology::Revolute { wraps: true },
            lower: -std::f32::consts::PI,
            upper: std::f32::consts::PI,
            weight: 1.0,
        }
    }

    /// A prismatic joint with unit weight.
    pub fn prismatic(name: impl Into<String>, lower: f32, upper: f32) -> Self {
        Self {
            name: name.into(),
            topology: JointTopology::Prismatic,
            lower,
            upper,
            weight: 1.0,
        }
    }

    /// Set the distance-metric weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    fn wraps(&self) -> bool {
        matches!(self.topology, JointTopology::Revolute { wraps: true })
    }
}

/// The kinematic sub-chain an IK solver targets.
#[derive(Debug, Clone)]
pub struct Manipulator {
    joints: Vec<JointSpec>,
    current: Vec<f32>,
    fingerprint: KinematicsHash,
    grasp_frame: Isometry3<f32>,
}

impl Manipulator {
    /// Build a manipulator with the current state at zero and an identity
    /// grasp frame.
    pub fn new(joints: Vec<JointSpec>, fingerprint: KinematicsHash) -> Self {
        let current = vec![0.0; joints.len()];
        Self {
            joints,
            current,
            fingerprint,
            grasp_frame: Isometry3::identity(),
        }
    }

    /// Set the grasp-frame transform (end-effector local frame of the tool).
    #[must_use]
    pub fn with_grasp_frame(mut self, grasp_frame: Isometry3<f32>) -> Self {
        self.grasp_frame = grasp_frame;
        self
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn joints(&self) -> &[JointSpec] {
        &self.joints
    }

    pub fn fingerprint(&self) -> &KinematicsHash {
        &self.fingerprint
    }

    pub fn grasp_frame(&self) -> &Isometry3<f32> {
        &self.grasp_frame
    }

    /// Current joint state.
    pub fn joint_state(&self) -> &[f32] {
        &self.current
    }

    /// Update the current joint state.
    pub fn set_joint_state(&mut self, q: &[f32]) -> Result<(), SolveError> {
        if q.len() != self.joints.len() {
            return Err(SolveError::JointStateDimMismatch {
                expected: self.joints.len(),
                got: q.len(),
            });
        }
        self.current.copy_from_slice(q);
        Ok(())
    }

    /// Whether every joint of `q` is within its limits.
    ///
    /// Wrapping joints are always in range. A small epsilon absorbs the
    /// roundoff of analytic branches landing exactly on a limit.
    pub fn in_limits(&self, q: &[f32]) -> bool {
        const EPS: f32 = 1e-5;
        q.iter().zip(&self.joints).all(|(&v, joint)| {
            joint.wraps() || (v >= joint.lower - EPS && v <= joint.upper + EPS)
        })
    }

    /// Signed difference `a - b` for joint `i`, wrapped to `[-π, π]` for
    /// continuous revolute joints.
    pub fn joint_delta(&self, i: usize, a: f32, b: f32) -> f32 {
        use std::f32::consts::{PI, TAU};
        let d = a - b;
        if self.joints[i].wraps() {
            (d + PI).rem_euclid(TAU) - PI
        } else {
            d
        }
    }

    /// Weighted joint-space distance between two configurations: the sum of
    /// per-joint wrapped absolute differences times each joint's weight.
    ///
    /// # Panics
    ///
    /// Panics if either slice length differs from the joint count.
    pub fn joint_distance(&self, a: &[f32], b: &[f32]) -> f32 {
        assert_eq!(a.len(), self.joints.len());
        assert_eq!(b.len(), self.joints.len());
        (0..self.joints.len())
            .map(|i| self.joints[i].weight * self.joint_delta(i, a[i], b[i]).abs())
            .sum()
    }

    /// Map a `[0, 1]` fraction of joint `i`'s range to a joint value.
    pub fn fraction_to_value(&self, i: usize, fraction: f32) -> f32 {
        let joint = &self.joints[i];
        joint.lower + fraction * (joint.upper - joint.lower)
    }

    /// Map a joint value back to a `[0, 1]` fraction of joint `i`'s range.
    ///
    /// Continuous revolute values are wrapped into `[lower, lower + 2π)`
    /// first; limited joints clamp out-of-range values to the endpoints.
    pub fn value_to_fraction(&self, i: usize, value: f32) -> f32 {
        let joint = &self.joints[i];
        let span = joint.upper - joint.lower;
        if span <= 0.0 {
            return 0.0;
        }
        let value = if joint.wraps() {
            joint.lower + (value - joint.lower).rem_euclid(std::f32::consts::TAU)
        } else {
            value
        };
        ((value - joint.lower) / span).clamp(0.0, 1.0)
    }

    /// Free-parameter fractions implied by the current joint state.
    pub fn free_fractions(&self, free_indices: &[usize]) -> Vec<f32> {
        free_indices
            .iter()
            .map(|&i| self.value_to_fraction(i, self.current[i]))
            .collect()
    }

    /// Express a target in the frame the analytic equations solve for.
    ///
    /// Full-pose targets are the pose of the grasp frame, so the grasp
    /// transform is peeled off before solving. Partial targets constrain
    /// the end effector directly and pass through unchanged.
    pub fn to_solver_frame(&self, target: &IkParameterization) -> IkParameterization {
        match target {
            IkParameterization::Transform6D(t) => {
                IkParameterization::Transform6D(t * self.grasp_frame.inverse())
            }
            other => other.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
