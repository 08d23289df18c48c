//! Workspace target parameterizations.
//!
//! An analytic equation set constrains some subset of the end effector's
//! pose: all six DOF, orientation only, position only, a pointing direction,
//! or a ray. [`IkParameterization`] is the closed sum of those targets, with
//! one variant per constraint class. Accessors return `Option` so reading a
//! field the variant does not carry is a visible `None`, never stale data.

use nalgebra::{Isometry3, Unit, UnitQuaternion, Vector3};

use reach_core::types::IkParameterizationKind;

/// A workspace target for the end effector.
#[derive(Debug, Clone, PartialEq)]
pub enum IkParameterization {
    /// Full pose: position + orientation.
    Transform6D(Isometry3<f32>),
    /// Orientation only.
    Rotation3D(UnitQuaternion<f32>),
    /// Position only.
    Translation3D(Vector3<f32>),
    /// Pointing direction only.
    Direction2D(Unit<Vector3<f32>>),
    /// Direction through a point.
    Ray4D {
        point: Vector3<f32>,
        dir: Unit<Vector3<f32>>,
    },
}

impl IkParameterization {
    /// Construct a ray target from a point and a direction.
    pub fn from_ray(point: Vector3<f32>, dir: Unit<Vector3<f32>>) -> Self {
        Self::Ray4D { point, dir }
    }

    /// The kind tag of this target.
    pub fn kind(&self) -> IkParameterizationKind {
        match self {
            Self::Transform6D(_) => IkParameterizationKind::Transform6D,
            Self::Rotation3D(_) => IkParameterizationKind::Rotation3D,
            Self::Translation3D(_) => IkParameterizationKind::Translation3D,
            Self::Direction2D(_) => IkParameterizationKind::Direction2D,
            Self::Ray4D { .. } => IkParameterizationKind::Ray4D,
        }
    }

    /// Full pose, if this is a `Transform6D` target.
    pub fn transform(&self) -> Option<&Isometry3<f32>> {
        match self {
            Self::Transform6D(t) => Some(t),
            _ => None,
        }
    }

    /// Target orientation. Present for `Transform6D` and `Rotation3D`.
    pub fn rotation(&self) -> Option<UnitQuaternion<f32>> {
        match self {
            Self::Transform6D(t) => Some(t.rotation),
            Self::Rotation3D(r) => Some(*r),
            _ => None,
        }
    }

    /// Target position. Present for `Transform6D`, `Translation3D`, `Ray4D`.
    pub fn translation(&self) -> Option<Vector3<f32>> {
        match self {
            Self::Transform6D(t) => Some(t.translation.vector),
            Self::Translation3D(p) => Some(*p),
            Self::Ray4D { point, .. } => Some(*point),
            _ => None,
        }
    }

    /// Target direction. Present for `Direction2D` and `Ray4D`.
    pub fn direction(&self) -> Option<Unit<Vector3<f32>>> {
        match self {
            Self::Direction2D(d) => Some(*d),
            Self::Ray4D { dir, .. } => Some(*dir),
            _ => None,
        }
    }

    /// Ray (point, direction), if this is a `Ray4D` target.
    pub fn ray(&self) -> Option<(Vector3<f32>, Unit<Vector3<f32>>)> {
        match self {
            Self::Ray4D { point, dir } => Some((*point, *dir)),
            _ => None,
        }
    }
}

impl From<Isometry3<f32>> for IkParameterization {
    fn from(t: Isometry3<f32>) -> Self {
        Self::Transform6D(t)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Translation3;

    #[test]
    fn kind_matches_variant() {
        let pose = Isometry3::identity();
        assert_eq!(
            IkParameterization::Transform6D(pose).kind(),
            IkParameterizationKind::Transform6D
        );
        assert_eq!(
            IkParameterization::Translation3D(Vector3::zeros()).kind(),
            IkParameterizationKind::Translation3D
        );
        assert_eq!(
            IkParameterization::Rotation3D(UnitQuaternion::identity()).kind(),
            IkParameterizationKind::Rotation3D
        );
        assert_eq!(
            IkParameterization::Direction2D(Vector3::z_axis()).kind(),
            IkParameterizationKind::Direction2D
        );
        assert_eq!(
            IkParameterization::from_ray(Vector3::zeros(), Vector3::x_axis()).kind(),
            IkParameterizationKind::Ray4D
        );
    }

    #[test]
    fn transform_target_exposes_rotation_and_translation() {
        let pose = Isometry3::from_parts(
            Translation3::new(1.0, 2.0, 3.0),
            UnitQuaternion::from_euler_angles(0.0, 0.0, 0.5),
        );
        let param: IkParameterization = pose.into();

        let trans = param.translation().unwrap();
        assert_relative_eq!(trans.x, 1.0);
        assert_relative_eq!(trans.y, 2.0);
        assert_relative_eq!(trans.z, 3.0);
        assert_relative_eq!(param.rotation().unwrap().angle(), 0.5, epsilon = 1e-6);
        assert!(param.transform().is_some());
        assert!(param.direction().is_none());
    }

    #[test]
    fn translation_target_has_no_rotation() {
        let param = IkParameterization::Translation3D(Vector3::new(0.1, 0.2, 0.3));
        assert!(param.rotation().is_none());
        assert!(param.transform().is_none());
        assert_relative_eq!(param.translation().unwrap().y, 0.2);
    }

    #[test]
    fn direction_target_has_no_translation() {
        let param = IkParameterization::Direction2D(Vector3::y_axis());
        assert!(param.translation().is_none());
        assert_relative_eq!(param.direction().unwrap().y, 1.0);
    }

    #[test]
    fn ray_target_exposes_point_and_direction() {
        let param = IkParameterization::from_ray(Vector3::new(1.0, 0.0, 0.0), Vector3::z_axis());
        let (point, dir) = param.ray().unwrap();
        assert_relative_eq!(point.x, 1.0);
        assert_relative_eq!(dir.z, 1.0);
        assert_relative_eq!(param.translation().unwrap().x, 1.0);
        assert_relative_eq!(param.direction().unwrap().z, 1.0);
    }
}
