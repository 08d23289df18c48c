use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// IkParameterizationKind
// ---------------------------------------------------------------------------

/// Discriminant of a workspace target parameterization.
///
/// Analytic IK functions declare the single kind they solve for; the engine
/// rejects targets of any other kind before doing work. `None` is the kind
/// of "no target" and is never solvable — it exists so capability tables can
/// mark unbound slots explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IkParameterizationKind {
    /// No target bound.
    None,
    /// Full 6D pose: position + orientation.
    Transform6D,
    /// Orientation only.
    Rotation3D,
    /// Position only.
    Translation3D,
    /// Pointing direction only.
    Direction2D,
    /// Direction through a point (4 constrained DOF).
    Ray4D,
}

impl fmt::Display for IkParameterizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Transform6D => "Transform6D",
            Self::Rotation3D => "Rotation3D",
            Self::Translation3D => "Translation3D",
            Self::Direction2D => "Direction2D",
            Self::Ray4D => "Ray4D",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// KinematicsHash
// ---------------------------------------------------------------------------

/// Opaque fingerprint of a manipulator's joint-axis geometry.
///
/// Generated alongside a closed-form equation set and stamped on the robot
/// model it was derived from. Compared byte-for-byte at solver bind time;
/// a mismatch means the robot model was edited after the equations were
/// generated and every solution would be silently wrong.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KinematicsHash(String);

impl KinematicsHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KinematicsHash {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for KinematicsHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
