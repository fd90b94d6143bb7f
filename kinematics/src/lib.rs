use nalgebra::Vector2;
use std::fmt;

/// Default arrival tolerance on each axis, in the same units as the pose.
pub const TOLERANCE: f64 = 0.1;

/// Relative `(dx, dy)` offset between two poses.
pub type Displacement = Vector2<f64>;

/// 2D position plus heading, as reported by the pose feed.
///
/// `theta` travels with the pose but takes no part in comparison or control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector2<f64>,
    pub theta: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vector2::zeros(),
            theta: 0.0,
        }
    }
}

impl Pose {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            position: Vector2::new(x, y),
            theta,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Pose reached by applying `d` to `self`. Heading is kept.
    pub fn combine(&self, d: &Displacement) -> Pose {
        Pose {
            position: self.position + d,
            theta: self.theta,
        }
    }

    /// Pose reached by undoing `d` from `self`. Heading is kept.
    pub fn difference(&self, d: &Displacement) -> Pose {
        Pose {
            position: self.position - d,
            theta: self.theta,
        }
    }

    /// Per-axis error vector pointing from `self` towards `target`.
    pub fn error_to(&self, target: &Pose) -> Displacement {
        target.position - self.position
    }

    /// True when both axes are strictly within `tolerance` of each other.
    ///
    /// Reflexive and symmetric, but not transitive: a chain of near-equal
    /// poses can drift past the tolerance.
    pub fn approx_eq(&self, other: &Pose, tolerance: f64) -> bool {
        approx_equal(self, other, tolerance)
    }
}

pub fn approx_equal(a: &Pose, b: &Pose, tolerance: f64) -> bool {
    (a.x() - b.x()).abs() < tolerance && (a.y() - b.y()).abs() < tolerance
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x={:.2}, y={:.2})", self.x(), self.y())
    }
}

/// Planar velocity demand, one component per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityCommand {
    pub vx: f64,
    pub vy: f64,
}

impl VelocityCommand {
    pub fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }

    pub fn stop() -> Self {
        Self::default()
    }

    pub fn is_stop(&self) -> bool {
        self.vx == 0.0 && self.vy == 0.0
    }
}
