#![warn(missing_docs)]

//! Math types for the cubecut kernel.
//!
//! Thin wrappers around nalgebra providing the handful of types the box
//! resolver and mesh validator share: points, vectors, the box axes and
//! an orthonormal basis, and tolerance constants.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// One of the three named box axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Width axis (`lx`).
    X,
    /// Height axis (`ly`).
    Y,
    /// Depth axis (`lz`).
    Z,
}

impl Axis {
    /// All axes in storage order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Storage index of this axis (0, 1 or 2).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Three mutually orthogonal unit vectors, one per box axis.
///
/// Construct with [`Basis3::world`] or [`Basis3::try_new`]; the latter
/// rejects anything that is not orthonormal within tolerance. Deserializing
/// applies the same check at [`Tolerance::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BasisRepr")]
pub struct Basis3 {
    x: Vec3,
    y: Vec3,
    z: Vec3,
}

impl Basis3 {
    /// The world axes.
    pub fn world() -> Self {
        Self {
            x: Vec3::x(),
            y: Vec3::y(),
            z: Vec3::z(),
        }
    }

    /// Build a basis from three vectors, or `None` if they are not
    /// orthonormal within `tol.linear`.
    pub fn try_new(x: Vec3, y: Vec3, z: Vec3, tol: &Tolerance) -> Option<Self> {
        let basis = Self { x, y, z };
        basis.is_orthonormal(tol).then_some(basis)
    }

    /// The unit vector for `axis`.
    pub fn axis(&self, axis: Axis) -> &Vec3 {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Check unit length and pairwise orthogonality.
    pub fn is_orthonormal(&self, tol: &Tolerance) -> bool {
        let vs = [&self.x, &self.y, &self.z];
        if vs.iter().any(|v| !v.iter().all(|c| c.is_finite())) {
            return false;
        }
        if vs.iter().any(|v| !tol.is_zero(v.norm() - 1.0)) {
            return false;
        }
        tol.is_zero(self.x.dot(&self.y))
            && tol.is_zero(self.y.dot(&self.z))
            && tol.is_zero(self.z.dot(&self.x))
    }
}

#[derive(Deserialize)]
struct BasisRepr {
    x: Vec3,
    y: Vec3,
    z: Vec3,
}

impl TryFrom<BasisRepr> for Basis3 {
    type Error = String;

    fn try_from(repr: BasisRepr) -> Result<Self, String> {
        Self::try_new(repr.x, repr.y, repr.z, &Tolerance::DEFAULT)
            .ok_or_else(|| "basis axes must be orthonormal unit vectors".to_string())
    }
}

impl Default for Basis3 {
    fn default() -> Self {
        Self::world()
    }
}

/// Normalize `v`, returning the zero vector when `v` has no length.
///
/// Face normals of collapsed faces go through here; NaN components would
/// poison every later comparison.
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    let n = v.norm();
    if n > 0.0 && n.is_finite() {
        v / n
    } else {
        Vec3::zeros()
    }
}

/// Tolerance for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in model units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-6 linear).
    pub const DEFAULT: Self = Self { linear: 1e-6 };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_world_basis_is_orthonormal() {
        assert!(Basis3::world().is_orthonormal(&Tolerance::DEFAULT));
        assert_eq!(*Basis3::world().axis(Axis::Y), Vec3::y());
    }

    #[test]
    fn test_rotated_basis_accepted() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let basis = Basis3::try_new(
            Vec3::new(s, s, 0.0),
            Vec3::new(-s, s, 0.0),
            Vec3::z(),
            &Tolerance::DEFAULT,
        );
        assert!(basis.is_some());
    }

    #[test]
    fn test_skewed_basis_rejected() {
        let basis = Basis3::try_new(
            Vec3::x(),
            Vec3::new(0.1, 1.0, 0.0),
            Vec3::z(),
            &Tolerance::DEFAULT,
        );
        assert!(basis.is_none());

        let scaled = Basis3::try_new(Vec3::x() * 2.0, Vec3::y(), Vec3::z(), &Tolerance::DEFAULT);
        assert!(scaled.is_none());
    }

    #[test]
    fn test_normalize_or_zero() {
        let n = normalize_or_zero(&Vec3::new(0.0, 3.0, 4.0));
        assert_abs_diff_eq!(n.y, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(n.z, 0.8, epsilon = 1e-12);
        assert_eq!(normalize_or_zero(&Vec3::zeros()), Vec3::zeros());
    }

    #[test]
    fn test_axis_index_order() {
        let idx: Vec<usize> = Axis::ALL.iter().map(|a| a.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn test_basis_serde() {
        let json = serde_json::to_string(&Basis3::world()).unwrap();
        let back: Basis3 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Basis3::world());
    }

    #[test]
    fn test_basis_deserialize_checks_orthonormality() {
        let skewed = r#"{"x":[2.0,0.0,0.0],"y":[2.0,0.0,0.0],"z":[0.0,0.0,0.0]}"#;
        assert!(serde_json::from_str::<Basis3>(skewed).is_err());

        let swapped = r#"{"x":[0.0,1.0,0.0],"y":[-1.0,0.0,0.0],"z":[0.0,0.0,1.0]}"#;
        let basis: Basis3 = serde_json::from_str(swapped).unwrap();
        assert_eq!(*basis.axis(Axis::X), Vec3::y());
    }
}
