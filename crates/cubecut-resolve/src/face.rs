//! Resolved faces, face frames and canonical face names.

use std::fmt;

use cubecut_math::{normalize_or_zero, Point3, Vec3};
use serde::{Deserialize, Serialize};

/// A face resolved against the current pose.
///
/// `basis_u` runs from the first vertex toward the second, `basis_v`
/// completes a right-handed frame with `normal`. All three are recomputed
/// from the resolved corners, so they follow non-uniform size changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceResolution {
    /// Corners in face-key order.
    pub vertices: [Point3; 4],
    /// Unit normal of the first corner triangle, or zero if it is degenerate.
    pub normal: Vec3,
    /// In-plane unit direction along the first edge.
    pub basis_u: Vec3,
    /// In-plane unit direction, `normal × basis_u`.
    pub basis_v: Vec3,
}

impl FaceResolution {
    pub(crate) fn from_corners(vertices: [Point3; 4]) -> Self {
        let [v0, v1, v2, _] = vertices;
        let normal = normalize_or_zero(&(v1 - v0).cross(&(v2 - v0)));
        let basis_u = normalize_or_zero(&(v1 - v0));
        let basis_v = normalize_or_zero(&normal.cross(&basis_u));
        Self {
            vertices,
            normal,
            basis_u,
            basis_v,
        }
    }

    /// Arithmetic mean of the four corners.
    pub fn center(&self) -> Point3 {
        let sum = self
            .vertices
            .iter()
            .fold(Vec3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / 4.0)
    }

    /// Frame anchored at the first corner.
    pub fn frame(&self) -> FaceFrame {
        FaceFrame {
            origin: self.vertices[0],
            u: self.basis_u,
            v: self.basis_v,
            normal: self.normal,
        }
    }
}

/// Local 2D coordinate frame on a face, for placing content on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    /// First corner of the face.
    pub origin: Point3,
    /// First in-plane axis.
    pub u: Vec3,
    /// Second in-plane axis.
    pub v: Vec3,
    /// Face normal.
    pub normal: Vec3,
}

impl FaceFrame {
    /// World position of local coordinates `(u, v)`.
    pub fn to_world(&self, u: f64, v: f64) -> Point3 {
        self.origin + self.u * u + self.v * v
    }

    /// Local coordinates of `p` projected onto the face plane.
    pub fn to_local(&self, p: &Point3) -> (f64, f64) {
        let d = p - self.origin;
        (d.dot(&self.u), d.dot(&self.v))
    }
}

/// Named box side, in world terms of an unrotated box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceName {
    /// +z side.
    Front,
    /// -z side.
    Back,
    /// +y side.
    Top,
    /// -y side.
    Bottom,
    /// +x side.
    Right,
    /// -x side.
    Left,
}

/// Fixed outward normal and in-plane axes for a named side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalFaceBasis {
    /// Outward normal.
    pub normal: Vec3,
    /// Rightward axis when the side is viewed from outside.
    pub u: Vec3,
    /// Upward axis when the side is viewed from outside.
    pub v: Vec3,
}

impl FaceName {
    /// All six sides.
    pub const ALL: [FaceName; 6] = [
        FaceName::Front,
        FaceName::Back,
        FaceName::Top,
        FaceName::Bottom,
        FaceName::Right,
        FaceName::Left,
    ];

    /// Side occupied by template face `index` (`0321 4567 0154 2376 1265
    /// 0473`) under the standard octant map.
    pub fn of_template_face(index: usize) -> Option<Self> {
        const BY_TEMPLATE: [FaceName; 6] = [
            FaceName::Bottom,
            FaceName::Top,
            FaceName::Front,
            FaceName::Back,
            FaceName::Right,
            FaceName::Left,
        ];
        BY_TEMPLATE.get(index).copied()
    }

    /// Side whose canonical normal is within `tolerance` of `normal`.
    pub fn of_normal(normal: &Vec3, tolerance: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|name| (name.canonical_basis().normal - normal).norm() <= tolerance)
    }

    /// The fixed frame for this side.
    pub fn canonical_basis(self) -> CanonicalFaceBasis {
        let (normal, u, v) = match self {
            FaceName::Front => (Vec3::z(), Vec3::x(), Vec3::y()),
            FaceName::Back => (-Vec3::z(), -Vec3::x(), Vec3::y()),
            FaceName::Top => (Vec3::y(), Vec3::x(), -Vec3::z()),
            FaceName::Bottom => (-Vec3::y(), Vec3::x(), Vec3::z()),
            FaceName::Right => (Vec3::x(), -Vec3::z(), Vec3::y()),
            FaceName::Left => (-Vec3::x(), Vec3::z(), Vec3::y()),
        };
        CanonicalFaceBasis { normal, u, v }
    }
}

impl fmt::Display for FaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaceName::Front => "front",
            FaceName::Back => "back",
            FaceName::Top => "top",
            FaceName::Bottom => "bottom",
            FaceName::Right => "right",
            FaceName::Left => "left",
        };
        f.write_str(name)
    }
}
