//! Box size and placement.

use cubecut_math::{Axis, Basis3, Point3};
use serde::{Deserialize, Serialize};

/// Edge lengths of the box along its three axes.
///
/// Lengths are finite and positive when built through [`BoxSize::new`],
/// [`BoxSize::merge`] or deserialization; hand-built values can be checked
/// with [`BoxSize::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SizeRepr")]
pub struct BoxSize {
    /// Length along the x axis.
    pub lx: f64,
    /// Length along the y axis.
    pub ly: f64,
    /// Length along the z axis.
    pub lz: f64,
}

impl BoxSize {
    /// Create a size, or `None` if any length is not finite and positive.
    pub fn new(lx: f64, ly: f64, lz: f64) -> Option<Self> {
        let size = Self { lx, ly, lz };
        size.is_valid().then_some(size)
    }

    /// A cube with edge length `edge`.
    pub fn cube(edge: f64) -> Option<Self> {
        Self::new(edge, edge, edge)
    }

    /// Length along `axis`.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.lx,
            Axis::Y => self.ly,
            Axis::Z => self.lz,
        }
    }

    /// All three lengths finite and positive.
    pub fn is_valid(&self) -> bool {
        [self.lx, self.ly, self.lz]
            .iter()
            .all(|l| l.is_finite() && *l > 0.0)
    }

    /// Overwrite the axes present in `patch`, keeping the others.
    ///
    /// `None` if the merged size is invalid.
    pub fn merge(&self, patch: &SizePatch) -> Option<Self> {
        Self::new(
            patch.lx.unwrap_or(self.lx),
            patch.ly.unwrap_or(self.ly),
            patch.lz.unwrap_or(self.lz),
        )
    }
}

#[derive(Deserialize)]
struct SizeRepr {
    lx: f64,
    ly: f64,
    lz: f64,
}

impl TryFrom<SizeRepr> for BoxSize {
    type Error = String;

    fn try_from(repr: SizeRepr) -> Result<Self, String> {
        Self::new(repr.lx, repr.ly, repr.lz).ok_or_else(|| {
            format!(
                "box lengths must be finite and positive, got {} x {} x {}",
                repr.lx, repr.ly, repr.lz
            )
        })
    }
}

impl Default for BoxSize {
    fn default() -> Self {
        Self {
            lx: 1.0,
            ly: 1.0,
            lz: 1.0,
        }
    }
}

/// Partial size update; absent axes keep their current length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizePatch {
    /// New x length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lx: Option<f64>,
    /// New y length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ly: Option<f64>,
    /// New z length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lz: Option<f64>,
}

impl SizePatch {
    /// Patch a single axis.
    pub fn axis(axis: Axis, length: f64) -> Self {
        let mut patch = Self::default();
        match axis {
            Axis::X => patch.lx = Some(length),
            Axis::Y => patch.ly = Some(length),
            Axis::Z => patch.lz = Some(length),
        }
        patch
    }

    /// True if no axis is set.
    pub fn is_empty(&self) -> bool {
        self.lx.is_none() && self.ly.is_none() && self.lz.is_none()
    }
}

/// Size, origin and orientation of a box.
///
/// The origin is the box center; corners sit at half the size along each
/// basis axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxPose {
    /// Edge lengths.
    pub size: BoxSize,
    /// Box center.
    #[serde(default = "Point3::origin")]
    pub origin: Point3,
    /// Box axes.
    #[serde(default)]
    pub basis: Basis3,
}

impl BoxPose {
    /// A box of `size` centered at the world origin with world axes.
    pub fn centered(size: BoxSize) -> Self {
        Self {
            size,
            origin: Point3::origin(),
            basis: Basis3::world(),
        }
    }

    /// Same placement with a patched size; `None` if the result is invalid.
    pub fn with_size(&self, patch: &SizePatch) -> Option<Self> {
        Some(Self {
            size: self.size.merge(patch)?,
            ..*self
        })
    }
}
