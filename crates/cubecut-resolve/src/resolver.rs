//! Address resolution against a posed box.

use std::collections::BTreeMap;
use std::sync::Arc;

use cubecut_math::{Axis, Point3};
use cubecut_snap::{FaceKey, SnapAddress, VertexKey};

use crate::face::{FaceFrame, FaceResolution};
use crate::octant::OctantMap;
use crate::pose::{BoxPose, BoxSize, SizePatch};

/// Display labels by vertex key. Cosmetic; never affects positions.
pub type LabelMap = BTreeMap<VertexKey, String>;

/// Both endpoints of an edge and the distance between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeResolution {
    /// First endpoint.
    pub start: Point3,
    /// Second endpoint.
    pub end: Point3,
    /// Euclidean distance from `start` to `end`.
    pub length: f64,
}

/// Maps snap addresses to world positions for one box.
///
/// The pose is an immutable value behind an `Arc`; [`set_size`] and
/// [`set_pose`] swap in a new one, so a snapshot taken with [`pose`] never
/// changes under the caller. Every query recomputes from the current pose.
///
/// [`set_size`]: GeometryResolver::set_size
/// [`set_pose`]: GeometryResolver::set_pose
/// [`pose`]: GeometryResolver::pose
#[derive(Debug, Clone)]
pub struct GeometryResolver {
    pose: Arc<BoxPose>,
    octants: OctantMap,
    labels: LabelMap,
}

impl GeometryResolver {
    /// Resolver for `pose` with corner keys from `octants`.
    pub fn new(pose: BoxPose, octants: OctantMap) -> Self {
        Self {
            pose: Arc::new(pose),
            octants,
            labels: LabelMap::new(),
        }
    }

    /// Box of `size` centered at the origin, world axes, standard corner keys.
    pub fn standard(size: BoxSize) -> Self {
        Self::new(BoxPose::centered(size), OctantMap::standard())
    }

    /// Current pose.
    pub fn pose(&self) -> Arc<BoxPose> {
        Arc::clone(&self.pose)
    }

    /// Current size.
    pub fn size(&self) -> BoxSize {
        self.pose.size
    }

    /// Corner key mapping.
    pub fn octants(&self) -> &OctantMap {
        &self.octants
    }

    /// Position of corner `key`; `None` if the key is unmapped.
    pub fn resolve_vertex(&self, key: &VertexKey) -> Option<Point3> {
        let signs = self.octants.get(key)?;
        let pose = &*self.pose;
        let offset = Axis::ALL.iter().fold(cubecut_math::Vec3::zeros(), |acc, &axis| {
            let half = f64::from(signs[axis.index()]) * pose.size.get(axis) / 2.0;
            acc + pose.basis.axis(axis) * half
        });
        Some(pose.origin + offset)
    }

    /// Endpoints and length of the segment between corners `a` and `b`.
    pub fn resolve_edge(&self, a: &VertexKey, b: &VertexKey) -> Option<EdgeResolution> {
        let start = self.resolve_vertex(a)?;
        let end = self.resolve_vertex(b)?;
        Some(EdgeResolution {
            start,
            end,
            length: (end - start).norm(),
        })
    }

    /// Corners, normal and in-plane basis of face `key`.
    ///
    /// The key is split into exactly four mapped corner keys; anything else
    /// does not resolve.
    pub fn resolve_face(&self, key: &FaceKey) -> Option<FaceResolution> {
        let known: Vec<&VertexKey> = self.octants.keys().collect();
        let corners = key.segment(&known, 4)?;
        let mut vertices = [Point3::origin(); 4];
        for (slot, corner) in vertices.iter_mut().zip(corners) {
            *slot = self.resolve_vertex(corner)?;
        }
        Some(FaceResolution::from_corners(vertices))
    }

    /// Centroid of face `key`.
    pub fn resolve_face_center(&self, key: &FaceKey) -> Option<Point3> {
        self.resolve_face(key).map(|face| face.center())
    }

    /// Local frame of face `key`, anchored at its first corner.
    pub fn face_frame(&self, key: &FaceKey) -> Option<FaceFrame> {
        self.resolve_face(key).map(|face| face.frame())
    }

    /// Position of any address.
    ///
    /// Edge addresses are normalized first, so both endpoint orders give the
    /// same point, and ratios `0` and `1` land exactly on the corners.
    /// `None` if the address does not normalize or names unmapped keys.
    pub fn resolve_address(&self, addr: &SnapAddress) -> Option<Point3> {
        match addr.canonical()? {
            SnapAddress::Vertex(key) => self.resolve_vertex(&key),
            SnapAddress::Edge { start, end, ratio } => {
                let edge = self.resolve_edge(&start, &end)?;
                Some(edge.start + (edge.end - edge.start) * ratio.as_f64())
            }
            SnapAddress::Face(key) => self.resolve_face_center(&key),
        }
    }

    /// Parse and resolve address text in one step.
    pub fn resolve_text(&self, text: &str) -> Option<Point3> {
        self.resolve_address(&cubecut_snap::parse(text)?)
    }

    /// Merge `patch` into the size.
    ///
    /// Returns `false` and keeps the current pose if the merged size would
    /// not be finite and positive.
    pub fn set_size(&mut self, patch: &SizePatch) -> bool {
        match self.pose.with_size(patch) {
            Some(pose) => {
                self.pose = Arc::new(pose);
                true
            }
            None => false,
        }
    }

    /// Replace the whole pose.
    pub fn set_pose(&mut self, pose: BoxPose) {
        self.pose = Arc::new(pose);
    }

    /// Replace the label map; `None` clears it.
    pub fn set_label_map(&mut self, labels: Option<LabelMap>) {
        self.labels = labels.unwrap_or_default();
    }

    /// Current label map.
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Label of corner `key`, if any.
    pub fn label(&self, key: &VertexKey) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

impl Default for GeometryResolver {
    fn default() -> Self {
        Self::standard(BoxSize::default())
    }
}
