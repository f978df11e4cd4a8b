//! Validation of vertex-identifier face loops.

use std::collections::{HashMap, HashSet};

use cubecut_math::{Point3, Vec3};
use cubecut_resolve::GeometryResolver;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::report::{euler, EdgeTally, ValidationReport, EXPECTED_EULER};

/// Leading-triangle normal length below which a face is degenerate.
pub const DEGENERATE_TOLERANCE: f64 = 1e-6;

/// Distance from the face plane beyond which a vertex makes a face
/// non-planar.
pub const PLANARITY_TOLERANCE: f64 = 1e-4;

/// Where a face of a cut result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceKind {
    /// Remaining part of a box face.
    Original,
    /// The new face made by the cutting plane.
    Cut,
}

/// One face of a cut result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacePolygon {
    /// Face identifier, unique within a result.
    pub face_id: String,
    /// Box face remainder or cut face.
    pub kind: FaceKind,
    /// Boundary loop as vertex identifiers, usually snap address text.
    pub vertex_ids: Vec<String>,
    /// Boundary loop coordinates, when the producer supplies them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices: Vec<Point3>,
}

impl FacePolygon {
    /// Face with identifiers only.
    pub fn new<I, S>(face_id: impl Into<String>, kind: FaceKind, vertex_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            face_id: face_id.into(),
            kind,
            vertex_ids: vertex_ids.into_iter().map(Into::into).collect(),
            vertices: Vec::new(),
        }
    }

    /// Attach coordinates to the loop.
    pub fn with_vertices(mut self, vertices: Vec<Point3>) -> Self {
        self.vertices = vertices;
        self
    }
}

/// Maps a vertex identifier to a position for the geometric checks.
pub trait PointResolver {
    /// Position of `id`, or `None` if it cannot be placed.
    fn resolve_point(&self, id: &str) -> Option<Point3>;
}

impl PointResolver for GeometryResolver {
    fn resolve_point(&self, id: &str) -> Option<Point3> {
        self.resolve_text(id)
    }
}

impl PointResolver for HashMap<String, Point3> {
    fn resolve_point(&self, id: &str) -> Option<Point3> {
        self.get(id).copied()
    }
}

/// Identity of a loop entry: canonical address text when the identifier is
/// an address, the identifier itself otherwise.
fn vertex_identity(id: &str) -> String {
    match cubecut_snap::parse(id).and_then(|a| a.canonical()) {
        Some(addr) => addr.to_string(),
        None => id.to_string(),
    }
}

/// Check face loops by vertex identity.
///
/// Identifiers that are snap addresses are compared in canonical form, so
/// `E:1-0@1/4` and `E:0-1@3/4` are the same vertex. Loops shorter than
/// three entries contribute vertices but no edges; consecutive repeats are
/// skipped. The face count is the number of polygons passed in.
///
/// With a `resolver`, each face with at least three placed vertices is also
/// checked for a zero-area leading triangle and for vertices off the plane
/// of its first three. Without one, both flags stay false.
pub fn validate_structure(
    polygons: &[FacePolygon],
    resolver: Option<&dyn PointResolver>,
) -> ValidationReport {
    let loops: Vec<Vec<String>> = polygons
        .iter()
        .map(|p| p.vertex_ids.iter().map(|id| vertex_identity(id)).collect())
        .collect();

    let unique: HashSet<&String> = loops.iter().flatten().collect();

    let mut edges = EdgeTally::new();
    let mut directed: HashMap<(&String, &String), usize> = HashMap::new();
    for ids in loops.iter().filter(|ids| ids.len() >= 3) {
        for (i, a) in ids.iter().enumerate() {
            let b = &ids[(i + 1) % ids.len()];
            if a == b {
                continue;
            }
            edges.add(a, b);
            *directed.entry((a, b)).or_insert(0) += 1;
        }
    }

    let mut details = Vec::new();
    let mut orientation_errors = 0;
    let mut repeated: Vec<_> = directed.iter().filter(|(_, n)| **n > 1).collect();
    repeated.sort();
    for ((a, b), n) in repeated {
        orientation_errors += 1;
        details.push(format!("Directed edge {a} -> {b} used {n} times"));
    }
    let mut unpaired: Vec<_> = directed
        .keys()
        .filter(|(a, b)| !directed.contains_key(&(*b, *a)))
        .collect();
    unpaired.sort();
    for (a, b) in unpaired {
        orientation_errors += 1;
        details.push(format!("Directed edge {a} -> {b} has no reverse"));
    }

    let mut degenerate_count = 0;
    let mut non_planar_count = 0;
    if let Some(resolver) = resolver {
        for (polygon, ids) in polygons.iter().zip(&loops) {
            match check_face_geometry(resolver, ids) {
                FaceGeometry::Degenerate => {
                    degenerate_count += 1;
                    details.push(format!("Face {} is degenerate", polygon.face_id));
                }
                FaceGeometry::NonPlanar(distance) => {
                    non_planar_count += 1;
                    details.push(format!(
                        "Face {} is non-planar ({distance:.6} from plane)",
                        polygon.face_id
                    ));
                }
                FaceGeometry::Sound | FaceGeometry::Unchecked => {}
            }
        }
    }

    let (open_edges, overshared_edges) = edges.defects();
    let v = unique.len();
    let e = edges.len();
    let f = polygons.len();
    let euler_characteristic = euler(v, e, f);

    let mut summary = vec![
        format!("Structure Vertices: {v}, Edges: {e}, Faces: {f}"),
        format!("Euler Characteristic: {euler_characteristic} (Expected: {EXPECTED_EULER})"),
        format!("Open Edges (Boundaries): {open_edges}"),
        format!("Orientation Errors: {orientation_errors}"),
    ];
    if overshared_edges > 0 {
        summary.push(format!("Non-Manifold Edges (>2 faces): {overshared_edges}"));
    }
    if resolver.is_some() {
        summary.push(format!("Degenerate Faces: {degenerate_count}"));
        summary.push(format!("Non-Planar Faces: {non_planar_count}"));
    }
    summary.append(&mut details);

    let report = ValidationReport {
        is_manifold: open_edges == 0 && overshared_edges == 0,
        is_oriented: Some(orientation_errors == 0),
        has_degenerate_faces: degenerate_count > 0,
        has_non_planar_faces: non_planar_count > 0,
        euler_characteristic,
        vertex_count: v,
        edge_count: e,
        face_count: f,
        open_edges,
        overshared_edges,
        orientation_errors,
        degenerate_count,
        non_planar_count,
        duplicate_vertices: 0,
        isolated_vertices: 0,
        details: summary,
    };
    debug!(
        vertices = v,
        edges = e,
        faces = f,
        euler = euler_characteristic,
        manifold = report.is_manifold,
        orientation_errors,
        "validated face structure"
    );
    report
}

enum FaceGeometry {
    Unchecked,
    Sound,
    Degenerate,
    NonPlanar(f64),
}

fn check_face_geometry(resolver: &dyn PointResolver, ids: &[String]) -> FaceGeometry {
    let points: Vec<Point3> = ids
        .iter()
        .filter_map(|id| resolver.resolve_point(id))
        .collect();
    if points.len() < 3 {
        return FaceGeometry::Unchecked;
    }
    let p0 = points[0];
    let normal: Vec3 = (points[1] - p0).cross(&(points[2] - p0));
    let length = normal.norm();
    if length < DEGENERATE_TOLERANCE {
        return FaceGeometry::Degenerate;
    }
    let unit = normal / length;
    let worst = points[3..]
        .iter()
        .map(|p| unit.dot(&(p - p0)).abs())
        .fold(0.0, f64::max);
    if worst > PLANARITY_TOLERANCE {
        FaceGeometry::NonPlanar(worst)
    } else {
        FaceGeometry::Sound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubecut_resolve::BoxSize;

    fn face(id: &str, ids: &[&str]) -> FacePolygon {
        FacePolygon::new(id, FaceKind::Original, ids.iter().copied())
    }

    fn box_faces() -> Vec<FacePolygon> {
        ["0321", "4567", "0154", "2376", "1265", "0473"]
            .iter()
            .map(|key| {
                let ids: Vec<String> = key.chars().map(|c| format!("V:{c}")).collect();
                FacePolygon::new(*key, FaceKind::Original, ids)
            })
            .collect()
    }

    fn ten() -> GeometryResolver {
        GeometryResolver::standard(BoxSize::cube(10.0).unwrap())
    }

    #[test]
    fn test_box_faces() {
        let report = validate_structure(&box_faces(), None);
        assert!(report.is_manifold);
        assert_eq!(report.is_oriented, Some(true));
        assert_eq!(
            (report.vertex_count, report.edge_count, report.face_count),
            (8, 12, 6)
        );
        assert_eq!(report.euler_characteristic, 2);
        assert!(report.is_sound_solid());
        assert_eq!(report.details[0], "Structure Vertices: 8, Edges: 12, Faces: 6");
    }

    #[test]
    fn test_box_faces_with_resolver() {
        let r = ten();
        let report = validate_structure(&box_faces(), Some(&r));
        assert!(report.is_sound_solid());
        assert!(report.details.contains(&"Non-Planar Faces: 0".to_string()));
    }

    #[test]
    fn test_corner_cut_tetrahedron() {
        // Closed tetrahedron on V:4 V:1 V:7 V:5, the triangle V:4 V:1 V:7
        // tagged as the cut face.
        let polygons = vec![
            FacePolygon::new("cut", FaceKind::Cut, ["V:4", "V:1", "V:7"]),
            face("a", &["V:4", "V:5", "V:1"]),
            face("b", &["V:1", "V:5", "V:7"]),
            face("c", &["V:4", "V:7", "V:5"]),
        ];
        let r = ten();
        let report = validate_structure(&polygons, Some(&r));
        assert!(report.is_manifold);
        assert_eq!(report.is_oriented, Some(true));
        assert_eq!(report.euler_characteristic, 2);
        assert_eq!(report.degenerate_count, 0);
        assert_eq!(report.non_planar_count, 0);
    }

    #[test]
    fn test_single_triangle_is_open() {
        let polygons = vec![FacePolygon::new("cut", FaceKind::Cut, ["V:4", "V:1", "V:7"])];
        let report = validate_structure(&polygons, None);
        assert!(!report.is_manifold);
        assert_eq!(report.open_edges, 3);
        assert_eq!(report.is_oriented, Some(false));
        assert_eq!(report.euler_characteristic, 1);
    }

    #[test]
    fn test_flipped_face_breaks_orientation() {
        let mut polygons = box_faces();
        polygons[1].vertex_ids.reverse();
        let report = validate_structure(&polygons, None);
        assert!(report.is_manifold);
        assert_eq!(report.is_oriented, Some(false));
        // Each top edge now runs the same way twice and lacks a reverse.
        assert_eq!(report.orientation_errors, 8);
    }

    #[test]
    fn test_duplicated_face() {
        let mut polygons = box_faces();
        polygons.push(polygons[0].clone());
        let report = validate_structure(&polygons, None);
        assert!(!report.is_manifold);
        assert_eq!(report.overshared_edges, 4);
        assert_eq!(report.is_oriented, Some(false));
        assert_eq!(report.face_count, 7);
    }

    #[test]
    fn test_equivalent_addresses_share_a_vertex() {
        let polygons = vec![
            face("a", &["V:0", "E:1-0@1/4", "V:4"]),
            face("b", &["E:0-1@3/4", "V:0", "V:4"]),
        ];
        let report = validate_structure(&polygons, None);
        assert_eq!(report.vertex_count, 3);
        assert_eq!(report.edge_count, 3);
        assert!(report.is_manifold);
    }

    #[test]
    fn test_short_loops_and_self_edges() {
        let polygons = vec![
            face("a", &["p", "q"]),
            face("b", &["x", "x", "y", "z"]),
        ];
        let report = validate_structure(&polygons, None);
        assert_eq!(report.vertex_count, 5);
        assert_eq!(report.edge_count, 3);
        assert_eq!(report.face_count, 2);
    }

    #[test]
    fn test_non_planar_quad() {
        // Fourth point sits 0.01 below the top face plane.
        let polygons = vec![face(
            "q",
            &["V:4", "V:5", "V:6", "E:7-3@1/1000"],
        )];
        let r = ten();
        let with = validate_structure(&polygons, Some(&r));
        assert!(with.has_non_planar_faces);
        assert_eq!(with.non_planar_count, 1);
        let without = validate_structure(&polygons, None);
        assert!(!without.has_non_planar_faces);
        assert!(!without.details.iter().any(|d| d.contains("Non-Planar")));
    }

    #[test]
    fn test_degenerate_face() {
        let polygons = vec![face("d", &["V:0", "E:0-1@1/2", "V:1", "V:5"])];
        let r = ten();
        let report = validate_structure(&polygons, Some(&r));
        assert!(report.has_degenerate_faces);
        assert!(!report.has_non_planar_faces);
        // The degenerate face still counts toward F.
        assert_eq!(report.face_count, 1);
    }

    #[test]
    fn test_unresolvable_ids_skip_geometry() {
        let polygons = vec![face("a", &["p", "q", "r", "s"])];
        let r = ten();
        let report = validate_structure(&polygons, Some(&r));
        assert!(!report.has_degenerate_faces);
        assert!(!report.has_non_planar_faces);
    }

    #[test]
    fn test_map_resolver() {
        let lookup: HashMap<String, Point3> = [
            ("a", Point3::new(0.0, 0.0, 0.0)),
            ("b", Point3::new(1.0, 0.0, 0.0)),
            ("c", Point3::new(2.0, 0.0, 0.0)),
        ]
        .into_iter()
        .map(|(k, p)| (k.to_string(), p))
        .collect();
        let report = validate_structure(&[face("f", &["a", "b", "c"])], Some(&lookup));
        assert!(report.has_degenerate_faces);
    }
}
