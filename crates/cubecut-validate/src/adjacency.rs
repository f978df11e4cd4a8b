//! Face adjacency of a cut result by shared coordinates.

use std::collections::HashMap;

use cubecut_math::Point3;
use serde::{Deserialize, Serialize};

use crate::structure::FacePolygon;

/// Grid size used to match vertex coordinates between faces.
pub const DEFAULT_ADJACENCY_EPSILON: f64 = 1e-3;

/// Two faces that share an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceAdjacency {
    /// Face that first used the edge.
    pub a: String,
    /// Face that used it again.
    pub b: String,
    /// The edge as first seen, in `a`'s winding.
    pub shared_edge: [Point3; 2],
}

type GridKey = [i64; 3];

fn grid_key(p: &Point3, epsilon: f64) -> GridKey {
    [
        (p.x / epsilon).round() as i64,
        (p.y / epsilon).round() as i64,
        (p.z / epsilon).round() as i64,
    ]
}

/// Pairs of faces sharing an edge, matched on coordinates snapped to an
/// `epsilon` grid.
///
/// Each edge belongs to the first face that uses it; every later face
/// using it pairs with that one. Polygons without a face id or with fewer
/// than two coordinates are ignored. Pairs come out in polygon order.
pub fn face_adjacency(polygons: &[FacePolygon], epsilon: f64) -> Vec<FaceAdjacency> {
    let mut owners: HashMap<(GridKey, GridKey), (&str, [Point3; 2])> = HashMap::new();
    let mut adjacency = Vec::new();

    for polygon in polygons {
        let vertices = &polygon.vertices;
        if polygon.face_id.is_empty() || vertices.len() < 2 {
            continue;
        }
        for (i, start) in vertices.iter().enumerate() {
            let end = &vertices[(i + 1) % vertices.len()];
            let ks = grid_key(start, epsilon);
            let ke = grid_key(end, epsilon);
            let key = if ks <= ke { (ks, ke) } else { (ke, ks) };
            match owners.get(&key) {
                None => {
                    owners.insert(key, (polygon.face_id.as_str(), [*start, *end]));
                }
                Some((owner, edge)) if *owner != polygon.face_id => {
                    adjacency.push(FaceAdjacency {
                        a: owner.to_string(),
                        b: polygon.face_id.clone(),
                        shared_edge: *edge,
                    });
                }
                Some(_) => {}
            }
        }
    }
    adjacency
}
