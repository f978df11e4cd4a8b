//! The box adjacency graph.

use std::collections::{BTreeMap, HashMap};

use cubecut_snap::{FaceKey, Ratio, SnapAddress, VertexKey};
use slotmap::SlotMap;
use tracing::warn;

use crate::error::{SkippedEntry, TopoError};
use crate::template::BoxTemplate;
use crate::{EdgeId, FaceId, VertexId};

/// Display labels keyed by vertex key.
pub type LabelMap = BTreeMap<VertexKey, String>;

/// Display labels keyed by template slot, consulted after [`LabelMap`].
pub type SlotLabelMap = BTreeMap<usize, String>;

/// A box corner.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Stable key (the octant map index).
    pub key: VertexKey,
    /// Template slot, 0-7 for a box.
    pub index: usize,
    /// Cosmetic label, if any.
    pub label: Option<String>,
    /// Edges touching this vertex, in template order.
    pub edges: Vec<EdgeId>,
    /// Faces touching this vertex, in template order.
    pub faces: Vec<FaceId>,
}

/// A named point lying on an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSnapPoint {
    /// Position from the edge's first vertex.
    pub ratio: Ratio,
    /// Canonical address of the point.
    pub address: SnapAddress,
}

/// A box edge.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Endpoints, lower slot first.
    pub vertices: [VertexId; 2],
    /// Faces bordering this edge (0-2 for a well-formed template).
    pub faces: Vec<FaceId>,
    /// Named snap points; the midpoint by default.
    pub snap_points: Vec<EdgeSnapPoint>,
}

/// A box face.
#[derive(Debug, Clone)]
pub struct Face {
    /// Concatenated vertex keys in loop order.
    pub key: FaceKey,
    /// Boundary loop.
    pub vertices: Vec<VertexId>,
    /// Boundary edges, one per consecutive vertex pair.
    pub edges: Vec<EdgeId>,
    /// Faces sharing an edge with this one, without duplicates.
    pub adjacent_faces: Vec<FaceId>,
}

/// Vertex/edge/face adjacency of a labeled box.
///
/// Built once per box configuration and shared read-only. The only
/// mutation is [`TopologyGraph::relabel`], which touches display labels
/// and never adjacency. Collections iterate in template order.
#[derive(Debug, Clone)]
pub struct TopologyGraph {
    vertices: SlotMap<VertexId, Vertex>,
    edges: SlotMap<EdgeId, Edge>,
    faces: SlotMap<FaceId, Face>,
    vertex_by_key: HashMap<VertexKey, VertexId>,
    vertex_by_slot: HashMap<usize, VertexId>,
    edge_by_ends: HashMap<(VertexId, VertexId), EdgeId>,
    face_by_key: HashMap<FaceKey, FaceId>,
    labels: LabelMap,
}

impl TopologyGraph {
    /// The standard box with keys `"0"`..`"7"` and no labels.
    pub fn standard() -> Self {
        let keys: Vec<VertexKey> = (0..8u32).map(VertexKey::from).collect();
        Self::build(&keys, &BoxTemplate::standard(), None)
    }

    /// Best-effort build: template entries that do not map onto
    /// `vertex_keys` are logged and skipped.
    ///
    /// `vertex_keys[slot]` is the key of template slot `slot`.
    pub fn build(
        vertex_keys: &[VertexKey],
        template: &BoxTemplate,
        labels: Option<&LabelMap>,
    ) -> Self {
        let (graph, skipped) = Self::build_with_report(vertex_keys, template, labels);
        for entry in &skipped {
            warn!(entry = %entry, "skipped box template entry");
        }
        graph
    }

    /// Strict build: any entry the best-effort build would skip is an
    /// error, and all of them are reported together.
    pub fn build_strict(
        vertex_keys: &[VertexKey],
        template: &BoxTemplate,
        labels: Option<&LabelMap>,
    ) -> Result<Self, TopoError> {
        let (graph, skipped) = Self::build_with_report(vertex_keys, template, labels);
        if skipped.is_empty() {
            Ok(graph)
        } else {
            Err(TopoError::InvalidTemplate { skipped })
        }
    }

    /// Build and return the list of skipped template entries.
    pub fn build_with_report(
        vertex_keys: &[VertexKey],
        template: &BoxTemplate,
        labels: Option<&LabelMap>,
    ) -> (Self, Vec<SkippedEntry>) {
        let mut graph = Self {
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            vertex_by_key: HashMap::new(),
            vertex_by_slot: HashMap::new(),
            edge_by_ends: HashMap::new(),
            face_by_key: HashMap::new(),
            labels: LabelMap::new(),
        };
        let mut skipped = Vec::new();

        for (slot, key) in vertex_keys.iter().enumerate() {
            if graph.vertex_by_key.contains_key(key) {
                skipped.push(SkippedEntry::DuplicateVertexKey {
                    slot,
                    key: key.to_string(),
                });
                continue;
            }
            graph.add_vertex(slot, key.clone());
        }

        for (i, &[a, b]) in template.edges.iter().enumerate() {
            let (va, vb) = match (graph.slot(a), graph.slot(b)) {
                (Some(va), Some(vb)) => (va, vb),
                (va, _) => {
                    let slot = if va.is_none() { a } else { b };
                    skipped.push(SkippedEntry::EdgeUnknownSlot { edge: i, slot });
                    continue;
                }
            };
            if va == vb {
                skipped.push(SkippedEntry::DegenerateEdge { edge: i });
                continue;
            }
            if graph.find_edge(va, vb).is_some() {
                skipped.push(SkippedEntry::DuplicateEdge { edge: i });
                continue;
            }
            graph.add_edge(va, vb);
        }

        for (i, slots) in template.faces.iter().enumerate() {
            let loop_ids: Option<Vec<VertexId>> = slots.iter().map(|&s| graph.slot(s)).collect();
            match loop_ids {
                Some(loop_ids) => graph.add_face(i, slots, loop_ids, &mut skipped),
                None => {
                    if let Some(slot) = slots.iter().copied().find(|&s| graph.slot(s).is_none()) {
                        skipped.push(SkippedEntry::FaceUnknownSlot { face: i, slot });
                    }
                }
            }
        }

        graph.link_adjacent_faces();
        graph.relabel(labels);
        (graph, skipped)
    }

    fn slot(&self, slot: usize) -> Option<VertexId> {
        self.vertex_by_slot.get(&slot).copied()
    }

    fn add_vertex(&mut self, slot: usize, key: VertexKey) -> VertexId {
        let id = self.vertices.insert(Vertex {
            key: key.clone(),
            index: slot,
            label: None,
            edges: Vec::new(),
            faces: Vec::new(),
        });
        self.vertex_by_key.insert(key, id);
        self.vertex_by_slot.insert(slot, id);
        id
    }

    fn add_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let (lo, hi) = if self.vertices[a].index <= self.vertices[b].index {
            (a, b)
        } else {
            (b, a)
        };
        let midpoint = SnapAddress::edge(
            self.vertices[lo].key.clone(),
            self.vertices[hi].key.clone(),
            Ratio::HALF,
        )
        .canonical();
        let id = self.edges.insert(Edge {
            vertices: [lo, hi],
            faces: Vec::new(),
            snap_points: midpoint
                .map(|address| EdgeSnapPoint {
                    ratio: Ratio::HALF,
                    address,
                })
                .into_iter()
                .collect(),
        });
        self.edge_by_ends.insert(ordered(lo, hi), id);
        self.vertices[lo].edges.push(id);
        self.vertices[hi].edges.push(id);
        id
    }

    fn add_face(
        &mut self,
        template_index: usize,
        slots: &[usize],
        loop_ids: Vec<VertexId>,
        skipped: &mut Vec<SkippedEntry>,
    ) {
        let n = loop_ids.len();
        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            let (a, b) = (loop_ids[i], loop_ids[(i + 1) % n]);
            match self.find_edge(a, b) {
                Some(e) => edges.push(e),
                None => skipped.push(SkippedEntry::FaceMissingEdge {
                    face: template_index,
                    slots: [slots[i], slots[(i + 1) % n]],
                }),
            }
        }

        let key = FaceKey::from_loop(loop_ids.iter().map(|&v| &self.vertices[v].key));
        let Some(key) = key else {
            return;
        };
        let id = self.faces.insert(Face {
            key: key.clone(),
            vertices: loop_ids.clone(),
            edges: edges.clone(),
            adjacent_faces: Vec::new(),
        });
        self.face_by_key.insert(key, id);

        for v in loop_ids {
            if !self.vertices[v].faces.contains(&id) {
                self.vertices[v].faces.push(id);
            }
        }
        for e in edges {
            if !self.edges[e].faces.contains(&id) {
                self.edges[e].faces.push(id);
            }
        }
    }

    fn link_adjacent_faces(&mut self) {
        let bordering: Vec<Vec<FaceId>> = self.edges.values().map(|e| e.faces.clone()).collect();
        for faces in bordering {
            for (i, &a) in faces.iter().enumerate() {
                for &b in &faces[i + 1..] {
                    if !self.faces[a].adjacent_faces.contains(&b) {
                        self.faces[a].adjacent_faces.push(b);
                    }
                    if !self.faces[b].adjacent_faces.contains(&a) {
                        self.faces[b].adjacent_faces.push(a);
                    }
                }
            }
        }
    }

    /// Replace display labels; unknown keys are ignored and vertices absent
    /// from `labels` lose their label.
    pub fn relabel(&mut self, labels: Option<&LabelMap>) {
        self.relabel_with_fallback(labels, None);
    }

    /// Like [`relabel`](Self::relabel), falling back to `fallback` (keyed by
    /// template slot) for vertices `labels` does not name.
    pub fn relabel_with_fallback(&mut self, labels: Option<&LabelMap>, fallback: Option<&SlotLabelMap>) {
        self.labels = labels.cloned().unwrap_or_default();
        for vertex in self.vertices.values_mut() {
            vertex.label = labels
                .and_then(|m| m.get(&vertex.key))
                .or_else(|| fallback.and_then(|m| m.get(&vertex.index)))
                .cloned();
        }
    }

    /// The label map last applied.
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// All vertices in template order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter()
    }

    /// All edges in template order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter()
    }

    /// All faces in template order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Vertex by id.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Face by id.
    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id)
    }

    /// Vertex with the given key.
    pub fn vertex_by_key(&self, key: &VertexKey) -> Option<VertexId> {
        self.vertex_by_key.get(key).copied()
    }

    /// Face with the given key.
    pub fn face_by_key(&self, key: &FaceKey) -> Option<FaceId> {
        self.face_by_key.get(key).copied()
    }

    /// Edge joining two vertices, in either order.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_by_ends.get(&ordered(a, b)).copied()
    }

    /// Edge joining two vertex keys, in either order.
    pub fn edge_between(&self, a: &VertexKey, b: &VertexKey) -> Option<EdgeId> {
        self.find_edge(self.vertex_by_key(a)?, self.vertex_by_key(b)?)
    }

    /// Vertex keys of an edge's endpoints, lower slot first.
    pub fn edge_keys(&self, id: EdgeId) -> Option<[&VertexKey; 2]> {
        let edge = self.edges.get(id)?;
        Some([
            &self.vertices[edge.vertices[0]].key,
            &self.vertices[edge.vertices[1]].key,
        ])
    }

    /// Vertex keys around a face, in loop order.
    pub fn face_vertex_keys(&self, id: FaceId) -> Option<Vec<&VertexKey>> {
        let face = self.faces.get(id)?;
        Some(face.vertices.iter().map(|&v| &self.vertices[v].key).collect())
    }

    /// True when every edge borders exactly two faces.
    pub fn is_closed(&self) -> bool {
        !self.edges.is_empty() && self.edges.values().all(|e| e.faces.len() == 2)
    }

    /// Every snap point of the box as canonical addresses: corners, edge
    /// snap points, then face centers, each in template order.
    pub fn snap_points(&self) -> Vec<SnapAddress> {
        let corners = self
            .vertices
            .values()
            .map(|v| SnapAddress::vertex(v.key.clone()));
        let on_edges = self
            .edges
            .values()
            .flat_map(|e| e.snap_points.iter().map(|p| p.address.clone()));
        let centers = self
            .faces
            .values()
            .map(|f| SnapAddress::face(f.key.clone()));
        corners.chain(on_edges).chain(centers).collect()
    }
}

fn ordered(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
