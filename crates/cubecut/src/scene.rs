//! A box scene: topology plus resolver, and the cut pipeline around them.

use std::collections::HashSet;

use cubecut_math::Point3;
use cubecut_resolve::{BoxSize, GeometryResolver, SizePatch};
use cubecut_snap::SnapAddress;
use cubecut_topo::{LabelMap, TopologyGraph};
use cubecut_validate::{
    face_adjacency, validate_structure, FacePolygon, PointResolver, ValidationReport,
    DEFAULT_ADJACENCY_EPSILON,
};
use tracing::{debug, warn};

use crate::config::SceneConfig;
use crate::cut::{cut_segments, CutEngine, CutOutcome, CutPoint, CutRequest};
use crate::error::{ConfigError, Result, SceneError};

/// One box: its topology and its pose-aware resolver.
#[derive(Debug, Clone)]
pub struct BoxScene {
    graph: TopologyGraph,
    resolver: GeometryResolver,
}

impl BoxScene {
    /// Scene from parts built elsewhere.
    pub fn new(graph: TopologyGraph, resolver: GeometryResolver) -> Self {
        Self { graph, resolver }
    }

    /// Standard box of `size` centered at the origin.
    pub fn standard(size: BoxSize) -> Self {
        Self::new(TopologyGraph::standard(), GeometryResolver::standard(size))
    }

    /// Scene described by `config`.
    pub fn from_config(config: &SceneConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.topology()?, config.resolver()?))
    }

    /// Box topology.
    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    /// Address resolver.
    pub fn resolver(&self) -> &GeometryResolver {
        &self.resolver
    }

    /// Merge `patch` into the box size; `false` if rejected.
    pub fn set_size(&mut self, patch: &SizePatch) -> bool {
        self.resolver.set_size(patch)
    }

    /// Replace display labels on both topology and resolver.
    pub fn relabel(&mut self, labels: Option<LabelMap>) {
        self.graph.relabel(labels.as_ref());
        self.resolver.set_label_map(labels);
    }

    /// Every snap point of the box with its position.
    pub fn snap_points(&self) -> Vec<(SnapAddress, Point3)> {
        self.graph
            .snap_points()
            .into_iter()
            .filter_map(|addr| {
                let p = self.resolver.resolve_address(&addr)?;
                Some((addr, p))
            })
            .collect()
    }

    /// Structural and geometric validation of `polygons` against this box.
    pub fn validate(&self, polygons: &[FacePolygon]) -> ValidationReport {
        validate_structure(polygons, Some(&self.resolver))
    }

    /// Resolve cut points, keeping the first of any that coincide.
    ///
    /// Fails on the first address that does not resolve, and when fewer
    /// than three distinct points remain.
    pub fn cut_points(&self, addresses: &[SnapAddress]) -> Result<Vec<CutPoint>> {
        let mut seen = HashSet::new();
        let mut points = Vec::with_capacity(addresses.len());
        for addr in addresses {
            let unresolved = || SceneError::Unresolved(addr.to_string());
            let canonical = addr.canonical().ok_or_else(unresolved)?;
            let position = self
                .resolver
                .resolve_address(&canonical)
                .ok_or_else(unresolved)?;
            if seen.insert(canonical.clone()) {
                points.push(CutPoint {
                    address: canonical,
                    position,
                });
            }
        }
        if points.len() < 3 {
            return Err(SceneError::TooFewPoints(points.len()));
        }
        Ok(points)
    }

    /// Cut the box through `addresses` with `engine` and validate the result.
    ///
    /// Nothing reaches the engine unless every address resolves. A result
    /// that is not a closed, consistently oriented genus-0 piece with flat,
    /// non-degenerate faces is rejected with its report.
    pub fn cut<E: CutEngine>(
        &self,
        engine: &mut E,
        addresses: &[SnapAddress],
    ) -> Result<CutOutcome<E::Piece>> {
        let points = self.cut_points(addresses)?;
        let request = CutRequest {
            pose: *self.resolver.pose(),
            points,
        };
        debug!(points = request.points.len(), "requesting cut");

        let result = engine
            .cut(&request)
            .map_err(|e| SceneError::Engine(Box::new(e)))?;

        let report = self.validate(&result.polygons);
        if !report.is_sound_solid() {
            warn!(details = ?report.details, "rejected cut result");
            return Err(SceneError::Rejected(Box::new(report)));
        }

        let polygons: Vec<FacePolygon> = result
            .polygons
            .into_iter()
            .map(|p| self.with_coordinates(p))
            .collect();
        let adjacency = face_adjacency(&polygons, DEFAULT_ADJACENCY_EPSILON);
        let segments = cut_segments(&polygons);
        Ok(CutOutcome {
            points: request.points,
            pieces: result.pieces,
            polygons,
            adjacency,
            segments,
            report,
        })
    }

    /// Parse address text and [`cut`](Self::cut).
    pub fn cut_text<E: CutEngine, S: AsRef<str>>(
        &self,
        engine: &mut E,
        addresses: &[S],
    ) -> Result<CutOutcome<E::Piece>> {
        let parsed = addresses
            .iter()
            .map(|text| {
                let text = text.as_ref();
                cubecut_snap::parse(text).ok_or_else(|| SceneError::Unresolved(text.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.cut(engine, &parsed)
    }

    fn with_coordinates(&self, polygon: FacePolygon) -> FacePolygon {
        if !polygon.vertices.is_empty() {
            return polygon;
        }
        let vertices: Option<Vec<Point3>> = polygon
            .vertex_ids
            .iter()
            .map(|id| self.resolver.resolve_point(id))
            .collect();
        match vertices {
            Some(vertices) => polygon.with_vertices(vertices),
            None => polygon,
        }
    }
}
