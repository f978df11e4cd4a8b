//! Scene configuration files.

use std::collections::BTreeMap;

use cubecut_math::{Basis3, Point3, Tolerance, Vec3};
use cubecut_resolve::{BoxPose, BoxSize, GeometryResolver, OctantMap};
use cubecut_snap::VertexKey;
use cubecut_topo::{BoxTemplate, LabelMap, SlotLabelMap, TopologyGraph};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Box axes as plain vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasisConfig {
    /// x axis.
    pub x: [f64; 3],
    /// y axis.
    pub y: [f64; 3],
    /// z axis.
    pub z: [f64; 3],
}

/// Box edge lengths as read from a file, checked in [`SceneConfig::pose`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeConfig {
    /// x length.
    pub lx: f64,
    /// y length.
    pub ly: f64,
    /// z length.
    pub lz: f64,
}

impl Default for SizeConfig {
    fn default() -> Self {
        let size = BoxSize::default();
        Self {
            lx: size.lx,
            ly: size.ly,
            lz: size.lz,
        }
    }
}

/// Everything needed to set up a box scene.
///
/// Every field is optional: a unit box at the origin with world axes,
/// corner keys `"0"`..`"7"` and no labels.
///
/// ```toml
/// size = { lx = 10.0, ly = 10.0, lz = 10.0 }
/// origin = [0.0, 0.0, 0.0]
///
/// [labels]
/// "0" = "A"
/// "1" = "B"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Box edge lengths.
    #[serde(default)]
    pub size: SizeConfig,
    /// Box center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<[f64; 3]>,
    /// Box axes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<BasisConfig>,
    /// Corner key for each template slot `0..8`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertex_keys: Option<Vec<VertexKey>>,
    /// Corner placement by key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub octants: Option<OctantMap>,
    /// Display labels by corner key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<LabelMap>,
    /// Display labels by template slot, used where `labels` has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_labels: Option<SlotLabelMap>,
}

impl SceneConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML config.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that the config describes a box every corner of which resolves.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pose()?;
        let octants = self.octants();
        if octants.is_empty() {
            return Err(ConfigError::EmptyOctants);
        }
        let keys = self.vertex_keys();
        let expected = BoxTemplate::standard().vertex_count();
        if keys.len() != expected {
            return Err(ConfigError::VertexKeyCount {
                expected,
                found: keys.len(),
            });
        }
        if let Some(missing) = keys.iter().find(|k| octants.get(k).is_none()) {
            return Err(ConfigError::UnknownVertexKey(missing.to_string()));
        }
        Ok(())
    }

    /// Validated pose.
    pub fn pose(&self) -> Result<BoxPose, ConfigError> {
        let SizeConfig { lx, ly, lz } = self.size;
        let size = BoxSize::new(lx, ly, lz).ok_or(ConfigError::InvalidSize { lx, ly, lz })?;
        let origin = match self.origin {
            Some(o) if o.iter().all(|c| c.is_finite()) => Point3::from(o),
            Some(o) => return Err(ConfigError::InvalidOrigin(o)),
            None => Point3::origin(),
        };
        let basis = match self.basis {
            Some(b) => Basis3::try_new(
                Vec3::from(b.x),
                Vec3::from(b.y),
                Vec3::from(b.z),
                &Tolerance::DEFAULT,
            )
            .ok_or(ConfigError::NonOrthonormalBasis)?,
            None => Basis3::world(),
        };
        Ok(BoxPose {
            size,
            origin,
            basis,
        })
    }

    /// Corner placement, the standard map if none is given.
    pub fn octants(&self) -> OctantMap {
        self.octants.clone().unwrap_or_default()
    }

    /// Corner keys by slot, `"0"`..`"7"` if none are given.
    pub fn vertex_keys(&self) -> Vec<VertexKey> {
        match &self.vertex_keys {
            Some(keys) => keys.clone(),
            None => (0..BoxTemplate::standard().vertex_count() as u32)
                .map(VertexKey::from)
                .collect(),
        }
    }

    /// Resolver for the configured pose, corners and labels.
    pub fn resolver(&self) -> Result<GeometryResolver, ConfigError> {
        let mut resolver = GeometryResolver::new(self.pose()?, self.octants());
        resolver.set_label_map(Some(self.effective_labels()));
        Ok(resolver)
    }

    /// Topology over the configured corner keys.
    ///
    /// Strict: a key list that leaves template entries unbuilt is an error.
    pub fn topology(&self) -> Result<TopologyGraph, ConfigError> {
        let mut graph =
            TopologyGraph::build_strict(&self.vertex_keys(), &BoxTemplate::standard(), None)?;
        graph.relabel_with_fallback(self.labels.as_ref(), self.slot_labels.as_ref());
        Ok(graph)
    }

    /// Labels by key after applying slot fallbacks.
    fn effective_labels(&self) -> LabelMap {
        let mut labels: BTreeMap<VertexKey, String> = BTreeMap::new();
        for (slot, key) in self.vertex_keys().into_iter().enumerate() {
            let label = self
                .labels
                .as_ref()
                .and_then(|l| l.get(&key))
                .or_else(|| self.slot_labels.as_ref().and_then(|l| l.get(&slot)));
            if let Some(label) = label {
                labels.insert(key, label.clone());
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_config_is_unit_box() {
        let config = SceneConfig::from_json("{}").unwrap();
        let pose = config.pose().unwrap();
        assert_eq!(pose, BoxPose::centered(BoxSize::default()));
        assert_eq!(config.vertex_keys().len(), 8);
    }

    #[test]
    fn test_json_config() {
        let config = SceneConfig::from_json(
            r#"{
                "size": { "lx": 10, "ly": 20, "lz": 30 },
                "origin": [1, 2, 3],
                "labels": { "0": "A", "5": "F" }
            }"#,
        )
        .unwrap();
        let resolver = config.resolver().unwrap();
        let p = resolver.resolve_vertex(&VertexKey::from(0)).unwrap();
        assert_abs_diff_eq!(p.x, -4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, -8.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 18.0, epsilon = 1e-12);
        assert_eq!(resolver.label(&VertexKey::from(5)), Some("F"));
    }

    #[test]
    fn test_toml_config() {
        let config = SceneConfig::from_toml(
            r#"
            size = { lx = 4.0, ly = 4.0, lz = 4.0 }
            basis = { x = [0.0, 1.0, 0.0], y = [-1.0, 0.0, 0.0], z = [0.0, 0.0, 1.0] }

            [labels]
            "0" = "P"
            "#,
        )
        .unwrap();
        let graph = config.topology().unwrap();
        let v0 = graph.vertex_by_key(&VertexKey::from(0)).unwrap();
        assert_eq!(graph.vertex(v0).unwrap().label.as_deref(), Some("P"));
        let p = config.resolver().unwrap().resolve_vertex(&VertexKey::from(5)).unwrap();
        // x axis maps to world y, y axis to world -x.
        assert_abs_diff_eq!(p.x, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_slot_label_fallback() {
        let config = SceneConfig::from_json(
            r#"{ "labels": { "1": "B" }, "slot_labels": { "0": "zero", "1": "one" } }"#,
        )
        .unwrap();
        let resolver = config.resolver().unwrap();
        assert_eq!(resolver.label(&VertexKey::from(0)), Some("zero"));
        assert_eq!(resolver.label(&VertexKey::from(1)), Some("B"));
        assert_eq!(resolver.label(&VertexKey::from(2)), None);
        let graph = config.topology().unwrap();
        let v0 = graph.vertex_by_key(&VertexKey::from(0)).unwrap();
        assert_eq!(graph.vertex(v0).unwrap().label.as_deref(), Some("zero"));
        assert_eq!(Some(graph.labels()), config.labels.as_ref());
    }

    #[test]
    fn test_custom_keys() {
        let config = SceneConfig::from_json(
            r#"{
                "vertex_keys": ["A","B","C","D","E","F","G","H"],
                "octants": {
                    "A": [-1,-1,1], "B": [1,-1,1], "C": [1,-1,-1], "D": [-1,-1,-1],
                    "E": [-1,1,1], "F": [1,1,1], "G": [1,1,-1], "H": [-1,1,-1]
                }
            }"#,
        )
        .unwrap();
        let resolver = config.resolver().unwrap();
        assert!(resolver.resolve_text("F:ABFE@center").is_some());
        assert_eq!(config.topology().unwrap().num_faces(), 6);
    }

    #[test]
    fn test_rejects_bad_configs() {
        assert!(matches!(
            SceneConfig::from_json(r#"{"size":{"lx":0,"ly":1,"lz":1}}"#),
            Err(ConfigError::InvalidSize { .. })
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{"basis":{"x":[1,0,0],"y":[1,0,0],"z":[0,0,1]}}"#),
            Err(ConfigError::NonOrthonormalBasis)
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{"octants":{}}"#),
            Err(ConfigError::EmptyOctants)
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{"vertex_keys":["0","1"]}"#),
            Err(ConfigError::VertexKeyCount { expected: 8, found: 2 })
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{"octants":{"0":[1,1,3]}}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{"vertex_keys":["0","1","2","3","4","5","6","x"]}"#),
            Err(ConfigError::UnknownVertexKey(k)) if k == "x"
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{"colour":"red"}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            SceneConfig::from_toml("size = 3"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SceneConfig {
            size: SizeConfig {
                lx: 1.0,
                ly: 2.0,
                lz: 3.0,
            },
            origin: Some([0.5, 0.0, 0.0]),
            ..SceneConfig::default()
        };
        let back = SceneConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
