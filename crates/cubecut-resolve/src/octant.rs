//! Vertex key to box-corner mapping.

use std::collections::BTreeMap;

use cubecut_snap::VertexKey;
use serde::{Deserialize, Serialize};

/// Sign of a corner along each box axis, each component `-1` or `+1`.
pub type OctantSigns = [i8; 3];

/// Assigns each vertex key the corner of the box it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<VertexKey, OctantSigns>",
    into = "BTreeMap<VertexKey, OctantSigns>"
)]
pub struct OctantMap {
    signs: BTreeMap<VertexKey, OctantSigns>,
}

impl OctantMap {
    /// An empty map.
    pub fn new() -> Self {
        Self {
            signs: BTreeMap::new(),
        }
    }

    /// The map for corner keys `"0"`..`"7"`.
    ///
    /// ```text
    /// 0 (-,-,+)  1 (+,-,+)  2 (+,-,-)  3 (-,-,-)
    /// 4 (-,+,+)  5 (+,+,+)  6 (+,+,-)  7 (-,+,-)
    /// ```
    pub fn standard() -> Self {
        const STANDARD: [OctantSigns; 8] = [
            [-1, -1, 1],
            [1, -1, 1],
            [1, -1, -1],
            [-1, -1, -1],
            [-1, 1, 1],
            [1, 1, 1],
            [1, 1, -1],
            [-1, 1, -1],
        ];
        let signs = (0u32..)
            .zip(STANDARD)
            .map(|(i, s)| (VertexKey::from(i), s))
            .collect();
        Self { signs }
    }

    /// Map `key` to `signs`.
    ///
    /// Returns `false` and leaves the map unchanged unless every component
    /// is `-1` or `+1`.
    pub fn insert(&mut self, key: VertexKey, signs: OctantSigns) -> bool {
        if !is_valid_signs(&signs) {
            return false;
        }
        self.signs.insert(key, signs);
        true
    }

    /// Corner signs for `key`.
    pub fn get(&self, key: &VertexKey) -> Option<OctantSigns> {
        self.signs.get(key).copied()
    }

    /// All keys, in key order.
    pub fn keys(&self) -> impl Iterator<Item = &VertexKey> {
        self.signs.keys()
    }

    /// Number of mapped keys.
    pub fn len(&self) -> usize {
        self.signs.len()
    }

    /// True if no key is mapped.
    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }
}

impl Default for OctantMap {
    fn default() -> Self {
        Self::standard()
    }
}

fn is_valid_signs(signs: &OctantSigns) -> bool {
    signs.iter().all(|s| *s == 1 || *s == -1)
}

impl TryFrom<BTreeMap<VertexKey, OctantSigns>> for OctantMap {
    type Error = String;

    fn try_from(signs: BTreeMap<VertexKey, OctantSigns>) -> Result<Self, String> {
        if let Some((key, bad)) = signs.iter().find(|(_, s)| !is_valid_signs(s)) {
            return Err(format!("octant signs for {key} must be -1 or 1, got {bad:?}"));
        }
        Ok(Self { signs })
    }
}

impl From<OctantMap> for BTreeMap<VertexKey, OctantSigns> {
    fn from(map: OctantMap) -> Self {
        map.signs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_map() {
        let map = OctantMap::standard();
        assert_eq!(map.len(), 8);
        assert_eq!(map.get(&VertexKey::from(0)), Some([-1, -1, 1]));
        assert_eq!(map.get(&VertexKey::from(6)), Some([1, 1, -1]));
        assert_eq!(map.get(&VertexKey::from(8)), None);
    }

    #[test]
    fn test_every_corner_distinct() {
        let map = OctantMap::standard();
        let mut corners: Vec<OctantSigns> = map.keys().filter_map(|k| map.get(k)).collect();
        corners.sort();
        corners.dedup();
        assert_eq!(corners.len(), 8);
    }

    #[test]
    fn test_insert_rejects_bad_signs() {
        let mut map = OctantMap::new();
        assert!(!map.insert(VertexKey::new("A").unwrap(), [1, 0, -1]));
        assert!(map.is_empty());
        assert!(map.insert(VertexKey::new("A").unwrap(), [1, 1, -1]));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: OctantMap = serde_json::from_str(r#"{"A":[1,1,1],"B":[-1,1,1]}"#).unwrap();
        assert_eq!(ok.len(), 2);
        let bad = serde_json::from_str::<OctantMap>(r#"{"A":[2,1,1]}"#);
        assert!(bad.is_err());
    }
}
