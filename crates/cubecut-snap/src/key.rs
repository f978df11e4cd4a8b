//! Vertex and face keys.
//!
//! A key is any non-empty string free of the address separators
//! (`:`, `-`, `@`, `/`). Keys are not coordinates: a vertex key indexes the
//! octant map, a face key is the ordered concatenation of its vertex keys.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnapError};

const RESERVED: [char; 4] = [':', '-', '@', '/'];

fn check_key(raw: &str) -> Result<()> {
    if raw.is_empty() || raw.contains(RESERVED) {
        return Err(SnapError::InvalidKey(raw.to_string()));
    }
    Ok(())
}

/// Stable key of one box corner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VertexKey(String);

impl VertexKey {
    /// Validate and wrap `raw`.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        Self::try_new(raw).ok()
    }

    pub(crate) fn try_new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        check_key(&raw)?;
        Ok(Self(raw))
    }

    /// The key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn digits(&self) -> Option<&str> {
        self.0
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| self.0.trim_start_matches('0'))
    }

    /// Endpoint order used by canonical edges.
    ///
    /// Numeric when both keys are integers, of any length, and lexical
    /// otherwise. Equal integers spelled differently (`"01"`, `"1"`) fall
    /// back to lexical order so the relation stays total.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        match (self.digits(), other.digits()) {
            (Some(a), Some(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.cmp(b))
                .then_with(|| self.0.cmp(&other.0)),
            _ => self.0.cmp(&other.0),
        }
    }
}

impl From<u32> for VertexKey {
    fn from(index: u32) -> Self {
        Self(index.to_string())
    }
}

impl TryFrom<String> for VertexKey {
    type Error = SnapError;

    fn try_from(raw: String) -> Result<Self> {
        Self::try_new(raw)
    }
}

impl From<VertexKey> for String {
    fn from(key: VertexKey) -> Self {
        key.0
    }
}

impl fmt::Display for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of one box face: its boundary vertex keys concatenated in loop order
/// (`"0154"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FaceKey(String);

impl FaceKey {
    /// Validate and wrap `raw`.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        Self::try_new(raw).ok()
    }

    pub(crate) fn try_new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        check_key(&raw)?;
        Ok(Self(raw))
    }

    /// Concatenate `loop_keys` into a face key.
    pub fn from_loop<'a>(loop_keys: impl IntoIterator<Item = &'a VertexKey>) -> Option<Self> {
        let joined: String = loop_keys.into_iter().map(VertexKey::as_str).collect();
        Self::new(joined)
    }

    /// The key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the key back into vertex keys, choosing components from
    /// `known`.
    ///
    /// Returns the first segmentation into exactly `parts` known keys,
    /// trying longer keys first; `None` when there is none.
    pub fn segment<'k>(&self, known: &[&'k VertexKey], parts: usize) -> Option<Vec<&'k VertexKey>> {
        let mut sorted: Vec<&'k VertexKey> = known.to_vec();
        sorted.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        let mut out = Vec::with_capacity(parts);
        segment_rec(&self.0, &sorted, parts, &mut out).then_some(out)
    }
}

fn segment_rec<'k>(
    rest: &str,
    known: &[&'k VertexKey],
    parts: usize,
    out: &mut Vec<&'k VertexKey>,
) -> bool {
    if rest.is_empty() {
        return out.len() == parts;
    }
    if out.len() == parts {
        return false;
    }
    for key in known {
        if let Some(tail) = rest.strip_prefix(key.as_str()) {
            out.push(key);
            if segment_rec(tail, known, parts, out) {
                return true;
            }
            out.pop();
        }
    }
    false
}

impl TryFrom<String> for FaceKey {
    type Error = SnapError;

    fn try_from(raw: String) -> Result<Self> {
        Self::try_new(raw)
    }
}

impl From<FaceKey> for String {
    fn from(key: FaceKey) -> Self {
        key.0
    }
}

impl fmt::Display for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vk(s: &str) -> VertexKey {
        VertexKey::new(s).unwrap()
    }

    #[test]
    fn test_reserved_characters_rejected() {
        for bad in ["", "a:b", "1-2", "x@y", "3/4"] {
            assert!(VertexKey::new(bad).is_none(), "{bad:?} should be rejected");
            assert!(FaceKey::new(bad).is_none(), "{bad:?} should be rejected");
        }
        assert!(VertexKey::new("A").is_some());
    }

    #[test]
    fn test_numeric_order_beats_lexical() {
        assert_eq!(vk("2").canonical_cmp(&vk("10")), Ordering::Less);
        assert_eq!(vk("b").canonical_cmp(&vk("a")), Ordering::Greater);
        // Mixed keys compare lexically.
        assert_eq!(vk("10").canonical_cmp(&vk("a")), Ordering::Less);
        assert_ne!(vk("01").canonical_cmp(&vk("1")), Ordering::Equal);
        assert_eq!(vk("007").canonical_cmp(&vk("10")), Ordering::Less);
        assert_eq!(vk("0").canonical_cmp(&vk("00")), Ordering::Less);
    }

    #[test]
    fn test_integer_keys_past_u64_order_numerically() {
        let big = vk("100000000000000000000");
        assert_eq!(vk("2").canonical_cmp(&big), Ordering::Less);
        assert_eq!(big.canonical_cmp(&vk("99999999999999999999")), Ordering::Greater);
        assert_eq!(
            crate::canonicalize("E:2-100000000000000000000@1/4").as_deref(),
            Some("E:2-100000000000000000000@1/4")
        );
    }

    #[test]
    fn test_segment_single_char_keys() {
        let keys: Vec<VertexKey> = (0..8).map(VertexKey::from).collect();
        let known: Vec<&VertexKey> = keys.iter().collect();
        let face = FaceKey::new("0154").unwrap();
        let parts = face.segment(&known, 4).unwrap();
        let text: Vec<&str> = parts.iter().map(|k| k.as_str()).collect();
        assert_eq!(text, vec!["0", "1", "5", "4"]);
        assert!(FaceKey::new("015").unwrap().segment(&known, 4).is_none());
        assert!(FaceKey::new("01549").unwrap().segment(&known, 4).is_none());
    }

    #[test]
    fn test_segment_multi_char_keys() {
        let keys = [vk("A"), vk("B"), vk("C1"), vk("D2")];
        let known: Vec<&VertexKey> = keys.iter().collect();
        let face = FaceKey::from_loop(&keys).unwrap();
        assert_eq!(face.as_str(), "ABC1D2");
        let parts = face.segment(&known, 4).unwrap();
        assert_eq!(parts[2].as_str(), "C1");
    }
}
