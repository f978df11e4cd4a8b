//! The `SnapAddress` value and its text grammar.
//!
//! ```text
//! V:<key>                      vertex
//! E:<key>-<key>@<uint>/<uint>  point along an edge
//! F:<key>@center               face centroid
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnapError};
use crate::key::{FaceKey, VertexKey};
use crate::ratio::Ratio;

const FACE_CENTER_SUFFIX: &str = "@center";

/// Symbolic reference to a geometrically significant point on a box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SnapAddress {
    /// One of the box corners.
    Vertex(VertexKey),
    /// The point `ratio` of the way from `start` to `end`.
    Edge {
        /// Endpoint the ratio is measured from.
        start: VertexKey,
        /// Endpoint reached at ratio 1.
        end: VertexKey,
        /// Position along the edge.
        ratio: Ratio,
    },
    /// Centroid of a face.
    Face(FaceKey),
}

/// Which grammar an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapKind {
    /// `V:`
    Vertex,
    /// `E:`
    Edge,
    /// `F:`
    Face,
}

impl SnapAddress {
    /// Vertex address.
    pub fn vertex(key: VertexKey) -> Self {
        Self::Vertex(key)
    }

    /// Edge address; not normalized.
    pub fn edge(start: VertexKey, end: VertexKey, ratio: Ratio) -> Self {
        Self::Edge { start, end, ratio }
    }

    /// Face-center address.
    pub fn face(key: FaceKey) -> Self {
        Self::Face(key)
    }

    /// Which grammar this address belongs to.
    pub fn kind(&self) -> SnapKind {
        match self {
            Self::Vertex(_) => SnapKind::Vertex,
            Self::Edge { .. } => SnapKind::Edge,
            Self::Face(_) => SnapKind::Face,
        }
    }

    /// Parse address text, reporting why it was rejected.
    pub fn parse_detailed(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Some(key) = text.strip_prefix("V:") {
            return Ok(Self::Vertex(VertexKey::try_new(key)?));
        }
        if let Some(body) = text.strip_prefix("E:") {
            return parse_edge(body, text);
        }
        if let Some(body) = text.strip_prefix("F:") {
            let key = body
                .strip_suffix(FACE_CENTER_SUFFIX)
                .ok_or_else(|| SnapError::Malformed(text.to_string()))?;
            return Ok(Self::Face(FaceKey::try_new(key)?));
        }
        Err(SnapError::Malformed(text.to_string()))
    }

    /// Canonical form, reporting why normalization failed.
    pub fn normalize_detailed(&self) -> Result<Self> {
        match self {
            Self::Vertex(_) | Self::Face(_) => Ok(self.clone()),
            Self::Edge { start, end, ratio } => {
                if start == end {
                    return Err(SnapError::SelfEdge(start.to_string()));
                }
                let ratio = ratio.reduced()?;
                if start.canonical_cmp(end).is_gt() {
                    Ok(Self::Edge {
                        start: end.clone(),
                        end: start.clone(),
                        ratio: ratio.complement(),
                    })
                } else {
                    Ok(Self::Edge {
                        start: start.clone(),
                        end: end.clone(),
                        ratio,
                    })
                }
            }
        }
    }

    /// Canonical form: reduced ratio with positive denominator, edge
    /// endpoints in canonical order with the ratio complemented on swap.
    ///
    /// `None` for ratios that are zero-denominator or outside `[0, 1]`, and
    /// for self-edges.
    pub fn normalize(&self) -> Option<Self> {
        self.normalize_detailed().ok()
    }

    /// Normalized form with boundary ratios collapsed onto vertices.
    ///
    /// Two addresses denote the same point exactly when their canonical
    /// forms are equal, so this is the value to use as a set or map key.
    pub fn canonical(&self) -> Option<Self> {
        match self.normalize()? {
            Self::Edge { start, ratio, .. } if ratio.is_zero() => Some(Self::Vertex(start)),
            Self::Edge { end, ratio, .. } if ratio.is_one() => Some(Self::Vertex(end)),
            other => Some(other),
        }
    }

    /// Address text. Inverse of [`parse`] for every variant.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

fn parse_edge(body: &str, text: &str) -> Result<SnapAddress> {
    let malformed = || SnapError::Malformed(text.to_string());
    let (pair, ratio) = body.split_once('@').ok_or_else(malformed)?;
    let (start, end) = pair.split_once('-').ok_or_else(malformed)?;
    let start = VertexKey::try_new(start)?;
    let end = VertexKey::try_new(end)?;
    let ratio = parse_ratio(ratio)?;
    Ok(SnapAddress::Edge { start, end, ratio })
}

fn parse_ratio(text: &str) -> Result<Ratio> {
    let invalid = || SnapError::InvalidRatio(text.to_string());
    let (num, den) = text.split_once('/').ok_or_else(invalid)?;
    let numerator = parse_uint(num).ok_or_else(invalid)?;
    let denominator = parse_uint(den).ok_or_else(invalid)?;
    Ratio::new(numerator, denominator).ok_or(SnapError::ZeroDenominator)
}

fn parse_uint(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for SnapAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex(key) => write!(f, "V:{key}"),
            Self::Edge { start, end, ratio } => write!(f, "E:{start}-{end}@{ratio}"),
            Self::Face(key) => write!(f, "F:{key}{FACE_CENTER_SUFFIX}"),
        }
    }
}

impl FromStr for SnapAddress {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_detailed(s)
    }
}

impl TryFrom<String> for SnapAddress {
    type Error = SnapError;

    fn try_from(text: String) -> Result<Self> {
        Self::parse_detailed(&text)
    }
}

impl From<SnapAddress> for String {
    fn from(addr: SnapAddress) -> Self {
        addr.to_string()
    }
}

/// Parse address text. `None` for anything outside the three grammars,
/// including malformed numbers, zero denominators and missing separators.
pub fn parse(text: &str) -> Option<SnapAddress> {
    SnapAddress::parse_detailed(text).ok()
}

/// Canonical form of `addr`; see [`SnapAddress::normalize`].
pub fn normalize(addr: &SnapAddress) -> Option<SnapAddress> {
    addr.normalize()
}

/// Address text of `addr`. Callers needing canonical text normalize first.
pub fn serialize(addr: &SnapAddress) -> String {
    addr.serialize()
}

/// Parse, normalize and serialize, collapsing boundary ratios onto the
/// vertex they land on.
pub fn canonicalize(text: &str) -> Option<String> {
    parse(text)?.canonical().map(|addr| addr.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vk(s: &str) -> VertexKey {
        VertexKey::new(s).unwrap()
    }

    #[test]
    fn test_parse_vertex() {
        assert_eq!(parse("V:0"), Some(SnapAddress::Vertex(vk("0"))));
        assert_eq!(parse("  V:7 "), Some(SnapAddress::Vertex(vk("7"))));
    }

    #[test]
    fn test_parse_edge() {
        assert_eq!(
            parse("E:0-1@1/2"),
            Some(SnapAddress::Edge {
                start: vk("0"),
                end: vk("1"),
                ratio: Ratio::HALF,
            })
        );
    }

    #[test]
    fn test_parse_face() {
        let face = parse("F:0123@center").unwrap();
        assert_eq!(face, SnapAddress::Face(FaceKey::new("0123").unwrap()));
        assert_eq!(face.kind(), SnapKind::Face);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "V:",
            "X:1",
            "v:1",
            "E:0-1",
            "E:0-1@1",
            "E:0-1@1/0",
            "E:0-1@-1/2",
            "E:0-1@a/2",
            "E:0-1@1.5/2",
            "E:01@1/2",
            "E:0-1-2@1/2",
            "E:0-@1/2",
            "F:0154",
            "F:@center",
            "F:0154@centre",
            "E:0-1@99999999999999999999/2",
        ] {
            assert!(parse(bad).is_none(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_parse_detailed_reasons() {
        assert_eq!(
            SnapAddress::parse_detailed("E:0-1@1/0"),
            Err(SnapError::ZeroDenominator)
        );
        assert!(matches!(
            "V:a-b".parse::<SnapAddress>(),
            Err(SnapError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_normalize_reduces_fraction() {
        let n = parse("E:0-1@2/4").unwrap().normalize().unwrap();
        assert_eq!(n.serialize(), "E:0-1@1/2");
    }

    #[test]
    fn test_normalize_reversed_edge_inverts_ratio() {
        let n = parse("E:1-0@1/4").unwrap().normalize().unwrap();
        assert_eq!(n.serialize(), "E:0-1@3/4");
        let n = parse("E:2-1@3/10").unwrap().normalize().unwrap();
        assert_eq!(n.serialize(), "E:1-2@7/10");
    }

    #[test]
    fn test_normalize_orders_numerically() {
        let n = parse("E:10-2@1/3").unwrap().normalize().unwrap();
        assert_eq!(n.serialize(), "E:2-10@2/3");
        let n = parse("E:b-a@1/3").unwrap().normalize().unwrap();
        assert_eq!(n.serialize(), "E:a-b@2/3");
    }

    #[test]
    fn test_normalize_rejects_invalid_values() {
        let out_of_range = SnapAddress::edge(vk("0"), vk("1"), Ratio::new(3, 2).unwrap());
        assert!(out_of_range.normalize().is_none());
        let self_edge = SnapAddress::edge(vk("3"), vk("3"), Ratio::HALF);
        assert!(self_edge.normalize().is_none());
        let zero = SnapAddress::edge(
            vk("0"),
            vk("1"),
            Ratio {
                numerator: 1,
                denominator: 0,
            },
        );
        assert!(zero.normalize().is_none());
    }

    #[test]
    fn test_normalize_fixes_negative_denominator() {
        let addr = SnapAddress::edge(
            vk("0"),
            vk("1"),
            Ratio {
                numerator: -1,
                denominator: -4,
            },
        );
        assert_eq!(addr.normalize().unwrap().serialize(), "E:0-1@1/4");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for text in ["V:3", "F:0154@center", "E:5-1@6/8", "E:0-4@3/10", "E:7-6@0/3"] {
            let once = parse(text).unwrap().normalize().unwrap();
            assert_eq!(once.normalize().as_ref(), Some(&once), "{text}");
        }
    }

    #[test]
    fn test_reversed_edges_canonicalize_equal() {
        for d in 2..12i64 {
            for n in 1..d {
                let a = canonicalize(&format!("E:a-b@{n}/{d}")).unwrap();
                let b = canonicalize(&format!("E:b-a@{}/{d}", d - n)).unwrap();
                assert_eq!(a, b, "n={n} d={d}");
            }
        }
    }

    #[test]
    fn test_canonicalize_collapses_endpoints() {
        assert_eq!(canonicalize("E:0-1@0/1").as_deref(), Some("V:0"));
        assert_eq!(canonicalize("E:0-1@1/1").as_deref(), Some("V:1"));
        assert_eq!(canonicalize("E:a-b@0/5"), canonicalize("V:a"));
        assert_eq!(canonicalize("E:a-b@5/5"), canonicalize("V:b"));
        // Reversed text still lands on the vertex named first.
        assert_eq!(canonicalize("E:1-0@1/1").as_deref(), Some("V:0"));
    }

    #[test]
    fn test_canonicalize_invalid_is_none() {
        assert!(canonicalize("nonsense").is_none());
        assert!(canonicalize("E:0-0@1/2").is_none());
        assert!(canonicalize("E:0-1@3/2").is_none());
    }

    #[test]
    fn test_round_trip_of_normalized() {
        for text in ["V:0", "F:2376@center", "E:3-0@1/3", "E:0-4@0/1", "E:a-b@1/1"] {
            let addr = parse(text).unwrap().normalize().unwrap();
            assert_eq!(parse(&serialize(&addr)), Some(addr.clone()), "{text}");
        }
    }

    #[test]
    fn test_serde_uses_text_form() {
        let addr = parse("E:1-2@7/10").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"E:1-2@7/10\"");
        let back: SnapAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
        assert!(serde_json::from_str::<SnapAddress>("\"E:1-2\"").is_err());
    }
}
