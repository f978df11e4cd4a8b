//! Exact edge ratios.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnapError};

/// Exact position along an edge, `numerator / denominator`.
///
/// Values built by hand may be unreduced or carry a negative denominator;
/// [`Ratio::reduced`] produces the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ratio {
    /// Numerator.
    pub numerator: i64,
    /// Denominator (never zero in a valid ratio).
    pub denominator: i64,
}

impl Ratio {
    /// The edge midpoint, `1/2`.
    pub const HALF: Ratio = Ratio {
        numerator: 1,
        denominator: 2,
    };

    /// Create a ratio; `None` if `denominator` is zero.
    pub fn new(numerator: i64, denominator: i64) -> Option<Self> {
        (denominator != 0).then_some(Self {
            numerator,
            denominator,
        })
    }

    /// Positive denominator, gcd-reduced, and within `[0, 1]`.
    pub fn reduced(self) -> Result<Self> {
        let Ratio {
            mut numerator,
            mut denominator,
        } = self;
        if denominator == 0 {
            return Err(SnapError::ZeroDenominator);
        }
        if denominator < 0 {
            numerator = numerator
                .checked_neg()
                .ok_or_else(|| SnapError::InvalidRatio(self.to_string()))?;
            denominator = denominator
                .checked_neg()
                .ok_or_else(|| SnapError::InvalidRatio(self.to_string()))?;
        }
        let g = gcd(numerator, denominator);
        numerator /= g;
        denominator /= g;
        if numerator < 0 || numerator > denominator {
            return Err(SnapError::RatioOutOfRange {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// `1 - self`, for a ratio measured from the other endpoint.
    pub fn complement(self) -> Self {
        Self {
            numerator: self.denominator - self.numerator,
            denominator: self.denominator,
        }
    }

    /// True for `0/d`.
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// True for `d/d`.
    pub fn is_one(&self) -> bool {
        self.numerator == self.denominator
    }

    /// Interpolation parameter.
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    let mut x = a.unsigned_abs();
    let mut y = b.unsigned_abs();
    while y != 0 {
        let t = x % y;
        x = y;
        y = t;
    }
    // Bounded by |b|; callers pass a positive denominator as b.
    (x as i64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Ratio {
        Ratio {
            numerator: n,
            denominator: d,
        }
    }

    #[test]
    fn test_reduce() {
        assert_eq!(r(2, 4).reduced(), Ok(r(1, 2)));
        assert_eq!(r(0, 7).reduced(), Ok(r(0, 1)));
        assert_eq!(r(5, 5).reduced(), Ok(r(1, 1)));
        assert_eq!(r(-3, -9).reduced(), Ok(r(1, 3)));
    }

    #[test]
    fn test_reduce_rejects_invalid() {
        assert_eq!(r(1, 0).reduced(), Err(SnapError::ZeroDenominator));
        assert!(matches!(
            r(3, 2).reduced(),
            Err(SnapError::RatioOutOfRange { .. })
        ));
        assert!(matches!(
            r(1, -2).reduced(),
            Err(SnapError::RatioOutOfRange { .. })
        ));
        assert!(Ratio::new(1, 0).is_none());
    }

    #[test]
    fn test_complement() {
        assert_eq!(r(3, 10).complement(), r(7, 10));
        assert!(r(0, 1).complement().is_one());
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Ratio::HALF.as_f64(), 0.5);
        assert_eq!(Ratio::HALF.to_string(), "1/2");
    }
}
