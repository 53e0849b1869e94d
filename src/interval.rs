//! Half-open intervals over the 31-bit fixed-point probability domain.
//!
//! All probabilities are represented as unsigned integers scaled by `2^31`:
//! 0 is probability zero, [`ONE`] is probability one. Every product of a
//! bound and `2^31` is widened to `u64` before division so no intermediate
//! can truncate.

/// Fixed-point representation of probability 1.
pub const ONE: u32 = 1 << 31;

/// A half-open range `[lower, upper)` of the fixed-point domain.
///
/// Plays two roles: the source interval that narrows as bits are consumed,
/// and the code interval occupied by one symbol's probability mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Inclusive lower bound.
    pub lower: u32,
    /// Exclusive upper bound.
    pub upper: u32,
}

impl Interval {
    /// Create an interval from its bounds.
    pub fn new(lower: u32, upper: u32) -> Self {
        debug_assert!(lower <= upper && upper <= ONE);
        Self { lower, upper }
    }

    /// The full domain `[0, 2^31)`.
    pub fn full() -> Self {
        Self {
            lower: 0,
            upper: ONE,
        }
    }

    /// Width of the interval.
    pub fn width(&self) -> u32 {
        self.upper - self.lower
    }

    /// Whether the interval has collapsed to zero width.
    pub fn is_empty(&self) -> bool {
        self.lower == self.upper
    }

    /// The point splitting the interval into two equal halves, rounding the
    /// lower half up. This realizes the fixed 50/50 source-bit model.
    pub fn midpoint(&self) -> u32 {
        self.lower + (self.upper - self.lower) / 2
    }

    /// True iff `inner` lies entirely within `self`.
    pub fn contains(&self, inner: &Interval) -> bool {
        inner.lower >= self.lower && inner.upper <= self.upper
    }

    /// Affine remap of `self` from within `bounds` back onto the full domain.
    ///
    /// `bounds` must contain `self` and have positive width. The upper bound
    /// is clamped to [`ONE`] to absorb rounding past the domain edge.
    pub fn rescale(&self, bounds: &Interval) -> Interval {
        debug_assert!(bounds.contains(self) && !bounds.is_empty());
        let span = u64::from(bounds.width());
        let lower = (u64::from(self.lower - bounds.lower) << 31) / span;
        let upper = ((u64::from(self.upper - bounds.lower) << 31) / span).min(u64::from(ONE));
        Interval {
            lower: lower as u32,
            upper: upper as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_halves_the_domain() {
        assert_eq!(Interval::full().midpoint(), 1 << 30);
        assert_eq!(Interval::new(4, 7).midpoint(), 5);
        assert_eq!(Interval::new(5, 5).midpoint(), 5);
    }

    #[test]
    fn test_contains() {
        let outer = Interval::new(100, 200);
        assert!(outer.contains(&Interval::new(100, 200)));
        assert!(outer.contains(&Interval::new(150, 160)));
        assert!(!outer.contains(&Interval::new(99, 150)));
        assert!(!outer.contains(&Interval::new(150, 201)));
    }

    #[test]
    fn test_rescale_identity_on_full_domain() {
        let i = Interval::new(123_456, 987_654);
        assert_eq!(i.rescale(&Interval::full()), i);
    }

    #[test]
    fn test_rescale_expands_to_full_domain() {
        let bounds = Interval::new(805_306_368, ONE);
        assert_eq!(bounds.rescale(&bounds), Interval::full());

        // lower half of the bounds maps onto the lower half of the domain
        let half = Interval::new(805_306_368, 805_306_368 + bounds.width() / 2);
        let scaled = half.rescale(&bounds);
        assert_eq!(scaled.lower, 0);
        assert_eq!(scaled.upper, 1 << 30);
    }

    #[test]
    fn test_rescale_reaches_domain_edge() {
        // a span that does not divide 2^31 evenly still lands exactly on ONE
        let bounds = Interval::new(0, 715_827_882);
        let scaled = bounds.rescale(&bounds);
        assert_eq!(scaled.lower, 0);
        assert_eq!(scaled.upper, ONE);
    }
}
