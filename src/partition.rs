//! The candidate partition of the code domain.
//!
//! At every moment the remaining counts induce an ordered partition of
//! `[0, 2^31)` into one code interval per symbol, sized by the symbol's share
//! of the remaining total. The partition is re-derived from the counts after
//! every emission; the backing vector is reused so a rebuild allocates
//! nothing after the first.

use crate::composition::Composition;
use crate::interval::{Interval, ONE};

/// One symbol's slice of the code domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// The symbol this candidate emits (1-based).
    pub symbol: u16,
    /// The code interval holding the symbol's probability mass.
    pub bounds: Interval,
}

/// Ordered candidates exactly tiling the code domain, no gaps or overlaps.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    candidates: Vec<Candidate>,
}

impl Partition {
    /// An empty partition; call [`rebuild`](Self::rebuild) before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the partition for a composition in one step.
    pub fn for_composition(composition: &Composition) -> Self {
        let mut partition = Self::new();
        partition.rebuild(composition);
        partition
    }

    /// Re-derive the candidates from the remaining counts.
    ///
    /// Boundaries are cumulative count shares scaled into the fixed-point
    /// domain. The last upper bound is forced to exactly `2^31` so the tiling
    /// absorbs all rounding residue; a zero-count symbol degenerates to zero
    /// width and can never match a non-empty source interval.
    pub fn rebuild(&mut self, composition: &Composition) {
        debug_assert!(!composition.is_exhausted());
        self.candidates.clear();
        let counts = composition.remaining();
        let total = composition.total();
        let last = counts.len() - 1;
        let mut acc: u64 = 0;
        let mut cum: u32 = 0;
        for (i, &count) in counts.iter().enumerate() {
            let lower = cum;
            acc += u64::from(count);
            cum = ((acc << 31) / total).min(u64::from(ONE)) as u32;
            let upper = if i == last { ONE } else { cum };
            self.candidates.push(Candidate {
                symbol: (i + 1) as u16,
                bounds: Interval::new(lower, upper),
            });
        }
    }

    /// The candidates in symbol order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// First positive-width candidate whose bounds contain `interval`.
    ///
    /// At most one true match exists because the tiling is gap-free and
    /// non-overlapping.
    pub fn find_containing(&self, interval: &Interval) -> Option<Candidate> {
        self.candidates
            .iter()
            .copied()
            .find(|c| !c.bounds.is_empty() && c.bounds.contains(interval))
    }

    /// First candidate with a positive remaining count whose lower bound lies
    /// inside `interval`. Selects the extra symbol appended at finalization.
    pub fn boundary_candidate(
        &self,
        interval: &Interval,
        composition: &Composition,
    ) -> Option<Candidate> {
        self.candidates.iter().copied().find(|c| {
            interval.lower <= c.bounds.lower
                && c.bounds.lower < interval.upper
                && composition.count(c.symbol) > 0
        })
    }
}
