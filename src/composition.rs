//! Remaining-count state for a composition and its combinatorial capacity.

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// The mutable remaining-count vector over the symbol alphabet.
///
/// Symbol `s` (1-based) may be emitted at most `remaining()[s - 1]` more
/// times. The total strictly decreases by one per emission and reaches zero
/// exactly when the output stream is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    counts: Vec<u32>,
    total: u64,
}

impl Composition {
    /// Validate a count vector and build the composition state.
    ///
    /// # Errors
    /// `EmptyComposition` if all counts are zero, `CompositionOverflow` if the
    /// total exceeds the fixed-point domain, `AlphabetTooLarge` if there are
    /// more categories than the symbol type can address.
    pub fn new(counts: &[u32]) -> Result<Self> {
        if counts.len() > usize::from(u16::MAX) {
            return Err(Error::AlphabetTooLarge(counts.len()));
        }
        let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
        if total == 0 {
            return Err(Error::EmptyComposition);
        }
        if total > 1 << 31 {
            return Err(Error::CompositionOverflow(total));
        }
        Ok(Self {
            counts: counts.to_vec(),
            total,
        })
    }

    /// Current remaining counts, in symbol order.
    pub fn remaining(&self) -> &[u32] {
        &self.counts
    }

    /// Number of symbol categories in the alphabet.
    pub fn alphabet(&self) -> usize {
        self.counts.len()
    }

    /// Sum of the remaining counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Whether every count has reached zero.
    pub fn is_exhausted(&self) -> bool {
        self.total == 0
    }

    /// Remaining count for a single symbol (1-based).
    pub fn count(&self, symbol: u16) -> u32 {
        self.counts[usize::from(symbol - 1)]
    }

    /// Consume one emission of `symbol` (1-based).
    ///
    /// Decrementing an exhausted symbol is an internal invariant violation;
    /// the validated entry points never reach it.
    pub fn decrement(&mut self, symbol: u16) {
        let idx = usize::from(symbol - 1);
        debug_assert!(self.counts[idx] > 0, "decrement of exhausted symbol {symbol}");
        self.counts[idx] -= 1;
        self.total -= 1;
    }
}

/// Maximum number of bits a composition can losslessly carry:
/// `floor(log2(n! / Π counts[i]!))` where `n = Σ counts`.
///
/// Computed exactly as a shrinking-pool product of binomial coefficients, so
/// the result is correct even when the multinomial lands near a power of two.
pub fn capacity(counts: &[u32]) -> u64 {
    let mut pool: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    let mut arrangements = BigUint::from(1u32);
    for &c in counts {
        let c = u64::from(c);
        // arrangements *= C(pool, c); each intermediate is itself integral
        for i in 1..=c {
            arrangements = arrangements * (pool - c + i) / i;
        }
        pool -= c;
    }
    arrangements.bits() - 1
}
