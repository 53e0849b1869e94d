//! # Constant Composition Distribution Matching (CCDM)
//!
//! *Reversible mapping from bits to fixed-composition symbol sequences.*
//!
//! ## Intuition First
//!
//! Imagine you must write a message using a box of magnetic letters: exactly
//! three A's and five B's, no more, no less. How many distinct messages can
//! you spell? Exactly `8! / (3! 5!) = 56` arrangements, so you can carry
//! `floor(log2 56) = 5` bits of information in which arrangement you pick.
//!
//! CCDM turns an arbitrary bit sequence into one such arrangement and back,
//! losslessly. The composition (the letter counts) is fixed by the caller;
//! the bits select which of the valid arrangements to emit. This is how
//! probabilistic constellation shaping feeds a channel symbols with a
//! prescribed empirical distribution while still carrying user data.
//!
//! ## The Problem
//!
//! A shaped transmitter wants symbol frequencies to follow a target law
//! (say, a Maxwell–Boltzmann distribution over amplitudes), but user data is
//! uniform bits. Naive mapping either distorts the distribution or loses
//! invertibility. CCDM guarantees both: every output block has *exactly* the
//! target composition, and the mapping is one-to-one up to the composition's
//! combinatorial capacity.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon            Entropy as the fundamental limit
//! 1976  Rissanen           Arithmetic coding: optimal rate
//! 2015  Böcherer et al.    Probabilistic amplitude shaping (PAS)
//! 2016  Schulte/Böcherer   CCDM: invertible fixed-composition matching
//! 2019  Fehenberger et al. Multiset-partition DM for lower rate loss
//! ```
//!
//! Schulte and Böcherer's insight was to run an arithmetic coder whose model
//! is not a probability law but a *shrinking multiset*: each emission removes
//! one symbol from the remaining composition, so the code intervals are
//! re-derived from the remaining counts at every step and the output can
//! never deviate from the target composition.
//!
//! ## Mathematical Formulation
//!
//! With composition counts $n_1, \dots, n_k$ and $n = \sum_i n_i$, the
//! number of valid output sequences is the multinomial
//! $\binom{n}{n_1, \dots, n_k}$ and the capacity in bits is
//!
//! ```text
//! C = floor(log2(n! / (n_1! ... n_k!)))
//! ```
//!
//! Probabilities live in a 31-bit fixed-point domain: the unit interval is
//! `[0, 2^31)`, each input bit halves the source interval at its midpoint
//! (the 50/50 source model), and each emission rescales the source interval
//! out of the matched candidate's bounds with 64-bit intermediates.
//!
//! ## Complexity Analysis
//!
//! - **Encode**: $O((m + n) \cdot k)$ for $m$ bits, $n$ output symbols,
//!   alphabet size $k$ (one partition rebuild per emission).
//! - **Decode**: $O(m \cdot (m + n) \cdot k)$, since each bit decision
//!   replays the encoder on a snapshot of the mirrored state.
//!
//! ## Failure Modes
//!
//! 1. **Capacity overrun**: beyond `capacity(counts)` bits the mapping is no
//!    longer injective; both entry points reject it up front.
//! 2. **Narrowed intermediates**: the rescale step multiplies a bound by
//!    `2^31`; doing that in 32 bits silently corrupts the stream. All such
//!    products are widened to `u64` first.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - [`encode`] / [`decode`]: the pure entry points.
//! - [`capacity`]: the exact combinatorial capacity of a composition.
//! - [`Encoder`] / [`Decoder`]: the underlying streaming state machines.
//!
//! ## References
//!
//! - Schulte, P., Böcherer, G. (2016). "Constant Composition Distribution
//!   Matching." IEEE Transactions on Information Theory, 62(1).
//! - Böcherer, G., Steiner, F., Schulte, P. (2015). "Bandwidth Efficient and
//!   Rate-Matched Low-Density Parity-Check Coded Modulation."
//! - Fehenberger, T., et al. (2019). "Multiset-Partition Distribution
//!   Matching."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod composition;
pub mod error;
pub mod interval;
pub mod matcher;
pub mod partition;

pub use composition::{capacity, Composition};
pub use error::{Error, Result};
pub use interval::{Interval, ONE};
pub use matcher::{decode, encode, Decoder, Encoder};
pub use partition::{Candidate, Partition};
