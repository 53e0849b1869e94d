//! The encode/decode state machines.
//!
//! Encoding narrows a source interval at its midpoint once per input bit
//! (the fixed 50/50 source model) and emits a code symbol whenever the
//! interval falls entirely inside one candidate, rescaling and re-deriving
//! the partition after each emission; one bit can unlock a cascade of
//! emissions. Finalization pins the leftover interval to a boundary
//! candidate and flushes the remaining counts in ascending symbol order, so
//! the output always carries the exact composition.
//!
//! Decoding mirrors the encoder: it rebuilds the same source interval,
//! composition state, and partition, and recovers one bit at a time. The bit
//! decision simulates the encoder on a snapshot of the mirrored state with
//! the trial continuation `1, 0, 0, …` and compares the simulated output
//! against the observed symbols lexicographically; encoding is injective and
//! order-preserving in the bit sequence, so the comparison decides the bit
//! exactly. The live mirror then replays the encoder's cascade, matching
//! every emitted symbol against the stream to stay in sync.

use log::trace;

use crate::composition::{capacity, Composition};
use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::partition::Partition;

/// Streaming CCDM encoder.
///
/// Feed bits with [`push_bit`](Self::push_bit), then call
/// [`finish`](Self::finish) to flush. [`encode`] wraps the full lifecycle and
/// validates inputs first.
#[derive(Debug, Clone)]
pub struct Encoder {
    source: Interval,
    state: Composition,
    partition: Partition,
    output: Vec<u16>,
}

impl Encoder {
    /// Create an encoder for the given composition.
    ///
    /// # Errors
    /// Composition validation errors, as [`Composition::new`].
    pub fn new(counts: &[u32]) -> Result<Self> {
        let state = Composition::new(counts)?;
        let partition = Partition::for_composition(&state);
        Ok(Self {
            source: Interval::full(),
            state,
            partition,
            output: Vec::new(),
        })
    }

    /// Consume one source bit (any nonzero value counts as 1), narrowing the
    /// source interval at its midpoint and cascading any emissions this
    /// unlocks.
    pub fn push_bit(&mut self, bit: u8) {
        let mid = self.source.midpoint();
        if bit == 0 {
            self.source.upper = mid;
        } else {
            self.source.lower = mid;
        }
        self.emit_contained();
    }

    // Cascading emission: while some candidate contains the source interval,
    // emit its symbol, rescale into its bounds, and re-derive the partition.
    fn emit_contained(&mut self) {
        while !self.state.is_exhausted() {
            let Some(candidate) = self.partition.find_containing(&self.source) else {
                break;
            };
            self.source = self.source.rescale(&candidate.bounds);
            self.state.decrement(candidate.symbol);
            self.output.push(candidate.symbol);
            trace!("cascade emitted symbol {}", candidate.symbol);
            if self.state.is_exhausted() {
                break;
            }
            self.partition.rebuild(&self.state);
        }
    }

    /// Flush and return the complete symbol stream.
    ///
    /// The leftover source interval selects one boundary candidate; the rest
    /// of the counts are flushed in ascending symbol order, the canonical
    /// order both ends agree on once the interval no longer constrains the
    /// choice.
    pub fn finish(mut self) -> Vec<u16> {
        if !self.state.is_exhausted() {
            if let Some(candidate) = self.partition.boundary_candidate(&self.source, &self.state) {
                self.state.decrement(candidate.symbol);
                self.output.push(candidate.symbol);
                trace!("finalization pinned symbol {}", candidate.symbol);
            }
            let remaining = self.state.remaining();
            for (i, &count) in remaining.iter().enumerate() {
                let symbol = (i + 1) as u16;
                for _ in 0..count {
                    self.output.push(symbol);
                }
            }
        }
        self.output
    }
}

/// Streaming CCDM decoder.
///
/// Holds the mirrored encoder state and a cursor over the observed symbol
/// stream; [`finish`](Self::finish) recovers the bits. [`decode`] wraps the
/// full lifecycle.
#[derive(Debug)]
pub struct Decoder<'a> {
    mirror: Encoder,
    symbols: &'a [u16],
    cursor: usize,
    bit_count: usize,
}

impl<'a> Decoder<'a> {
    /// Create a decoder over a symbol stream.
    ///
    /// # Errors
    /// Composition validation errors, `CapacityExceeded` if `bit_count`
    /// exceeds the composition's capacity, `LengthMismatch` if the stream
    /// length is not the composition total, `InvalidSymbol` for any symbol
    /// outside `[1, k]`.
    pub fn new(symbols: &'a [u16], counts: &[u32], bit_count: usize) -> Result<Self> {
        let mirror = Encoder::new(counts)?;
        let cap = capacity(counts);
        if bit_count as u64 > cap {
            return Err(Error::CapacityExceeded {
                bits: bit_count,
                capacity: cap,
            });
        }
        let expected = mirror.state.total();
        if symbols.len() as u64 != expected {
            return Err(Error::LengthMismatch {
                got: symbols.len(),
                expected,
            });
        }
        let alphabet = counts.len();
        for &symbol in symbols {
            if symbol == 0 || usize::from(symbol) > alphabet {
                return Err(Error::InvalidSymbol { symbol, alphabet });
            }
        }
        Ok(Self {
            mirror,
            symbols,
            cursor: 0,
            bit_count,
        })
    }

    /// Recover all `bit_count` bits.
    ///
    /// # Errors
    /// `StreamMismatch` if a cascade emission disagrees with the observed
    /// stream, meaning the inputs do not correspond.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let mut bits = Vec::with_capacity(self.bit_count);
        for decoded in 0..self.bit_count {
            let bit = self.probe(self.bit_count - decoded);
            self.apply(bit)?;
            bits.push(bit);
        }
        Ok(bits)
    }

    // Decide the next bit: simulate the encoder on a snapshot of the mirror
    // with the trial continuation 1,0,…,0 and compare the observed suffix
    // against the simulated one. The observed stream sorts at or above the
    // probe exactly when the encoder's next bit was 1.
    fn probe(&self, remaining_bits: usize) -> u8 {
        let mut sim = self.mirror.clone();
        sim.push_bit(1);
        for _ in 1..remaining_bits {
            sim.push_bit(0);
        }
        let trial = sim.finish();
        u8::from(self.symbols[self.cursor..].cmp(&trial[..]).is_ge())
    }

    // Apply a decided bit to the live mirror and resynchronize: every symbol
    // the cascade emits must match the observed stream at the cursor.
    fn apply(&mut self, bit: u8) -> Result<()> {
        self.mirror.push_bit(bit);
        for &symbol in &self.mirror.output {
            if self.cursor >= self.symbols.len() || self.symbols[self.cursor] != symbol {
                return Err(Error::StreamMismatch {
                    position: self.cursor,
                });
            }
            self.cursor += 1;
        }
        self.mirror.output.clear();
        Ok(())
    }
}

/// Map a bit sequence onto a symbol sequence carrying exactly the given
/// composition.
///
/// Returns `Σ counts` symbols over `[1, counts.len()]`, with symbol `s`
/// occurring exactly `counts[s - 1]` times. Any nonzero bit value counts
/// as 1. Pure and deterministic.
///
/// # Errors
/// Composition validation errors, or `CapacityExceeded` if `bits` is longer
/// than [`capacity`]`(counts)`.
pub fn encode(bits: &[u8], counts: &[u32]) -> Result<Vec<u16>> {
    let mut encoder = Encoder::new(counts)?;
    let cap = capacity(counts);
    if bits.len() as u64 > cap {
        return Err(Error::CapacityExceeded {
            bits: bits.len(),
            capacity: cap,
        });
    }
    trace!(
        "encoding {} bits into a composition of {} symbols",
        bits.len(),
        encoder.state.total()
    );
    for &bit in bits {
        encoder.push_bit(bit);
    }
    Ok(encoder.finish())
}

/// Recover the first `bit_count` bits that [`encode`] consumed to produce
/// `symbols` under the same `counts`.
///
/// `bit_count == 0` returns an empty sequence without consuming or
/// validating any symbols. Pure and deterministic.
///
/// # Errors
/// Composition validation errors, `CapacityExceeded`, `LengthMismatch`,
/// `InvalidSymbol`, or `StreamMismatch` when the inputs do not correspond.
pub fn decode(symbols: &[u16], counts: &[u32], bit_count: usize) -> Result<Vec<u8>> {
    if bit_count == 0 {
        Composition::new(counts)?;
        return Ok(Vec::new());
    }
    trace!(
        "decoding {} bits from {} symbols",
        bit_count,
        symbols.len()
    );
    Decoder::new(symbols, counts, bit_count)?.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_concrete_two_symbol_scenario() {
        let bits = [1, 0, 1, 1, 0];
        let symbols = encode(&bits, &[3, 5]).unwrap();
        assert_eq!(symbols, vec![2, 2, 1, 2, 1, 1, 2, 2]);
        assert_eq!(decode(&symbols, &[3, 5], 5).unwrap(), bits);
    }

    #[test]
    fn test_concrete_three_symbol_scenario() {
        let bits = [1, 1, 0, 1];
        let symbols = encode(&bits, &[2, 3, 1]).unwrap();
        assert_eq!(symbols, vec![3, 1, 1, 2, 2, 2]);
        assert_eq!(decode(&symbols, &[2, 3, 1], 4).unwrap(), bits);
    }

    #[test]
    fn test_empty_bits_flush_ascending() {
        assert_eq!(encode(&[], &[3, 5]).unwrap(), vec![1, 1, 1, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn test_degenerate_composition() {
        // a single nonzero category carries zero bits and a fixed stream
        assert_eq!(capacity(&[0, 4]), 0);
        assert_eq!(encode(&[], &[0, 4]).unwrap(), vec![2, 2, 2, 2]);
        assert!(matches!(
            encode(&[1], &[0, 4]),
            Err(Error::CapacityExceeded { bits: 1, capacity: 0 })
        ));
    }

    #[test]
    fn test_decode_zero_bits_consumes_nothing() {
        // the stream is not even validated when no bits are requested
        assert_eq!(decode(&[9, 9, 9], &[3, 5], 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_rejects_invalid_composition() {
        assert!(matches!(encode(&[], &[]), Err(Error::EmptyComposition)));
        assert!(matches!(
            encode(&[1], &[0, 0]),
            Err(Error::EmptyComposition)
        ));
        assert!(matches!(
            decode(&[1], &[0, 0], 1),
            Err(Error::EmptyComposition)
        ));
    }

    #[test]
    fn test_rejects_over_capacity() {
        assert!(matches!(
            encode(&[1, 0, 1, 1, 0, 1], &[3, 5]),
            Err(Error::CapacityExceeded { bits: 6, capacity: 5 })
        ));
        assert!(matches!(
            decode(&[1, 1, 1, 2, 2, 2, 2, 2], &[3, 5], 6),
            Err(Error::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert!(matches!(
            decode(&[1, 2, 1], &[3, 5], 2),
            Err(Error::LengthMismatch { got: 3, expected: 8 })
        ));
    }

    #[test]
    fn test_decode_rejects_foreign_symbol() {
        let mut symbols = encode(&[1, 0], &[3, 5]).unwrap();
        symbols[4] = 3;
        assert!(matches!(
            decode(&symbols, &[3, 5], 2),
            Err(Error::InvalidSymbol { symbol: 3, alphabet: 2 })
        ));
        symbols[4] = 0;
        assert!(matches!(
            decode(&symbols, &[3, 5], 2),
            Err(Error::InvalidSymbol { symbol: 0, .. })
        ));
    }

    #[test]
    fn test_decode_detects_diverging_stream() {
        // this stream was produced for a 4-bit payload; asking for 3 bits
        // desynchronizes the mirror's cascade against the observed symbols
        let symbols = encode(&[0, 1, 0, 0], &[2, 3, 1]).unwrap();
        assert_eq!(symbols, vec![1, 3, 1, 2, 2, 2]);
        assert!(matches!(
            decode(&symbols, &[2, 3, 1], 3),
            Err(Error::StreamMismatch { position: 1 })
        ));
    }

    #[test]
    fn test_determinism() {
        let counts = [4, 1, 3];
        let bits = [0, 1, 1, 0, 1];
        let first = encode(&bits, &counts).unwrap();
        let second = encode(&bits, &counts).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            decode(&first, &counts, bits.len()).unwrap(),
            decode(&second, &counts, bits.len()).unwrap()
        );
    }

    #[test]
    fn test_exhaustive_small_roundtrip() {
        // every bit pattern up to capacity over a few small compositions
        for counts in [vec![3, 5], vec![1, 3], vec![2, 3, 1], vec![4, 4], vec![1, 1, 1]] {
            let cap = capacity(&counts).min(8) as u32;
            for len in 0..=cap {
                for pattern in 0u32..(1 << len) {
                    let bits: Vec<u8> =
                        (0..len).map(|i| ((pattern >> i) & 1) as u8).collect();
                    let symbols = encode(&bits, &counts).unwrap();
                    let decoded = decode(&symbols, &counts, bits.len()).unwrap();
                    assert_eq!(decoded, bits, "counts {counts:?} pattern {pattern:b}");
                }
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn prop_roundtrip(
            counts in prop::collection::vec(0u32..7, 2..6),
            bits in prop::collection::vec(0u8..2, 0..48),
        ) {
            let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
            prop_assume!(total > 0);
            let take = bits.len().min(capacity(&counts) as usize);
            let bits = &bits[..take];

            let symbols = encode(bits, &counts).unwrap();
            prop_assert_eq!(symbols.len() as u64, total);
            let decoded = decode(&symbols, &counts, take).unwrap();
            prop_assert_eq!(decoded.as_slice(), bits);
        }

        #[test]
        fn prop_composition_fidelity(
            counts in prop::collection::vec(0u32..10, 2..5),
            bits in prop::collection::vec(0u8..2, 0..32),
        ) {
            let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
            prop_assume!(total > 0);
            let take = bits.len().min(capacity(&counts) as usize);

            let symbols = encode(&bits[..take], &counts).unwrap();
            for (i, &count) in counts.iter().enumerate() {
                let occurrences =
                    symbols.iter().filter(|&&s| usize::from(s) == i + 1).count();
                prop_assert_eq!(occurrences as u32, count);
            }
        }
    }
}
