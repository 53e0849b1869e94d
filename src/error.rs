//! Error types for constant composition distribution matching.

use thiserror::Error;

/// Error variants for CCDM operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The composition has no symbols to emit (all counts are zero).
    #[error("empty composition")]
    EmptyComposition,

    /// The composition total does not fit the 31-bit fixed-point domain.
    #[error("composition total {0} exceeds the fixed-point domain")]
    CompositionOverflow(u64),

    /// More symbol categories than the symbol type can address.
    #[error("alphabet of {0} categories is too large")]
    AlphabetTooLarge(usize),

    /// The requested bit count exceeds the combinatorial capacity of the composition.
    #[error("{bits} bits exceed the composition capacity of {capacity}")]
    CapacityExceeded {
        /// Number of bits requested.
        bits: usize,
        /// Maximum bits the composition can carry.
        capacity: u64,
    },

    /// The code stream length does not match the composition total.
    #[error("code stream has {got} symbols, composition requires {expected}")]
    LengthMismatch {
        /// Number of symbols supplied.
        got: usize,
        /// Number of symbols the composition requires.
        expected: u64,
    },

    /// A code symbol lies outside the composition's alphabet.
    #[error("symbol {symbol} outside alphabet of {alphabet} categories")]
    InvalidSymbol {
        /// The offending symbol value.
        symbol: u16,
        /// Size of the alphabet.
        alphabet: usize,
    },

    /// The code stream diverges from any sequence this composition can produce.
    #[error("code stream diverges from the composition at symbol {position}")]
    StreamMismatch {
        /// Index of the first symbol that cannot be matched.
        position: usize,
    },
}

/// A specialized Result type for CCDM operations.
pub type Result<T> = std::result::Result<T, Error>;
