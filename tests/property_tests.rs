use ccdm::{capacity, decode, encode};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_ccdm_roundtrip(
        counts in prop::collection::vec(0u32..12, 2..7),
        bits in prop::collection::vec(0u8..2, 0..96),
    ) {
        let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
        prop_assume!(total > 0);

        // truncate the payload to what the composition can carry
        let take = bits.len().min(capacity(&counts) as usize);
        let bits = &bits[..take];

        let symbols = encode(bits, &counts).unwrap();

        // output length and composition fidelity
        prop_assert_eq!(symbols.len() as u64, total);
        for (i, &count) in counts.iter().enumerate() {
            let occurrences = symbols.iter().filter(|&&s| usize::from(s) == i + 1).count();
            prop_assert_eq!(occurrences as u32, count);
        }

        let decoded = decode(&symbols, &counts, take).unwrap();
        prop_assert_eq!(decoded.as_slice(), bits);
    }

    #[test]
    fn test_full_capacity_roundtrip(
        counts in prop::collection::vec(1u32..9, 2..5),
        seed in any::<u64>(),
    ) {
        // drive every composition at its exact capacity
        let cap = capacity(&counts) as usize;
        let bits: Vec<u8> = (0..cap)
            .map(|i| ((seed >> (i % 64)) & 1) as u8)
            .collect();

        let symbols = encode(&bits, &counts).unwrap();
        let decoded = decode(&symbols, &counts, cap).unwrap();
        prop_assert_eq!(decoded, bits);
    }
}
