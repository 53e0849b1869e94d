#![no_main]
use ccdm::{capacity, decode, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, Vec<u8>)| {
    let (raw_counts, raw_bits) = data;

    if raw_counts.is_empty() || raw_counts.len() > 12 {
        return;
    }
    let counts: Vec<u32> = raw_counts.iter().map(|&c| u32::from(c % 32)).collect();
    let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    if total == 0 {
        return;
    }

    let cap = capacity(&counts) as usize;
    let take = raw_bits.len().min(cap).min(256);
    let bits: Vec<u8> = raw_bits[..take].iter().map(|&b| b % 2).collect();

    let symbols = encode(&bits, &counts).unwrap();
    assert_eq!(symbols.len() as u64, total);
    for (i, &count) in counts.iter().enumerate() {
        let occurrences = symbols.iter().filter(|&&s| usize::from(s) == i + 1).count();
        assert_eq!(occurrences as u32, count);
    }

    let decoded = decode(&symbols, &counts, bits.len()).unwrap();
    assert_eq!(decoded, bits);
});
