use ccdm::{capacity, decode, encode};

fn main() {
    let counts = [26u32, 14, 9, 5];
    let cap = capacity(&counts) as usize;
    let bits = (0..cap).map(|i| (i % 3 == 0) as u8).collect::<Vec<_>>();

    for _ in 0..2000 {
        let symbols = encode(&bits, &counts).unwrap();
        let decoded = decode(&symbols, &counts, cap).unwrap();
        assert_eq!(decoded, bits);
    }
}
