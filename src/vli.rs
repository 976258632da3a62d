//! Variable-length coding of non-negative integers.
//!
//! A value `n` is written as a unary prefix of `k = ⌊log2(n+1)⌋` one-bits and
//! a zero terminator, followed by `n - (2^k - 1)` in `k` raw bits, MSB-first.
//! `0` therefore costs a single bit. The code is prefix-free, so encodings
//! concatenate without ambiguity.

use crate::bit_io::{BitReader, BitWriter};

pub fn put_vli(bits: &mut BitWriter, value: u32) {
    let k = (value as u64 + 1).ilog2();
    for _ in 0..k {
        bits.put_bit(true);
    }
    bits.put_bit(false);
    if k > 0 {
        bits.write_bits(value - ((1u64 << k) - 1) as u32, k);
    }
}

pub fn get_vli(bits: &mut BitReader<'_>) -> u32 {
    let mut k = 0u32;
    while bits.get_bit() == 1 {
        k += 1;
        if k > 31 {
            // Not produced by any encoder; bail out instead of shifting past
            // the word.
            return u32::MAX;
        }
    }
    if k == 0 {
        0
    } else {
        let value = ((1u64 << k) - 1) + bits.read_bits(k) as u64;
        value.min(u64::from(u32::MAX)) as u32
    }
}
