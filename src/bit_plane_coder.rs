//! Bit-plane coding of quantized coefficients.
//!
//! A planegroup is a vector of signed integers coded plane by plane from the
//! most significant down. Within a plane only the gaps between set bits are
//! transmitted, as VLI zero-run deltas with a final `N - last` terminator.
//! The top plane doubles as the sign plane: in two's complement every
//! in-range negative value has it set and every positive value has it clear,
//! and once a sign has been signalled the value is flipped into a positive
//! magnitude representation for the remaining planes.
//!
//! The decoder accepts any prefix of a well-formed stream; planes that never
//! arrive simply leave their bits zero.
//!
//! The root band uses a plain fixed-width sign-magnitude code instead: its
//! coefficients are dense and near-uniform, so run-lengths buy nothing.

use crate::bit_io::{BitReader, BitWriter};
use crate::vli::{get_vli, put_vli};

/// Number of planes needed to code `values`: one plane per magnitude bit
/// plus the sign plane, zero for an all-zero vector.
pub fn count_planes(values: &[i32]) -> u32 {
    let mut acc = 0u32;
    let mut any = false;
    for &v in values {
        if v != 0 {
            any = true;
        }
        // Positive values must keep a clear sign bit above their magnitude;
        // negatives enter the lower planes as |v| - 1 after the sign flip.
        acc |= if v >= 0 { v as u32 } else { !(v as u32) };
    }
    if !any {
        0
    } else {
        (32 - acc.leading_zeros()) + 1
    }
}

/// Writes VLI(P) and the planes of `values`. The vector is consumed as
/// scratch: sign-plane hits are flipped in place.
pub fn encode_planes(bits: &mut BitWriter, values: &mut [i32]) {
    let planes = count_planes(values);
    put_vli(bits, planes);
    for p in (0..planes).rev() {
        let mask = 1u32 << p;
        let mut last = 0usize;
        for i in 0..values.len() {
            if values[i] as u32 & mask != 0 {
                put_vli(bits, (i - last) as u32);
                last = i + 1;
                if p + 1 == planes {
                    // Sign plane: move the negative value into the positive
                    // magnitude representation for the lower planes.
                    values[i] = (values[i] as u32 ^ !mask) as i32;
                }
            }
        }
        put_vli(bits, (values.len() - last) as u32);
    }
}

/// Inverse of [`encode_planes`] into a zero-initialized `values`.
pub fn decode_planes(bits: &mut BitReader<'_>, values: &mut [i32]) {
    let planes = get_vli(bits);
    if planes == 0 || planes > 32 {
        return;
    }
    for p in (0..planes).rev() {
        let mask = 1u32 << (p & 31);
        let mut i = 0usize;
        loop {
            i += get_vli(bits) as usize;
            if i >= values.len() {
                break;
            }
            values[i] = (values[i] as u32 | mask) as i32;
            i += 1;
        }
    }
    // Undo the sign representation: a set sign plane marks a negative whose
    // lower planes carry |v| - 1.
    let sign = 1u32 << ((planes - 1) & 31);
    let low = sign - 1;
    for v in values.iter_mut() {
        let u = *v as u32;
        if u & sign != 0 {
            *v = -1 - (u & low) as i32;
        }
    }
}

/// Writes a root group as fixed-width magnitudes: VLI(1 + ⌊log2 M⌋) for the
/// largest magnitude M (zero when the group is all zero), then each value's
/// magnitude in that many bits followed by a sign bit for nonzero values.
pub fn encode_root(bits: &mut BitWriter, values: &[i32]) {
    let max = values.iter().map(|v| v.unsigned_abs()).max().unwrap_or(0);
    let cnt = if max == 0 { 0 } else { 32 - max.leading_zeros() };
    put_vli(bits, cnt);
    for &v in values {
        let mag = v.unsigned_abs();
        bits.write_bits(mag, cnt);
        if mag != 0 {
            bits.put_bit(v < 0);
        }
    }
}

/// Inverse of [`encode_root`]. Fails on a magnitude width no encoder
/// produces.
pub fn decode_root(bits: &mut BitReader<'_>, values: &mut [i32]) -> crate::Result<()> {
    let cnt = get_vli(bits);
    if cnt == 0 {
        values.fill(0);
        return Ok(());
    }
    if cnt > 31 {
        return Err(crate::CodecError::CorruptStream(
            "root magnitude width out of range",
        ));
    }
    for v in values.iter_mut() {
        let mag = bits.read_bits(cnt) as i32;
        *v = if mag != 0 && bits.get_bit() == 1 {
            -mag
        } else {
            mag
        };
    }
    Ok(())
}
