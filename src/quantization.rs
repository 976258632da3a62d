//! Dead-zone scalar quantization.
//!
//! Detail coefficients are scaled by `2^quant` and truncated toward zero,
//! which widens the zero cell; the inverse adds a 0.375 magnitude bias before
//! dividing, reconstructing the centroid of the dead-zone cell. The root band
//! rounds to nearest instead and is reconstructed without bias.

/// Quantizes a detail coefficient.
/// q = trunc(v * 2^quant)
pub fn quantize(v: f32, quant: u32) -> i32 {
    // Stream codes carry at most a 31-bit magnitude; keep i32::MIN out.
    ((v * (1u32 << quant) as f32).trunc() as i32).max(-i32::MAX)
}

/// Quantizes a root (approximation) coefficient, round-to-nearest with ties
/// to even.
pub fn quantize_root(v: f32, quant: u32) -> i32 {
    ((v * (1u32 << quant) as f32).round_ties_even() as i32).max(-i32::MAX)
}

/// Reconstructs a detail coefficient.
/// v = sign(q) * (|q| + 0.375) / 2^quant, zero stays zero
pub fn dequantize(q: i32, quant: u32) -> f32 {
    if q == 0 {
        return 0.0;
    }
    let bias = if q < 0 { -0.375f32 } else { 0.375f32 };
    (q as f32 + bias) / (1u32 << quant) as f32
}

/// Reconstructs a root coefficient.
pub fn dequantize_root(q: i32, quant: u32) -> f32 {
    q as f32 / (1u32 << quant) as f32
}
