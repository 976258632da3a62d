//! Discrete wavelet transforms.
//!
//! Two one-dimensional lifting kernels (Haar and CDF 9/7) and the separable
//! 2-D driver that applies them level by level over a square plane. After the
//! forward transform the plane is in standard pyramid form: the approximation
//! band of side `lmin/2` sits at the top-left, detail bands of increasing
//! resolution surround it.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Wavelet kernel selector, stored as a single bit in the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Wavelet {
    Haar = 0,
    Cdf97 = 1,
}

impl Wavelet {
    fn forward_line(self, line: &mut [f32], tmp: &mut [f32]) {
        match self {
            Self::Haar => Haar::forward(line, tmp),
            Self::Cdf97 => Cdf97::forward(line, tmp),
        }
    }

    fn inverse_line(self, line: &mut [f32], tmp: &mut [f32]) {
        match self {
            Self::Haar => Haar::inverse(line, tmp),
            Self::Cdf97 => Cdf97::inverse(line, tmp),
        }
    }
}

/// Orthonormal Haar pair transform.
pub struct Haar;

impl Haar {
    /// Forward 1D step: each pair (a, b) becomes sum (a+b)/√2 and difference
    /// (a-b)/√2, de-interleaved into low [0, n/2) and high [n/2, n) halves.
    pub fn forward(line: &mut [f32], tmp: &mut [f32]) {
        let n = line.len();
        let half = n / 2;
        for i in 0..half {
            let a = line[2 * i];
            let b = line[2 * i + 1];
            tmp[i] = (a + b) * std::f32::consts::FRAC_1_SQRT_2;
            tmp[half + i] = (a - b) * std::f32::consts::FRAC_1_SQRT_2;
        }
        line.copy_from_slice(&tmp[..n]);
    }

    /// Inverse 1D step, exact mirror of [`forward`](Self::forward).
    pub fn inverse(line: &mut [f32], tmp: &mut [f32]) {
        let n = line.len();
        let half = n / 2;
        for i in 0..half {
            let s = line[i];
            let d = line[half + i];
            tmp[2 * i] = (s + d) * std::f32::consts::FRAC_1_SQRT_2;
            tmp[2 * i + 1] = (s - d) * std::f32::consts::FRAC_1_SQRT_2;
        }
        line.copy_from_slice(&tmp[..n]);
    }
}

/// CDF 9/7 irreversible transform, four lifting steps plus scaling.
pub struct Cdf97;

impl Cdf97 {
    // 9/7 Filter Constants
    const ALPHA: f32 = -1.586134342;
    const BETA: f32 = -0.052980118;
    const GAMMA: f32 = 0.882911075;
    const DELTA: f32 = 0.443506852;
    const K: f32 = 1.230174105;
    const INV_K: f32 = 1.0 / 1.230174105;

    /// Forward 1D step. Lifting runs in place on the interleaved signal with
    /// symmetric whole-sample extension (reflection around the endpoints
    /// without repeating them); the result is de-interleaved into low and
    /// high halves.
    pub fn forward(line: &mut [f32], tmp: &mut [f32]) {
        let n = line.len();
        let half = n / 2;

        // Prediction 1
        // y[2i+1] = x[2i+1] + alpha * (x[2i] + x[2i+2])
        for i in (1..n).step_by(2) {
            let right = if i + 1 < n { line[i + 1] } else { line[i - 1] };
            line[i] += Self::ALPHA * (line[i - 1] + right);
        }
        // Update 1
        for i in (0..n).step_by(2) {
            let left = if i > 0 { line[i - 1] } else { line[i + 1] };
            let right = if i + 1 < n { line[i + 1] } else { line[i - 1] };
            line[i] += Self::BETA * (left + right);
        }
        // Prediction 2
        for i in (1..n).step_by(2) {
            let right = if i + 1 < n { line[i + 1] } else { line[i - 1] };
            line[i] += Self::GAMMA * (line[i - 1] + right);
        }
        // Update 2
        for i in (0..n).step_by(2) {
            let left = if i > 0 { line[i - 1] } else { line[i + 1] };
            let right = if i + 1 < n { line[i + 1] } else { line[i - 1] };
            line[i] += Self::DELTA * (left + right);
        }

        // Scaling and de-interleave: evens are the low pass, odds the high.
        for i in 0..half {
            tmp[i] = line[2 * i] * Self::INV_K;
            tmp[half + i] = line[2 * i + 1] * Self::K;
        }
        line.copy_from_slice(&tmp[..n]);
    }

    /// Inverse 1D step: re-interleave, undo scaling, run the lifting steps in
    /// reverse order with opposite signs.
    pub fn inverse(line: &mut [f32], tmp: &mut [f32]) {
        let n = line.len();
        let half = n / 2;

        for i in 0..half {
            tmp[2 * i] = line[i] * Self::K;
            tmp[2 * i + 1] = line[half + i] * Self::INV_K;
        }
        line.copy_from_slice(&tmp[..n]);

        // Update 2
        for i in (0..n).step_by(2) {
            let left = if i > 0 { line[i - 1] } else { line[i + 1] };
            let right = if i + 1 < n { line[i + 1] } else { line[i - 1] };
            line[i] -= Self::DELTA * (left + right);
        }
        // Prediction 2
        for i in (1..n).step_by(2) {
            let right = if i + 1 < n { line[i + 1] } else { line[i - 1] };
            line[i] -= Self::GAMMA * (line[i - 1] + right);
        }
        // Update 1
        for i in (0..n).step_by(2) {
            let left = if i > 0 { line[i - 1] } else { line[i + 1] };
            let right = if i + 1 < n { line[i + 1] } else { line[i - 1] };
            line[i] -= Self::BETA * (left + right);
        }
        // Prediction 1
        for i in (1..n).step_by(2) {
            let right = if i + 1 < n { line[i + 1] } else { line[i - 1] };
            line[i] -= Self::ALPHA * (line[i - 1] + right);
        }
    }
}

/// Multi-level forward 2-D transform over the top-left `size`×`size` region
/// of a plane with row pitch `pitch`. Each level transforms the rows then the
/// columns of the active square and halves it; the smallest transformed side
/// is `lmin`, leaving an approximation band of side `lmin/2`.
pub fn forward_2d(wavelet: Wavelet, plane: &mut [f32], pitch: usize, size: usize, lmin: usize) {
    debug_assert!(size.is_power_of_two() && lmin.is_power_of_two() && lmin <= size);
    let mut line = vec![0.0f32; size];
    let mut tmp = vec![0.0f32; size];
    let mut l = size;
    while l >= lmin {
        for y in 0..l {
            line[..l].copy_from_slice(&plane[y * pitch..y * pitch + l]);
            wavelet.forward_line(&mut line[..l], &mut tmp);
            plane[y * pitch..y * pitch + l].copy_from_slice(&line[..l]);
        }
        for x in 0..l {
            for y in 0..l {
                line[y] = plane[y * pitch + x];
            }
            wavelet.forward_line(&mut line[..l], &mut tmp);
            for y in 0..l {
                plane[y * pitch + x] = line[y];
            }
        }
        l /= 2;
    }
}

/// Inverse of [`forward_2d`]: levels run bottom-up, columns before rows.
pub fn inverse_2d(wavelet: Wavelet, plane: &mut [f32], pitch: usize, size: usize, lmin: usize) {
    debug_assert!(size.is_power_of_two() && lmin.is_power_of_two() && lmin <= size);
    let mut line = vec![0.0f32; size];
    let mut tmp = vec![0.0f32; size];
    let mut l = lmin;
    while l <= size {
        for x in 0..l {
            for y in 0..l {
                line[y] = plane[y * pitch + x];
            }
            wavelet.inverse_line(&mut line[..l], &mut tmp);
            for y in 0..l {
                plane[y * pitch + x] = line[y];
            }
        }
        for y in 0..l {
            line[..l].copy_from_slice(&plane[y * pitch..y * pitch + l]);
            wavelet.inverse_line(&mut line[..l], &mut tmp);
            plane[y * pitch..y * pitch + l].copy_from_slice(&line[..l]);
        }
        l *= 2;
    }
}
