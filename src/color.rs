//! RGB ↔ YCbCr conversion (ITU-R BT.601, full range).
//!
//! Operates on `[0,1]` floats; luma stays in `[0,1]`, chroma comes out
//! centered around zero. The −0.5 luminance bias used around the wavelet
//! transform is applied by the codec, not here.

use crate::image::Image;

/// Converts an RGB raster to YCbCr in place.
pub fn rgb_to_ycbcr(image: &mut Image) {
    for px in image.data.chunks_exact_mut(3) {
        let (r, g, b) = (px[0], px[1], px[2]);
        // RGB to YCbCr
        let y = 0.299 * r + 0.587 * g + 0.114 * b;
        let cb = -0.1687 * r - 0.3313 * g + 0.5 * b;
        let cr = 0.5 * r - 0.4187 * g - 0.0813 * b;
        px[0] = y;
        px[1] = cb;
        px[2] = cr;
    }
}

/// Converts a YCbCr raster back to RGB in place. Out-of-gamut results are
/// left unclamped; the raster writer clamps on output.
pub fn ycbcr_to_rgb(image: &mut Image) {
    for px in image.data.chunks_exact_mut(3) {
        let (y, cb, cr) = (px[0], px[1], px[2]);
        px[0] = y + 1.402 * cr;
        px[1] = y - 0.344136 * cb - 0.714136 * cr;
        px[2] = y + 1.772 * cb;
    }
}
