//! Encoder: raster in, container stream out.
//!
//! Pipeline: color transform → per-tile mirror pad → forward DWT → dead-zone
//! quantization → root groups → detail layers coarse to fine, each layer a
//! luma planegroup and a chroma pair behind their own continue bits. The
//! writer's byte budget is checked after every planegroup unit; an overrun
//! discards the partial unit back to its flush point and terminates the
//! stream cleanly.

use crate::bit_io::BitWriter;
use crate::bit_plane_coder::{encode_planes, encode_root};
use crate::color::rgb_to_ycbcr;
use crate::dwt::{forward_2d, Wavelet};
use crate::error::{CodecError, Result};
use crate::header::{Header, MAX_PIXELS, MAX_QUANT};
use crate::image::Image;
use crate::quantization::{quantize, quantize_root};
use crate::subband::CoeffBuffer;
use crate::tile::{mirror_pad, select_grid};

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    pub wavelet: Wavelet,
    /// Per-channel quantization exponents (Y, Cb, Cr); coefficients are
    /// scaled by `2^quant` before integer coding.
    pub quant: [u32; 3],
    /// Byte budget for the output stream.
    pub capacity: usize,
    /// Minimum transformed side exponent (`lmin = 2^dmin`).
    pub dmin: u32,
}

impl Default for EncodeParams {
    fn default() -> Self {
        Self {
            wavelet: Wavelet::Cdf97,
            quant: [7, 5, 5],
            capacity: 1 << 23,
            dmin: 2,
        }
    }
}

/// Encodes an RGB raster (`[0,1]` floats) into a container stream.
pub fn encode(image: &Image, params: &EncodeParams) -> Result<Vec<u8>> {
    if image.width == 0 || image.height == 0 {
        return Err(CodecError::UnsupportedGeometry("empty image".to_string()));
    }
    if image.pixel_count() as u64 > MAX_PIXELS {
        return Err(CodecError::UnsupportedGeometry(format!(
            "{}x{} exceeds {} pixels",
            image.width, image.height, MAX_PIXELS
        )));
    }
    if image.data.len() != image.pixel_count() * 3 {
        return Err(CodecError::InvalidArgument(format!(
            "raster holds {} samples, geometry needs {}",
            image.data.len(),
            image.pixel_count() * 3
        )));
    }
    if params.quant.iter().any(|&q| q > MAX_QUANT) {
        return Err(CodecError::InvalidArgument(format!(
            "quantization exponent above {}",
            MAX_QUANT
        )));
    }
    if params.dmin == 0 {
        return Err(CodecError::InvalidArgument(
            "dmin must be at least 1".to_string(),
        ));
    }
    if params.capacity == 0 {
        return Err(CodecError::InvalidArgument(
            "capacity must be nonzero".to_string(),
        ));
    }

    let mut ycc = image.clone();
    rgb_to_ycbcr(&mut ycc);
    // Center luminance; chroma is already centered.
    for px in ycc.data.chunks_exact_mut(3) {
        px[0] -= 0.5;
    }

    let grid = select_grid(image.width as u32, image.height as u32, params.dmin)?;
    let header = Header {
        wavelet: params.wavelet,
        width: image.width as u32,
        height: image.height as u32,
        depth: grid.depth,
        dmin: params.dmin,
        cols: grid.cols,
        rows: grid.rows,
        quant: params.quant,
    };
    let geo = header.geometry();
    let length = geo.length();
    let root = geo.root_len();

    let mut coeff = CoeffBuffer::new(geo);
    let mut plane = vec![0.0f32; length * length];
    for row in 0..geo.rows as usize {
        for col in 0..geo.cols as usize {
            let tile = row * geo.cols as usize + col;
            for chan in 0..3 {
                mirror_pad(&ycc.data, chan, &geo, col, row, &mut plane);
                forward_2d(params.wavelet, &mut plane, length, length, geo.lmin());
                let quant = params.quant[chan];
                let out = coeff.plane_mut(tile, chan);
                for y in 0..length {
                    for x in 0..length {
                        let v = plane[y * length + x];
                        out[y * length + x] = if x < root && y < root {
                            quantize_root(v, quant)
                        } else {
                            quantize(v, quant)
                        };
                    }
                }
            }
        }
    }

    let mut bits = BitWriter::new(params.capacity);
    header.write(&mut bits);

    let mut group = Vec::new();
    for chan in 0..3 {
        group.clear();
        coeff.gather_root(chan, &mut group);
        encode_root(&mut bits, &group);
    }

    let mut terminated = false;
    for len in geo.layer_lens() {
        bits.flush();
        bits.put_bit(true);
        group.clear();
        coeff.gather_group(0, len, &mut group);
        encode_planes(&mut bits, &mut group);
        if bits.over_capacity() {
            bits.discard();
            bits.put_bit(false);
            log::info!("capacity reached in luma layer of side {}", len);
            terminated = true;
            break;
        }

        bits.flush();
        bits.put_bit(true);
        for chan in 1..3 {
            group.clear();
            coeff.gather_group(chan, len, &mut group);
            encode_planes(&mut bits, &mut group);
        }
        if bits.over_capacity() {
            bits.discard();
            bits.put_bit(false);
            log::info!("capacity reached in chroma layer of side {}", len);
            terminated = true;
            break;
        }
        log::debug!("layer of side {} done at {} bits", len, bits.count());
    }
    if !terminated {
        bits.flush();
        bits.put_bit(false);
    }

    Ok(bits.finish())
}
