//! Decoder: container stream in, raster out.
//!
//! Only the header and the root magnitude widths can fail; everything after
//! them is read with the tolerant bit reader, so a stream cut at any flush
//! boundary reconstructs with the missing high-frequency detail left at zero.

use crate::bit_io::BitReader;
use crate::bit_plane_coder::{decode_planes, decode_root};
use crate::color::ycbcr_to_rgb;
use crate::dwt::inverse_2d;
use crate::error::Result;
use crate::header::Header;
use crate::image::Image;
use crate::quantization::{dequantize, dequantize_root};
use crate::subband::CoeffBuffer;
use crate::tile::blend_tile;

/// Parses just the container header, for inspection.
pub fn read_header(data: &[u8]) -> Result<Header> {
    Header::read(&mut BitReader::new(data))
}

/// Decodes a container stream into an RGB raster.
pub fn decode(data: &[u8]) -> Result<Image> {
    let mut bits = BitReader::new(data);
    let header = Header::read(&mut bits)?;
    let geo = header.geometry();
    log::debug!(
        "decoding {}x{}: {:?}, {}x{} tiles of side {}",
        header.width,
        header.height,
        header.wavelet,
        header.cols,
        header.rows,
        geo.length()
    );

    let mut coeff = CoeffBuffer::new(geo);
    let mut group = Vec::new();
    for chan in 0..3 {
        group.clear();
        group.resize(geo.root_group_len(), 0);
        decode_root(&mut bits, &mut group)?;
        coeff.scatter_root(chan, &group);
    }

    for len in geo.layer_lens() {
        bits.align_to_byte();
        if bits.get_bit() == 0 {
            log::debug!("stream terminated before luma layer of side {}", len);
            break;
        }
        group.clear();
        group.resize(geo.group_len(len), 0);
        decode_planes(&mut bits, &mut group);
        coeff.scatter_group(0, len, &group);

        bits.align_to_byte();
        if bits.get_bit() == 0 {
            log::debug!("stream terminated before chroma layer of side {}", len);
            break;
        }
        for chan in 1..3 {
            group.clear();
            group.resize(geo.group_len(len), 0);
            decode_planes(&mut bits, &mut group);
            coeff.scatter_group(chan, len, &group);
        }
    }

    let length = geo.length();
    let root = geo.root_len();
    let mut out = Image::new(header.width as usize, header.height as usize);
    let mut plane = vec![0.0f32; length * length];
    for chan in 0..3 {
        let quant = header.quant[chan];
        for row in 0..geo.rows as usize {
            for col in 0..geo.cols as usize {
                let tile = row * geo.cols as usize + col;
                let quantized = coeff.plane(tile, chan);
                for y in 0..length {
                    for x in 0..length {
                        let q = quantized[y * length + x];
                        plane[y * length + x] = if x < root && y < root {
                            dequantize_root(q, quant)
                        } else {
                            dequantize(q, quant)
                        };
                    }
                }
                inverse_2d(header.wavelet, &mut plane, length, length, geo.lmin());
                blend_tile(&mut out.data, chan, &geo, col, row, &plane);
            }
        }
    }

    // Undo the luminance centering, then return to RGB.
    for px in out.data.chunks_exact_mut(3) {
        px[0] += 0.5;
    }
    ycbcr_to_rgb(&mut out);
    Ok(out)
}
