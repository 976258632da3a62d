//! Container header.
//!
//! The header is the only part of the stream with hard validity rules: a
//! stream whose geometry cannot describe a real image is rejected before any
//! coefficient is read. Everything after the header may be truncated at any
//! flush boundary and still decodes.

use crate::bit_io::{BitReader, BitWriter};
use crate::dwt::Wavelet;
use crate::error::{CodecError, Result};
use crate::subband::Geometry;
use crate::tile::MAX_DEPTH;
use crate::vli::{get_vli, put_vli};

/// Largest accepted per-channel quantization exponent.
pub const MAX_QUANT: u32 = 24;

/// Largest accepted image size; the coefficient buffer is proportional.
pub const MAX_PIXELS: u64 = 1 << 28;

/// Parsed container header: kernel selection, geometry and per-channel
/// quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub wavelet: Wavelet,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub dmin: u32,
    pub cols: u32,
    pub rows: u32,
    pub quant: [u32; 3],
}

impl Header {
    /// Serializes the header and pads to a byte boundary.
    pub fn write(&self, bits: &mut BitWriter) {
        bits.put_bit(u8::from(self.wavelet) != 0);
        put_vli(bits, self.width);
        put_vli(bits, self.height);
        put_vli(bits, self.depth);
        put_vli(bits, self.dmin);
        put_vli(bits, self.cols);
        put_vli(bits, self.rows);
        for &q in &self.quant {
            put_vli(bits, q);
        }
        bits.flush();
    }

    /// Parses and validates a header, leaving the reader byte-aligned on the
    /// first root group.
    pub fn read(bits: &mut BitReader<'_>) -> Result<Self> {
        let wavelet = Wavelet::try_from(bits.get_bit())
            .map_err(|_| CodecError::MalformedHeader("unknown wavelet"))?;
        let width = get_vli(bits);
        let height = get_vli(bits);
        let depth = get_vli(bits);
        let dmin = get_vli(bits);
        let cols = get_vli(bits);
        let rows = get_vli(bits);
        let mut quant = [0u32; 3];
        for q in &mut quant {
            *q = get_vli(bits);
        }
        bits.align_to_byte();

        let header = Self {
            wavelet,
            width,
            height,
            depth,
            dmin,
            cols,
            rows,
            quant,
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CodecError::MalformedHeader("empty image"));
        }
        if u64::from(self.width) * u64::from(self.height) > MAX_PIXELS {
            return Err(CodecError::MalformedHeader("image too large"));
        }
        if self.depth > MAX_DEPTH {
            return Err(CodecError::MalformedHeader("tile depth out of range"));
        }
        if self.dmin == 0 || self.dmin > self.depth {
            return Err(CodecError::MalformedHeader("sub-band depth out of range"));
        }
        if !(1..=3).contains(&self.cols) || !(1..=3).contains(&self.rows) {
            return Err(CodecError::MalformedHeader("tile grid out of range"));
        }
        let length = 1u64 << self.depth;
        if u64::from(self.width) > length * u64::from(self.cols)
            || u64::from(self.height) > length * u64::from(self.rows)
        {
            return Err(CodecError::MalformedHeader("tiles do not cover the image"));
        }
        // The encoder always picks the smallest admissible depth; reject
        // anything deeper before it buys an oversized coefficient buffer.
        if self.depth > self.dmin {
            let half = (length / 2) as usize;
            let lmin = 1usize << self.dmin;
            if crate::tile::covers(half, self.cols as usize, self.width as usize, lmin)
                && crate::tile::covers(half, self.rows as usize, self.height as usize, lmin)
            {
                return Err(CodecError::MalformedHeader("tile depth is not minimal"));
            }
        }
        if self.quant.iter().any(|&q| q > MAX_QUANT) {
            return Err(CodecError::MalformedHeader("quantization out of range"));
        }
        Ok(())
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            width: self.width,
            height: self.height,
            depth: self.depth,
            dmin: self.dmin,
            cols: self.cols,
            rows: self.rows,
        }
    }
}
