//! Tiling of arbitrary rasters into square power-of-two planes.
//!
//! Non-square images are covered by a small grid of overlapping square tiles.
//! On encode each tile is filled from an infinite mirror-tiled view of the
//! image, which keeps the tile C0-continuous and suppresses boundary ringing
//! in the transform. On decode the tiles are blended back with a bilinear
//! feather across the overlap seams.

use crate::error::{CodecError, Result};
use crate::subband::Geometry;

/// Largest supported tile exponent (`L = 2^14`).
pub const MAX_DEPTH: u32 = 14;

/// Tile arrangement: `cols`×`rows` square tiles of side `2^depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub depth: u32,
    pub cols: u32,
    pub rows: u32,
}

/// Whether `n` tiles of side `len` cover `dim` samples, leaving the half
/// root-band overlap on every shared edge.
pub(crate) fn covers(len: usize, n: usize, dim: usize, lmin: usize) -> bool {
    if n == 1 {
        len >= dim
    } else {
        len.saturating_sub(lmin / 2) * n >= dim
    }
}

/// Picks the grid minimizing padding waste `L²·cols·rows - W·H` over
/// `cols, rows ∈ {1, 2, 3}` with `L` the smallest admissible power of two
/// per candidate. A square power-of-two image always gets a single exact
/// tile.
pub fn select_grid(width: u32, height: u32, dmin: u32) -> Result<TileGrid> {
    let (w, h) = (width as usize, height as usize);
    let lmin = 1usize << dmin;
    let mut best: Option<(i64, TileGrid)> = None;

    for cols in 1..=3usize {
        for rows in 1..=3usize {
            let Some(depth) = (dmin..=MAX_DEPTH).find(|&d| {
                let len = 1usize << d;
                covers(len, cols, w, lmin) && covers(len, rows, h, lmin)
            }) else {
                continue;
            };
            let len = 1i64 << depth;
            let waste = len * len * (cols * rows) as i64 - (w * h) as i64;
            if best.map_or(true, |(b, _)| waste < b) {
                best = Some((
                    waste,
                    TileGrid {
                        depth,
                        cols: cols as u32,
                        rows: rows as u32,
                    },
                ));
            }
        }
    }

    let Some((waste, grid)) = best else {
        return Err(CodecError::UnsupportedGeometry(format!(
            "{}x{} exceeds the largest {}x{} tile grid",
            width,
            height,
            3 << MAX_DEPTH,
            3 << MAX_DEPTH
        )));
    };
    log::debug!(
        "tile grid {}x{} of side {} for {}x{} (waste {} samples)",
        grid.cols,
        grid.rows,
        1u32 << grid.depth,
        width,
        height,
        waste
    );
    Ok(grid)
}

/// Reflects coordinate `x` into `[0, n)` without repeating the endpoints.
fn mirror(x: isize, n: usize) -> usize {
    let n1 = (n - 1) as isize;
    if n1 == 0 {
        return 0;
    }
    let m = x.rem_euclid(2 * n1);
    (n1 - (n1 - m).abs()) as usize
}

/// Inward offset of a tile relative to its nominal image region, per axis.
fn tile_offsets(geo: &Geometry) -> (usize, usize) {
    let length = geo.length();
    let xlen = (geo.width as usize).div_ceil(geo.cols as usize);
    let ylen = (geo.height as usize).div_ceil(geo.rows as usize);
    ((length - xlen) / 2, (length - ylen) / 2)
}

/// Fills an `L`×`L` plane for tile (`col`, `row`) from channel `chan` of the
/// interleaved source raster, mirror-extending beyond the image borders.
pub fn mirror_pad(
    src: &[f32],
    chan: usize,
    geo: &Geometry,
    col: usize,
    row: usize,
    plane: &mut [f32],
) {
    let (w, h) = (geo.width as usize, geo.height as usize);
    let length = geo.length();
    let (xoff, yoff) = tile_offsets(geo);
    let x0 = (w * col / geo.cols as usize) as isize - xoff as isize;
    let y0 = (h * row / geo.rows as usize) as isize - yoff as isize;
    for j in 0..length {
        let y = mirror(y0 + j as isize, h);
        for i in 0..length {
            let x = mirror(x0 + i as isize, w);
            plane[j * length + i] = src[(y * w + x) * 3 + chan];
        }
    }
}

fn lerp(a: f32, b: f32, x: f32) -> f32 {
    (1.0 - x) * a + x * b
}

/// Copies a reconstructed tile plane into channel `chan` of the interleaved
/// output raster. Samples in the `2·xoff`/`2·yoff` overlap strips along a
/// shared left or top edge are feather-blended against the neighbor tile
/// written before; the rest overwrite. Tiles must be composed row-major,
/// column-minor for the seams to meet their already-written neighbors.
pub fn blend_tile(
    dst: &mut [f32],
    chan: usize,
    geo: &Geometry,
    col: usize,
    row: usize,
    plane: &[f32],
) {
    let (w, h) = (geo.width as usize, geo.height as usize);
    let length = geo.length();
    if w == length && h == length {
        for i in 0..length * length {
            dst[i * 3 + chan] = plane[i];
        }
        return;
    }

    let (xoff, yoff) = tile_offsets(geo);
    let (jstart, ystart) = if row == 0 {
        (yoff, 0isize)
    } else {
        (0, (h * row / geo.rows as usize) as isize - yoff as isize)
    };
    let (istart, xstart) = if col == 0 {
        (xoff, 0isize)
    } else {
        (0, (w * col / geo.cols as usize) as isize - xoff as isize)
    };

    for j in jstart..length {
        let y = ystart + (j - jstart) as isize;
        if y < 0 {
            continue;
        }
        if y >= h as isize {
            break;
        }
        for i in istart..length {
            let x = xstart + (i - istart) as isize;
            if x < 0 {
                continue;
            }
            if x >= w as isize {
                break;
            }
            let out = &mut dst[(y as usize * w + x as usize) * 3 + chan];
            let sample = plane[j * length + i];
            if (col == 0 || i >= 2 * xoff) && (row == 0 || j >= 2 * yoff) {
                *out = sample;
            } else {
                let wx = (i as f32 / (2 * xoff) as f32).clamp(0.0, 1.0);
                let wy = (j as f32 / (2 * yoff) as f32).clamp(0.0, 1.0);
                *out = lerp(*out, sample, wx * wy);
            }
        }
    }
}
