/*!
# dwtcodec-rs

`dwtcodec-rs` is a lossy image codec built on the two-dimensional discrete
wavelet transform. An encoder turns a color raster into a compact byte
stream; the decoder reconstructs an approximation of the image. Quality is
governed by per-channel quantization exponents and an overall byte budget:
when the budget runs out the stream is truncated at a clean layer boundary
and still decodes, just blurrier.

## Pipeline

- **Transform**: multi-level separable lifting DWT, Haar or CDF 9/7, over
  square power-of-two tiles (`dwt`).
- **Tiling**: non-square images are covered by up to 3×3 overlapping tiles,
  mirror-padded on encode and feather-blended on decode (`tile`).
- **Quantization**: dead-zone scalar quantizer with a centroid-biased
  inverse (`quantization`).
- **Entropy coding**: sub-bands linearized along a Hilbert curve
  (`hilbert`, `subband`) and coded as sign-magnitude bit planes with
  zero-run VLIs (`bit_plane_coder`, `vli`) over a byte-budgeted bit stream
  (`bit_io`).
- **Container**: a small VLI header carrying geometry, kernel and
  quantization (`header`), driven by `encoder` / `decoder`.

PPM input/output (`ppm`) and BT.601 color conversion (`color`) round out the
command-line codec.
*/

pub mod bit_io;
pub mod bit_plane_coder;
pub mod color;
pub mod decoder;
pub mod dwt;
pub mod encoder;
pub mod error;
pub mod header;
pub mod hilbert;
pub mod image;
pub mod ppm;
pub mod quantization;
pub mod subband;
pub mod tile;
pub mod vli;

pub use decoder::{decode, read_header};
pub use dwt::Wavelet;
pub use encoder::{encode, EncodeParams};
pub use error::{CodecError, Result};
pub use header::Header;
pub use image::Image;
