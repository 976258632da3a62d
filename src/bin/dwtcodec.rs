//! dwtcodec CLI - wavelet image codec command-line utility.
//!
//! Encodes PPM images into `.dwt` streams and back, with per-channel
//! quantization control and a hard byte budget for rate-limited encoding.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use dwtcodec_rs::{EncodeParams, Wavelet};

/// Lossy wavelet image codec (Haar / CDF 9/7)
#[derive(Parser)]
#[command(name = "dwtcodec")]
#[command(author = "dwtcodec-rs contributors")]
#[command(version)]
#[command(about = "Lossy image compression based on the discrete wavelet transform", long_about = None)]
#[command(after_help = "EXAMPLES:
    dwtcodec encode -i photo.ppm -o photo.dwt
    dwtcodec encode -i photo.ppm -o photo.dwt -q 8 6 6 --wavelet haar
    dwtcodec encode -i photo.ppm -o small.dwt --capacity 65536
    dwtcodec decode -i photo.dwt -o roundtrip.ppm
    dwtcodec info -i photo.dwt

Input images are binary PPM (P6, 8-bit). The capacity budget truncates the
stream at a layer boundary; truncated streams always decode.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a PPM image into a wavelet stream
    #[command(visible_alias = "e")]
    Encode {
        /// Input PPM file (binary P6)
        #[arg(short, long)]
        input: PathBuf,

        /// Output stream file
        #[arg(short, long)]
        output: PathBuf,

        /// Per-channel quantization exponents (Y Cb Cr); larger is finer
        #[arg(short, long, num_args = 3, default_values_t = [7u32, 5, 5])]
        quant: Vec<u32>,

        /// Wavelet kernel
        #[arg(short, long, value_enum, default_value = "cdf97")]
        wavelet: Kernel,

        /// Output byte budget
        #[arg(short, long, default_value_t = 1 << 23)]
        capacity: usize,
    },

    /// Decode a wavelet stream back into a PPM image
    #[command(visible_alias = "d")]
    Decode {
        /// Input stream file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PPM file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Display the container header of a wavelet stream
    #[command(visible_alias = "i")]
    Info {
        /// Input stream file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kernel {
    /// Orthonormal Haar kernel
    Haar,
    /// CDF 9/7 biorthogonal kernel
    Cdf97,
}

impl From<Kernel> for Wavelet {
    fn from(kernel: Kernel) -> Self {
        match kernel {
            Kernel::Haar => Self::Haar,
            Kernel::Cdf97 => Self::Cdf97,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            quant,
            wavelet,
            capacity,
        } => encode_image(&input, &output, &quant, wavelet, capacity),
        Commands::Decode { input, output } => decode_image(&input, &output),
        Commands::Info { input } => show_info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn encode_image(
    input: &PathBuf,
    output: &PathBuf,
    quant: &[u32],
    wavelet: Kernel,
    capacity: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let image = dwtcodec_rs::ppm::read_ppm(input)?;
    let params = EncodeParams {
        wavelet: wavelet.into(),
        quant: [quant[0], quant[1], quant[2]],
        capacity,
        ..EncodeParams::default()
    };
    let stream = dwtcodec_rs::encode(&image, &params)?;
    fs::write(output, &stream)?;

    println!(
        "Encoded {}x{} image to {:?} ({} bytes)",
        image.width,
        image.height,
        output,
        stream.len()
    );
    Ok(())
}

fn decode_image(input: &PathBuf, output: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let image = dwtcodec_rs::decode(&data)?;
    dwtcodec_rs::ppm::write_ppm(output, &image)?;

    println!(
        "Decoded {}x{} image to {:?}",
        image.width, image.height, output
    );
    Ok(())
}

fn show_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let header = dwtcodec_rs::read_header(&data)?;

    println!("File: {:?}", input);
    println!("Size: {} bytes", data.len());
    println!();
    println!("  Dimensions: {}x{}", header.width, header.height);
    println!(
        "  Wavelet:    {}",
        match header.wavelet {
            Wavelet::Haar => "Haar",
            Wavelet::Cdf97 => "CDF 9/7",
        }
    );
    println!(
        "  Tiles:      {}x{} of side {}",
        header.cols,
        header.rows,
        1u32 << header.depth
    );
    println!("  Root band:  side {}", 1u32 << (header.dmin - 1));
    println!(
        "  Quant:      Y={} Cb={} Cr={}",
        header.quant[0], header.quant[1], header.quant[2]
    );
    Ok(())
}
