use anyhow::{bail, Context, Result};
use clap::Parser;
use libgol::{ImageDecoder, ImageEncoder, ImagePredictor, NegativeMode};
use regol::pgm;
use std::path::PathBuf;

/// Lossless grayscale image compression using Golomb-coded prediction
/// residuals.
#[derive(Parser)]
#[command(name = "gimg", version, about = "GIMG image codec")]
struct Cli {
    /// Encode the input PGM image to GIMG
    #[arg(short = 'e', conflicts_with = "decode")]
    encode: bool,

    /// Decode a GIMG file back to PGM
    #[arg(short = 'd')]
    decode: bool,

    /// Predictor: 0=Left, 1=Top, 2=Top-Left, 3=Average, 4=Paeth,
    /// 5=a+(b-c)/2, 6=b+(a-c)/2
    #[arg(short = 'p', default_value_t = 4)]
    predictor: i32,

    /// Fixed Golomb parameter m (default: adaptive per block)
    #[arg(short = 'm', value_parser = clap::value_parser!(u32).range(1..))]
    parameter: Option<u32>,

    /// Negative mode: 0=Interleaved, 1=Sign-Magnitude
    #[arg(short = 'n', default_value_t = 0)]
    negative: i32,

    /// Input file
    input: PathBuf,

    /// Output file
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.decode {
        decode(&cli)
    } else if cli.encode {
        encode(&cli)
    } else {
        bail!("specify -e (encode) or -d (decode)")
    }
}

fn encode(cli: &Cli) -> Result<()> {
    let predictor = ImagePredictor::from_code(cli.predictor)?;
    let negative_mode = NegativeMode::from_code(cli.negative)?;

    println!("Reading {}...", cli.input.display());
    let image = pgm::read_pgm(&cli.input)?;
    println!("  {}x{} pixels, grayscale", image.width(), image.height());

    println!("\nImage codec configuration:");
    println!(
        "  Predictor: {}",
        match predictor {
            ImagePredictor::Left => "Left",
            ImagePredictor::Top => "Top",
            ImagePredictor::TopLeft => "Top-Left",
            ImagePredictor::Average => "Average",
            ImagePredictor::Paeth => "Paeth (PNG)",
            ImagePredictor::LeftGradient => "a+(b-c)/2",
            ImagePredictor::TopGradient => "b+(a-c)/2",
        }
    );
    match cli.parameter {
        Some(m) => println!("  Golomb parameter: Fixed (m={})", m),
        None => println!("  Golomb parameter: Adaptive"),
    }
    println!(
        "  Negative mode: {}",
        match negative_mode {
            NegativeMode::Interleaved => "Interleaved",
            NegativeMode::SignMagnitude => "Sign-Magnitude",
        }
    );

    let mut encoder = ImageEncoder::new()
        .with_predictor(predictor)
        .with_negative_mode(negative_mode);
    if let Some(m) = cli.parameter {
        encoder = encoder.with_fixed_parameter(m);
    }

    let compressed_size = encoder
        .encode_to_file(&cli.output, &image)
        .context("Failed to encode")?;

    let original_size = image.pixels().len();
    let ratio = original_size as f64 / compressed_size as f64;
    let bits_per_pixel = compressed_size as f64 * 8.0 / original_size.max(1) as f64;

    println!("\nCompression statistics:");
    println!("  Original size: {} bytes", original_size);
    println!("  Compressed size: {} bytes", compressed_size);
    println!("  Compression ratio: {:.2}:1", ratio);
    println!("  Bits per pixel: {:.2}", bits_per_pixel);
    println!("\nDone! Output: {}", cli.output.display());

    Ok(())
}

fn decode(cli: &Cli) -> Result<()> {
    println!("Reading {}...", cli.input.display());
    let image = ImageDecoder::new()
        .decode_file(&cli.input)
        .context("Failed to decode GIMG file")?;
    println!("  {}x{} pixels", image.width(), image.height());

    pgm::write_pgm(&cli.output, &image)?;
    println!("Done! Output: {}", cli.output.display());

    Ok(())
}
