use anyhow::{bail, Context, Result};
use clap::Parser;
use libgol::{AudioDecoder, AudioEncoder, AudioPredictor, NegativeMode, StereoMode};
use regol::audio;
use std::path::PathBuf;

/// Lossless audio compression using Golomb-coded prediction residuals.
#[derive(Parser)]
#[command(name = "agol", version, about = "AGOL audio codec")]
struct Cli {
    /// Encode the input audio file to AGOL
    #[arg(short = 'e', conflicts_with = "decode")]
    encode: bool,

    /// Decode an AGOL file back to WAV
    #[arg(short = 'd')]
    decode: bool,

    /// Predictor: 0=Order-1, 1=Order-2, 2=Order-3
    #[arg(short = 'p', default_value_t = 1)]
    predictor: i32,

    /// Stereo mode: 0=Independent, 1=Mid-Side
    #[arg(short = 's', default_value_t = 1)]
    stereo: i32,

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
    let predictor = AudioPredictor::from_code(cli.predictor)?;
    let stereo_mode = StereoMode::from_code(cli.stereo)?;
    let negative_mode = NegativeMode::from_code(cli.negative)?;

    println!("Reading {}...", cli.input.display());
    let pcm = audio::read_audio_file(&cli.input)?;
    println!("  Sample rate: {} Hz", pcm.sample_rate);
    println!("  Channels: {}", pcm.channels);
    println!("  Frames: {}", pcm.frames());

    println!("\nAudio codec configuration:");
    println!(
        "  Predictor: Order-{}",
        match predictor {
            AudioPredictor::Order1 => 1,
            AudioPredictor::Order2 => 2,
            AudioPredictor::Order3 => 3,
        }
    );
    println!(
        "  Stereo mode: {}",
        match stereo_mode {
            StereoMode::Independent => "Independent",
            StereoMode::MidSide => "Mid-Side",
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

    let mut encoder = AudioEncoder::new()
        .with_predictor(predictor)
        .with_stereo_mode(stereo_mode)
        .with_negative_mode(negative_mode);
    if let Some(m) = cli.parameter {
        encoder = encoder.with_fixed_parameter(m);
    }

    let compressed_size = encoder
        .encode_to_file(&cli.output, &pcm.samples, pcm.channels as u16, pcm.sample_rate)
        .context("Failed to encode")?;

    let original_size = pcm.samples.len() * 2;
    let ratio = original_size as f64 / compressed_size as f64;
    let bits_per_sample = compressed_size as f64 * 8.0 / pcm.samples.len().max(1) as f64;

    println!("\nCompression statistics:");
    println!("  Original size: {} bytes", original_size);
    println!("  Compressed size: {} bytes", compressed_size);
    println!("  Compression ratio: {:.2}:1", ratio);
    println!("  Bits per sample: {:.2}", bits_per_sample);
    println!("\nDone! Output: {}", cli.output.display());

    Ok(())
}

fn decode(cli: &Cli) -> Result<()> {
    println!("Reading {}...", cli.input.display());
    let decoded = AudioDecoder::new()
        .decode_file(&cli.input)
        .context("Failed to decode AGOL file")?;
    println!(
        "  {} channel(s), {} Hz, {} frames",
        decoded.channels,
        decoded.sample_rate,
        decoded.samples.len() / decoded.channels.max(1) as usize
    );

    audio::write_wav(
        &cli.output,
        &decoded.samples,
        decoded.sample_rate,
        decoded.channels as usize,
    )?;
    println!("Done! Output: {}", cli.output.display());

    Ok(())
}
