use anyhow::Result;
use clap::Parser;
use regol::audio;
use std::path::PathBuf;
use std::process::ExitCode;

/// Sample-exact comparison of two audio files.
#[derive(Parser)]
#[command(name = "averify", about = "Verify two audio files are sample-identical")]
struct Cli {
    /// First audio file
    first: PathBuf,

    /// Second audio file
    second: PathBuf,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let a = audio::read_audio_file(&cli.first)?;
    let b = audio::read_audio_file(&cli.second)?;

    if a.samples.len() != b.samples.len() || a.channels != b.channels {
        println!("Files have different dimensions");
        println!(
            "File 1: {} frames, {} channels",
            a.frames(),
            a.channels
        );
        println!(
            "File 2: {} frames, {} channels",
            b.frames(),
            b.channels
        );
        return Ok(ExitCode::FAILURE);
    }

    let mut differences = 0usize;
    for (i, (x, y)) in a.samples.iter().zip(b.samples.iter()).enumerate() {
        if x != y {
            differences += 1;
            if differences <= 5 {
                println!("Diff at sample {}: {} vs {}", i, x, y);
            }
        }
    }

    if differences == 0 {
        println!("Audio samples are IDENTICAL - lossless round trip verified");
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "Found {} different samples out of {}",
            differences,
            a.samples.len()
        );
        Ok(ExitCode::FAILURE)
    }
}
