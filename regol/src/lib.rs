//! regol - command-line front ends for the AGOL/GIMG codecs.
//!
//! Handles the byte-level media I/O the codec library stays out of: audio
//! ingestion through symphonia, WAV output, and binary PGM images.

pub mod audio;
pub mod pgm;
