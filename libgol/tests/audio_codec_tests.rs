//! Full audio codec round trips across predictors, stereo modes and
//! parameter modes.

use libgol::{
    audio, AudioDecoder, AudioEncoder, AudioPredictor, NegativeMode, StereoMode, AUDIO_BLOCK_SIZE,
};

const PREDICTORS: [AudioPredictor; 3] = [
    AudioPredictor::Order1,
    AudioPredictor::Order2,
    AudioPredictor::Order3,
];

fn roundtrip(encoder: &AudioEncoder, samples: &[i16], channels: u16, sample_rate: u32) {
    let encoded = encoder
        .encode(samples, channels, sample_rate)
        .expect("encoding failed");
    let decoded = AudioDecoder::new().decode(&encoded).expect("decoding failed");

    assert_eq!(decoded.samples, samples);
    assert_eq!(decoded.channels, channels);
    assert_eq!(decoded.sample_rate, sample_rate);
}

fn sine_wave(len: usize, step: f64, amplitude: f64) -> Vec<i16> {
    (0..len)
        .map(|i| ((i as f64 * step).sin() * amplitude) as i16)
        .collect()
}

fn noise(len: usize, seed: u64) -> Vec<i16> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 48) as i16
        })
        .collect()
}

#[test]
fn test_mono_order1_known_samples() {
    let samples = [1000i16, 1002, 998, 1001];
    let encoder = AudioEncoder::new().with_predictor(AudioPredictor::Order1);
    roundtrip(&encoder, &samples, 1, 44100);
}

#[test]
fn test_mono_all_predictors() {
    let signals = [
        sine_wave(5000, 0.01, 12000.0),
        noise(5000, 42),
        vec![0i16; 5000],
        vec![-32768i16; 100],
        (0..5000).map(|i| (i % 7) as i16 * 100 - 300).collect(),
    ];

    for predictor in PREDICTORS {
        for samples in &signals {
            let encoder = AudioEncoder::new().with_predictor(predictor);
            roundtrip(&encoder, samples, 1, 44100);
        }
    }
}

#[test]
fn test_mono_alternating_extremes() {
    let samples: Vec<i16> = (0..3000)
        .map(|i| if i % 2 == 0 { 32767 } else { -32768 })
        .collect();
    for predictor in PREDICTORS {
        let encoder = AudioEncoder::new().with_predictor(predictor);
        roundtrip(&encoder, &samples, 1, 48000);
    }
}

#[test]
fn test_stereo_independent() {
    let mut samples = Vec::with_capacity(4000 * 2);
    for i in 0..4000 {
        samples.push(((i as f64 * 0.01).sin() * 10000.0) as i16);
        samples.push(((i as f64 * 0.01).cos() * 9000.0) as i16);
    }

    for predictor in PREDICTORS {
        let encoder = AudioEncoder::new()
            .with_predictor(predictor)
            .with_stereo_mode(StereoMode::Independent);
        roundtrip(&encoder, &samples, 2, 44100);
    }
}

#[test]
fn test_stereo_mid_side() {
    let mut samples = Vec::with_capacity(4000 * 2);
    for i in 0..4000 {
        let base = ((i as f64 * 0.02).sin() * 15000.0) as i16;
        samples.push(base);
        samples.push(base.saturating_add((i % 11) as i16 - 5));
    }

    for predictor in PREDICTORS {
        let encoder = AudioEncoder::new()
            .with_predictor(predictor)
            .with_stereo_mode(StereoMode::MidSide);
        roundtrip(&encoder, &samples, 2, 44100);
    }
}

#[test]
fn test_stereo_mid_side_extreme_pairs() {
    // Side channel spans 17 bits here; the codec must carry it exactly.
    let mut samples = Vec::new();
    for _ in 0..1500 {
        samples.push(32767i16);
        samples.push(-32768i16);
        samples.push(-32768i16);
        samples.push(32767i16);
    }
    for predictor in PREDICTORS {
        let encoder = AudioEncoder::new()
            .with_predictor(predictor)
            .with_stereo_mode(StereoMode::MidSide);
        roundtrip(&encoder, &samples, 2, 96000);
    }
}

#[test]
fn test_fixed_parameter_modes() {
    let samples = sine_wave(3000, 0.02, 8000.0);
    for m in [1, 16, 255, 65535] {
        let encoder = AudioEncoder::new().with_fixed_parameter(m);
        roundtrip(&encoder, &samples, 1, 44100);
    }
}

#[test]
fn test_sign_magnitude_mode() {
    let samples = noise(4000, 7);
    let encoder = AudioEncoder::new().with_negative_mode(NegativeMode::SignMagnitude);
    roundtrip(&encoder, &samples, 1, 44100);

    let encoder = AudioEncoder::new()
        .with_negative_mode(NegativeMode::SignMagnitude)
        .with_fixed_parameter(32);
    roundtrip(&encoder, &samples, 1, 44100);
}

#[test]
fn test_block_boundary_lengths() {
    for len in [
        0,
        1,
        2,
        AUDIO_BLOCK_SIZE - 1,
        AUDIO_BLOCK_SIZE,
        AUDIO_BLOCK_SIZE + 1,
        3 * AUDIO_BLOCK_SIZE,
    ] {
        let samples = sine_wave(len, 0.05, 5000.0);
        roundtrip(&AudioEncoder::new(), &samples, 1, 22050);
    }
}

#[test]
fn test_unsupported_channel_counts() {
    let samples = vec![0i16; 30];
    for channels in [0, 3, 6] {
        assert!(matches!(
            AudioEncoder::new().encode(&samples, channels, 44100),
            Err(libgol::Error::Unsupported(_))
        ));
    }
}

#[test]
fn test_odd_sample_count_for_stereo() {
    let samples = vec![0i16; 31];
    assert!(matches!(
        AudioEncoder::new().encode(&samples, 2, 44100),
        Err(libgol::Error::InvalidParameter(_))
    ));
}

#[test]
fn test_fixed_parameter_out_of_range() {
    let samples = vec![0i16; 16];
    for m in [0, 65536, u32::MAX] {
        assert!(matches!(
            AudioEncoder::new()
                .with_fixed_parameter(m)
                .encode(&samples, 1, 44100),
            Err(libgol::Error::InvalidParameter(_))
        ));
    }
}

mod mid_side_transform {
    use super::audio::{from_mid_side, to_mid_side};

    fn check_pair(l: i32, r: i32) {
        let (mid, side) = to_mid_side(&[l], &[r]);
        let (left, right) = from_mid_side(&mid, &side);
        assert_eq!((left[0], right[0]), (l, r), "pair ({}, {})", l, r);
    }

    #[test]
    fn test_known_pairs() {
        // Even sum: no rounding bit.
        let (mid, side) = to_mid_side(&[100], &[50]);
        assert_eq!((mid[0], side[0]), (75, 50));
        check_pair(100, 50);

        // Odd sum: the side parity restores the dropped bit.
        let (mid, side) = to_mid_side(&[100], &[51]);
        assert_eq!((mid[0], side[0]), (75, 49));
        check_pair(100, 51);
    }

    #[test]
    fn test_extreme_corners() {
        for &(l, r) in &[
            (32767, 32767),
            (32767, -32768),
            (-32768, 32767),
            (-32768, -32768),
            (0, 0),
            (0, -1),
            (-1, 0),
        ] {
            check_pair(l, r);
        }
    }

    #[test]
    fn test_sampled_grid() {
        // Coarse sweep over the full 16-bit square, both parities.
        let mut l = -32768;
        while l <= 32767 {
            let mut r = -32768;
            while r <= 32767 {
                check_pair(l, r);
                check_pair(l, r.saturating_add(1).min(32767));
                r += 4093;
            }
            l += 4093;
        }
    }
}
