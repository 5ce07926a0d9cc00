//! # Sample Converter Usage Example
//!
//! Demonstrates building a converter for an interleaved 16-bit stream and a
//! low-aligned 20-in-32 stream, then normalizing a synthetic sine wave.
//!
//! Run with: `cargo run --example convert_demo --package core-convert`

use core_convert::{
    Converter, Endianness, InputPlane, OutputPlane, SampleAlignment, StreamFormat,
};

fn main() {
    let sample_rate = 44100u32;
    let frames = 64usize;

    // ========================================================================
    // Interleaved 16-bit signed stereo
    // ========================================================================

    let mut raw = Vec::with_capacity(frames * 4);
    for i in 0..frames {
        let t = i as f64 / sample_rate as f64;
        let sample = ((2.0 * std::f64::consts::PI * 440.0 * t).sin() * 0.3 * 32767.0) as i16;
        raw.extend_from_slice(&sample.to_le_bytes()); // left
        raw.extend_from_slice(&sample.to_le_bytes()); // right
    }

    let format = StreamFormat::packed_int(16, true, Endianness::Little, sample_rate, 2, true);
    println!("source:      {format}");

    let converter = Converter::new(format).expect("supported layout");
    println!("destination: {}", converter.destination_format());

    let input = [InputPlane::new(&raw, 2)];
    let mut left = vec![0.0f64; frames];
    let mut right = vec![0.0f64; frames];
    let mut output = [OutputPlane::new(&mut left), OutputPlane::new(&mut right)];

    let produced = converter.convert(&input, &mut output, frames).unwrap();
    println!(
        "converted {produced} frames; first left samples: {:?}",
        &output[0].samples()[..4]
    );

    // ========================================================================
    // Low-aligned 20-bit in a 4-byte container (a common driver wire format)
    // ========================================================================

    let peak = (1i32 << 19) - 1;
    let mut raw = Vec::with_capacity(frames * 4);
    for i in 0..frames {
        let t = i as f64 / sample_rate as f64;
        let sample = ((2.0 * std::f64::consts::PI * 440.0 * t).sin() * 0.3 * f64::from(peak))
            as i32;
        raw.extend_from_slice(&((sample as u32) & 0x000F_FFFF).to_le_bytes());
    }

    let format = StreamFormat::aligned_int(
        20,
        4,
        SampleAlignment::Low,
        true,
        Endianness::Little,
        sample_rate,
        1,
        false,
    );
    println!("source:      {format}");

    let converter = Converter::new(format).expect("supported layout");
    let input = [InputPlane::new(&raw, 1)];
    let mut mono = vec![0.0f64; frames];
    let mut output = [OutputPlane::new(&mut mono)];

    let produced = converter.convert(&input, &mut output, frames).unwrap();
    println!(
        "converted {produced} frames; first samples: {:?}",
        &output[0].samples()[..4]
    );
}
