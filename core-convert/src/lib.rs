//! # Sample-Format Normalization
//!
//! Converts raw PCM audio of any supported physical layout into canonical
//! planar, 64-bit floating-point audio normalized to roughly `[-1.0, 1.0]`.
//!
//! ## Overview
//!
//! Audio arrives from drivers and files in a combinatorial variety of
//! encodings: 8/16/24/32-bit integers, signed or unsigned, little- or
//! big-endian, packed tightly or padded inside a wider container with the
//! significant bits at either end, interleaved or one buffer per channel.
//! This crate reduces all of them to one representation:
//!
//! - Layout: planar (one buffer per channel)
//! - Format: `f64`, native byte order
//! - Range: sample value divided by the signed full-scale magnitude
//!   `2^(bits - 1)`
//!
//! The [`Converter`] is built once from an immutable [`StreamFormat`] and then
//! invoked repeatedly with caller-owned buffers. It never allocates, blocks,
//! or retains buffer pointers, so it is safe to drive directly from a
//! real-time audio callback.
//!
//! ## Example
//!
//! ```rust
//! use core_convert::{Converter, Endianness, InputPlane, OutputPlane, StreamFormat};
//!
//! // Interleaved 16-bit signed little-endian stereo.
//! let format = StreamFormat::packed_int(16, true, Endianness::Little, 44100, 2, true);
//! let converter = Converter::new(format).expect("supported layout");
//!
//! let raw: [u8; 8] = [0x00, 0x40, 0x00, 0xC0, 0xFF, 0x7F, 0x00, 0x80];
//! let input = [InputPlane::new(&raw, 2)];
//!
//! let mut left = [0.0f64; 2];
//! let mut right = [0.0f64; 2];
//! let mut output = [OutputPlane::new(&mut left), OutputPlane::new(&mut right)];
//!
//! let frames = converter.convert(&input, &mut output, 2).unwrap();
//! assert_eq!(frames, 2);
//! ```

pub mod buffers;
pub mod convert;
pub mod error;
pub mod format;

pub use buffers::{InputPlane, OutputPlane};
pub use convert::Converter;
pub use error::{ConvertError, Result};
pub use format::{Endianness, PcmEncoding, SampleAlignment, StreamFormat};
